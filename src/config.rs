use serde::{Deserialize, Serialize};

use crate::graph::matching::MAX_ODD_VERTICES;

/// Default ceiling on the number of odd-degree vertices the solver will match.
///
/// The matching table holds `2^k` entries, so 20 keeps it at roughly a million.
pub const DEFAULT_MAX_ODD_VERTICES: usize = 20;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Graphs with more odd-degree vertices than this are rejected as intractable.
    /// Values above [MAX_ODD_VERTICES] are clamped to it.
    pub max_odd_vertices: usize,
    /// Run the shortest path search from each odd-degree vertex on the rayon thread pool
    pub parallel: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_odd_vertices: DEFAULT_MAX_ODD_VERTICES,
            parallel: true,
        }
    }
}

impl SolverConfig {
    pub fn with_max_odd_vertices(mut self, max_odd_vertices: usize) -> Self {
        self.max_odd_vertices = max_odd_vertices;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The ceiling actually enforced
    pub fn odd_vertex_ceiling(&self) -> usize {
        self.max_odd_vertices.min(MAX_ODD_VERTICES)
    }
}
