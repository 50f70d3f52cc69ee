use num_traits::{PrimInt, Unsigned};
use std::fmt::Debug;

/// Build an [adjacency list](https://en.wikipedia.org/wiki/Adjacency_list) from labeled edges
pub mod adjacency;
/// Duplicate the edges along matched shortest paths so every vertex has even degree
pub mod augment;
/// Find an [Eulerian circuit](https://en.wikipedia.org/wiki/Eulerian_path#Hierholzer's_algorithm) with Hierholzer's algorithm
pub mod euler;
/// Find a [minimum-weight perfect matching](https://en.wikipedia.org/wiki/Matching_(graph_theory)#Maximum-weight_matching) of a small vertex set
pub mod matching;
/// Single-source shortest paths with [Dijkstra's algorithm](https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm)
pub mod shortest_path;

/// Edge weight. Unsigned, so Dijkstra's non-negativity precondition holds by construction.
pub trait Weight: PrimInt + Unsigned + Debug + Send + Sync {}

impl<T> Weight for T where T: PrimInt + Unsigned + Debug + Send + Sync {}
