use rayon::prelude::*;
use serde::Serialize;
use std::{borrow::Cow, fmt::Debug, hash::Hash};
use tracing::{debug, info};

use crate::{
    graph::{
        adjacency::{build_adjacency, Adjacency, Edge, Vertices},
        augment::augment,
        euler::eulerian_circuit,
        matching::{minimum_weight_perfect_matching, Matching},
        shortest_path::{dijkstra, ShortestPaths},
        Weight,
    },
    Error, Result, SolverConfig,
};

/// One edge traversal of the tour
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step<L> {
    pub label: L,
    /// Whether this is an extra traversal of an edge already walked elsewhere in the tour
    pub duplicate: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Solution<V, L, W> {
    /// Sum of the weights of every traversal, original and duplicate
    pub total_cost: W,
    /// Extra cost of the duplicated shortest paths
    pub matching_cost: W,
    pub odd_vertices: Vec<V>,
    /// Odd-degree vertices joined by a duplicated shortest path
    pub pairs: Vec<(V, V)>,
    /// Closed walk, first and last vertex are the start
    pub tour: Vec<V>,
    /// `trail[i]` is the edge walked from `tour[i]` to `tour[i + 1]`
    pub trail: Vec<Step<L>>,
}

/// Find a minimum cost closed walk over `edges` that starts and ends at `start`, traversing every edge at least once.
///
/// When `start` is `None`, the walk starts at the first vertex of the first edge.
pub fn solve<V, L, W>(
    edges: &[Edge<V, L, W>],
    start: Option<&V>,
    config: &SolverConfig,
) -> Result<Solution<V, L, W>>
where
    V: Clone + Eq + Hash + Debug,
    L: Clone,
    W: Weight,
{
    if edges.is_empty() {
        return Err(Error::invalid_input("edge list is empty"));
    }

    let (vertices, adjacency) = build_adjacency(edges);
    let start = match start {
        Some(label) => vertices.index_of(label).ok_or_else(|| {
            Error::invalid_input(format!("starting vertex {label:?} is not in the graph"))
        })?,
        None => 0,
    };
    if let Some(unreachable) = adjacency.first_unreachable_from(start) {
        return Err(Error::disconnected(
            vertices.label(start),
            vertices.label(unreachable),
        ));
    }

    let odd = adjacency.odd_vertices();
    info!(
        vertices = vertices.len(),
        edges = adjacency.edge_count(),
        odd_vertices = odd.len(),
        "Built adjacency"
    );

    let (augmented, matching) = if odd.is_empty() {
        debug!("All degrees are even, skipping matching");
        (Cow::Borrowed(&adjacency), Matching::empty())
    } else {
        let ceiling = config.odd_vertex_ceiling();
        if odd.len() > ceiling {
            return Err(Error::Intractable {
                odd_vertices: odd.len(),
                ceiling,
            });
        }

        let paths = shortest_paths_from(&adjacency, &odd, config.parallel);
        let distances = distance_matrix(&vertices, &odd, &paths)?;
        let matching = minimum_weight_perfect_matching(&distances)?;
        debug!(cost = ?matching.cost, pairs = matching.pairs.len(), "Matched odd vertices");

        let augmented = augment(&adjacency, &odd, &matching, &paths)?;
        debug!(
            duplicated = augmented.edge_count() - adjacency.edge_count(),
            "Augmented graph"
        );
        (Cow::Owned(augmented), matching)
    };

    let circuit = eulerian_circuit(&augmented, start)?;
    let total_cost = augmented.total_weight()?;
    info!(cost = ?total_cost, steps = circuit.edges.len(), "Found tour");

    let label = |vertex: usize| vertices.label(vertex).clone();
    Ok(Solution {
        total_cost,
        matching_cost: matching.cost,
        odd_vertices: odd.iter().copied().map(label).collect(),
        pairs: matching
            .pairs
            .iter()
            .map(|&(i, j)| (label(odd[i]), label(odd[j])))
            .collect(),
        tour: circuit.vertices.iter().copied().map(label).collect(),
        trail: circuit
            .edges
            .iter()
            .map(|&edge| {
                let origin = augmented.edge(edge).origin;
                Step {
                    label: edges[origin.index()].label.clone(),
                    duplicate: origin.is_duplicate(),
                }
            })
            .collect(),
    })
}

/// Run Dijkstra once per source. The runs only read `adjacency`, so they can go wide.
fn shortest_paths_from<W: Weight>(
    adjacency: &Adjacency<W>,
    sources: &[usize],
    parallel: bool,
) -> Vec<ShortestPaths<W>> {
    if parallel {
        sources
            .par_iter()
            .map(|&source| dijkstra(adjacency, source))
            .collect()
    } else {
        sources
            .iter()
            .map(|&source| dijkstra(adjacency, source))
            .collect()
    }
}

/// Pairwise shortest distances between the odd vertices.
///
/// A missing distance is [Error::WeightOverflow] if Dijkstra dropped an overflowing path, else [Error::Disconnected].
fn distance_matrix<V: Debug, W: Weight>(
    vertices: &Vertices<V>,
    odd: &[usize],
    paths: &[ShortestPaths<W>],
) -> Result<Vec<Vec<W>>> {
    odd.iter()
        .zip(paths)
        .map(|(&from, paths)| {
            odd.iter()
                .map(|&to| {
                    paths.distance(to).ok_or_else(|| {
                        if paths.overflowed() {
                            Error::WeightOverflow
                        } else {
                            Error::disconnected(vertices.label(from), vertices.label(to))
                        }
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}
