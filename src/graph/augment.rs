use super::{
    adjacency::{Adjacency, Origin},
    matching::Matching,
    shortest_path::ShortestPaths,
    Weight,
};
use crate::{Error, Result};

/// Copy `adjacency` and add one more traversal of every edge along the shortest path between each matched pair.
///
/// `odd` are the matched vertices and `paths[i]` holds the shortest paths from `odd[i]`.
/// Both ends of a path gain one degree and every vertex inside it gains two, so matching all odd-degree
/// vertices leaves every degree even.
pub fn augment<W: Weight>(
    adjacency: &Adjacency<W>,
    odd: &[usize],
    matching: &Matching<W>,
    paths: &[ShortestPaths<W>],
) -> Result<Adjacency<W>> {
    if odd.len() != paths.len() {
        return Err(Error::structural(format!(
            "{} matched vertices but {} shortest path tables",
            odd.len(),
            paths.len()
        )));
    }

    let mut augmented = adjacency.clone();
    for &(i, j) in &matching.pairs {
        let path = paths[i].path_to(odd[j]).ok_or_else(|| {
            Error::structural(format!(
                "matched vertex {} has no recorded path to {}",
                odd[i], odd[j]
            ))
        })?;
        for hop in path {
            let original = adjacency.edge(hop.edge);
            augmented.add_edge(
                hop.from,
                hop.to,
                original.weight,
                Origin::Duplicate(original.origin.index()),
            );
        }
    }

    if let Some(vertex) = augmented.odd_vertices().first() {
        return Err(Error::structural(format!(
            "vertex {vertex} still has odd degree {} after augmentation",
            augmented.degree(*vertex)
        )));
    }
    Ok(augmented)
}
