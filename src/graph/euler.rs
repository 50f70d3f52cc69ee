use bitvec::prelude::*;

use super::{adjacency::Adjacency, Weight};
use crate::{Error, Result};

/// A closed walk: `vertices[i]` and `vertices[i + 1]` are joined by `edges[i]`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Circuit {
    pub vertices: Vec<usize>,
    pub edges: Vec<usize>,
}

/// Find a closed walk from `start` that uses every edge of `adjacency` exactly once, in O(V + E) time.
///
/// Walks unused edges until stuck, which can only happen back at the vertex the walk left from when all degrees are even.
/// Backtracking then emits the walk in reverse, and any vertex on it that still has unused edges starts a new
/// sub-walk that ends up spliced in at that position.
///
/// If the graph is not connected or has an odd-degree vertex, some edge is left unused or the walk does not
/// close; both are reported as [Error::Structural] rather than returning part of a tour.
pub fn eulerian_circuit<W: Weight>(adjacency: &Adjacency<W>, start: usize) -> Result<Circuit> {
    if adjacency.edge_count() == 0 {
        return Err(Error::invalid_input("graph has no edges to walk"));
    }
    if start >= adjacency.vertex_count() {
        return Err(Error::invalid_input(format!(
            "start vertex {start} is out of range for {} vertices",
            adjacency.vertex_count()
        )));
    }

    let mut used = bitvec![0; adjacency.edge_count()];
    // Position of the next possibly unused arc of each vertex
    let mut cursor = vec![0; adjacency.vertex_count()];
    // Vertex and the edge taken to get there
    let mut stack: Vec<(usize, Option<usize>)> = vec![(start, None)];

    let mut vertices = Vec::with_capacity(adjacency.edge_count() + 1);
    let mut edges = Vec::with_capacity(adjacency.edge_count());
    while let Some(&(current, _)) = stack.last() {
        let arcs = adjacency.arcs(current);
        while cursor[current] < arcs.len() && used[arcs[cursor[current]].edge] {
            cursor[current] += 1;
        }

        match arcs.get(cursor[current]) {
            Some(arc) => {
                used.set(arc.edge, true);
                stack.push((arc.to, Some(arc.edge)));
            }
            None => {
                if let Some((vertex, edge)) = stack.pop() {
                    vertices.push(vertex);
                    edges.extend(edge);
                }
            }
        }
    }
    vertices.reverse();
    edges.reverse();

    if edges.len() != adjacency.edge_count() {
        return Err(Error::structural(format!(
            "circuit from {start} used {} of {} edges",
            edges.len(),
            adjacency.edge_count()
        )));
    }
    if vertices.last() != Some(&start) {
        return Err(Error::structural(format!(
            "walk from {start} ended at {:?} instead of returning",
            vertices.last()
        )));
    }

    Ok(Circuit { vertices, edges })
}
