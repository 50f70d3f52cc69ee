use std::{cmp::Reverse, collections::BinaryHeap};

use super::{adjacency::Adjacency, Weight};

/// A single step along a path, walking `edge` from `from` to `to`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hop {
    pub from: usize,
    pub to: usize,
    pub edge: usize,
}

/// Distances and predecessor links from one source vertex
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortestPaths<W> {
    source: usize,
    distance: Vec<Option<W>>,
    /// Previous vertex and the edge taken from it
    predecessor: Vec<Option<(usize, usize)>>,
    overflowed: bool,
}

impl<W: Weight> ShortestPaths<W> {
    pub fn source(&self) -> usize {
        self.source
    }

    /// `None` if `vertex` is unreachable from the source
    pub fn distance(&self, vertex: usize) -> Option<W> {
        self.distance[vertex]
    }

    pub fn predecessor(&self, vertex: usize) -> Option<(usize, usize)> {
        self.predecessor[vertex]
    }

    /// Whether some relaxation was dropped because its distance didn't fit in `W`.
    ///
    /// A vertex can then be missing a distance even though it is connected to the source.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Walk predecessor links back from `target`, returning the hops in source to target order.
    pub fn path_to(&self, target: usize) -> Option<Vec<Hop>> {
        self.distance(target)?;
        let mut hops = vec![];
        let mut current = target;
        while current != self.source {
            let (from, edge) = self.predecessor[current]?;
            hops.push(Hop {
                from,
                to: current,
                edge,
            });
            current = from;
        }
        hops.reverse();
        Some(hops)
    }
}

/// Label-setting shortest paths from `source` in O((V + E) log(V)) time.
///
/// Among equally short paths, the one whose last hop was relaxed first wins.
/// A path whose length overflows `W` is treated as infinitely long.
pub fn dijkstra<W: Weight>(adjacency: &Adjacency<W>, source: usize) -> ShortestPaths<W> {
    let mut distance = vec![None; adjacency.vertex_count()];
    let mut predecessor = vec![None; adjacency.vertex_count()];
    let mut overflowed = false;
    distance[source] = Some(W::zero());

    let mut priority_queue = BinaryHeap::new();
    priority_queue.push(Reverse((W::zero(), source)));
    while let Some(Reverse((current_distance, current))) = priority_queue.pop() {
        // Stale entry, vertex was since reached by a shorter path
        if distance[current] != Some(current_distance) {
            continue;
        }
        for arc in adjacency.arcs(current) {
            let Some(candidate) = current_distance.checked_add(&arc.weight) else {
                overflowed = true;
                continue;
            };
            if distance[arc.to].map_or(true, |known| candidate < known) {
                distance[arc.to] = Some(candidate);
                predecessor[arc.to] = Some((current, arc.edge));
                priority_queue.push(Reverse((candidate, arc.to)));
            }
        }
    }

    ShortestPaths {
        source,
        distance,
        predecessor,
        overflowed,
    }
}
