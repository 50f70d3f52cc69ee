use bitvec::prelude::*;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};
use std::{collections::VecDeque, hash::Hash};

use super::Weight;
use crate::{Error, Result};

/// An undirected edge as supplied by the caller.
///
/// The label is only carried along for traceability, it has no effect on cost.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge<V, L, W> {
    pub from: V,
    pub to: V,
    pub label: L,
    pub weight: W,
}

impl<V, L, W: Weight> Edge<V, L, W> {
    pub fn new(from: V, to: V, label: L, weight: W) -> Self {
        Self {
            from,
            to,
            label,
            weight,
        }
    }

    pub fn unit(from: V, to: V, label: L) -> Self {
        Self::new(from, to, label, W::one())
    }
}

/// Where an edge of an [Adjacency] came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Index into the caller's edge list
    Original(usize),
    /// Extra traversal of the original edge at this index
    Duplicate(usize),
}

impl Origin {
    pub fn index(self) -> usize {
        match self {
            Origin::Original(index) | Origin::Duplicate(index) => index,
        }
    }

    pub fn is_duplicate(self) -> bool {
        matches!(self, Origin::Duplicate(_))
    }
}

/// One direction of an undirected edge, as seen from the vertex whose list it is in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Arc<W> {
    pub to: usize,
    pub weight: W,
    /// Index into [Adjacency::edges]
    pub edge: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndirectedEdge<W> {
    pub endpoints: [usize; 2],
    pub weight: W,
    pub origin: Origin,
}

/// Vertex labels interned to dense indices in the order they are first seen.
#[derive(Clone, Debug)]
pub struct Vertices<V> {
    labels: Vec<V>,
    index: HashMap<V, usize>,
}

impl<V: Clone + Eq + Hash> Vertices<V> {
    fn new() -> Self {
        Self {
            labels: vec![],
            index: HashMap::default(),
        }
    }

    fn intern(&mut self, label: &V) -> usize {
        if let Some(index) = self.index.get(label) {
            return *index;
        }
        let index = self.labels.len();
        self.labels.push(label.clone());
        self.index.insert(label.clone(), index);
        index
    }

    pub fn index_of(&self, label: &V) -> Option<usize> {
        self.index.get(label).copied()
    }
}

impl<V> Vertices<V> {
    pub fn label(&self, index: usize) -> &V {
        &self.labels[index]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Undirected multigraph over dense vertex indices.
///
/// Every edge appears once in [Adjacency::edges] and once in the arc list of each endpoint
/// (twice in the same list for a self-loop). Parallel edges are kept distinct.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Adjacency<W> {
    arcs: Vec<Vec<Arc<W>>>,
    edges: Vec<UndirectedEdge<W>>,
}

impl<W: Weight> Adjacency<W> {
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            arcs: vec![vec![]; vertex_count],
            edges: vec![],
        }
    }

    /// Insert an edge in both directions, returning its index
    pub(crate) fn add_edge(&mut self, a: usize, b: usize, weight: W, origin: Origin) -> usize {
        let edge = self.edges.len();
        self.edges.push(UndirectedEdge {
            endpoints: [a, b],
            weight,
            origin,
        });
        self.arcs[a].push(Arc { to: b, weight, edge });
        self.arcs[b].push(Arc { to: a, weight, edge });
        edge
    }

    pub fn arcs(&self, vertex: usize) -> &[Arc<W>] {
        &self.arcs[vertex]
    }

    pub fn edges(&self) -> &[UndirectedEdge<W>] {
        &self.edges
    }

    pub fn edge(&self, edge: usize) -> &UndirectedEdge<W> {
        &self.edges[edge]
    }

    pub fn vertex_count(&self) -> usize {
        self.arcs.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.arcs[vertex].len()
    }

    /// Vertices with an odd number of incident edges, in index order
    pub fn odd_vertices(&self) -> Vec<usize> {
        (0..self.vertex_count())
            .filter(|vertex| self.degree(*vertex) % 2 == 1)
            .collect()
    }

    pub fn is_even(&self) -> bool {
        (0..self.vertex_count()).all(|vertex| self.degree(vertex) % 2 == 0)
    }

    /// Sum of all edge weights, counting parallel edges individually
    pub fn total_weight(&self) -> Result<W> {
        self.edges.iter().try_fold(W::zero(), |acc, edge| {
            acc.checked_add(&edge.weight).ok_or(Error::WeightOverflow)
        })
    }

    /// Breadth-first search from `source`, returning the lowest indexed vertex it can't reach
    pub fn first_unreachable_from(&self, source: usize) -> Option<usize> {
        let mut visited = bitvec![0; self.vertex_count()];
        visited.set(source, true);
        let mut bfs = VecDeque::from([source]);
        while let Some(head) = bfs.pop_front() {
            for arc in &self.arcs[head] {
                if !visited[arc.to] {
                    visited.set(arc.to, true);
                    bfs.push_back(arc.to);
                }
            }
        }
        visited.first_zero()
    }

    pub fn is_connected(&self) -> bool {
        self.vertex_count() == 0 || self.first_unreachable_from(0).is_none()
    }
}

/// Intern the endpoints of `edges` and insert each edge in both directions.
///
/// Vertex `0` is always the `from` of the first edge.
pub fn build_adjacency<V, L, W>(edges: &[Edge<V, L, W>]) -> (Vertices<V>, Adjacency<W>)
where
    V: Clone + Eq + Hash,
    W: Weight,
{
    let mut vertices = Vertices::new();
    let endpoints = edges
        .iter()
        .map(|edge| [vertices.intern(&edge.from), vertices.intern(&edge.to)])
        .collect::<Vec<_>>();

    let mut adjacency = Adjacency::with_vertices(vertices.len());
    for (i, (edge, [a, b])) in edges.iter().zip(endpoints).enumerate() {
        adjacency.add_edge(a, b, edge.weight, Origin::Original(i));
    }
    (vertices, adjacency)
}
