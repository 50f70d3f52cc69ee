//! Solve the [Chinese Postman Problem](https://en.wikipedia.org/wiki/Chinese_postman_problem):
//! find the shortest closed walk that traverses every edge of a connected, undirected graph at least once.
//!
//! Odd-degree vertices are paired up by a minimum-weight perfect matching over their shortest path distances,
//! the edges along each matched path are duplicated, and an Eulerian circuit of the resulting multigraph is the tour.

pub mod config;
pub mod error;
pub mod graph;
mod postman;

pub use config::SolverConfig;
pub use error::{Error, Result};
pub use graph::{adjacency::Edge, Weight};
pub use postman::{solve, Solution, Step};
