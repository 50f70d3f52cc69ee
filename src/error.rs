use thiserror::Error as ThisError;

#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
    /// Empty edge list or a starting vertex that is not in the graph
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// No path exists between two vertices
    #[error("graph is disconnected: no path from {from} to {to}")]
    Disconnected { from: String, to: String },
    /// An internal invariant broke, i.e. a bug rather than bad input
    #[error("structural inconsistency: {0}")]
    Structural(String),
    /// Matching this many odd-degree vertices is exponential beyond reason
    #[error("{odd_vertices} odd-degree vertices exceeds the ceiling of {ceiling}")]
    Intractable { odd_vertices: usize, ceiling: usize },
    #[error("weight overflow while summing path or tour costs")]
    WeightOverflow,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural(message.into())
    }

    pub(crate) fn disconnected(from: &impl std::fmt::Debug, to: &impl std::fmt::Debug) -> Self {
        Self::Disconnected {
            from: format!("{from:?}"),
            to: format!("{to:?}"),
        }
    }
}
