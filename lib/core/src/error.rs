use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown constraint: {0}")]
    UnknownConstraint(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },

    #[error("Unknown {kind}: {id}")]
    UnknownEntity { kind: &'static str, id: String },

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Encoder error: {0}")]
    Encoder(String),

    /// The frontier ran dry: no assignment satisfies every constraint.
    #[error("No feasible assignment for {papers} papers ({expanded} nodes expanded)")]
    Infeasible { papers: usize, expanded: u64 },

    #[error("Assignment violates constraints: {}", .0.join(", "))]
    ConstraintViolation(Vec<String>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// True for errors raised while validating inputs, before any search work.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::UnknownConstraint(_) | Error::InvalidConfig(_))
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, Error::Infeasible { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
