//! Reviewer category profiles
//!
//! A reviewer is described by a set of category labels, each encoded to its own
//! vector. Scoring a paper against a profile compares the paper vector with every
//! category vector and then aggregates.

use crate::{Error, Result, Vector};
use serde::{Deserialize, Serialize};

/// One embedding per category label, all of the same dimension
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct CategoryProfile {
    vectors: Vec<Vector>,
}

impl CategoryProfile {
    /// Create a profile from a list of category vectors
    /// All vectors must have the same dimension
    pub fn new(vectors: Vec<Vector>) -> Result<Self> {
        if let Some(first) = vectors.first() {
            let dim = first.dim();
            if dim == 0 {
                return Err(Error::InvalidConfig(
                    "category vectors cannot be empty".to_string(),
                ));
            }
            if let Some(bad) = vectors.iter().find(|v| v.dim() != dim) {
                return Err(Error::InvalidDimension {
                    expected: dim,
                    actual: bad.dim(),
                });
            }
        }

        Ok(Self { vectors })
    }

    /// A profile with no categories; it scores 0.0 against everything
    pub fn empty() -> Self {
        Self::default()
    }

    /// Dimension of each category vector (0 for an empty profile)
    #[inline]
    pub fn dim(&self) -> usize {
        self.vectors.first().map(Vector::dim).unwrap_or(0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Best cosine similarity between `query` and any category vector
    pub fn max_cosine(&self, query: &Vector) -> f32 {
        let mut best = f32::NEG_INFINITY;

        for category in &self.vectors {
            let sim = query.cosine_similarity(category);
            if sim > best {
                best = sim;
            }
        }

        if best > f32::NEG_INFINITY {
            best
        } else {
            0.0
        }
    }

    /// Mean cosine similarity between `query` and the category vectors
    pub fn mean_cosine(&self, query: &Vector) -> f32 {
        if self.vectors.is_empty() {
            return 0.0;
        }

        let total: f32 = self
            .vectors
            .iter()
            .map(|category| query.cosine_similarity(category))
            .sum();

        total / self.vectors.len() as f32
    }
}
