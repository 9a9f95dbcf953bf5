//! Paper/reviewer relevance scoring
//!
//! Scores are plain `f64` relevance values; higher means more relevant. The
//! objective of the matcher is the sum of these scores, so scorers must be
//! deterministic and free of side effects.

use revmatch_core::{Paper, Reviewer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Relevance between a paper and a reviewer
pub trait Similarity: Send + Sync {
    fn similarity(&self, paper: &Paper, reviewer: &Reviewer) -> f64;
}

impl<F> Similarity for F
where
    F: Fn(&Paper, &Reviewer) -> f64 + Send + Sync,
{
    fn similarity(&self, paper: &Paper, reviewer: &Reviewer) -> f64 {
        self(paper, reviewer)
    }
}

/// How per-category cosine similarities collapse into one reviewer score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileAggregation {
    /// Best matching category: a reviewer is as relevant as their closest expertise
    #[default]
    Max,
    /// Average over all categories: broad reviewers are diluted
    Mean,
}

impl FromStr for ProfileAggregation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "max" => Ok(ProfileAggregation::Max),
            "mean" => Ok(ProfileAggregation::Mean),
            other => Err(format!("unknown aggregation '{}', expected max or mean", other)),
        }
    }
}

impl fmt::Display for ProfileAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileAggregation::Max => write!(f, "max"),
            ProfileAggregation::Mean => write!(f, "mean"),
        }
    }
}

/// Cosine similarity between the paper embedding and the reviewer's category profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfileSimilarity {
    aggregation: ProfileAggregation,
}

impl ProfileSimilarity {
    pub fn new(aggregation: ProfileAggregation) -> Self {
        Self { aggregation }
    }
}

impl Similarity for ProfileSimilarity {
    fn similarity(&self, paper: &Paper, reviewer: &Reviewer) -> f64 {
        let score = match self.aggregation {
            ProfileAggregation::Max => reviewer.profile.max_cosine(&paper.embedding),
            ProfileAggregation::Mean => reviewer.profile.mean_cosine(&paper.embedding),
        };
        f64::from(score)
    }
}
