use revmatch_core::{Error, Result};
use revmatch_similarity::ProfileAggregation;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Knobs of a matching run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Size of every review group (`k`)
    pub reviewers_per_paper: usize,
    /// Constraint names to enforce; empty means every registered one
    pub constraints: Vec<String>,
    /// Most groups one reviewer may sit on; `None` uses `reviewers_per_paper`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_reviewer_load: Option<usize>,
    pub aggregation: ProfileAggregation,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            reviewers_per_paper: 2,
            constraints: Vec::new(),
            max_reviewer_load: None,
            aggregation: ProfileAggregation::default(),
        }
    }
}

impl MatcherConfig {
    pub fn new(reviewers_per_paper: usize) -> Self {
        Self {
            reviewers_per_paper,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_constraints<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints = names.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_max_reviewer_load(mut self, max_reviewer_load: usize) -> Self {
        self.max_reviewer_load = Some(max_reviewer_load);
        self
    }

    #[must_use]
    pub fn with_aggregation(mut self, aggregation: ProfileAggregation) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Load limit actually enforced
    pub fn effective_max_load(&self) -> usize {
        self.max_reviewer_load.unwrap_or(self.reviewers_per_paper)
    }

    /// Reject settings no search could honor
    pub fn validate(&self, reviewer_count: usize) -> Result<()> {
        if self.reviewers_per_paper == 0 {
            return Err(Error::InvalidConfig(
                "reviewers_per_paper must be at least 1".to_string(),
            ));
        }
        if self.reviewers_per_paper > reviewer_count {
            return Err(Error::InvalidConfig(format!(
                "reviewers_per_paper is {} but only {} reviewers are available",
                self.reviewers_per_paper, reviewer_count
            )));
        }
        if self.effective_max_load() == 0 {
            return Err(Error::InvalidConfig(
                "max_reviewer_load must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Read a JSON config file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&data)?)
    }
}
