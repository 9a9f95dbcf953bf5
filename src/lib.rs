//! # revmatch
//!
//! Exact reviewer assignment for peer review.
//!
//! revmatch assigns exactly `k` reviewers to every submitted paper so that the
//! total topical similarity between papers and their reviewers is maximal,
//! while conflict-of-interest and workload rules hold. The search is a
//! best-first branch-and-bound and returns a proven optimum, or says the
//! instance is infeasible.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! revmatch --papers papers.json --reviewers reviewers.json -k 2
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use revmatch::prelude::*;
//!
//! let encoder = HashingEncoder::new(32);
//! let papers = build_papers(
//!     vec![PaperRecord {
//!         title: "Sparse retrieval".to_string(),
//!         authors: ["Alice".to_string()].into_iter().collect(),
//!         ..Default::default()
//!     }],
//!     &encoder,
//! )
//! .unwrap();
//! let reviewers = build_reviewers(
//!     ["Alice", "Bob"]
//!         .into_iter()
//!         .map(|name| ReviewerRecord {
//!             full_name: name.to_string(),
//!             categories: ["retrieval".to_string()].into_iter().collect(),
//!             ..Default::default()
//!         })
//!         .collect(),
//!     &encoder,
//! )
//! .unwrap();
//!
//! let matcher = Matcher::new(
//!     MatcherConfig::new(1),
//!     &papers,
//!     &reviewers,
//!     &ConstraintRegistry::new(),
//! )
//! .unwrap();
//! let matching = matcher.solve_by_profile().unwrap();
//! assert_eq!(matching.assignment.reviewers_of("Sparse retrieval"), vec!["Bob"]);
//! ```
//!
//! ## Crate Structure
//!
//! - `revmatch-core` - Vectors, entities, assignments, encoders, errors
//! - `revmatch-similarity` - Paper/reviewer scoring and the memoized score table
//! - `revmatch-constraints` - Feasibility rules and the named registry
//! - `revmatch-matcher` - The branch-and-bound search

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub use revmatch_core::{
    build_papers, build_reviewers, load_records, Assignment, CategoryProfile, Encoder,
    EncoderCache, EncoderConfig, EntityMap, Error, HashingEncoder, Paper, PaperRecord, Result,
    ReviewGroup, Reviewer, ReviewerRecord, Vector,
};

pub use revmatch_similarity::{ProfileAggregation, ProfileSimilarity, ScoreTable, Similarity};

pub use revmatch_constraints::{
    Constraint, ConstraintContext, ConstraintRegistry, ConstraintSet, PaperConstraint,
    BUILTIN_CONSTRAINTS,
};

pub use revmatch_matcher::{
    match_by_branch_and_bound, Matcher, MatcherConfig, Matching, NoopObserver, SearchObserver,
    SearchStats,
};

/// Everything a run needs: matching knobs plus the encoder to build entities with
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(flatten)]
    pub matcher: MatcherConfig,
    #[serde(default)]
    pub encoder: EncoderConfig,
}

impl RunConfig {
    /// Read a JSON config file; missing fields take their defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Ok(serde_json::from_slice(&data)?)
    }
}

/// Load paper and reviewer records from JSON files, encode them and solve.
///
/// Constraint names are checked before any file is read.
pub fn match_files<P: AsRef<Path>, Q: AsRef<Path>>(
    config: &RunConfig,
    papers_path: P,
    reviewers_path: Q,
    encoders: &EncoderCache,
) -> Result<Matching> {
    let registry = ConstraintRegistry::new();
    if let Some(unknown) = config
        .matcher
        .constraints
        .iter()
        .find(|name| !registry.contains(name))
    {
        return Err(Error::UnknownConstraint(unknown.clone()));
    }

    let encoder = encoders.get(&config.encoder)?;
    let papers = build_papers(load_records(papers_path)?, encoder.as_ref())?;
    let reviewers = build_reviewers(load_records(reviewers_path)?, encoder.as_ref())?;
    info!(
        "Built {} papers and {} reviewers with encoder {} ({} dims)",
        papers.len(),
        reviewers.len(),
        encoder.model_name(),
        encoder.dimension()
    );

    let matcher = Matcher::new(config.matcher.clone(), &papers, &reviewers, &registry)?;
    matcher.solve_by_profile()
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        build_papers, build_reviewers, load_records, match_by_branch_and_bound, match_files,
        Assignment, ConstraintRegistry, EncoderCache, EncoderConfig, EntityMap, Error,
        HashingEncoder, Matcher, MatcherConfig, Matching, Paper, PaperRecord, ProfileAggregation,
        ProfileSimilarity, Result, Reviewer, ReviewerRecord, RunConfig, Vector,
    };
}
