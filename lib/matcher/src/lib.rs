//! # revmatch Matcher
//!
//! Exact reviewer assignment by best-first branch-and-bound.
//!
//! ```text
//! papers ──┐                 ┌── ScoreTable (all pairs, once)
//!          ├── Matcher::new ─┤
//! config ──┘                 └── ConstraintSet (resolved names)
//!                                      │
//!                              search: pop best node
//!                                      │
//!                     expand next paper with every k-combination
//!                                      │
//!                         prune on Constraint::admits, push
//! ```
//!
//! The result is a [`Matching`]: a complete assignment of exactly `k`
//! reviewers per paper that satisfies every selected constraint and has the
//! highest total similarity, or an explicit error.

pub mod combinations;
pub mod config;
pub mod search;

#[cfg(test)]
mod testing;

pub use combinations::{binomial, Combinations};
pub use config::MatcherConfig;
pub use search::{search, Matching, NoopObserver, SearchObserver, SearchStats};

use revmatch_constraints::{ConstraintContext, ConstraintRegistry, ConstraintSet};
use revmatch_core::{EntityMap, Error, Paper, Result, Reviewer};
use revmatch_similarity::{ProfileSimilarity, ScoreTable, Similarity};
use tracing::info;

/// Find the best assignment of `reviewers_per_paper` reviewers to every paper.
///
/// `constraints` must have been resolved against these `papers` and
/// `reviewers` with the same group size.
pub fn match_by_branch_and_bound<S: Similarity + ?Sized>(
    papers: &EntityMap<Paper>,
    reviewers: &EntityMap<Reviewer>,
    constraints: &ConstraintSet<'_>,
    reviewers_per_paper: usize,
    scorer: &S,
) -> Result<Matching> {
    let ctx = constraints.context();
    if ctx.reviewers_per_paper != reviewers_per_paper {
        return Err(Error::InvalidConfig(format!(
            "constraints were resolved for {} reviewers per paper, not {}",
            ctx.reviewers_per_paper, reviewers_per_paper
        )));
    }
    if !std::ptr::eq(ctx.papers, papers) || !std::ptr::eq(ctx.reviewers, reviewers) {
        return Err(Error::InvalidConfig(
            "constraints were resolved against different papers or reviewers".to_string(),
        ));
    }
    ctx.validate()?;

    let table = ScoreTable::build(papers, reviewers, scorer);
    search(constraints, &table, &mut NoopObserver)
}

/// A configured matching run over one set of papers and reviewers
pub struct Matcher<'a> {
    config: MatcherConfig,
    constraints: ConstraintSet<'a>,
}

impl<'a> Matcher<'a> {
    /// Resolve the configured constraints; every configuration error surfaces
    /// here, before any scoring or search work.
    pub fn new(
        config: MatcherConfig,
        papers: &'a EntityMap<Paper>,
        reviewers: &'a EntityMap<Reviewer>,
        registry: &ConstraintRegistry,
    ) -> Result<Self> {
        let ctx = ConstraintContext::new(papers, reviewers, config.reviewers_per_paper)
            .with_max_reviewer_load(config.effective_max_load());
        let constraints = registry.resolve(&config.constraints, ctx)?;
        config.validate(reviewers.len())?;

        info!(
            "Matcher ready: {} papers, {} reviewers, k = {}, max load = {}, {} constraints",
            papers.len(),
            reviewers.len(),
            config.reviewers_per_paper,
            config.effective_max_load(),
            constraints.len()
        );

        Ok(Self {
            config,
            constraints,
        })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn constraints(&self) -> &ConstraintSet<'a> {
        &self.constraints
    }

    pub fn papers(&self) -> &'a EntityMap<Paper> {
        self.constraints.context().papers
    }

    pub fn reviewers(&self) -> &'a EntityMap<Reviewer> {
        self.constraints.context().reviewers
    }

    pub fn solve<S: Similarity + ?Sized>(&self, scorer: &S) -> Result<Matching> {
        self.solve_with_observer(scorer, &mut NoopObserver)
    }

    /// Score with each reviewer's category profile, aggregated as configured
    pub fn solve_by_profile(&self) -> Result<Matching> {
        self.solve(&ProfileSimilarity::new(self.config.aggregation))
    }

    pub fn solve_with_observer<S, O>(&self, scorer: &S, observer: &mut O) -> Result<Matching>
    where
        S: Similarity + ?Sized,
        O: SearchObserver + ?Sized,
    {
        let table = ScoreTable::build(self.papers(), self.reviewers(), scorer);
        self.solve_table(&table, observer)
    }

    /// Search with precomputed pair scores
    pub fn solve_table<O: SearchObserver + ?Sized>(
        &self,
        table: &ScoreTable,
        observer: &mut O,
    ) -> Result<Matching> {
        search(&self.constraints, table, observer)
    }
}

impl std::fmt::Debug for Matcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("config", &self.config)
            .field("constraints", &self.constraints)
            .finish()
    }
}
