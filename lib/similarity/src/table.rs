//! Memoized pairwise scores
//!
//! The search scores the same (paper, reviewer) pair in many candidate groups,
//! so every pair is scored once up front and looked up by position afterwards.

use crate::scorer::Similarity;
use rayon::prelude::*;
use revmatch_core::{EntityMap, Error, Paper, Result, Reviewer};

/// Dense `papers x reviewers` score matrix indexed by entity position
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    rows: Vec<Vec<f64>>,
    reviewers: usize,
}

impl ScoreTable {
    /// Score every pair, one row per paper (rows are computed in parallel)
    pub fn build<S: Similarity + ?Sized>(
        papers: &EntityMap<Paper>,
        reviewers: &EntityMap<Reviewer>,
        scorer: &S,
    ) -> Self {
        let rows: Vec<Vec<f64>> = papers
            .as_slice()
            .par_iter()
            .map(|paper| {
                reviewers
                    .iter()
                    .map(|reviewer| scorer.similarity(paper, reviewer))
                    .collect::<Vec<f64>>()
            })
            .collect();

        Self {
            rows,
            reviewers: reviewers.len(),
        }
    }

    /// Build from precomputed rows; all rows must have the same length
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let reviewers = rows.first().map(Vec::len).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|row| row.len() != reviewers) {
            return Err(Error::InvalidDimension {
                expected: reviewers,
                actual: bad.len(),
            });
        }
        Ok(Self { rows, reviewers })
    }

    #[inline]
    pub fn papers(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn reviewers(&self) -> usize {
        self.reviewers
    }

    #[inline]
    pub fn score(&self, paper: usize, reviewer: usize) -> f64 {
        self.rows[paper][reviewer]
    }

    #[inline]
    pub fn row(&self, paper: usize) -> &[f64] {
        &self.rows[paper]
    }

    /// Contribution of a reviewer group to one paper: the sum of its pair scores
    #[inline]
    pub fn group_score(&self, paper: usize, group: &[usize]) -> f64 {
        let row = &self.rows[paper];
        group.iter().map(|&r| row[r]).sum()
    }

    /// Best contribution any `k` distinct reviewers can make to `paper`,
    /// ignoring constraints.
    ///
    /// The contribution is additive, so the best subset is simply the `k`
    /// highest scores of the row.
    pub fn best_group_score(&self, paper: usize, k: usize) -> f64 {
        let mut row = self.rows[paper].clone();
        row.sort_unstable_by(|a, b| b.total_cmp(a));
        row.iter().take(k).sum()
    }

    /// `bounds[i]` is the sum of [`best_group_score`](Self::best_group_score)
    /// over papers `i..`; `bounds[papers()]` is zero.
    pub fn suffix_bounds(&self, k: usize) -> Vec<f64> {
        let mut bounds = vec![0.0; self.rows.len() + 1];
        for paper in (0..self.rows.len()).rev() {
            bounds[paper] = bounds[paper + 1] + self.best_group_score(paper, k);
        }
        bounds
    }
}
