//! The five built-in feasibility rules
//!
//! Four of them are per paper; [`ReviewerUnderload`] is the one global rule
//! and is checked cumulatively through the assignment's load counters.

use crate::constraint::{Constraint, ConstraintContext, PaperConstraint};
use revmatch_core::{Assignment, ReviewGroup};

pub const REVIEWER_UNDERLOAD: &str = "reviewer_underload";
pub const REVIEWER_NOT_AUTHOR: &str = "reviewer_not_author";
pub const UNIQUE_REVIEWERS: &str = "unique_reviewers";
pub const REVIEWERS_FROM_DIFFERENT_INSTITUTIONS: &str = "reviewers_from_different_institutions";
pub const REVIEWERS_NOT_AUTHORS_INSTITUTIONS: &str = "reviewers_not_authors_institutions";

/// Registration order of the built-ins
pub const BUILTIN_CONSTRAINTS: [&str; 5] = [
    REVIEWER_UNDERLOAD,
    REVIEWER_NOT_AUTHOR,
    UNIQUE_REVIEWERS,
    REVIEWERS_FROM_DIFFERENT_INSTITUTIONS,
    REVIEWERS_NOT_AUTHORS_INSTITUTIONS,
];

/// No reviewer sits on more than `max_load` groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewerUnderload {
    max_load: usize,
}

impl ReviewerUnderload {
    pub fn new(max_load: usize) -> Self {
        Self { max_load }
    }

    pub fn max_load(&self) -> usize {
        self.max_load
    }
}

impl Constraint for ReviewerUnderload {
    fn name(&self) -> &str {
        REVIEWER_UNDERLOAD
    }

    fn is_satisfied(&self, assignment: &Assignment, _ctx: &ConstraintContext<'_>) -> bool {
        assignment.max_load() <= self.max_load
    }

    fn admits(
        &self,
        assignment: &Assignment,
        latest: &ReviewGroup,
        _ctx: &ConstraintContext<'_>,
    ) -> bool {
        // Only the loads of the newest group's reviewers went up
        latest
            .reviewers()
            .all(|reviewer| assignment.load_of(reviewer) <= self.max_load)
    }
}

/// A paper is never reviewed by one of its own authors
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewerNotAuthor;

impl PaperConstraint for ReviewerNotAuthor {
    fn name(&self) -> &str {
        REVIEWER_NOT_AUTHOR
    }

    fn check_group(&self, group: &ReviewGroup, ctx: &ConstraintContext<'_>) -> bool {
        let Some(paper) = ctx.papers.get(group.paper()) else {
            return false;
        };
        !group.reviewers().any(|reviewer| paper.is_author(reviewer))
    }
}

/// No reviewer appears twice in one group
#[derive(Debug, Clone, Copy, Default)]
pub struct UniqueReviewers;

impl PaperConstraint for UniqueReviewers {
    fn name(&self) -> &str {
        UNIQUE_REVIEWERS
    }

    fn check_group(&self, group: &ReviewGroup, _ctx: &ConstraintContext<'_>) -> bool {
        let reviewers: Vec<&str> = group.reviewers().collect();
        all_distinct(&reviewers)
    }
}

/// Reviewers of one paper come from pairwise different institutions.
///
/// Institutions compare as trimmed strings, so two blanks are shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewersFromDifferentInstitutions;

impl PaperConstraint for ReviewersFromDifferentInstitutions {
    fn name(&self) -> &str {
        REVIEWERS_FROM_DIFFERENT_INSTITUTIONS
    }

    fn check_group(&self, group: &ReviewGroup, ctx: &ConstraintContext<'_>) -> bool {
        let mut institutions = Vec::with_capacity(group.len());
        for id in group.reviewers() {
            let Some(reviewer) = ctx.reviewers.get(id) else {
                return false;
            };
            institutions.push(reviewer.institution.as_str());
        }
        all_distinct(&institutions)
    }
}

/// No reviewer works at one of the paper's author institutions
#[derive(Debug, Clone, Copy, Default)]
pub struct ReviewersNotAuthorsInstitutions;

impl PaperConstraint for ReviewersNotAuthorsInstitutions {
    fn name(&self) -> &str {
        REVIEWERS_NOT_AUTHORS_INSTITUTIONS
    }

    fn check_group(&self, group: &ReviewGroup, ctx: &ConstraintContext<'_>) -> bool {
        let Some(paper) = ctx.papers.get(group.paper()) else {
            return false;
        };
        group.reviewers().all(|id| match ctx.reviewers.get(id) {
            Some(reviewer) => !paper.has_institution(&reviewer.institution),
            None => false,
        })
    }
}

/// Groups hold a handful of entries; a quadratic scan beats hashing here
fn all_distinct(items: &[&str]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(i, a)| items[i + 1..].iter().all(|b| a != b))
}
