//! # revmatch Constraints
//!
//! Hard feasibility rules for reviewer assignments and the registry that
//! resolves them by name.
//!
//! Every rule implements [`Constraint`]: a pure predicate over an
//! [`Assignment`](revmatch_core::Assignment) plus an explicit
//! [`ConstraintContext`]. Rules must be monotonic (a violated partial
//! assignment cannot be repaired by assigning more papers) so the search can
//! prune the moment a group breaks one.
//!
//! ## Built-in rules
//!
//! | name | rule |
//! |------|------|
//! | `reviewer_underload` | no reviewer sits on more than `max_reviewer_load` groups |
//! | `reviewer_not_author` | no reviewer authored the paper |
//! | `unique_reviewers` | no reviewer twice in one group |
//! | `reviewers_from_different_institutions` | reviewers of a paper come from different institutions |
//! | `reviewers_not_authors_institutions` | no reviewer shares an institution with the authors |
//!
//! ## Example
//!
//! ```rust
//! use revmatch_constraints::{ConstraintContext, ConstraintRegistry};
//! use revmatch_core::{EntityMap, Paper, Reviewer};
//!
//! let papers: EntityMap<Paper> = EntityMap::new();
//! let reviewers: EntityMap<Reviewer> = EntityMap::new();
//! let ctx = ConstraintContext::new(&papers, &reviewers, 1);
//!
//! // Unknown names fail before any search work
//! let err = ConstraintRegistry::new().resolve(&["no_such_rule"], ctx).unwrap_err();
//! assert!(err.is_config());
//! ```

pub mod builtin;
pub mod constraint;
pub mod registry;

pub use builtin::{
    ReviewerNotAuthor, ReviewerUnderload, ReviewersFromDifferentInstitutions,
    ReviewersNotAuthorsInstitutions, UniqueReviewers, BUILTIN_CONSTRAINTS,
    REVIEWERS_FROM_DIFFERENT_INSTITUTIONS, REVIEWERS_NOT_AUTHORS_INSTITUTIONS,
    REVIEWER_NOT_AUTHOR, REVIEWER_UNDERLOAD, UNIQUE_REVIEWERS,
};
pub use constraint::{Constraint, ConstraintContext, PaperConstraint};
pub use registry::{ConstraintFactory, ConstraintRegistry, ConstraintSet};
