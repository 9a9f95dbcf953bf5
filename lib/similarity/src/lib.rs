//! # revmatch Similarity
//!
//! Topical relevance between papers and reviewers.
//!
//! - [`Similarity`] - the scoring seam; any `Fn(&Paper, &Reviewer) -> f64` is one
//! - [`ProfileSimilarity`] - cosine between the paper embedding and the reviewer's
//!   category vectors, collapsed with a [`ProfileAggregation`]
//! - [`ScoreTable`] - every pair scored once, plus the per-paper optimistic bounds
//!   the branch-and-bound search needs
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Paper     │────>│ Similarity  │────>│ ScoreTable  │
//! │  embedding  │     │  (scorer)   │     │ (p x r, f64)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                    ^                   │
//! ┌─────────────┐            │            ┌─────────────┐
//! │  Reviewer   │────────────┘            │ best-k bound│
//! │  profile    │                         │ per paper   │
//! └─────────────┘                         └─────────────┘
//! ```

pub mod scorer;
pub mod table;

pub use scorer::{ProfileAggregation, ProfileSimilarity, Similarity};
pub use table::ScoreTable;
