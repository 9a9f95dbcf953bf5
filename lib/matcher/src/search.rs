//! Best-first branch-and-bound over partial assignments
//!
//! Papers are assigned one at a time in entity-map order. A node's priority is
//! its accumulated score plus, for every paper still unassigned, the best sum
//! any `k` reviewers could contribute with constraints ignored. That bound
//! never underestimates, so the first complete assignment popped from the
//! frontier is optimal.

use crate::combinations::{binomial, Combinations};
use ordered_float::OrderedFloat;
use revmatch_constraints::ConstraintSet;
use revmatch_core::{Assignment, Error, ReviewGroup, Result};
use revmatch_similarity::ScoreTable;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace, warn};

/// Hook into the search loop
pub trait SearchObserver {
    /// Called for every node taken off the frontier, complete or not
    fn node_popped(&mut self, assignment: &Assignment, score: f64, priority: f64) {
        let _ = (assignment, score, priority);
    }
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Work done by one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Incomplete nodes whose children were generated
    pub expanded: u64,
    /// Candidate children built, pruned or not
    pub generated: u64,
    /// Children rejected by a constraint
    pub pruned: u64,
    /// Largest frontier size seen
    pub max_frontier: usize,
}

/// An optimal complete assignment
#[derive(Debug, Clone, Serialize)]
pub struct Matching {
    pub score: f64,
    pub assignment: Assignment,
    pub stats: SearchStats,
}

/// Frontier entry
struct Node {
    assignment: Assignment,
    score: f64,
    priority: OrderedFloat<f64>,
    seq: u64,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap on priority; among equals the earlier push wins
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run the search over the papers and reviewers `constraints` was resolved
/// against, with pair scores taken from `table`.
pub fn search<O: SearchObserver + ?Sized>(
    constraints: &ConstraintSet<'_>,
    table: &ScoreTable,
    observer: &mut O,
) -> Result<Matching> {
    let ctx = constraints.context();
    ctx.validate()?;

    let papers = ctx.papers;
    let reviewers = ctx.reviewers;
    let k = ctx.reviewers_per_paper;
    let total = papers.len();

    if table.papers() != total {
        return Err(Error::InvalidDimension {
            expected: total,
            actual: table.papers(),
        });
    }
    if total > 0 && table.reviewers() != reviewers.len() {
        return Err(Error::InvalidDimension {
            expected: reviewers.len(),
            actual: table.reviewers(),
        });
    }

    info!(
        "Matching {} papers against {} reviewers (k = {}, constraints: [{}])",
        total,
        reviewers.len(),
        k,
        constraints.names().collect::<Vec<_>>().join(", ")
    );

    let bounds = table.suffix_bounds(k);
    let candidates = binomial(reviewers.len(), k);
    let mut stats = SearchStats::default();
    let mut seq: u64 = 0;
    let mut frontier = BinaryHeap::new();
    frontier.push(Node {
        assignment: Assignment::with_capacity(total),
        score: 0.0,
        priority: OrderedFloat(bounds[0]),
        seq,
    });
    stats.max_frontier = 1;

    while let Some(node) = frontier.pop() {
        observer.node_popped(&node.assignment, node.score, node.priority.into_inner());

        let depth = node.assignment.len();
        if depth == total {
            return finish(constraints, node, stats);
        }

        stats.expanded += 1;
        let paper = papers.id_at(depth);
        let mut pushed = 0usize;

        for group in Combinations::new(reviewers.len(), k) {
            stats.generated += 1;

            let review_group = ReviewGroup::new(
                paper.clone(),
                group.iter().map(|&r| reviewers.id_at(r).clone()).collect(),
            );
            let child = node.assignment.extended(review_group.clone());
            if let Some(rule) = constraints.first_rejection(&child, &review_group) {
                trace!("Pruned {:?} for {}: {}", group.as_slice(), paper, rule);
                stats.pruned += 1;
                continue;
            }

            let score = node.score + table.group_score(depth, &group);
            seq += 1;
            frontier.push(Node {
                assignment: child,
                score,
                priority: OrderedFloat(score + bounds[depth + 1]),
                seq,
            });
            pushed += 1;
        }

        stats.max_frontier = stats.max_frontier.max(frontier.len());
        debug!(
            "Expanded paper {}/{} ({}): {} of {} candidate groups kept, frontier size {}",
            depth + 1,
            total,
            paper,
            pushed,
            candidates,
            frontier.len()
        );
    }

    warn!(
        "No feasible assignment: frontier exhausted after expanding {} nodes",
        stats.expanded
    );
    Err(Error::Infeasible {
        papers: total,
        expanded: stats.expanded,
    })
}

/// Full, non-incremental check of the winner before handing it out
fn finish(constraints: &ConstraintSet<'_>, node: Node, stats: SearchStats) -> Result<Matching> {
    let violations = constraints.violations(&node.assignment);
    if !violations.is_empty() {
        warn!(
            "Search produced an assignment that violates [{}]",
            violations.join(", ")
        );
        return Err(Error::ConstraintViolation(
            violations.into_iter().map(String::from).collect(),
        ));
    }

    info!(
        "Matched {} papers with score {:.4} ({} expanded, {} generated, {} pruned)",
        node.assignment.len(),
        node.score,
        stats.expanded,
        stats.generated,
        stats.pruned
    );

    Ok(Matching {
        score: node.score,
        assignment: node.assignment,
        stats,
    })
}
