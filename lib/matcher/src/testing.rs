//! Fixtures shared by the matcher's unit tests

use crate::combinations::Combinations;
use crate::search::SearchObserver;
use revmatch_constraints::ConstraintSet;
use revmatch_core::{
    Assignment, CategoryProfile, EntityMap, Paper, PaperRecord, ReviewGroup, Reviewer,
    ReviewerRecord, Vector,
};
use revmatch_similarity::ScoreTable;

pub fn paper(title: &str, authors: &[&str], institutions: &[&str]) -> Paper {
    Paper::new(
        PaperRecord {
            title: title.to_string(),
            contact: String::new(),
            email: String::new(),
            authors: authors.iter().map(|s| s.to_string()).collect(),
            institutions: institutions.iter().map(|s| s.to_string()).collect(),
            countries: Default::default(),
            abstract_text: None,
        },
        Vector::new(vec![1.0]),
    )
}

pub fn reviewer(name: &str, institution: &str) -> Reviewer {
    Reviewer::new(
        ReviewerRecord {
            full_name: name.to_string(),
            institution: institution.to_string(),
            country: String::new(),
            email: String::new(),
            categories: Default::default(),
        },
        CategoryProfile::empty(),
    )
    .unwrap()
}

/// P1 by Alice (X), P2 by Bob (Y); reviewers Alice, Bob, Carol, Dave
pub fn two_paper_instance() -> (EntityMap<Paper>, EntityMap<Reviewer>) {
    let papers =
        EntityMap::try_from_iter([paper("P1", &["Alice"], &["X"]), paper("P2", &["Bob"], &["Y"])])
            .unwrap();
    let reviewers = EntityMap::try_from_iter([
        reviewer("Alice", "X"),
        reviewer("Bob", "Y"),
        reviewer("Carol", "Z"),
        reviewer("Dave", "W"),
    ])
    .unwrap();
    (papers, reviewers)
}

/// Scores for [`two_paper_instance`]; self-review pairs score highest so the
/// conflict rules have something to reject
pub fn two_paper_scores() -> ScoreTable {
    ScoreTable::from_rows(vec![vec![1.0, 0.9, 0.5, 0.3], vec![0.4, 1.0, 0.8, 0.2]]).unwrap()
}

/// Every feasible complete assignment with its score, by exhaustive enumeration
pub fn enumerate_feasible(
    constraints: &ConstraintSet<'_>,
    table: &ScoreTable,
) -> Vec<(Assignment, f64)> {
    let ctx = constraints.context();
    let mut out = Vec::new();
    extend_all(
        constraints,
        table,
        ctx.reviewers_per_paper,
        Assignment::new(),
        0.0,
        &mut out,
    );
    out
}

fn extend_all(
    constraints: &ConstraintSet<'_>,
    table: &ScoreTable,
    k: usize,
    partial: Assignment,
    score: f64,
    out: &mut Vec<(Assignment, f64)>,
) {
    let ctx = constraints.context();
    let depth = partial.len();
    if depth == ctx.papers.len() {
        if constraints.check(&partial) {
            out.push((partial, score));
        }
        return;
    }

    for group in Combinations::new(ctx.reviewers.len(), k) {
        let review_group = ReviewGroup::new(
            ctx.papers.id_at(depth).clone(),
            group.iter().map(|&r| ctx.reviewers.id_at(r).clone()).collect(),
        );
        extend_all(
            constraints,
            table,
            k,
            partial.extended(review_group),
            score + table.group_score(depth, &group),
            out,
        );
    }
}

/// Keeps every popped node with its score and priority
#[derive(Default)]
pub struct Recorder {
    pub popped: Vec<(Assignment, f64, f64)>,
}

impl SearchObserver for Recorder {
    fn node_popped(&mut self, assignment: &Assignment, score: f64, priority: f64) {
        self.popped.push((assignment.clone(), score, priority));
    }
}

/// Every popped priority bounds the best feasible completion of its node,
/// and priorities never increase from one pop to the next
pub fn assert_bounds_admissible(
    popped: &[(Assignment, f64, f64)],
    feasible: &[(Assignment, f64)],
) {
    let mut last = f64::INFINITY;
    for (partial, _, priority) in popped {
        let depth = partial.len();
        let reachable = feasible
            .iter()
            .filter(|(complete, _)| &complete.groups()[..depth] == partial.groups())
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!(
            *priority + 1e-9 >= reachable,
            "priority {} below reachable {} at depth {}",
            priority,
            reachable,
            depth
        );
        assert!(*priority <= last + 1e-9, "priority rose from {} to {}", last, priority);
        last = *priority;
    }
}

pub fn best_feasible(constraints: &ConstraintSet<'_>, table: &ScoreTable) -> Option<f64> {
    enumerate_feasible(constraints, table)
        .into_iter()
        .map(|(_, score)| score)
        .reduce(f64::max)
}
