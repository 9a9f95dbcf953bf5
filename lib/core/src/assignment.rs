use ahash::AHashMap;
use serde::ser::{Serialize, SerializeMap, Serializer};
use smallvec::SmallVec;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Reviewer ids assigned to one paper; most conferences use a handful
pub type ReviewerIds = SmallVec<[Arc<str>; 4]>;

/// The reviewers chosen for a single paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewGroup {
    paper: Arc<str>,
    reviewers: ReviewerIds,
}

impl ReviewGroup {
    pub fn new(paper: Arc<str>, reviewers: ReviewerIds) -> Self {
        Self { paper, reviewers }
    }

    #[inline]
    pub fn paper(&self) -> &str {
        &self.paper
    }

    #[inline]
    pub fn reviewers(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.reviewers.iter().map(|r| r.as_ref())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.reviewers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.reviewers.is_empty()
    }

    #[inline]
    pub fn contains(&self, reviewer: &str) -> bool {
        self.reviewers.iter().any(|r| r.as_ref() == reviewer)
    }
}

/// Paper to reviewers mapping, partial while searching and complete when returned.
///
/// Groups keep the order in which papers were assigned. The number of groups
/// each reviewer sits on is tracked incrementally.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    groups: Vec<ReviewGroup>,
    load: AHashMap<Arc<str>, usize>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(papers: usize) -> Self {
        Self {
            groups: Vec::with_capacity(papers),
            load: AHashMap::new(),
        }
    }

    /// Append a group. Assigning the same paper twice is a caller bug.
    pub fn push(&mut self, group: ReviewGroup) {
        debug_assert!(
            self.get(group.paper()).is_none(),
            "paper {} assigned twice",
            group.paper()
        );
        for reviewer in &group.reviewers {
            *self.load.entry(reviewer.clone()).or_insert(0) += 1;
        }
        self.groups.push(group);
    }

    /// Copy of this assignment with one more group
    #[must_use]
    pub fn extended(&self, group: ReviewGroup) -> Self {
        let mut next = self.clone();
        next.push(group);
        next
    }

    #[inline]
    pub fn groups(&self) -> &[ReviewGroup] {
        &self.groups
    }

    /// The most recently assigned group
    #[inline]
    pub fn last(&self) -> Option<&ReviewGroup> {
        self.groups.last()
    }

    pub fn get(&self, paper: &str) -> Option<&ReviewGroup> {
        self.groups.iter().find(|g| g.paper() == paper)
    }

    /// Reviewer ids for `paper`, empty if it is not assigned yet
    pub fn reviewers_of(&self, paper: &str) -> Vec<&str> {
        self.get(paper)
            .map(|g| g.reviewers().collect())
            .unwrap_or_default()
    }

    /// Number of groups `reviewer` sits on
    #[inline]
    pub fn load_of(&self, reviewer: &str) -> usize {
        self.load.get(reviewer).copied().unwrap_or(0)
    }

    /// Largest per-reviewer load
    pub fn max_load(&self) -> usize {
        self.load.values().copied().max().unwrap_or(0)
    }

    /// Number of assigned papers
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Owned `paper -> reviewers` mapping for downstream consumers
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.groups
            .iter()
            .map(|g| {
                (
                    g.paper().to_string(),
                    g.reviewers().map(str::to_string).collect(),
                )
            })
            .collect()
    }
}

impl Serialize for Assignment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            let reviewers: Vec<&str> = group.reviewers().collect();
            map.serialize_entry(group.paper(), &reviewers)?;
        }
        map.end()
    }
}
