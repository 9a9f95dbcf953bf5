use crate::profile::CategoryProfile;
use crate::record::{PaperRecord, ReviewerRecord};
use crate::{Error, Result, Vector};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Anything keyed by a unique string id
pub trait Entity {
    /// Human readable kind, used in error messages
    const KIND: &'static str;

    fn id(&self) -> &str;
}

/// A submitted paper with its topical embedding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paper {
    pub title: String,
    pub contact: String,
    pub email: String,
    pub authors: BTreeSet<String>,
    pub institutions: BTreeSet<String>,
    pub countries: BTreeSet<String>,
    #[serde(default, rename = "abstract", skip_serializing_if = "Option::is_none")]
    pub abstract_text: Option<String>,
    pub embedding: Vector,
}

impl Paper {
    /// Assemble a paper from its raw record and an already computed embedding
    #[must_use]
    pub fn new(record: PaperRecord, embedding: Vector) -> Self {
        Self {
            title: record.title.trim().to_string(),
            contact: record.contact,
            email: record.email,
            authors: record.authors.iter().map(|a| normalize_name(a)).collect(),
            institutions: record.institutions.iter().map(|i| i.trim().to_string()).collect(),
            countries: record.countries,
            abstract_text: record.abstract_text.filter(|a| !a.trim().is_empty()),
            embedding,
        }
    }

    #[inline]
    pub fn is_author(&self, name: &str) -> bool {
        self.authors.contains(name)
    }

    #[inline]
    pub fn has_institution(&self, institution: &str) -> bool {
        self.institutions.contains(institution)
    }
}

impl Entity for Paper {
    const KIND: &'static str = "paper";

    fn id(&self) -> &str {
        &self.title
    }
}

/// A candidate reviewer and their category profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reviewer {
    pub full_name: String,
    pub institution: String,
    pub country: String,
    pub email: String,
    pub categories: BTreeSet<String>,
    pub profile: CategoryProfile,
}

impl Reviewer {
    /// Assemble a reviewer from its raw record and the category profile.
    ///
    /// The profile must hold one vector per category, in the order of
    /// [`ReviewerRecord::category_texts`].
    pub fn new(record: ReviewerRecord, profile: CategoryProfile) -> Result<Self> {
        let categories: BTreeSet<String> = record.category_texts().into_iter().collect();
        if profile.len() != categories.len() {
            return Err(Error::InvalidConfig(format!(
                "reviewer {}: {} categories but {} category vectors",
                record.full_name,
                categories.len(),
                profile.len()
            )));
        }

        Ok(Self {
            full_name: normalize_name(&record.full_name),
            institution: record.institution.trim().to_string(),
            country: record.country,
            email: record.email,
            categories,
            profile,
        })
    }
}

impl Entity for Reviewer {
    const KIND: &'static str = "reviewer";

    fn id(&self) -> &str {
        &self.full_name
    }
}

/// Normalize a person name: hyphens become spaces, whitespace is collapsed
pub fn normalize_name(name: &str) -> String {
    name.split(|c: char| c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Insertion-ordered map of entities keyed by their unique id.
///
/// Iteration order is insertion order; the matcher relies on it to expand
/// papers deterministically.
#[derive(Debug, Clone)]
pub struct EntityMap<T> {
    entries: Vec<T>,
    ids: Vec<Arc<str>>,
    index: AHashMap<Arc<str>, usize>,
}

impl<T: Entity> EntityMap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            ids: Vec::new(),
            index: AHashMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            ids: Vec::with_capacity(capacity),
            index: AHashMap::with_capacity(capacity),
        }
    }

    /// Build a map, rejecting the first duplicate id
    pub fn try_from_iter<I: IntoIterator<Item = T>>(items: I) -> Result<Self> {
        let mut map = Self::new();
        for item in items {
            map.insert(item)?;
        }
        Ok(map)
    }

    /// Insert an entity and return its position
    pub fn insert(&mut self, entity: T) -> Result<usize> {
        if self.index.contains_key(entity.id()) {
            return Err(Error::DuplicateId {
                kind: T::KIND,
                id: entity.id().to_string(),
            });
        }

        let position = self.entries.len();
        let id: Arc<str> = Arc::from(entity.id());
        self.index.insert(id.clone(), position);
        self.ids.push(id);
        self.entries.push(entity);
        Ok(position)
    }

    #[inline]
    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Like [`get`](Self::get) but reports a missing id as an error
    pub fn require(&self, id: &str) -> Result<&T> {
        self.get(id).ok_or_else(|| Error::UnknownEntity {
            kind: T::KIND,
            id: id.to_string(),
        })
    }

    #[inline]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Shared id handle for the entity at `position`
    #[inline]
    pub fn id_at(&self, position: usize) -> &Arc<str> {
        &self.ids[position]
    }

    #[inline]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Entities in insertion order
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|id| id.as_ref())
    }
}

impl<T: Entity> Default for EntityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Entity> IntoIterator for &'a EntityMap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, authors: &[&str]) -> PaperRecord {
        PaperRecord {
            title: title.to_string(),
            contact: "Contact".to_string(),
            email: "contact@example.org".to_string(),
            authors: authors.iter().map(|a| a.to_string()).collect(),
            institutions: BTreeSet::new(),
            countries: BTreeSet::new(),
            abstract_text: None,
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("Ana-Maria  Lopez "), "Ana Maria Lopez");
        assert_eq!(normalize_name("  Bob "), "Bob");
        assert_eq!(normalize_name("Jean--Luc"), "Jean Luc");
    }

    #[test]
    fn test_paper_normalizes_authors() {
        let paper = Paper::new(record("P1", &["Ana-Maria Lopez"]), Vector::new(vec![1.0]));
        assert!(paper.is_author("Ana Maria Lopez"));
        assert!(!paper.is_author("Ana-Maria Lopez"));
    }

    #[test]
    fn test_blank_abstract_dropped() {
        let mut rec = record("P1", &[]);
        rec.abstract_text = Some("   ".to_string());
        let paper = Paper::new(rec, Vector::new(vec![1.0]));
        assert!(paper.abstract_text.is_none());
    }

    #[test]
    fn test_institutions_trimmed_like_reviewers() {
        let mut rec = record("P1", &["Alice"]);
        rec.institutions = ["Uni X ".to_string(), " Uni Y".to_string()].into_iter().collect();
        let paper = Paper::new(rec, Vector::new(vec![1.0]));

        let reviewer = Reviewer::new(
            ReviewerRecord {
                full_name: "Carol".to_string(),
                institution: "Uni X ".to_string(),
                ..Default::default()
            },
            CategoryProfile::empty(),
        )
        .unwrap();

        assert!(paper.has_institution("Uni Y"));
        assert!(paper.has_institution(&reviewer.institution));
    }

    #[test]
    fn test_entity_map_preserves_order() {
        let papers = EntityMap::try_from_iter(["b", "a", "c"].into_iter().map(|t| {
            Paper::new(record(t, &[]), Vector::new(vec![1.0]))
        }))
        .unwrap();

        let ids: Vec<&str> = papers.ids().collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
        assert_eq!(papers.position("a"), Some(1));
        assert_eq!(papers.id_at(2).as_ref(), "c");
    }

    #[test]
    fn test_entity_map_rejects_duplicates() {
        let result = EntityMap::try_from_iter(["a", "a"].into_iter().map(|t| {
            Paper::new(record(t, &[]), Vector::new(vec![1.0]))
        }));

        match result {
            Err(Error::DuplicateId { kind, id }) => {
                assert_eq!(kind, "paper");
                assert_eq!(id, "a");
            }
            other => panic!("expected duplicate id error, got {:?}", other.map(|m| m.len())),
        }
    }

    #[test]
    fn test_require_unknown() {
        let papers: EntityMap<Paper> = EntityMap::new();
        assert!(matches!(
            papers.require("missing"),
            Err(Error::UnknownEntity { kind: "paper", .. })
        ));
    }

    #[test]
    fn test_reviewer_profile_must_match_categories() {
        let rec = ReviewerRecord {
            full_name: "Carol".to_string(),
            institution: "Z".to_string(),
            country: "ES".to_string(),
            email: "carol@example.org".to_string(),
            categories: ["nlp", "ir"].iter().map(|c| c.to_string()).collect(),
        };
        let profile = CategoryProfile::new(vec![Vector::new(vec![1.0, 0.0])]).unwrap();
        assert!(Reviewer::new(rec, profile).is_err());
    }
}
