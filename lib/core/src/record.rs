//! Raw paper and reviewer records
//!
//! Records are the plain rows handed over by whatever acquires the data
//! (spreadsheet export, form dump, ...). Turning them into [`Paper`] and
//! [`Reviewer`] values is a separate, explicit step: the text of every record
//! is encoded in one batch and the immutable entities are assembled afterwards.

use crate::encoder::{check_batch, Encoder};
use crate::entity::{EntityMap, Paper, Reviewer};
use crate::profile::CategoryProfile;
use crate::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// A paper row before encoding
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PaperRecord {
    pub title: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub authors: BTreeSet<String>,
    #[serde(default)]
    pub institutions: BTreeSet<String>,
    #[serde(default)]
    pub countries: BTreeSet<String>,
    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,
}

impl PaperRecord {
    /// Text fed to the encoder: the title, a newline, then the abstract
    pub fn embedding_text(&self) -> String {
        format!(
            "{}\n{}",
            self.title.trim(),
            self.abstract_text.as_deref().unwrap_or("").trim()
        )
    }
}

/// A reviewer row before encoding
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewerRecord {
    pub full_name: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl ReviewerRecord {
    /// Trimmed, non-empty, de-duplicated category labels in sorted order
    pub fn category_texts(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// Read a JSON array of records from disk
pub fn load_records<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>> {
    let raw = std::fs::read_to_string(path.as_ref())?;
    let records: Vec<T> = serde_json::from_str(&raw)?;
    debug!("Loaded {} records from {:?}", records.len(), path.as_ref());
    Ok(records)
}

/// Encode every paper in one batch and build the paper map.
///
/// Duplicate titles are rejected.
pub fn build_papers<E: Encoder + ?Sized>(
    records: Vec<PaperRecord>,
    encoder: &E,
) -> Result<EntityMap<Paper>> {
    let texts: Vec<String> = records.iter().map(PaperRecord::embedding_text).collect();
    let text_refs: Vec<&str> = texts.iter().map(String::as_str).collect();
    let embeddings = encoder.encode_batch(&text_refs)?;
    check_batch(text_refs.len(), &embeddings)?;

    let mut papers = EntityMap::with_capacity(records.len());
    for (record, embedding) in records.into_iter().zip(embeddings) {
        papers.insert(Paper::new(record, embedding))?;
    }
    Ok(papers)
}

/// Encode every reviewer category in one batch and build the reviewer map.
///
/// Duplicate (normalized) names are rejected.
pub fn build_reviewers<E: Encoder + ?Sized>(
    records: Vec<ReviewerRecord>,
    encoder: &E,
) -> Result<EntityMap<Reviewer>> {
    let per_reviewer: Vec<Vec<String>> = records.iter().map(ReviewerRecord::category_texts).collect();
    let text_refs: Vec<&str> = per_reviewer
        .iter()
        .flat_map(|texts| texts.iter().map(String::as_str))
        .collect();
    let embeddings = encoder.encode_batch(&text_refs)?;
    check_batch(text_refs.len(), &embeddings)?;
    let mut embeddings = embeddings.into_iter();

    let mut reviewers = EntityMap::with_capacity(records.len());
    for (record, texts) in records.into_iter().zip(per_reviewer) {
        let vectors = embeddings.by_ref().take(texts.len()).collect();
        let profile = CategoryProfile::new(vectors)?;
        reviewers.insert(Reviewer::new(record, profile)?)?;
    }
    Ok(reviewers)
}
