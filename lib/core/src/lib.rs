//! # revmatch Core
//!
//! Core types for the revmatch reviewer assignment engine.
//!
//! This crate provides the data model shared by every other crate:
//!
//! - [`Vector`] - Dense embedding vector with cosine similarity
//! - [`CategoryProfile`] - One vector per reviewer category label
//! - [`Paper`] / [`Reviewer`] - Immutable entities carrying their embeddings
//! - [`EntityMap`] - Insertion-ordered id map that rejects duplicates
//! - [`Assignment`] - Paper to reviewers mapping with per-reviewer load
//! - [`Encoder`] / [`EncoderCache`] - Text encoding seam and its explicit cache
//!
//! ## Example
//!
//! ```rust
//! use revmatch_core::{build_papers, build_reviewers, HashingEncoder, PaperRecord, ReviewerRecord};
//!
//! let encoder = HashingEncoder::new(64);
//!
//! let papers = build_papers(
//!     vec![PaperRecord {
//!         title: "Dense retrieval for legal text".to_string(),
//!         contact: "Alice".to_string(),
//!         email: "alice@example.org".to_string(),
//!         authors: ["Alice".to_string()].into(),
//!         institutions: ["X".to_string()].into(),
//!         countries: ["ES".to_string()].into(),
//!         abstract_text: None,
//!     }],
//!     &encoder,
//! )
//! .unwrap();
//!
//! let reviewers = build_reviewers(
//!     vec![ReviewerRecord {
//!         full_name: "Carol".to_string(),
//!         institution: "Z".to_string(),
//!         country: "PT".to_string(),
//!         email: "carol@example.org".to_string(),
//!         categories: ["information retrieval".to_string()].into(),
//!     }],
//!     &encoder,
//! )
//! .unwrap();
//!
//! assert_eq!(papers.len(), 1);
//! assert_eq!(reviewers.get("Carol").unwrap().profile.len(), 1);
//! ```

pub mod assignment;
pub mod encoder;
pub mod entity;
pub mod error;
pub mod profile;
pub mod record;
pub mod vector;

pub use assignment::{Assignment, ReviewGroup, ReviewerIds};
pub use encoder::{Encoder, EncoderCache, EncoderConfig, HashingEncoder, DEFAULT_DIMENSION, HASHING_MODEL};
pub use entity::{normalize_name, Entity, EntityMap, Paper, Reviewer};
pub use error::{Error, Result};
pub use profile::CategoryProfile;
pub use record::{build_papers, build_reviewers, load_records, PaperRecord, ReviewerRecord};
pub use vector::Vector;
