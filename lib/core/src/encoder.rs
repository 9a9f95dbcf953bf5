//! Text encoders
//!
//! The topical embedding model is an external capability. [`Encoder`] is the
//! seam: papers and reviewers are encoded through it before any entity is
//! built. [`EncoderCache`] is the explicit, injectable replacement for a
//! process-wide model singleton: construct one at startup, pass it around, and
//! every distinct [`EncoderConfig`] is initialized at most once.

use crate::{Error, Result, Vector};
use ahash::AHashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use tracing::info;

/// Default model name for the built-in hashing encoder
pub const HASHING_MODEL: &str = "hashing";

/// Default embedding dimension for the hashing encoder
pub const DEFAULT_DIMENSION: usize = 64;

/// Trait for text encoders
pub trait Encoder: Send + Sync {
    /// Encode a batch of texts, returning one vector per input in order
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vector>>;

    fn encode(&self, text: &str) -> Result<Vector> {
        self.encode_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| Error::Encoder("encoder returned no vector".to_string()))
    }

    /// Dimension of produced vectors
    fn dimension(&self) -> usize;

    fn model_name(&self) -> &str;
}

/// Identifies an encoder instance; equal configs share one instance in an [`EncoderCache`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EncoderConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
}

fn default_model() -> String {
    HASHING_MODEL.to_string()
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            dimension: default_dimension(),
        }
    }
}

/// Lazily initialized encoders keyed by configuration
#[derive(Default)]
pub struct EncoderCache {
    encoders: Mutex<AHashMap<EncoderConfig, Arc<dyn Encoder>>>,
}

impl EncoderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the encoder for `config`, running `init` only if none exists yet.
    ///
    /// The lock is held across `init`, so concurrent callers with the same
    /// config never load the model twice.
    pub fn get_or_try_init<F>(&self, config: &EncoderConfig, init: F) -> Result<Arc<dyn Encoder>>
    where
        F: FnOnce(&EncoderConfig) -> Result<Arc<dyn Encoder>>,
    {
        let mut encoders = self.encoders.lock();
        if let Some(encoder) = encoders.get(config) {
            return Ok(encoder.clone());
        }

        let encoder = init(config)?;
        if encoder.dimension() != config.dimension {
            return Err(Error::InvalidDimension {
                expected: config.dimension,
                actual: encoder.dimension(),
            });
        }
        info!(
            "Initialized encoder {} (dim {})",
            encoder.model_name(),
            encoder.dimension()
        );
        encoders.insert(config.clone(), encoder.clone());
        Ok(encoder)
    }

    /// Resolve one of the built-in encoders
    pub fn get(&self, config: &EncoderConfig) -> Result<Arc<dyn Encoder>> {
        self.get_or_try_init(config, |config| match config.model.as_str() {
            HASHING_MODEL => Ok(Arc::new(HashingEncoder::new(config.dimension)) as Arc<dyn Encoder>),
            other => Err(Error::Encoder(format!("unknown encoder model: {}", other))),
        })
    }

    pub fn len(&self) -> usize {
        self.encoders.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.encoders.lock().is_empty()
    }
}

/// Deterministic local encoder hashing character trigrams and words into buckets.
///
/// Texts that share vocabulary land close together, which is enough to rank
/// reviewers by topical overlap without a neural model.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    dim: usize,
}

impl HashingEncoder {
    pub fn new(dim: usize) -> Self {
        Self { dim: dim.max(1) }
    }

    fn encode_one(&self, text: &str) -> Vector {
        let mut vector = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        for trigram in generate_trigrams(&normalized) {
            vector[self.bucket(&trigram)] += 1.0;
        }

        // Words contribute more than trigrams
        for word in normalized.split_whitespace() {
            vector[self.bucket(word)] += 2.0;
        }

        Vector::new(vector).normalized()
    }

    fn bucket<H: Hash + ?Sized>(&self, item: &H) -> usize {
        let mut hasher = DefaultHasher::new();
        item.hash(&mut hasher);
        (hasher.finish() as usize) % self.dim
    }
}

impl Encoder for HashingEncoder {
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        Ok(texts.iter().map(|text| self.encode_one(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dim
    }

    fn model_name(&self) -> &str {
        HASHING_MODEL
    }
}

/// Generate character trigrams from a string, padded so short words still yield some
fn generate_trigrams(s: &str) -> HashSet<String> {
    let padded = format!("  {}  ", s);
    let chars: Vec<char> = padded.chars().collect();

    chars.windows(3).map(|w| w.iter().collect::<String>()).collect()
}

/// Check that an encoder honoured the one-vector-per-input contract
pub(crate) fn check_batch(expected: usize, vectors: &[Vector]) -> Result<()> {
    if vectors.len() != expected {
        return Err(Error::Encoder(format!(
            "expected {} vectors, encoder returned {}",
            expected,
            vectors.len()
        )));
    }
    Ok(())
}
