//! Top-level module for the n-gram prediction system.
//!
//! This module groups everything that turns a token context into ranked
//! candidates:
//! - Token/identifier index (`Vocabulary`)
//! - Fixed-order n-gram model (`NGramModel`) behind `LanguageModel`
//! - Artifact loading (`ArtifactStore`) behind `ModelSource`
//! - Ranking (`predict_next`) and the model-free `fallback`

/// Static candidates used when the trained model cannot answer.
pub mod fallback;

/// Serialized model envelope and the file-backed model source.
///
/// Artifacts are `postcard` blobs, one per instruction-set variant.
pub mod artifact;

/// Fixed-order n-gram model (`n >= 2`).
///
/// Stores per-context transition counts and answers `context_counts`.
pub mod ngram_model;

/// Prediction engine: sentinel handling, context truncation and ranking.
pub mod predictor;

/// Internal representation of a single n-gram state (context).
///
/// Tracks outgoing transitions in first-observation order.
mod state;

/// Supported instruction-set variants.
pub mod variant;

/// Token to identifier index, tolerant of unseen tokens.
pub mod vocabulary;
