//! Next-token prediction for assembly code.
//!
//! This crate provides a one-shot n-gram predictor for 8051 and 8085
//! assembly, including:
//! - Token vocabularies and fixed-order n-gram models
//! - Loading of pre-built `postcard` model artifacts
//! - Ranking of next-token candidates for a context
//! - A model-free fallback so every parsed request gets an answer
//! - Repair and parsing of JSON requests
//!
//! The usual entry point is [`adapter::Adapter`], which takes the raw
//! command-line argument and returns a response ready to print.

/// Request lifecycle: input resolution, normalization, parsing,
/// prediction and fallback.
pub mod adapter;

/// Runtime configuration passed into the adapter.
pub mod config;

/// Error types of the model path and of the request path.
pub mod error;

/// Core n-gram models, artifact loading and ranking.
pub mod model;

/// Best-effort repair of request text.
pub mod normalize;

/// Request and response documents.
pub mod request;

/// File and path helpers.
pub mod io;
