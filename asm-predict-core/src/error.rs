use std::path::PathBuf;

use thiserror::Error;

use crate::model::variant::ModelVariant;
use crate::model::vocabulary::TokenId;

pub type PredictResult<T> = Result<T, PredictError>;
pub type RequestResult<T> = Result<T, RequestError>;

/// Failures on the model path.
///
/// Every variant is recoverable: the adapter answers with fallback
/// candidates instead of surfacing these to the caller.
#[derive(Debug, Error)]
pub enum PredictError {
	#[error("Unable to read model artifact {}: {source}", path.display())]
	ArtifactRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("Unable to decode model artifact: {0}")]
	Decode(#[from] postcard::Error),
	#[error("Unsupported artifact format version {found} (expected {expected})")]
	SchemaMismatch { expected: u32, found: u32 },
	#[error("Artifact holds a {found} model, {expected} was requested")]
	VariantMismatch { expected: ModelVariant, found: ModelVariant },
	#[error("Token id {0} is not part of the model vocabulary")]
	UnknownTokenId(TokenId),
	#[error("n must be >= 2, got {0}")]
	InvalidOrder(usize),
}

/// Failures that abort a request before any prediction is attempted.
#[derive(Debug, Error)]
pub enum RequestError {
	#[error("No input provided")]
	MissingInput,
	#[error("Error reading input file: {source}")]
	ReadInput {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("JSON decode error: {0}")]
	Parse(#[from] serde_json::Error),
	#[error("Invalid configuration: {0}")]
	Config(String),
}
