use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::PredictorConfig;
use crate::error::{RequestError, RequestResult};
use crate::io;
use crate::model::predictor::Candidate;
use crate::model::variant::ModelVariant;

/// Prefix marking the argument as a path to the request file.
pub const FILE_PREFIX: char = '@';

/// Where the request text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
	/// The argument is the request text itself.
	Inline(String),
	/// The argument was `@<path>`; the file holds the request text.
	File(PathBuf),
}

impl Invocation {
	/// Classifies the positional argument.
	///
	/// # Errors
	/// `MissingInput` when no argument was given.
	pub fn from_arg(arg: Option<String>) -> RequestResult<Self> {
		let arg = arg.ok_or(RequestError::MissingInput)?;
		Ok(match arg.strip_prefix(FILE_PREFIX) {
			Some(path) => Invocation::File(PathBuf::from(path)),
			None => Invocation::Inline(arg),
		})
	}

	/// Returns the raw request text, reading the file if needed.
	pub fn read(self) -> RequestResult<String> {
		match self {
			Invocation::Inline(text) => Ok(text),
			Invocation::File(path) => {
				debug!(path = %path.display(), "reading input from file");
				let text = io::read_text(&path)
					.map_err(|source| RequestError::ReadInput { path, source })?;
				debug!(input = ?text, "input from file");
				Ok(text)
			}
		}
	}
}

/// Request document as it arrives, before the selector is validated.
///
/// `model` is kept loose so a number or an unknown name degrades to the
/// default variant instead of failing the parse. `context` must be an
/// array, but its elements may be any JSON value.
#[derive(Deserialize, Debug)]
struct RawRequest {
	#[serde(default)]
	model: Option<serde_json::Value>,
	#[serde(default)]
	context: Option<Vec<serde_json::Value>>,
}

/// A parsed request with its selector resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
	pub model: ModelVariant,
	pub context: Vec<String>,
}

impl PredictionRequest {
	/// Parses normalized request text.
	///
	/// Unsupported or disabled selectors fall back to
	/// `config.default_variant` with a warning.
	///
	/// # Errors
	/// `Parse` when the text is not a JSON object of the expected shape.
	pub fn parse(text: &str, config: &PredictorConfig) -> RequestResult<Self> {
		// Going through a map rejects top-level arrays, which serde would
		// otherwise accept as a positional struct.
		let document: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
		let raw: RawRequest = serde_json::from_value(serde_json::Value::Object(document))?;
		let model = resolve_variant(raw.model.as_ref(), config);
		let context: Vec<String> =
			raw.context.unwrap_or_default().into_iter().map(token_text).collect();
		debug!(model = %model, context = ?context, "parsed request");
		Ok(Self { model, context })
	}
}

/// Strings are taken verbatim; any other value becomes its JSON text and
/// will usually resolve to `<UNK>`.
fn token_text(value: serde_json::Value) -> String {
	match value {
		serde_json::Value::String(token) => token,
		other => other.to_string(),
	}
}

fn resolve_variant(selector: Option<&serde_json::Value>, config: &PredictorConfig) -> ModelVariant {
	let fallback = config.default_variant;
	match selector {
		None | Some(serde_json::Value::Null) => fallback,
		Some(serde_json::Value::String(name)) => match name.parse::<ModelVariant>() {
			Ok(variant) if config.is_enabled(variant) => variant,
			Ok(variant) => {
				warn!(model = %variant, default = %fallback, "model type disabled, using default");
				fallback
			}
			Err(_) => {
				warn!(model = %name, default = %fallback, "unsupported model type, using default");
				fallback
			}
		},
		Some(other) => {
			warn!(model = %other, default = %fallback, "unsupported model type, using default");
			fallback
		}
	}
}

/// The single JSON line written on stdout.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PredictionResponse {
	pub success: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub predictions: Option<Vec<Candidate>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model: Option<ModelVariant>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
}

impl PredictionResponse {
	pub fn success(predictions: Vec<Candidate>, model: ModelVariant) -> Self {
		Self { success: true, predictions: Some(predictions), model: Some(model), error: None }
	}

	pub fn failure(error: impl ToString) -> Self {
		Self { success: false, predictions: None, model: None, error: Some(error.to_string()) }
	}

	/// Compact single-line JSON.
	pub fn to_json(&self) -> String {
		serde_json::to_string(self).unwrap_or_else(|e| {
			format!(r#"{{"success":false,"error":"Unable to encode response: {e}"}}"#)
		})
	}
}
