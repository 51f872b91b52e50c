use std::path::PathBuf;

use crate::error::{RequestError, RequestResult};
use crate::model::variant::ModelVariant;

/// Default location of the `n_gram_<variant>.bin` artifacts.
pub const DEFAULT_ARTIFACT_DIR: &str = "assets/models";

/// Default n-gram order: two tokens of context.
pub const DEFAULT_ORDER: usize = 3;

/// Longest candidate list ever answered.
pub const MAX_CANDIDATES: usize = 5;

/// Everything a request needs besides its own input.
///
/// Passed explicitly into the adapter; nothing is derived from the
/// process environment at prediction time.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictorConfig {
	/// Directory holding one artifact per variant.
	pub artifact_dir: PathBuf,

	/// Order `n` used to truncate contexts to `n - 1` tokens.
	pub order: usize,

	/// Maximum number of candidates in a response.
	pub max_candidates: usize,

	/// Variants a request may select; others fall back to `default_variant`.
	pub enabled_variants: Vec<ModelVariant>,

	/// Variant used when the selector is missing or not usable.
	pub default_variant: ModelVariant,
}

impl Default for PredictorConfig {
	fn default() -> Self {
		Self {
			artifact_dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
			order: DEFAULT_ORDER,
			max_candidates: MAX_CANDIDATES,
			enabled_variants: ModelVariant::ALL.to_vec(),
			default_variant: ModelVariant::default(),
		}
	}
}

impl PredictorConfig {
	/// Checks the invariants the engine relies on.
	///
	/// # Errors
	/// - order below 2
	/// - `max_candidates` of 0 or above [`MAX_CANDIDATES`]
	pub fn validate(&self) -> RequestResult<()> {
		if self.order < 2 {
			return Err(RequestError::Config(format!("order must be >= 2, got {}", self.order)));
		}
		if self.max_candidates == 0 || self.max_candidates > MAX_CANDIDATES {
			return Err(RequestError::Config(format!(
				"max_candidates must be between 1 and {MAX_CANDIDATES}, got {}",
				self.max_candidates
			)));
		}
		Ok(())
	}

	/// Whether a request may select `variant`.
	pub fn is_enabled(&self, variant: ModelVariant) -> bool {
		self.enabled_variants.contains(&variant)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn default_is_valid() {
		let config = PredictorConfig::default();
		assert!(config.validate().is_ok());
		assert_eq!(config.order, 3);
		assert!(config.is_enabled(ModelVariant::I8085));
	}

	#[test]
	fn rejects_small_order() {
		let config = PredictorConfig { order: 1, ..PredictorConfig::default() };
		assert!(matches!(config.validate(), Err(RequestError::Config(_))));
	}

	#[test]
	fn rejects_out_of_range_candidates() {
		for max_candidates in [0, MAX_CANDIDATES + 1] {
			let config = PredictorConfig { max_candidates, ..PredictorConfig::default() };
			assert!(config.validate().is_err());
		}
	}
}
