use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::artifact::ModelSource;
use super::ngram_model::LanguageModel;
use super::variant::ModelVariant;
use crate::error::{PredictError, PredictResult};

/// Placeholder answered for an empty context.
pub const SENTINEL_TOKEN: &str = "nop";

/// A candidate next token and how often it was observed.
///
/// Serialized as a two-element array: `["mov", 12]`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Candidate(pub String, pub u64);

impl Candidate {
	pub fn new(token: impl Into<String>, count: u64) -> Self {
		Self(token.into(), count)
	}

	pub fn token(&self) -> &str {
		&self.0
	}

	pub fn count(&self) -> u64 {
		self.1
	}
}

/// The single-entry list answered for an empty context.
pub fn sentinel() -> Vec<Candidate> {
	vec![Candidate::new(SENTINEL_TOKEN, 1)]
}

/// Keeps the trailing `n - 1` tokens of `context`.
pub fn truncate_context<S>(context: &[S], n: usize) -> &[S] {
	let keep = n.saturating_sub(1);
	&context[context.len().saturating_sub(keep)..]
}

/// Predicts the next token of `context` with the model of `variant`.
///
/// The model is only requested from `source` when the context is not
/// empty; an empty context answers the sentinel list directly.
///
/// # Errors
/// Any load or lookup failure is returned untouched so the caller can
/// decide how to degrade.
pub fn predict_next<M: ModelSource + ?Sized>(
	source: &M,
	variant: ModelVariant,
	context: &[String],
	n: usize,
	max_candidates: usize,
) -> PredictResult<Vec<Candidate>> {
	if context.is_empty() {
		return Ok(sentinel());
	}
	let model = source.load(variant)?;
	rank_candidates(&model, context, n, max_candidates)
}

/// Ranks the next-token candidates of `context` on a loaded model.
///
/// - keeps the trailing `n - 1` tokens, capped by the model's own order
/// - resolves them through the model vocabulary (unseen tokens are fine)
/// - sorts by descending count, ties keep the model's insertion order
/// - keeps at most `max_candidates` entries
pub fn rank_candidates<L: LanguageModel + ?Sized>(
	model: &L,
	context: &[String],
	n: usize,
	max_candidates: usize,
) -> PredictResult<Vec<Candidate>> {
	if context.is_empty() {
		return Ok(sentinel());
	}
	if n < 2 {
		return Err(PredictError::InvalidOrder(n));
	}

	let order = model.order();
	if order != n {
		warn!(configured = n, model = order, "configured order differs from model order");
	}
	let window = truncate_context(context, n.min(order));
	let vocabulary = model.vocabulary();
	let ids = vocabulary.lookup(window);
	debug!(context = ?window, ids = ?ids, "querying model");

	let mut candidates = model
		.context_counts(&ids)
		.into_iter()
		.map(|(id, count)| {
			vocabulary
				.token(id)
				.map(|token| Candidate::new(token, count))
				.ok_or(PredictError::UnknownTokenId(id))
		})
		.collect::<PredictResult<Vec<_>>>()?;

	// sort_by is stable
	candidates.sort_by(|a, b| b.count().cmp(&a.count()));
	candidates.truncate(max_candidates);
	Ok(candidates)
}
