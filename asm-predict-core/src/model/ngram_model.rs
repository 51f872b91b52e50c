use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::state::State;
use super::vocabulary::{TokenId, Vocabulary};
use crate::error::{PredictError, PredictResult};

/// Read access to a trained model.
///
/// The prediction engine only ever talks to a model through this trait,
/// so the storage layout behind it stays private to the implementor.
pub trait LanguageModel {
	/// The order `n` the model was built with.
	fn order(&self) -> usize;

	/// Vocabulary used to resolve tokens into ids and back.
	fn vocabulary(&self) -> &Vocabulary;

	/// How often each next token followed `context` in the training data.
	///
	/// Entries come back in the model's internal insertion order.
	/// Unknown contexts yield an empty list.
	fn context_counts(&self, context: &[TokenId]) -> Vec<(TokenId, u64)>;
}

/// Represents an n-gram model over assembly token streams.
///
/// The `NGramModel` stores one state for every observed context of
/// length `1..n`, each holding the counts of the tokens that followed it.
///
/// # Invariants
/// - `n` is always >= 2
/// - Every key in `states` has length in `1..n`
/// - Every id stored in a key or a transition belongs to `vocabulary`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NGramModel {
	/// The order of the model (number of tokens in the n-gram)
	n: usize,

	/// Token index shared by contexts and transitions
	vocabulary: Vocabulary,

	/// Mapping from a context (length 1..n) to its corresponding state
	states: HashMap<Vec<TokenId>, State>,
}

impl NGramModel {
	/// Creates a new empty n-gram model of order `n`.
	///
	/// # Errors
	/// Returns an error if `n < 2`.
	pub fn new(n: usize) -> PredictResult<Self> {
		if n < 2 {
			return Err(PredictError::InvalidOrder(n));
		}
		Ok(Self { n, vocabulary: Vocabulary::default(), states: HashMap::new() })
	}

	/// Assembles a model from pre-aggregated counts.
	///
	/// Each entry is `(context, next, count)`. Contexts longer than `n-1`
	/// keep their trailing `n-1` tokens; empty contexts are skipped.
	/// Entries sharing a context are merged in the order they are given.
	pub fn from_counts<I, C, S>(n: usize, entries: I) -> PredictResult<Self>
	where
		I: IntoIterator<Item = (C, S, u64)>,
		C: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut model = Self::new(n)?;
		for (context, next, count) in entries {
			let tokens: Vec<S> = context.into_iter().collect();
			if tokens.is_empty() {
				continue;
			}
			let start = tokens.len().saturating_sub(n - 1);
			let key: Vec<TokenId> = tokens[start..]
				.iter()
				.map(|token| model.vocabulary.intern(token.as_ref()))
				.collect();
			let next = model.vocabulary.intern(next.as_ref());
			model.states.entry(key).or_insert_with(State::new).add_transition(next, count);
		}
		Ok(model)
	}

	/// Number of distinct contexts stored.
	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}
}

impl LanguageModel for NGramModel {
	fn order(&self) -> usize {
		self.n
	}

	fn vocabulary(&self) -> &Vocabulary {
		&self.vocabulary
	}

	fn context_counts(&self, context: &[TokenId]) -> Vec<(TokenId, u64)> {
		self.states
			.get(context)
			.map(|state| state.transitions().to_vec())
			.unwrap_or_default()
	}
}
