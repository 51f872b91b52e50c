use serde::{Deserialize, Serialize};

use super::vocabulary::TokenId;

/// Represents a state in an n-gram model.
///
/// A `State` corresponds to one context (a prefix of up to `n-1` token ids)
/// and stores every observed transition from this context to the next token.
///
/// Conceptually, this is a node in a Markov chain where outgoing edges
/// are weighted by their number of observations.
///
/// ## Invariants
/// - Each next-token id appears at most once in `transitions`
/// - Each transition occurrence count is strictly positive
/// - `transitions` keeps first-observation order, which ranking relies on
///   to break ties
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct State {
	/// Outgoing transitions, in first-observation order.
	/// Example: [(mov, 42), (add, 3)]
	transitions: Vec<(TokenId, u64)>,
}

impl State {
	/// Creates a new empty state.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `occurrence` observations of a transition toward `next`.
	///
	/// - If the transition already exists, its count is increased.
	/// - Otherwise, it is appended after the existing transitions.
	/// - Zero occurrences are ignored.
	pub fn add_transition(&mut self, next: TokenId, occurrence: u64) {
		if occurrence == 0 {
			return;
		}
		match self.transitions.iter_mut().find(|(id, _)| *id == next) {
			Some((_, count)) => *count += occurrence,
			None => self.transitions.push((next, occurrence)),
		}
	}

	/// Outgoing transitions in first-observation order.
	pub fn transitions(&self) -> &[(TokenId, u64)] {
		&self.transitions
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accumulates_and_keeps_first_seen_order() {
		let mut state = State::new();
		state.add_transition(4, 1);
		state.add_transition(2, 5);
		state.add_transition(4, 2);
		assert_eq!(state.transitions(), &[(4, 3), (2, 5)]);
	}

	#[test]
	fn ignores_zero_counts() {
		let mut state = State::new();
		state.add_transition(1, 0);
		assert!(state.transitions().is_empty());
	}
}
