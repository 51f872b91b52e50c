use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Internal identifier of a token.
pub type TokenId = u32;

/// Identifier every unseen token resolves to.
pub const UNK_ID: TokenId = 0;

/// Surface form of the unknown token.
pub const UNK_TOKEN: &str = "<UNK>";

/// Bidirectional token <-> identifier index.
///
/// # Invariants
/// - `<UNK>` always exists and owns id `0`
/// - `ids[token] == i` iff `tokens[i] == token`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Vocabulary {
	tokens: Vec<String>,
	ids: HashMap<String, TokenId>,
}

impl Default for Vocabulary {
	fn default() -> Self {
		Self {
			tokens: vec![UNK_TOKEN.to_owned()],
			ids: HashMap::from([(UNK_TOKEN.to_owned(), UNK_ID)]),
		}
	}
}

impl Vocabulary {
	/// Builds a vocabulary from tokens in first-seen order.
	///
	/// Duplicates are ignored.
	pub fn from_tokens<I, S>(tokens: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut vocabulary = Self::default();
		for token in tokens {
			vocabulary.intern(token.as_ref());
		}
		vocabulary
	}

	/// Returns the id of `token`, assigning a fresh one if needed.
	pub(crate) fn intern(&mut self, token: &str) -> TokenId {
		if let Some(id) = self.ids.get(token) {
			return *id;
		}
		let id = self.tokens.len() as TokenId;
		self.tokens.push(token.to_owned());
		self.ids.insert(token.to_owned(), id);
		id
	}

	/// Id of a single token; unseen tokens map to [`UNK_ID`].
	pub fn id(&self, token: &str) -> TokenId {
		self.ids.get(token).copied().unwrap_or(UNK_ID)
	}

	/// Resolves a token sequence into ids, order preserved.
	///
	/// Never fails: unseen tokens become [`UNK_ID`].
	pub fn lookup<S: AsRef<str>>(&self, tokens: &[S]) -> Vec<TokenId> {
		tokens.iter().map(|token| self.id(token.as_ref())).collect()
	}

	/// Surface form of `id`, if the id belongs to this vocabulary.
	pub fn token(&self, id: TokenId) -> Option<&str> {
		self.tokens.get(id as usize).map(String::as_str)
	}

	/// Number of entries, `<UNK>` included.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unk_is_reserved() {
		let vocabulary = Vocabulary::default();
		assert_eq!(vocabulary.len(), 1);
		assert_eq!(vocabulary.token(UNK_ID), Some(UNK_TOKEN));
	}

	#[test]
	fn lookup_maps_unseen_tokens_to_unk() {
		let vocabulary = Vocabulary::from_tokens(["mov", "a", "b"]);
		assert_eq!(vocabulary.lookup(&["mov", "xyz", "b"]), vec![1, UNK_ID, 3]);
	}

	#[test]
	fn duplicates_keep_first_id() {
		let vocabulary = Vocabulary::from_tokens(["mov", "a", "mov"]);
		assert_eq!(vocabulary.len(), 3);
		assert_eq!(vocabulary.id("mov"), 1);
	}

	#[test]
	fn tokens_are_case_sensitive() {
		let vocabulary = Vocabulary::from_tokens(["mov"]);
		assert_eq!(vocabulary.id("MOV"), UNK_ID);
	}

	#[test]
	fn token_rejects_out_of_range_ids() {
		let vocabulary = Vocabulary::from_tokens(["mov"]);
		assert_eq!(vocabulary.token(1), Some("mov"));
		assert_eq!(vocabulary.token(2), None);
	}
}
