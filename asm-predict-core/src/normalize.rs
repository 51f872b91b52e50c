//! Best-effort repair of request text before it is parsed.

use std::borrow::Cow;

use tracing::debug;

/// Turns raw request text into something a strict JSON parser accepts.
///
/// Implementations must return valid input unchanged and must be
/// idempotent.
pub trait Normalizer {
	fn normalize<'a>(&self, raw: &'a str) -> Cow<'a, str>;
}

/// Repairs requests quoted with `'` instead of `"`.
///
/// Shells mangle quoting, so `{'model':'8085'}` is a common arrival. Every
/// single quote is swapped for a double quote; if the result still does
/// not parse, the original text is kept so the parse error points at what
/// the caller actually sent.
///
/// Lossy: a string value containing an apostrophe cannot be repaired.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuoteRepair;

impl Normalizer for QuoteRepair {
	fn normalize<'a>(&self, raw: &'a str) -> Cow<'a, str> {
		if is_json(raw) {
			return Cow::Borrowed(raw);
		}

		let repaired = raw.replace('\'', "\"");
		if is_json(&repaired) {
			debug!(repaired = %repaired, "input repaired by quote swap");
			Cow::Owned(repaired)
		} else {
			Cow::Borrowed(raw)
		}
	}
}

fn is_json(text: &str) -> bool {
	serde_json::from_str::<serde_json::Value>(text).is_ok()
}
