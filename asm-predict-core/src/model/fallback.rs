//! Fixed candidate lists answered when no trained model can be used.

use super::predictor::Candidate;
use super::variant::ModelVariant;

/// Instruction whose operands get a dedicated list.
pub const OPERAND_TRIGGER: &str = "mov";

const OPERANDS_8051: [(&str, u64); 5] = [("a", 10), ("b", 8), ("r1", 6), ("dptr", 4), ("c", 2)];
const OPERANDS_8085: [(&str, u64); 5] = [("a", 10), ("b", 8), ("h", 6), ("l", 4), ("m", 2)];
const INSTRUCTIONS: [(&str, u64); 5] =
	[("mov", 12), ("add", 8), ("jmp", 6), ("inc", 4), ("ret", 2)];

/// Plausible candidates for `context` without any model.
///
/// A context starting with `mov` gets the operand list of the variant;
/// anything else, the empty context included, gets the instruction list.
pub fn fallback<S: AsRef<str>>(context: &[S], variant: ModelVariant) -> Vec<Candidate> {
	let table = match context.first() {
		Some(first) if first.as_ref() == OPERAND_TRIGGER => match variant {
			ModelVariant::I8051 => &OPERANDS_8051,
			ModelVariant::I8085 => &OPERANDS_8085,
		},
		_ => &INSTRUCTIONS,
	};
	table.iter().map(|(token, count)| Candidate::new(*token, *count)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(list: &[Candidate]) -> Vec<&str> {
		list.iter().map(Candidate::token).collect()
	}

	#[test]
	fn mov_gets_variant_operands() {
		let i8051 = fallback(&["mov"], ModelVariant::I8051);
		assert_eq!(tokens(&i8051), ["a", "b", "r1", "dptr", "c"]);
		let i8085 = fallback(&["mov", "a"], ModelVariant::I8085);
		assert_eq!(tokens(&i8085), ["a", "b", "h", "l", "m"]);
	}

	#[test]
	fn only_the_first_token_matters() {
		let list = fallback(&["add", "mov"], ModelVariant::I8051);
		assert_eq!(tokens(&list), ["mov", "add", "jmp", "inc", "ret"]);
	}

	#[test]
	fn instruction_list_is_shared_by_variants() {
		let empty: [&str; 0] = [];
		for variant in ModelVariant::ALL {
			assert_eq!(fallback(&["add", "r1"], variant), fallback(&empty, variant));
			assert_eq!(fallback(&empty, variant)[0], Candidate::new("mov", 12));
		}
	}

	#[test]
	fn lists_are_ranked() {
		for variant in ModelVariant::ALL {
			for context in [&["mov"][..], &["ret"][..]] {
				let list = fallback(context, variant);
				assert_eq!(list.len(), 5);
				assert!(list.windows(2).all(|pair| pair[0].count() > pair[1].count()));
			}
		}
	}
}
