use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Instruction-set family a model was trained on.
///
/// Serialized with its wire name (`"8051"` / `"8085"`), which is also the
/// suffix of the artifact file name.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ModelVariant {
	#[default]
	#[serde(rename = "8051")]
	I8051,
	#[serde(rename = "8085")]
	I8085,
}

impl ModelVariant {
	/// Every supported variant, default first.
	pub const ALL: [ModelVariant; 2] = [ModelVariant::I8051, ModelVariant::I8085];

	pub fn name(self) -> &'static str {
		match self {
			ModelVariant::I8051 => "8051",
			ModelVariant::I8085 => "8085",
		}
	}
}

impl fmt::Display for ModelVariant {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for ModelVariant {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ModelVariant::ALL
			.into_iter()
			.find(|variant| variant.name() == s)
			.ok_or_else(|| format!("Unsupported model type: {s}"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_wire_names() {
		assert_eq!("8051".parse::<ModelVariant>(), Ok(ModelVariant::I8051));
		assert_eq!("8085".parse::<ModelVariant>(), Ok(ModelVariant::I8085));
		assert!("z80".parse::<ModelVariant>().is_err());
		assert!(" 8051".parse::<ModelVariant>().is_err());
	}

	#[test]
	fn default_is_8051() {
		assert_eq!(ModelVariant::default(), ModelVariant::I8051);
		assert_eq!(ModelVariant::ALL[0], ModelVariant::default());
	}

	#[test]
	fn serializes_as_wire_name() {
		let json = serde_json::to_string(&ModelVariant::I8085).unwrap();
		assert_eq!(json, "\"8085\"");
	}
}
