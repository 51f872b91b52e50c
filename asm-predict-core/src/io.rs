use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::{env, io};

use crate::model::variant::ModelVariant;

/// Reads a whole text file into memory.
///
/// The handle is dropped before returning, on success and on error.
pub(crate) fn read_text<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Builds the artifact path of a variant inside `dir`.
///
/// Example:
/// `assets/models` + `8051` → `assets/models/n_gram_8051.bin`
pub fn artifact_path<P: AsRef<Path>>(dir: P, variant: ModelVariant) -> PathBuf {
	let mut output = PathBuf::from(dir.as_ref());
	output.push(format!("n_gram_{}", variant.name()));
	output.set_extension("bin");
	output
}

/// Normalize a folder path.
///
/// - `"."` or `"./"` resolves to the current working directory
/// - Other paths are returned as-is (not canonicalized)
pub(crate) fn normalize_folder<P: AsRef<Path>>(input: P) -> PathBuf {
	let input = input.as_ref();
	if input == Path::new(".") || input == Path::new("./") {
		env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
	} else {
		input.to_path_buf()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn artifact_path_is_keyed_by_variant() {
		assert_eq!(
			artifact_path("assets/models", ModelVariant::I8051),
			PathBuf::from("assets/models/n_gram_8051.bin")
		);
		assert_eq!(
			artifact_path("m", ModelVariant::I8085),
			PathBuf::from("m/n_gram_8085.bin")
		);
	}

	#[test]
	fn dot_resolves_to_current_dir() {
		assert_eq!(normalize_folder("."), env::current_dir().unwrap());
		assert_eq!(normalize_folder("data"), PathBuf::from("data"));
	}

	#[test]
	fn read_text_reports_missing_files() {
		let err = read_text("definitely/not/here.json").unwrap_err();
		assert_eq!(err.kind(), io::ErrorKind::NotFound);
	}
}
