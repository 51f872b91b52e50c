use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::ngram_model::NGramModel;
use super::variant::ModelVariant;
use crate::error::{PredictError, PredictResult};
use crate::io;

/// Version written into every artifact; bumped on layout changes.
pub const FORMAT_VERSION: u32 = 1;

/// Something that can hand out the trained model of a variant.
///
/// The adapter only asks once per request, and only when the context is
/// not empty.
pub trait ModelSource {
	fn load(&self, variant: ModelVariant) -> PredictResult<NGramModel>;
}

/// On-disk envelope of a trained model.
///
/// Encoded with `postcard`; the version and variant are checked on load so
/// a stale or misplaced file is reported instead of being misread.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelArtifact {
	pub format_version: u32,
	pub variant: ModelVariant,
	pub model: NGramModel,
}

impl ModelArtifact {
	pub fn new(variant: ModelVariant, model: NGramModel) -> Self {
		Self { format_version: FORMAT_VERSION, variant, model }
	}

	/// Encodes the artifact into its binary form.
	pub fn to_bytes(&self) -> PredictResult<Vec<u8>> {
		Ok(postcard::to_stdvec(self)?)
	}

	/// Decodes an artifact and checks its version and variant.
	///
	/// # Errors
	/// - `Decode` if the bytes are not a valid artifact
	/// - `SchemaMismatch` if the format version differs
	/// - `VariantMismatch` if the artifact was built for another variant
	pub fn from_bytes(bytes: &[u8], expected: ModelVariant) -> PredictResult<Self> {
		let artifact: ModelArtifact = postcard::from_bytes(bytes)?;
		if artifact.format_version != FORMAT_VERSION {
			return Err(PredictError::SchemaMismatch {
				expected: FORMAT_VERSION,
				found: artifact.format_version,
			});
		}
		if artifact.variant != expected {
			return Err(PredictError::VariantMismatch { expected, found: artifact.variant });
		}
		Ok(artifact)
	}
}

/// File-backed [`ModelSource`] reading `n_gram_<variant>.bin` files.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
	dir: PathBuf,
}

impl ArtifactStore {
	pub fn new<P: AsRef<Path>>(dir: P) -> Self {
		Self { dir: io::normalize_folder(dir) }
	}

	/// Location of the artifact for `variant`, whether or not it exists.
	pub fn artifact_path(&self, variant: ModelVariant) -> PathBuf {
		io::artifact_path(&self.dir, variant)
	}

	/// Which variants currently have an artifact file on disk.
	pub fn availability(&self) -> Vec<(ModelVariant, PathBuf, bool)> {
		ModelVariant::ALL
			.into_iter()
			.map(|variant| {
				let path = self.artifact_path(variant);
				let present = path.is_file();
				(variant, path, present)
			})
			.collect()
	}
}

impl ModelSource for ArtifactStore {
	fn load(&self, variant: ModelVariant) -> PredictResult<NGramModel> {
		let path = self.artifact_path(variant);
		debug!(path = %path.display(), "looking for model artifact");

		let bytes = std::fs::read(&path)
			.map_err(|source| PredictError::ArtifactRead { path: path.clone(), source })?;
		let artifact = ModelArtifact::from_bytes(&bytes, variant)?;

		info!(
			model = %variant,
			contexts = artifact.model.len(),
			bytes = bytes.len(),
			"model artifact loaded"
		);
		Ok(artifact.model)
	}
}
