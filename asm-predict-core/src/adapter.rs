use tracing::{debug, info, warn};

use crate::config::PredictorConfig;
use crate::error::RequestResult;
use crate::model::artifact::ModelSource;
use crate::model::fallback::fallback;
use crate::model::predictor::predict_next;
use crate::normalize::Normalizer;
use crate::request::{Invocation, PredictionRequest, PredictionResponse};

/// Which branch produced the candidates of a success response.
///
/// Not part of the JSON output: a fallback answer looks exactly like a
/// model answer on the wire. Embedders that need to tell them apart read
/// it from [`Served`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionPath {
	/// Empty context, answered without touching the model.
	Sentinel,
	/// Ranked from the trained model.
	Model,
	/// The model path failed; static candidates were answered.
	Fallback,
}

impl PredictionPath {
	pub fn as_str(self) -> &'static str {
		match self {
			PredictionPath::Sentinel => "sentinel",
			PredictionPath::Model => "model",
			PredictionPath::Fallback => "fallback",
		}
	}
}

/// A success response and how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct Served {
	pub response: PredictionResponse,
	pub path: PredictionPath,
}

/// Runs one request from raw argument to response.
///
/// Holds no state between requests; each call loads what it needs.
pub struct Adapter<'a, S: ModelSource + ?Sized, N: Normalizer + ?Sized> {
	config: &'a PredictorConfig,
	source: &'a S,
	normalizer: &'a N,
}

impl<'a, S: ModelSource + ?Sized, N: Normalizer + ?Sized> Adapter<'a, S, N> {
	pub fn new(config: &'a PredictorConfig, source: &'a S, normalizer: &'a N) -> Self {
		Self { config, source, normalizer }
	}

	/// Handles the positional argument of an invocation.
	///
	/// # Errors
	/// Only the conditions that abort before a prediction: missing
	/// argument, unreadable input file, invalid configuration and text
	/// that does not parse even after normalization. Once a request is
	/// parsed the answer is always a success.
	pub fn handle(&self, arg: Option<String>) -> RequestResult<Served> {
		self.config.validate()?;

		let raw = Invocation::from_arg(arg)?.read()?;
		debug!(input = %raw, "raw input");

		let text = self.normalizer.normalize(&raw);
		debug!(input = %text, "processed input");

		let request = PredictionRequest::parse(&text, self.config)?;
		Ok(self.serve(&request))
	}

	/// Answers a parsed request, degrading to fallback candidates when the
	/// model path fails.
	pub fn serve(&self, request: &PredictionRequest) -> Served {
		let variant = request.model;
		let context = &request.context;

		let (predictions, path) = match predict_next(
			self.source,
			variant,
			context,
			self.config.order,
			self.config.max_candidates,
		) {
			Ok(predictions) if context.is_empty() => (predictions, PredictionPath::Sentinel),
			Ok(predictions) => (predictions, PredictionPath::Model),
			Err(e) => {
				warn!(model = %variant, error = %e, "model unavailable, using fallback");
				let mut predictions = fallback(context, variant);
				predictions.truncate(self.config.max_candidates);
				(predictions, PredictionPath::Fallback)
			}
		};

		info!(
			model = %variant,
			path = path.as_str(),
			candidates = predictions.len(),
			"prediction served"
		);
		Served { response: PredictionResponse::success(predictions, variant), path }
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{PredictError, PredictResult, RequestError};
	use crate::model::ngram_model::NGramModel;
	use crate::model::predictor::Candidate;
	use crate::model::variant::ModelVariant;
	use crate::normalize::QuoteRepair;

	struct Fixed(NGramModel);

	impl ModelSource for Fixed {
		fn load(&self, _variant: ModelVariant) -> PredictResult<NGramModel> {
			Ok(self.0.clone())
		}
	}

	struct Missing;

	impl ModelSource for Missing {
		fn load(&self, _variant: ModelVariant) -> PredictResult<NGramModel> {
			Err(PredictError::ArtifactRead {
				path: "n_gram_8051.bin".into(),
				source: std::io::Error::from(std::io::ErrorKind::NotFound),
			})
		}
	}

	fn handle<S: ModelSource>(source: &S, arg: &str) -> Served {
		let config = PredictorConfig::default();
		Adapter::new(&config, source, &QuoteRepair).handle(Some(arg.to_owned())).unwrap()
	}

	fn tokens(served: &Served) -> Vec<&str> {
		served.response.predictions.as_ref().unwrap().iter().map(Candidate::token).collect()
	}

	#[test]
	fn missing_model_gives_operand_fallback() {
		let served = handle(&Missing, r#"{"model":"8051","context":["mov"]}"#);
		assert_eq!(served.path, PredictionPath::Fallback);
		assert!(served.response.success);
		assert_eq!(tokens(&served), ["a", "b", "r1", "dptr", "c"]);
		assert_eq!(served.response.model, Some(ModelVariant::I8051));
	}

	#[test]
	fn empty_context_gives_sentinel() {
		let served = handle(&Missing, r#"{"model":"8085","context":[]}"#);
		assert_eq!(served.path, PredictionPath::Sentinel);
		assert_eq!(served.response.predictions, Some(vec![Candidate::new("nop", 1)]));
		assert_eq!(served.response.model, Some(ModelVariant::I8085));
	}

	#[test]
	fn unknown_variant_uses_default_and_instructions() {
		let served = handle(&Missing, r#"{"model":"z80","context":["add","r1"]}"#);
		assert_eq!(served.response.model, Some(ModelVariant::I8051));
		assert_eq!(tokens(&served), ["mov", "add", "jmp", "inc", "ret"]);
	}

	#[test]
	fn single_quoted_input_is_processed() {
		let served = handle(&Missing, "{'model':'8085','context':['mov']}");
		assert_eq!(served.response.model, Some(ModelVariant::I8085));
		assert_eq!(tokens(&served), ["a", "b", "h", "l", "m"]);
	}

	#[test]
	fn model_path_ranks_real_counts() {
		let model = NGramModel::from_counts(3, [
			(vec!["mov", "a"], "#0", 3),
			(vec!["mov", "a"], "r0", 8),
		])
		.unwrap();
		let served = handle(&Fixed(model), r#"{"context":["inc","mov","a"]}"#);
		assert_eq!(served.path, PredictionPath::Model);
		assert_eq!(
			served.response.predictions,
			Some(vec![Candidate::new("r0", 8), Candidate::new("#0", 3)])
		);
	}

	#[test]
	fn unseen_context_is_an_empty_success() {
		let model = NGramModel::from_counts(3, [(vec!["mov"], "a", 1)]).unwrap();
		let served = handle(&Fixed(model), r#"{"context":["xyz"]}"#);
		assert_eq!(served.path, PredictionPath::Model);
		assert_eq!(served.response.predictions, Some(vec![]));
	}

	#[test]
	fn pre_parse_failures_are_errors() {
		let config = PredictorConfig::default();
		let adapter = Adapter::new(&config, &Missing, &QuoteRepair);
		assert!(matches!(adapter.handle(None), Err(RequestError::MissingInput)));
		assert!(matches!(
			adapter.handle(Some("@/no/such/file.json".into())),
			Err(RequestError::ReadInput { .. })
		));
		assert!(matches!(
			adapter.handle(Some("{'context':['it's']}".into())),
			Err(RequestError::Parse(_))
		));
	}

	#[test]
	fn invalid_config_is_rejected() {
		let config = PredictorConfig { order: 0, ..PredictorConfig::default() };
		let adapter = Adapter::new(&config, &Missing, &QuoteRepair);
		assert!(matches!(adapter.handle(Some("{}".into())), Err(RequestError::Config(_))));
	}
}
