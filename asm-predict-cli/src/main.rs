use std::path::PathBuf;
use std::process::ExitCode;

use asm_predict_core::adapter::Adapter;
use asm_predict_core::config::{DEFAULT_ARTIFACT_DIR, DEFAULT_ORDER, PredictorConfig};
use asm_predict_core::model::artifact::ArtifactStore;
use asm_predict_core::normalize::QuoteRepair;
use asm_predict_core::request::PredictionResponse;
use clap::Parser;
use clap::error::ErrorKind;
use tracing::{error, info};

mod logging;

/// Predict the next 8051/8085 assembly token from the preceding ones.
///
/// Prints exactly one JSON line on stdout; diagnostics go to stderr.
#[derive(Parser, Debug)]
#[command(name = "asm-predict", version, about)]
struct Args {
	/// JSON request (`{"model":"8051","context":["mov"]}`), or @<path> to read it from a file
	#[arg(allow_hyphen_values = true)]
	input: Option<String>,

	/// Directory holding the n_gram_<model>.bin artifacts
	#[arg(long, env = "ASM_PREDICT_MODELS", default_value = DEFAULT_ARTIFACT_DIR)]
	models_dir: PathBuf,

	/// n-gram order; contexts keep their last n-1 tokens
	#[arg(long, default_value_t = DEFAULT_ORDER)]
	order: usize,

	/// Print which model artifacts are present and exit
	#[arg(long)]
	list_models: bool,

	/// Anything after the input is ignored
	#[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
	_rest: Vec<String>,
}

fn main() -> ExitCode {
	logging::init_logging();
	install_panic_handler();

	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(e) => match e.kind() {
			ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
			_ => return fail(format!("Invalid arguments: {}", first_line(&e.to_string()))),
		},
	};

	let config = PredictorConfig {
		artifact_dir: args.models_dir,
		order: args.order,
		..PredictorConfig::default()
	};
	let store = ArtifactStore::new(&config.artifact_dir);

	if args.list_models {
		println!("{}", list_models(&store));
		return ExitCode::SUCCESS;
	}

	let adapter = Adapter::new(&config, &store, &QuoteRepair);
	match adapter.handle(args.input) {
		Ok(served) => {
			info!(path = served.path.as_str(), "done");
			println!("{}", served.response.to_json());
			ExitCode::SUCCESS
		}
		Err(e) => fail(e),
	}
}

/// Prints a failure response and returns the failing exit code.
fn fail(e: impl std::fmt::Display) -> ExitCode {
	error!(error = %e, "request failed");
	println!("{}", PredictionResponse::failure(&e).to_json());
	ExitCode::FAILURE
}

fn first_line(message: &str) -> &str {
	let line = message.lines().next().unwrap_or_default();
	line.strip_prefix("error: ").unwrap_or(line)
}

/// Turns a panic into a failure response on stdout plus a backtrace on
/// stderr. The process still exits non-zero afterwards.
fn install_panic_handler() {
	std::panic::set_hook(Box::new(|info| {
		let backtrace = std::backtrace::Backtrace::force_capture();
		error!(panic = %info, backtrace = %backtrace, "unexpected error");
		let response = PredictionResponse::failure(format!("Unexpected error: {info}"));
		println!("{}", response.to_json());
	}));
}

/// One-line JSON summary of artifact availability.
fn list_models(store: &ArtifactStore) -> String {
	let models: Vec<serde_json::Value> = store
		.availability()
		.into_iter()
		.map(|(variant, path, available)| {
			serde_json::json!({
				"model": variant,
				"available": available,
				"path": path.display().to_string(),
			})
		})
		.collect();
	serde_json::json!({ "models": models }).to_string()
}
