use tracing_subscriber::{EnvFilter, fmt};

/// Installs the stderr diagnostics subscriber.
///
/// Level comes from `RUST_LOG`, `info` when unset. Stdout stays reserved for
/// the response line.
pub fn init_logging() {
	let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

	let result = fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_level(true)
		.try_init();

	if let Err(e) = result {
		eprintln!("Log system initialization failed: {e}");
	}
}
