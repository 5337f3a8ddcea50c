use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
pub struct LogConfig {
    /// Raise this crate to `debug` (request/response tracing)
    pub verbose: bool,
}

/// Initialize stderr logging.
///
/// `RUST_LOG` takes precedence over the verbosity flag, e.g.
/// `RUST_LOG=opendrive::api=debug opendrive browse` shows only HTTP traffic.
pub fn init_logging(config: LogConfig) -> Result<()> {
    let default_directive = if config.verbose {
        "opendrive=debug"
    } else {
        "opendrive=warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.verbose)
        .without_time();

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
