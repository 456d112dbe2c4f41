// linesplice - replace a range of lines in a text file with the contents
// of another file

pub mod config;
pub mod diff;
pub mod error;
pub mod splice;
pub mod utils;

use anyhow::Result;
use tracing::debug;

pub use error::{SpliceError, SpliceResult};
pub use splice::{Bounds, LineRange, SpliceOptions, SpliceReport, Splicer};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Initialize logging to stderr so stdout only carries the result.
///
/// `RUST_LOG` takes precedence over `default_level`.
pub fn init_with_logger(default_level: &str, ansi_colors: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", default_level, e))?;

    fmt::Subscriber::builder()
        .with_ansi(ansi_colors)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    debug!("Initialized linesplice v{}", version());
    Ok(())
}
