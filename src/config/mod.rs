// Configuration for linesplice: built-in defaults, an optional config file,
// and command-line overrides applied by the binary

#[allow(clippy::module_inception)]
pub mod config;

pub use config::{JobConfig, LogConfig, SpliceConfig, WriteConfig, LOCAL_CONFIG_FILE};
