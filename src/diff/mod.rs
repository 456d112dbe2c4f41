pub mod preview;

pub use preview::{unified_diff, DEFAULT_CONTEXT};
