pub mod fs;

pub use fs::{read_text, sha256_hex, write_atomic, write_in_place};
