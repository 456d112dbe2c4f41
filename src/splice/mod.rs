// Line-range splicing: replace lines `start..end` of a file with the
// contents of another file

pub mod file;
pub mod lines;
pub mod range;

pub use file::{SpliceOptions, SpliceReport, Splicer};
pub use lines::{line_count, splice_lines, split_lines, SpliceOutcome};
pub use range::{Bounds, LineRange};
