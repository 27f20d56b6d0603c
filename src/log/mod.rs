//! Metric extraction from benchmark log text.

pub mod parse;
pub mod series;

pub use parse::parse_log_file;
pub use series::ExtractedSeries;
