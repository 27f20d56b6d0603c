//! Measurement units found in benchmark logs.

pub mod time;
