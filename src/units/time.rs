//! Time magnitudes as printed by the benchmark.
//!
//! The benchmark prints `std::time::Duration` with `{:?}`, which picks the
//! largest unit that keeps the integer part non-zero:
//! 2.000012s  1.5ms  812.3µs  900ns

use anyhow::{Context, bail};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Seconds,
    Milliseconds,
    Microseconds,
    Nanoseconds,
}

impl TimeUnit {
    /// Fixed factor that turns one of this unit into seconds.
    pub fn seconds_factor(self) -> f64 {
        match self {
            TimeUnit::Seconds => 1.0,
            TimeUnit::Milliseconds => 1e-3,
            TimeUnit::Microseconds => 1e-6,
            TimeUnit::Nanoseconds => 1e-9,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Seconds => "s",
            TimeUnit::Milliseconds => "ms",
            TimeUnit::Microseconds => "µs",
            TimeUnit::Nanoseconds => "ns",
        }
    }
}

impl FromStr for TimeUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "s" => TimeUnit::Seconds,
            "ms" => TimeUnit::Milliseconds,
            // MICRO SIGN (what Duration prints) and GREEK SMALL LETTER MU.
            "µs" | "μs" => TimeUnit::Microseconds,
            "ns" => TimeUnit::Nanoseconds,
            other => bail!("unrecognized time unit {:?}", other),
        })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A (magnitude, unit) pair lifted out of the log text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeValue {
    pub magnitude: f64,
    pub unit: TimeUnit,
}

impl TimeValue {
    /// Parse the captured number and unit tokens, e.g. ("1.5", "ms").
    pub fn parse(magnitude: &str, unit: &str) -> anyhow::Result<Self> {
        let unit: TimeUnit = unit.parse()?;
        let magnitude: f64 = magnitude
            .parse()
            .with_context(|| format!("bad time magnitude {:?}", magnitude))?;
        Ok(Self { magnitude, unit })
    }

    pub fn as_seconds(&self) -> f64 {
        self.magnitude * self.unit.seconds_factor()
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.magnitude, self.unit)
    }
}

/// Convert a numeric string with a unit token to seconds.
pub fn to_seconds(magnitude: &str, unit: &str) -> anyhow::Result<f64> {
    Ok(TimeValue::parse(magnitude, unit)?.as_seconds())
}
