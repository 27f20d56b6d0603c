use crate::Result;
use crate::log::series::ExtractedSeries;
use crate::units::time;
use anyhow::Context;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Read a benchmark log and extract its metric series.
pub fn parse_log_file(path: &Path) -> Result<ExtractedSeries> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read log file {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "read log file");
    extract_series(&text)
}

/// Extract the five series from the full log text.
///
/// Each pattern is applied independently over the whole text; values come
/// back in document order. A pattern that never matches yields an empty
/// series, which is not an error.
///
/// Example block as printed by the benchmark:
/// Checking overestimation rate with n_elements = 100
/// Insertion time, with the optimization: 1.5ms
/// Overestimation rate, optimized:
/// Overestimation sum: 12
/// Overestimation mean: 0.05
/// Insertion time, without the optimization: 2ms
/// Overestimation rate, non optimized:
/// Overestimation mean: 0.08
pub fn extract_series(text: &str) -> Result<ExtractedSeries> {
    let n_elements_re = Regex::new(r"Checking overestimation rate with n_elements = ([0-9]+)")?;
    // Unit is captured loosely so an unknown one fails in conversion
    // rather than silently dropping the match.
    let time_opt_re =
        Regex::new(r"Insertion time, with the optimization: ([0-9.]+)([µμmns]+)")?;
    let time_non_opt_re =
        Regex::new(r"Insertion time, without the optimization: ([0-9.]+)([µμmns]+)")?;
    // Lazy across lines: the first "Overestimation mean" after each header.
    let overest_opt_re =
        Regex::new(r"(?s)Overestimation rate, optimized:.*?Overestimation mean: ([0-9.]+)")?;
    let overest_non_opt_re =
        Regex::new(r"(?s)Overestimation rate, non optimized:.*?Overestimation mean: ([0-9.]+)")?;

    let n_elements = n_elements_re
        .captures_iter(text)
        .map(|caps| {
            let raw = &caps[1];
            raw.parse::<u64>()
                .with_context(|| format!("bad n_elements value {:?}", raw))
        })
        .collect::<Result<Vec<_>>>()?;

    let series = ExtractedSeries {
        n_elements,
        overestimation_mean_opt: capture_floats(&overest_opt_re, text, "optimized overestimation mean")?,
        overestimation_mean_non_opt: capture_floats(
            &overest_non_opt_re,
            text,
            "non optimized overestimation mean",
        )?,
        insertion_time_opt: capture_seconds(&time_opt_re, text)?,
        insertion_time_non_opt: capture_seconds(&time_non_opt_re, text)?,
    };

    tracing::debug!(
        n_elements = series.n_elements.len(),
        overestimation_opt = series.overestimation_mean_opt.len(),
        overestimation_non_opt = series.overestimation_mean_non_opt.len(),
        insertion_time_opt = series.insertion_time_opt.len(),
        insertion_time_non_opt = series.insertion_time_non_opt.len(),
        "pattern match counts"
    );

    Ok(series)
}

fn capture_floats(re: &Regex, text: &str, what: &str) -> Result<Vec<f64>> {
    re.captures_iter(text)
        .map(|caps| {
            let raw = &caps[1];
            raw.parse::<f64>()
                .with_context(|| format!("bad {} value {:?}", what, raw))
        })
        .collect()
}

/// Captures are (magnitude, unit); converted to seconds.
fn capture_seconds(re: &Regex, text: &str) -> Result<Vec<f64>> {
    re.captures_iter(text)
        .map(|caps| {
            time::to_seconds(&caps[1], &caps[2])
                .with_context(|| format!("bad insertion time {:?}", &caps[0]))
        })
        .collect()
}
