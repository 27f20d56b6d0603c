//! Aligned dataset: raw series cut to a shared length, plus the chart model.

pub mod chart;

use crate::log::ExtractedSeries;
use serde::Serialize;

pub use chart::{ChartData, build_chart_data};

/// Five series of identical length; index `i` in each refers to the same
/// benchmark run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlignedDataset {
    pub n_elements: Vec<u64>,
    pub overestimation_mean_opt: Vec<f64>,
    pub overestimation_mean_non_opt: Vec<f64>,
    pub insertion_time_opt: Vec<f64>,
    pub insertion_time_non_opt: Vec<f64>,
}

impl AlignedDataset {
    pub fn len(&self) -> usize {
        self.n_elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_elements.is_empty()
    }
}

/// Truncate every series to the shortest one's length.
///
/// Prefix truncation only: values past the common length are dropped, the
/// rest keep their order. Any empty series empties the whole dataset.
pub fn align(raw: ExtractedSeries) -> AlignedDataset {
    let len = raw.common_len();
    let dropped = [
        raw.n_elements.len(),
        raw.overestimation_mean_opt.len(),
        raw.overestimation_mean_non_opt.len(),
        raw.insertion_time_opt.len(),
        raw.insertion_time_non_opt.len(),
    ]
    .iter()
    .map(|n| n - len)
    .sum::<usize>();
    if dropped > 0 {
        tracing::debug!(len, dropped, "truncated series to common length");
    }

    let ExtractedSeries {
        mut n_elements,
        mut overestimation_mean_opt,
        mut overestimation_mean_non_opt,
        mut insertion_time_opt,
        mut insertion_time_non_opt,
    } = raw;

    n_elements.truncate(len);
    overestimation_mean_opt.truncate(len);
    overestimation_mean_non_opt.truncate(len);
    insertion_time_opt.truncate(len);
    insertion_time_non_opt.truncate(len);

    AlignedDataset {
        n_elements,
        overestimation_mean_opt,
        overestimation_mean_non_opt,
        insertion_time_opt,
        insertion_time_non_opt,
    }
}
