use serde::Serialize;

/// The five raw series pulled out of one log, each in document order.
///
/// Lengths are independent: a series holds as many values as its pattern
/// matched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExtractedSeries {
    pub n_elements: Vec<u64>,
    pub overestimation_mean_opt: Vec<f64>,
    pub overestimation_mean_non_opt: Vec<f64>,
    /// Seconds.
    pub insertion_time_opt: Vec<f64>,
    /// Seconds.
    pub insertion_time_non_opt: Vec<f64>,
}

impl ExtractedSeries {
    /// Length of the shortest series.
    pub fn common_len(&self) -> usize {
        [
            self.n_elements.len(),
            self.overestimation_mean_opt.len(),
            self.overestimation_mean_non_opt.len(),
            self.insertion_time_opt.len(),
            self.insertion_time_non_opt.len(),
        ]
        .into_iter()
        .min()
        .unwrap_or(0)
    }
}
