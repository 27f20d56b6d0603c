//! Chart model: two y axes over a shared "number of elements" x axis.
//!
//! Ranges and tick positions are settled here so the renderer only maps
//! numbers to pixels.

use crate::model::AlignedDataset;
use serde::Serialize;

pub const TITLE: &str = "Overestimation Mean and Insertion Time vs Number of Elements";

// matplotlib "tab:" palette.
const TAB_BLUE: &str = "#1f77b4";
const TAB_CYAN: &str = "#17becf";
const TAB_RED: &str = "#d62728";
const TAB_ORANGE: &str = "#ff7f0e";
const AXIS_BLACK: &str = "#000000";

const TARGET_TICKS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Circle,
    Square,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    pub color: &'static str,
    pub min: f64,
    pub max: f64,
    pub ticks: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesView {
    pub label: String,
    pub color: &'static str,
    pub marker: Marker,
    pub dashed: bool,
    /// (x, y) pairs in data units.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub points: usize,
    pub x: Axis,
    pub left: Axis,
    pub right: Axis,
    /// Drawn against `left`, legend in the upper left.
    pub left_series: Vec<SeriesView>,
    /// Drawn against `right`, legend in the upper right.
    pub right_series: Vec<SeriesView>,
}

pub fn build_chart_data(data: &AlignedDataset) -> ChartData {
    let xs: Vec<f64> = data.n_elements.iter().map(|&n| n as f64).collect();

    let series = |label: &str, color, marker, dashed, ys: &[f64]| SeriesView {
        label: label.to_string(),
        color,
        marker,
        dashed,
        points: xs.iter().zip(ys).map(|(&x, &y)| [x, y]).collect(),
    };

    let left_series = vec![
        series(
            "Overestimation Mean (Optimized)",
            TAB_BLUE,
            Marker::Circle,
            false,
            &data.overestimation_mean_opt,
        ),
        series(
            "Overestimation Mean (Non-Optimized)",
            TAB_CYAN,
            Marker::Square,
            false,
            &data.overestimation_mean_non_opt,
        ),
    ];
    let right_series = vec![
        series(
            "Insertion Time (Optimized)",
            TAB_RED,
            Marker::Circle,
            true,
            &data.insertion_time_opt,
        ),
        series(
            "Insertion Time (Non-Optimized)",
            TAB_ORANGE,
            Marker::Square,
            true,
            &data.insertion_time_non_opt,
        ),
    ];

    let left_values = data
        .overestimation_mean_opt
        .iter()
        .chain(&data.overestimation_mean_non_opt);
    let right_values = data
        .insertion_time_opt
        .iter()
        .chain(&data.insertion_time_non_opt);

    ChartData {
        title: TITLE.to_string(),
        points: data.len(),
        x: axis("Number of elements", AXIS_BLACK, xs.iter()),
        left: axis("Overestimation Mean", TAB_BLUE, left_values),
        right: axis("Insertion Time (seconds)", TAB_RED, right_values),
        left_series,
        right_series,
    }
}

fn axis<'a>(label: &str, color: &'static str, values: impl Iterator<Item = &'a f64>) -> Axis {
    let (lo, hi) = data_range(values);
    let ticks = nice_ticks(lo, hi, TARGET_TICKS);
    let (min, max) = match (ticks.first(), ticks.last()) {
        (Some(&a), Some(&b)) => (a, b),
        _ => (lo, hi),
    };
    Axis {
        label: label.to_string(),
        color,
        min,
        max,
        ticks,
    }
}

/// Finite min/max of the values, widened so the span is never zero.
fn data_range<'a>(values: impl Iterator<Item = &'a f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for &v in values.filter(|v| v.is_finite()) {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        return (0.0, 1.0);
    }
    if lo == hi {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - pad, hi + pad);
    }
    (lo, hi)
}

/// Evenly spaced ticks on 1/2/5 x 10^k steps covering `[lo, hi]`.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo || target < 2 {
        return Vec::new();
    }
    let span = nice_number(hi - lo, false);
    let step = nice_number(span / (target - 1) as f64, true);
    let start = (lo / step).floor() * step;
    let end = (hi / step).ceil() * step;
    let count = ((end - start) / step).round() as usize;

    (0..=count)
        .map(|i| {
            let v = start + i as f64 * step;
            // Snap away accumulated error such as 0.30000000000000004.
            let snapped = (v / step).round() * step;
            if snapped.abs() < step * 1e-9 { 0.0 } else { snapped }
        })
        .collect()
}

fn nice_number(x: f64, round: bool) -> f64 {
    let exp = x.log10().floor();
    let base = 10f64.powf(exp);
    let f = x / base;
    let nice = if round {
        if f < 1.5 {
            1.0
        } else if f < 3.0 {
            2.0
        } else if f < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if f <= 1.0 {
        1.0
    } else if f <= 2.0 {
        2.0
    } else if f <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dataset() -> AlignedDataset {
        AlignedDataset {
            n_elements: vec![100, 200],
            overestimation_mean_opt: vec![0.05, 0.06],
            overestimation_mean_non_opt: vec![0.08, 0.11],
            insertion_time_opt: vec![0.0015, 0.003],
            insertion_time_non_opt: vec![0.002, 0.0045],
        }
    }

    #[test]
    fn ticks_on_round_numbers() {
        assert_eq!(nice_ticks(0.0, 10.0, 6), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(nice_ticks(100.0, 200.0, 6), vec![100.0, 120.0, 140.0, 160.0, 180.0, 200.0]);
    }

    #[test]
    fn ticks_cover_the_range_with_even_steps() {
        for (lo, hi) in [(0.05, 0.11), (0.0015, 0.0045), (3.0, 50_000.0), (-2.5, 7.25)] {
            let ticks = nice_ticks(lo, hi, TARGET_TICKS);
            assert!(ticks.len() >= 2, "{:?}", ticks);
            assert!(ticks[0] <= lo, "{:?} for {}", ticks, lo);
            assert!(*ticks.last().unwrap() >= hi, "{:?} for {}", ticks, hi);

            let step = ticks[1] - ticks[0];
            for w in ticks.windows(2) {
                assert!(((w[1] - w[0]) - step).abs() < step * 1e-6, "{:?}", ticks);
            }
        }
    }

    #[test]
    fn degenerate_ranges_get_no_ticks() {
        assert!(nice_ticks(1.0, 1.0, 6).is_empty());
        assert!(nice_ticks(2.0, 1.0, 6).is_empty());
        assert!(nice_ticks(f64::NAN, 1.0, 6).is_empty());
    }

    #[test]
    fn single_point_still_gets_a_span() {
        assert_eq!(data_range([5.0].iter()), (4.5, 5.5));
        assert_eq!(data_range([0.0].iter()), (-1.0, 1.0));
        assert_eq!(data_range(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn series_are_split_across_the_two_axes() {
        let chart = build_chart_data(&dataset());

        assert_eq!(chart.title, TITLE);
        assert_eq!(chart.points, 2);
        assert_eq!(chart.x.label, "Number of elements");
        assert_eq!(chart.left.label, "Overestimation Mean");
        assert_eq!(chart.right.label, "Insertion Time (seconds)");

        let left: Vec<_> = chart.left_series.iter().map(|s| (s.label.as_str(), s.dashed)).collect();
        assert_eq!(
            left,
            vec![
                ("Overestimation Mean (Optimized)", false),
                ("Overestimation Mean (Non-Optimized)", false),
            ]
        );
        assert!(chart.right_series.iter().all(|s| s.dashed));
        assert_eq!(chart.right_series[1].points, vec![[100.0, 0.002], [200.0, 0.0045]]);
    }

    #[test]
    fn every_series_has_its_own_color() {
        let chart = build_chart_data(&dataset());
        let mut colors: Vec<_> = chart
            .left_series
            .iter()
            .chain(&chart.right_series)
            .map(|s| s.color)
            .collect();
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 4);
    }

    #[test]
    fn axes_enclose_their_data() {
        let chart = build_chart_data(&dataset());
        assert!(chart.left.min <= 0.05 && chart.left.max >= 0.11);
        assert!(chart.right.min <= 0.0015 && chart.right.max >= 0.0045);
        assert!(chart.x.min <= 100.0 && chart.x.max >= 200.0);
    }

    #[test]
    fn empty_dataset_builds_an_empty_chart() {
        let chart = build_chart_data(&AlignedDataset::default());
        assert_eq!(chart.points, 0);
        assert!(chart.left_series.iter().all(|s| s.points.is_empty()));
        assert_eq!((chart.x.min, chart.x.max), (0.0, 1.0));
    }
}
