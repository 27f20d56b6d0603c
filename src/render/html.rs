use crate::model::ChartData;

/// Render a self-contained HTML page that draws the chart as inline SVG
/// (chart data embedded as JSON, no external assets).
///
/// Important: we avoid `format!()` because the script contains many `{}`
/// from JS template literals (e.g., `${x}`), which would conflict with Rust
/// formatting.
pub fn render_html_chart(data: &ChartData) -> anyhow::Result<String> {
    // `</` inside a string literal would close the script element early.
    let json = serde_json::to_string(data)?.replace("</", "<\\/");

    const TEMPLATE: &str = r##"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<style>
  body { font-family: system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; margin: 0; padding: 16px; }
  #chart { display: block; margin: 0 auto; }
  .notice { text-align: center; color: #777; font-size: 14px; }
  svg text { font-size: 12px; }
  svg .title { font-size: 15px; }
  svg .axis-label { font-size: 13px; }
</style>
</head>
<body>
<svg id="chart" width="960" height="560" xmlns="http://www.w3.org/2000/svg"></svg>
<div id="notice" class="notice"></div>

<script>
// Embedded chart data (JSON object literal)
const DATA = __DATA__;

const W = 960, H = 560;
const M = { top: 48, right: 90, bottom: 56, left: 90 };
const PW = W - M.left - M.right;
const PH = H - M.top - M.bottom;
const NS = "http://www.w3.org/2000/svg";
const svg = document.getElementById("chart");

function el(name, attrs, text) {
  const e = document.createElementNS(NS, name);
  for (const [k, v] of Object.entries(attrs || {})) e.setAttribute(k, v);
  if (text !== undefined) e.textContent = text;
  svg.appendChild(e);
  return e;
}

function scale(axis, lo, hi) {
  const span = axis.max - axis.min;
  return (v) => lo + (span === 0 ? 0.5 : (v - axis.min) / span) * (hi - lo);
}

function fmt(v) {
  if (v === 0) return "0";
  const a = Math.abs(v);
  if (a >= 1e5 || a < 1e-3) return v.toExponential(1);
  return String(Number(v.toPrecision(6)));
}

const sx = scale(DATA.x, M.left, M.left + PW);
const sl = scale(DATA.left, M.top + PH, M.top);
const sr = scale(DATA.right, M.top + PH, M.top);

function drawFrame() {
  el("rect", { x: M.left, y: M.top, width: PW, height: PH, fill: "none", stroke: "#000" });

  for (const t of DATA.x.ticks) {
    const x = sx(t);
    el("line", { x1: x, y1: M.top + PH, x2: x, y2: M.top + PH + 5, stroke: "#000" });
    el("text", { x: x, y: M.top + PH + 18, "text-anchor": "middle" }, fmt(t));
  }
  for (const t of DATA.left.ticks) {
    const y = sl(t);
    el("line", { x1: M.left - 5, y1: y, x2: M.left, y2: y, stroke: "#000" });
    el("text", { x: M.left - 8, y: y + 4, "text-anchor": "end", fill: DATA.left.color }, fmt(t));
  }
  for (const t of DATA.right.ticks) {
    const y = sr(t);
    el("line", { x1: M.left + PW, y1: y, x2: M.left + PW + 5, y2: y, stroke: "#000" });
    el("text", { x: M.left + PW + 8, y: y + 4, "text-anchor": "start", fill: DATA.right.color }, fmt(t));
  }

  el("text", { x: W / 2, y: M.top - 16, "text-anchor": "middle", class: "title" }, DATA.title);
  el("text", { x: M.left + PW / 2, y: H - 14, "text-anchor": "middle", class: "axis-label", fill: DATA.x.color }, DATA.x.label);
  el("text", {
    x: 0, y: 0, "text-anchor": "middle", class: "axis-label", fill: DATA.left.color,
    transform: `translate(${M.left - 62}, ${M.top + PH / 2}) rotate(-90)`
  }, DATA.left.label);
  el("text", {
    x: 0, y: 0, "text-anchor": "middle", class: "axis-label", fill: DATA.right.color,
    transform: `translate(${M.left + PW + 70}, ${M.top + PH / 2}) rotate(90)`
  }, DATA.right.label);
}

function marker(kind, x, y, color) {
  if (kind === "square") {
    el("rect", { x: x - 4, y: y - 4, width: 8, height: 8, fill: color });
  } else {
    el("circle", { cx: x, cy: y, r: 4, fill: color });
  }
}

function drawSeries(series, sy) {
  const pts = series.points.map(([x, y]) => [sx(x), sy(y)]);
  if (pts.length > 1) {
    el("polyline", {
      points: pts.map(([x, y]) => `${x},${y}`).join(" "),
      fill: "none",
      stroke: series.color,
      "stroke-width": 1.5,
      "stroke-dasharray": series.dashed ? "6 4" : "none"
    });
  }
  for (const [x, y] of pts) marker(series.marker, x, y, series.color);
}

function drawLegend(list, anchorRight) {
  const rowH = 18, boxW = 250;
  const x0 = anchorRight ? M.left + PW - boxW - 8 : M.left + 8;
  const y0 = M.top + 8;
  el("rect", {
    x: x0, y: y0, width: boxW, height: list.length * rowH + 8,
    fill: "#fff", "fill-opacity": 0.85, stroke: "#ccc", rx: 3
  });
  list.forEach((s, i) => {
    const y = y0 + 4 + rowH * i + rowH / 2;
    el("line", {
      x1: x0 + 8, y1: y, x2: x0 + 36, y2: y, stroke: s.color, "stroke-width": 1.5,
      "stroke-dasharray": s.dashed ? "6 4" : "none"
    });
    marker(s.marker, x0 + 22, y, s.color);
    el("text", { x: x0 + 44, y: y + 4 }, s.label);
  });
}

drawFrame();
for (const s of DATA.left_series) drawSeries(s, sl);
for (const s of DATA.right_series) drawSeries(s, sr);
drawLegend(DATA.left_series, false);
drawLegend(DATA.right_series, true);

if (DATA.points === 0) {
  document.getElementById("notice").textContent = "No data points: at least one metric never appeared in the log.";
}
</script>
</body>
</html>
"##;

    Ok(TEMPLATE
        .replace("__TITLE__", &escape_html(&data.title))
        .replace("__DATA__", &json))
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlignedDataset, build_chart_data};

    fn chart() -> ChartData {
        build_chart_data(&AlignedDataset {
            n_elements: vec![100, 200],
            overestimation_mean_opt: vec![0.05, 0.06],
            overestimation_mean_non_opt: vec![0.08, 0.11],
            insertion_time_opt: vec![0.0015, 0.003],
            insertion_time_non_opt: vec![0.002, 0.0045],
        })
    }

    #[test]
    fn embeds_chart_data_as_json() {
        let html = render_html_chart(&chart()).unwrap();
        assert!(!html.contains("__DATA__"));
        assert!(!html.contains("__TITLE__"));
        assert!(html.contains("\"Insertion Time (Non-Optimized)\""));
        assert!(html.contains("[200.0,0.0045]"));
        assert!(html.contains(
            "<title>Overestimation Mean and Insertion Time vs Number of Elements</title>"
        ));
    }

    #[test]
    fn embedded_json_parses_back() {
        let data = chart();
        let html = render_html_chart(&data).unwrap();
        let start = html.find("const DATA = ").unwrap() + "const DATA = ".len();
        let end = start + html[start..].find(";\n").unwrap();
        let value: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(value["points"], 2);
        assert_eq!(value["right_series"][0]["dashed"], true);
        assert_eq!(value["left_series"][1]["marker"], "square");
    }

    #[test]
    fn script_terminators_are_escaped() {
        let mut data = chart();
        data.left_series[0].label = "a</script>b".to_string();
        let html = render_html_chart(&data).unwrap();
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn empty_chart_still_renders() {
        let html = render_html_chart(&build_chart_data(&AlignedDataset::default())).unwrap();
        assert!(html.contains("\"points\":0"));
    }
}
