//! Reduces a chart figure (as sent by the backend) to what the desktop views
//! can draw: a title, and per trace its name, kind and numeric values.

use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct TraceSummary {
    pub name: String,
    pub kind: String,
    /// Number of points, including non-numeric ones.
    pub points: usize,
    pub values: Vec<f64>,
}

impl TraceSummary {
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    /// Counts of `values` in `bins` equal-width buckets over `range`.
    pub fn histogram(&self, bins: usize, range: (f64, f64)) -> Vec<usize> {
        let mut counts = vec![0; bins];
        if bins == 0 {
            return counts;
        }
        let (lo, hi) = range;
        let width = (hi - lo) / bins as f64;
        for v in &self.values {
            if *v < lo || *v > hi {
                continue;
            }
            let idx = if width > 0.0 {
                (((v - lo) / width) as usize).min(bins - 1)
            } else {
                0
            };
            counts[idx] += 1;
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartSummary {
    pub title: Option<String>,
    pub traces: Vec<TraceSummary>,
}

impl ChartSummary {
    pub fn from_figure(figure: &Value) -> Self {
        let title = match figure.pointer("/layout/title") {
            Some(Value::String(s)) => Some(s.clone()),
            Some(obj) => obj.get("text").and_then(Value::as_str).map(str::to_string),
            None => None,
        };

        let traces = figure
            .get("data")
            .and_then(Value::as_array)
            .map(|data| data.iter().enumerate().map(|(i, t)| trace(i, t)).collect())
            .unwrap_or_default();

        Self { title, traces }
    }

    /// Smallest and largest numeric value over every trace.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.traces
            .iter()
            .flat_map(|t| t.values.iter().copied())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }
}

fn trace(index: usize, trace: &Value) -> TraceSummary {
    let name = trace
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("trace {}", index + 1));
    let kind = trace
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("scatter")
        .to_string();

    // Histograms and scatter plots carry their data in `x`; bar-like traces
    // keep the magnitudes in `y`.
    let axis = match kind.as_str() {
        "bar" | "box" => "y",
        _ => "x",
    };
    let raw = trace
        .get(axis)
        .or_else(|| trace.get("values"))
        .and_then(Value::as_array);

    let (points, values) = match raw {
        Some(items) => (items.len(), items.iter().filter_map(Value::as_f64).collect()),
        None => (0, Vec::new()),
    };

    TraceSummary {
        name,
        kind,
        points,
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summarizes_distribution_figure() {
        let figure = json!({
            "data": [
                {"type": "histogram", "name": "Original", "x": [1.0, 2.0, 3.0]},
                {"type": "histogram", "name": "Augmented", "x": [1.0, 2.0, 3.0, 4.0, "n/a"]}
            ],
            "layout": {"title": {"text": "age distribution"}}
        });

        let summary = ChartSummary::from_figure(&figure);
        assert_eq!(summary.title.as_deref(), Some("age distribution"));
        assert_eq!(summary.traces.len(), 2);
        assert_eq!(summary.traces[1].points, 5);
        assert_eq!(summary.traces[1].values.len(), 4);
        assert_eq!(summary.traces[0].mean(), Some(2.0));
        assert_eq!(summary.value_range(), Some((1.0, 4.0)));
    }

    #[test]
    fn histogram_puts_max_in_last_bin() {
        let t = TraceSummary {
            name: "t".into(),
            kind: "histogram".into(),
            points: 4,
            values: vec![0.0, 0.5, 1.0, 1.0],
        };
        assert_eq!(t.histogram(2, (0.0, 1.0)), vec![1, 3]);
    }

    #[test]
    fn tolerates_unexpected_shapes() {
        let summary = ChartSummary::from_figure(&json!({"data": [{"x": {"bdata": "AAA="}}]}));
        assert_eq!(summary.traces[0].name, "trace 1");
        assert_eq!(summary.traces[0].points, 0);
        assert!(summary.value_range().is_none());
    }
}
