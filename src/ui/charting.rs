use itertools::{Itertools, MinMaxResult};

/// Axis bounds for the results chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartBounds {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

/// Compute X (seconds) and Y (chars per second) bounds for the results chart.
/// Both axes span at least one unit so a single point stays visible.
pub fn compute_chart_params(points: &[(f64, f64)]) -> ChartBounds {
    let x = match points.iter().map(|p| p.0).minmax_by(|a, b| a.total_cmp(b)) {
        MinMaxResult::NoElements => [0.0, 1.0],
        MinMaxResult::OneElement(x) => [x, x + 1.0],
        MinMaxResult::MinMax(lo, hi) => [lo, hi.max(lo + 1.0)],
    };

    let highest = points.iter().map(|p| p.1).fold(0.0, f64::max);

    ChartBounds {
        x,
        y: [0.0, highest.max(1.0).ceil()],
    }
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
