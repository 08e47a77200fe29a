use serde::Serialize;

/// One second of typing activity, as deltas against the previous sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Sample {
    pub second: u32,
    pub chars: usize,
    pub errors: usize,
}

impl Sample {
    pub fn new(second: u32, chars: usize, errors: usize) -> Self {
        Self {
            second,
            chars,
            errors,
        }
    }
}

impl From<Sample> for (f64, f64) {
    fn from(s: Sample) -> Self {
        (s.second as f64, s.chars as f64)
    }
}

/// Append-only per-second series.
///
/// Each sample stores what happened during its own second, so the chart can
/// plot it directly; totals are recovered by summing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimeSeries {
    samples: Vec<Sample>,
}

impl TimeSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample for `second` holding the growth of the cumulative
    /// counters since the last recorded sample.
    pub fn record(&mut self, second: u32, total_typed: usize, total_errors: usize) -> Sample {
        let sample = Sample::new(
            second,
            total_typed.saturating_sub(self.total_chars()),
            total_errors.saturating_sub(self.total_errors()),
        );
        self.samples.push(sample);
        sample
    }

    pub fn total_chars(&self) -> usize {
        self.samples.iter().map(|s| s.chars).sum()
    }

    pub fn total_errors(&self) -> usize {
        self.samples.iter().map(|s| s.errors).sum()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// (second, chars) pairs for the chart
    pub fn chart_points(&self) -> Vec<(f64, f64)> {
        self.samples.iter().copied().map(Into::into).collect()
    }

    /// (second, chars) pairs for seconds that had at least one error
    pub fn error_points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .filter(|s| s.errors > 0)
            .copied()
            .map(Into::into)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_stores_deltas() {
        let mut ts = TimeSeries::new();
        assert_eq!(ts.record(0, 4, 1), Sample::new(0, 4, 1));
        assert_eq!(ts.record(1, 9, 1), Sample::new(1, 5, 0));
        assert_eq!(ts.record(2, 9, 3), Sample::new(2, 0, 2));

        assert_eq!(ts.total_chars(), 9);
        assert_eq!(ts.total_errors(), 3);
        assert_eq!(ts.len(), 3);
    }

    #[test]
    fn error_points_only_include_error_seconds() {
        let mut ts = TimeSeries::new();
        ts.record(0, 3, 0);
        ts.record(1, 5, 1);
        ts.record(2, 8, 1);

        assert_eq!(ts.chart_points(), vec![(0.0, 3.0), (1.0, 2.0), (2.0, 3.0)]);
        assert_eq!(ts.error_points(), vec![(1.0, 2.0)]);
    }
}
