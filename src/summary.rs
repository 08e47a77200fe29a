use serde::Serialize;

use crate::time_series::Sample;
use crate::util::{mean, ratio, std_dev};

/// Aggregate results shown once a session is over
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub average_chars_per_second: f64,
    pub total_typed: usize,
    pub total_errors: usize,
    /// Accepted keystrokes that were not errors
    pub correct_chars: usize,
    /// `total_typed / text_length`
    pub completion_ratio: f64,
    pub peak_chars_per_second: usize,
    /// Standard deviation of chars per second; lower is steadier
    pub consistency: f64,
    pub seconds_with_errors: usize,
}

/// Derive the summary from a session's samples.
///
/// `text_length` is the character count of the text that was typed. An empty
/// series summarizes to zeros.
pub fn summarize(samples: &[Sample], text_length: usize) -> Summary {
    let per_second: Vec<f64> = samples.iter().map(|s| s.chars as f64).collect();
    let total_typed: usize = samples.iter().map(|s| s.chars).sum();
    let total_errors: usize = samples.iter().map(|s| s.errors).sum();

    Summary {
        average_chars_per_second: mean(&per_second).unwrap_or(0.0),
        total_typed,
        total_errors,
        correct_chars: total_typed.saturating_sub(total_errors),
        completion_ratio: ratio(total_typed, text_length),
        peak_chars_per_second: samples.iter().map(|s| s.chars).max().unwrap_or(0),
        consistency: std_dev(&per_second).unwrap_or(0.0),
        seconds_with_errors: samples.iter().filter(|s| s.errors > 0).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_series_reports_zeros() {
        let summary = summarize(&[], 40);
        assert_eq!(summary.average_chars_per_second, 0.0);
        assert_eq!(summary.total_errors, 0);
        assert_eq!(summary.completion_ratio, 0.0);
        assert_eq!(summary.peak_chars_per_second, 0);
        assert_eq!(summary.consistency, 0.0);
    }

    #[test]
    fn average_divides_by_sample_count() {
        let samples = [Sample::new(0, 4, 0), Sample::new(1, 6, 1), Sample::new(2, 2, 1)];
        let summary = summarize(&samples, 24);

        assert_eq!(summary.average_chars_per_second, 4.0);
        assert_eq!(summary.total_typed, 12);
        assert_eq!(summary.total_errors, 2);
        assert_eq!(summary.correct_chars, 10);
        assert_eq!(summary.completion_ratio, 0.5);
        assert_eq!(summary.peak_chars_per_second, 6);
        assert_eq!(summary.seconds_with_errors, 2);
    }

    #[test]
    fn zero_text_length_does_not_divide() {
        let summary = summarize(&[Sample::new(0, 3, 0)], 0);
        assert_eq!(summary.completion_ratio, 0.0);
    }

    #[test]
    fn rejected_errors_do_not_underflow_correct_chars() {
        // strict mode counts rejected mismatches as errors without typing them
        let summary = summarize(&[Sample::new(0, 1, 4)], 10);
        assert_eq!(summary.correct_chars, 0);
    }
}
