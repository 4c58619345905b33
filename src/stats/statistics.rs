// SPDX-License-Identifier: MIT
use crate::error::{BenchError, Result};
use crate::model::{FrameSample, RunData};

/// Summary of one run's frame times.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStatistics {
    pub avg_ms: f64,
    pub min_frame: FrameSample,
    pub max_frame: FrameSample,
}

/// Mean of `values` whose extremes are `lo` and `hi`.
///
/// Summed as offsets from `lo`, so equal values come out exact, and kept
/// inside `[lo, hi]`. `values` must not be empty.
pub(crate) fn offset_mean(values: &[f64], lo: f64, hi: f64) -> f64 {
    let offset_sum: f64 = values.iter().map(|&v| v - lo).sum();
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    // max/min rather than clamp: clamp panics on a NaN bound.
    (lo + offset_sum / count).max(lo).min(hi)
}

/// Computes the mean, fastest and slowest frame of a run.
///
/// Ties resolve to the lowest frame index.
///
/// # Errors
///
/// Returns `EmptyRun` if the run recorded no samples.
pub fn compute_statistics(run: &RunData) -> Result<RunStatistics> {
    let samples = &run.raw_samples;
    let first = *samples.first().ok_or(BenchError::EmptyRun)?;

    let mut min_frame = FrameSample::new(0, first);
    let mut max_frame = FrameSample::new(0, first);
    for (i, &ms) in samples.iter().enumerate().skip(1) {
        if ms < min_frame.ms {
            min_frame = FrameSample::new(i, ms);
        }
        if ms > max_frame.ms {
            max_frame = FrameSample::new(i, ms);
        }
    }

    let avg_ms = offset_mean(samples, min_frame.ms, max_frame.ms);

    Ok(RunStatistics {
        avg_ms,
        min_frame,
        max_frame,
    })
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn run(samples: &[f64]) -> RunData {
        RunData::new(samples.to_vec(), 1.0)
    }

    #[test]
    fn empty_run_is_an_error() {
        assert!(matches!(
            compute_statistics(&run(&[])),
            Err(BenchError::EmptyRun)
        ));
    }

    #[test]
    fn ascending_run() {
        let stats = compute_statistics(&run(&[10.0, 20.0, 30.0])).unwrap();
        assert!((stats.avg_ms - 20.0).abs() < f64::EPSILON);
        assert_eq!(stats.min_frame, FrameSample::new(0, 10.0));
        assert_eq!(stats.max_frame, FrameSample::new(2, 30.0));
    }

    #[test]
    fn constant_run_is_exact() {
        for value in [0.1, 16.666_666, 33.33, 7.0] {
            let stats = compute_statistics(&run(&[value; 7])).unwrap();
            assert_eq!(stats.min_frame.ms, value);
            assert_eq!(stats.max_frame.ms, value);
            assert_eq!(stats.avg_ms, value);
            assert_eq!(stats.min_frame.frame_index, 0);
            assert_eq!(stats.max_frame.frame_index, 0);
        }
    }

    #[test]
    fn ties_pick_first_index() {
        let stats = compute_statistics(&run(&[5.0, 2.0, 9.0, 2.0, 9.0])).unwrap();
        assert_eq!(stats.min_frame.frame_index, 1);
        assert_eq!(stats.max_frame.frame_index, 2);
    }

    #[test]
    fn average_lies_between_extremes() {
        let cases: [&[f64]; 4] = [
            &[16.7, 16.6, 33.4, 8.3],
            &[0.1, 0.2, 0.3],
            &[1e-9, 1e9],
            &[42.0],
        ];
        for samples in cases {
            let stats = compute_statistics(&run(samples)).unwrap();
            assert!(stats.min_frame.ms <= stats.avg_ms);
            assert!(stats.avg_ms <= stats.max_frame.ms);
        }
    }

    #[test]
    fn nan_sample_does_not_panic() {
        let stats = compute_statistics(&run(&[f64::NAN, 1.0])).unwrap();
        assert_eq!(stats.min_frame.frame_index, 0);
        let stats = compute_statistics(&run(&[1.0, f64::NAN])).unwrap();
        assert_eq!(stats.avg_ms, 1.0);
    }

    #[test]
    fn single_sample() {
        let stats = compute_statistics(&run(&[12.5])).unwrap();
        assert_eq!(stats.avg_ms, 12.5);
        assert_eq!(stats.min_frame, stats.max_frame);
    }
}
