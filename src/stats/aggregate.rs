// SPDX-License-Identifier: MIT
use super::statistics::{compute_statistics, offset_mean};
use crate::error::{BenchError, Result};
use crate::model::RunData;

/// A synthetic "average run" built from several runs of the same test.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRun {
    /// One value per frame slot: the cross-run mean at that index.
    pub series: Vec<f64>,
    /// Mean of each run's own average.
    pub avg_ms: f64,
    /// Mean of each run's wall time, in seconds.
    pub runtime: f64,
}

/// Averages runs frame by frame.
///
/// The result does not depend on the order of `runs`.
///
/// # Errors
///
/// Returns `EmptyRun` when there are no runs or the runs have no samples, and
/// `RunLengthMismatch` when the runs differ in sample count.
pub fn aggregate(runs: &[RunData]) -> Result<AggregateRun> {
    let first = runs.first().ok_or(BenchError::EmptyRun)?;
    let len = first.sample_count();
    for (run, data) in runs.iter().enumerate() {
        if data.sample_count() != len {
            return Err(BenchError::RunLengthMismatch {
                run,
                expected: len,
                actual: data.sample_count(),
            });
        }
    }
    if len == 0 {
        return Err(BenchError::EmptyRun);
    }

    let mut column = Vec::with_capacity(runs.len());
    let series = (0..len)
        .map(|i| {
            column.clear();
            column.extend(runs.iter().map(|r| r.raw_samples[i]));
            order_independent_mean(&mut column)
        })
        .collect();

    let mut averages = runs
        .iter()
        .map(|r| compute_statistics(r).map(|s| s.avg_ms))
        .collect::<Result<Vec<f64>>>()?;
    let mut runtimes: Vec<f64> = runs.iter().map(|r| r.run_time).collect();

    Ok(AggregateRun {
        series,
        avg_ms: order_independent_mean(&mut averages),
        runtime: order_independent_mean(&mut runtimes),
    })
}

/// Mean of a non-empty slice, summed in sorted order. Reorders `values`.
fn order_independent_mean(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    let (Some(&lo), Some(&hi)) = (values.first(), values.last()) else {
        return 0.0;
    };
    offset_mean(values, lo, hi)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn run(samples: &[f64], run_time: f64) -> RunData {
        RunData::new(samples.to_vec(), run_time)
    }

    #[test]
    fn two_run_scenario() {
        let input = vec![run(&[10.0, 20.0, 30.0], 2.0), run(&[20.0, 20.0, 20.0], 4.0)];
        let agg = aggregate(&input).unwrap();
        assert_eq!(agg.series, vec![15.0, 20.0, 25.0]);
        assert_eq!(agg.avg_ms, 20.0);
        assert_eq!(agg.runtime, 3.0);
    }

    #[test]
    fn single_run_is_identity() {
        let samples = [16.7, 0.1, 33.333_333, 8.25, 1e-7];
        let input = vec![run(&samples, 1.5)];
        let agg = aggregate(&input).unwrap();
        assert_eq!(agg.series, samples.to_vec());
        assert_eq!(agg.runtime, 1.5);
        let own = compute_statistics(&input[0]).unwrap();
        assert_eq!(agg.avg_ms, own.avg_ms);
    }

    #[test]
    fn run_order_does_not_matter() {
        let a: &[f64] = &[0.1, 16.7, 1e9];
        let b: &[f64] = &[0.2, 16.9, 3.0];
        let c: &[f64] = &[0.3, 17.1, 1e-9];
        let forward = aggregate(&[run(a, 1.1), run(b, 2.2), run(c, 3.3)]).unwrap();
        let backward = aggregate(&[run(c, 3.3), run(b, 2.2), run(a, 1.1)]).unwrap();
        let shuffled = aggregate(&[run(b, 2.2), run(c, 3.3), run(a, 1.1)]).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn mean_of_means_not_series_mean() {
        let input = vec![run(&[10.0, 10.0], 1.0), run(&[30.0, 50.0], 1.0)];
        let agg = aggregate(&input).unwrap();
        assert_eq!(agg.series, vec![20.0, 30.0]);
        // (10 + 40) / 2
        assert_eq!(agg.avg_ms, 25.0);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let input = vec![run(&[1.0, 2.0], 1.0), run(&[1.0], 1.0)];
        assert!(matches!(
            aggregate(&input),
            Err(BenchError::RunLengthMismatch {
                run: 1,
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn column_mean_matches_run_mean() {
        let column = [16.7, 0.1, 33.333_333, 8.25];
        let input: Vec<RunData> = column.iter().map(|&ms| run(&[ms], 1.0)).collect();
        let agg = aggregate(&input).unwrap();

        let mut sorted = column;
        sorted.sort_by(f64::total_cmp);
        let own = compute_statistics(&run(&sorted, 1.0)).unwrap();
        assert_eq!(agg.series[0], own.avg_ms);
    }

    #[test]
    fn nan_column_does_not_panic() {
        let input = vec![run(&[1.0, f64::NAN], 1.0), run(&[2.0, 2.0], 1.0)];
        let agg = aggregate(&input).unwrap();
        assert_eq!(agg.series[0], 1.5);
    }

    #[test]
    fn no_runs_fail() {
        assert!(matches!(aggregate(&[]), Err(BenchError::EmptyRun)));
        let input = vec![run(&[], 1.0), run(&[], 1.0)];
        assert!(matches!(aggregate(&input), Err(BenchError::EmptyRun)));
    }
}
