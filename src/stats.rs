#[cfg(feature = "json")]
use serde::Serialize;

/// Summary of a latency sample set, in the unit of the input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Mean absolute deviation from `mean`, not the standard deviation.
    pub mdev: f64,
}

/// Compute min, max, mean and mean absolute deviation.
///
/// An empty slice yields all zeros.
pub fn compute_stats(samples: &[f64]) -> Stats {
    if samples.is_empty() {
        return Stats::default();
    }
    let count = samples.len() as f64;
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // constant input: summing can drift the mean off the common value
    if min == max {
        return Stats {
            min,
            max,
            mean: min,
            mdev: 0.0,
        };
    }
    let mean = samples.iter().sum::<f64>() / count;
    let mdev = samples.iter().map(|x| (x - mean).abs()).sum::<f64>() / count;
    Stats {
        min,
        max,
        mean,
        mdev,
    }
}
