use indexmap::IndexMap;

use crate::stats::MAX_PRECISION;

/// Rounds `x` to `precision` decimals by scaling: `(x * 10^p).round() / 10^p`.
///
/// Scaling happens in f64, so boundary values follow the binary product:
/// `2.0005 * 1000` is `2000.5000000000002` and rounds up.
///
/// `precision` is clamped to [`MAX_PRECISION`]; the same applies to
/// [`mean`], [`median`] and [`mode`].
pub fn round_to(x: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision.min(MAX_PRECISION) as i32);
    (x * scale).round() / scale
}

/// Arithmetic mean, `NaN` for an empty slice
pub fn mean(values: &[f64], precision: u32) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = values.iter().sum();
    round_to(sum / values.len() as f64, precision)
}

/// Median of the ascending sort; even lengths average the two middle values
pub fn median(values: &[f64], precision: u32) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len();
    let mid = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    Some(round_to(mid, precision))
}

/// Most frequent value. Ties go to the value whose first occurrence comes
/// first in `values`.
pub fn mode(values: &[f64], precision: u32) -> Option<f64> {
    // bit pattern -> (first value seen, count), in first-occurrence order
    let mut frequencies: IndexMap<u64, (f64, usize)> = IndexMap::new();
    for &v in values {
        frequencies.entry(frequency_key(v)).or_insert((v, 0)).1 += 1;
    }

    let mut modes: Vec<f64> = Vec::new();
    let mut max_frequency = 0;
    for &(value, count) in frequencies.values() {
        if count > max_frequency {
            modes.clear();
            modes.push(value);
            max_frequency = count;
        } else if count == max_frequency {
            modes.push(value);
        }
    }

    modes.first().map(|&m| round_to(m, precision))
}

/// `0.0` and `-0.0` count as one value, as do all NaNs.
fn frequency_key(v: f64) -> u64 {
    if v == 0.0 {
        0f64.to_bits()
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}
