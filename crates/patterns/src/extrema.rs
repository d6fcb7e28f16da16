/// A strict local peak or trough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremum {
    pub index: usize,
    pub value: f64,
}

/// Interior points strictly greater than both neighbours. Endpoints never qualify.
pub fn local_maxima(series: &[f64]) -> Vec<Extremum> {
    interior(series, |prev, cur, next| cur > prev && cur > next)
}

/// Interior points strictly less than both neighbours. Endpoints never qualify.
pub fn local_minima(series: &[f64]) -> Vec<Extremum> {
    interior(series, |prev, cur, next| cur < prev && cur < next)
}

fn interior(series: &[f64], keep: impl Fn(f64, f64, f64) -> bool) -> Vec<Extremum> {
    series
        .windows(3)
        .enumerate()
        .filter(|(_, w)| keep(w[0], w[1], w[2]))
        .map(|(i, w)| Extremum {
            index: i + 1,
            value: w[1],
        })
        .collect()
}

/// Least-squares slope of `values` against their ordinal position `0..n`.
///
/// Returns 0 for fewer than two values.
pub fn regression_slope(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let n_f = n as f64;
    let sum_x = n_f * (n_f - 1.0) / 2.0;
    let sum_x2 = n_f * (n_f - 1.0) * (2.0 * n_f - 1.0) / 6.0;
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values.iter().enumerate().map(|(i, v)| i as f64 * v).sum();

    (n_f * sum_xy - sum_x * sum_y) / (n_f * sum_x2 - sum_x * sum_x)
}
