//! Scalar summaries and gaussian odds models over tap offsets.
//!
//! The odds helpers fit a normal distribution to the observed offsets and
//! ask how likely a play within some window is. Degenerate cases (no
//! samples, zero spread) collapse to certainties instead of NaN.

/// Arithmetic mean; `None` for an empty sample.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population variance; `None` for an empty sample.
pub fn variance(samples: &[f64]) -> Option<f64> {
    let m = mean(samples)?;
    Some(samples.iter().map(|x| (x - m) * (x - m)).sum::<f64>() / samples.len() as f64)
}

/// Population standard deviation; `None` for an empty sample.
pub fn stdev(samples: &[f64]) -> Option<f64> {
    variance(samples).map(f64::sqrt)
}

/// Abramowitz & Stegun 7.1.26 polynomial, |error| < 1.5e-7.
fn erf(x: f64) -> f64 {
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;
    const P: f64 = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - (((((A5 * t + A4) * t) + A3) * t + A2) * t + A1) * t * (-x * x).exp();
    sign * y
}

/// Normal CDF at `x` for the given distribution.
pub fn normal_cdf(x: f64, mean: f64, stdev: f64) -> f64 {
    0.5 * (1.0 + erf((x - mean) / (stdev * std::f64::consts::SQRT_2)))
}

/// Probability mass of `[-window, +window]` under a normal fit of the
/// samples. Zero spread degenerates to 0 or 1 by where the mean sits.
pub fn odds_some_tap_within(samples: &[f64], window: f64) -> Option<f64> {
    let m = mean(samples)?;
    let sd = stdev(samples)?;
    if sd == 0.0 {
        return Some(if (-window..=window).contains(&m) { 1.0 } else { 0.0 });
    }
    Some(normal_cdf(window, m, sd) - normal_cdf(-window, m, sd))
}

/// Odds every one of the samples' taps lands within the window.
pub fn odds_all_taps_within(samples: &[f64], window: f64) -> Option<f64> {
    odds_some_tap_within(samples, window).map(|p| p.powi(samples.len() as i32))
}

/// Odds an event with per-attempt probability `p` happens at least once
/// across the first attempt and `trials` further retries: `p` unioned
/// with itself (`x + y - xy`) once per retry, `1 - (1-p)^(trials+1)`.
pub fn prob_over_trials(p: f64, trials: u32) -> f64 {
    1.0 - (1.0 - p).powi(trials as i32 + 1)
}
