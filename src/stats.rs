//! Summary statistics over reward histories

/// Mean of a slice, or 0.0 when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Trailing moving average with the given window.
///
/// Entry `t` is the mean of the last `window` values up to and including
/// `t`; before the window fills, the mean runs over the values seen so far.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    assert!(window > 0, "window must be a positive integer");

    let mut averages = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for (t, &value) in values.iter().enumerate() {
        running += value;
        if t >= window {
            running -= values[t - window];
        }
        let count = (t + 1).min(window);
        averages.push(running / count as f64);
    }
    averages
}
