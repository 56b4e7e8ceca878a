use typeforge::metrics::WpmSample;

/// Compute X (seconds) and Y (WPM) bounds for the results chart
pub fn compute_chart_params(samples: &[WpmSample], elapsed_seconds: f64) -> (f64, f64) {
    let highest_wpm = samples.iter().map(|s| s.wpm).fold(0.0, f64::max);

    let last_sample = samples.last().map_or(0.0, |s| s.t);
    let overall_duration = last_sample.max(elapsed_seconds).max(1.0);

    (overall_duration, highest_wpm.round())
}

pub fn sample_points(samples: &[WpmSample]) -> Vec<(f64, f64)> {
    samples.iter().map(|s| (s.t, s.wpm)).collect()
}

/// Format a simple numeric label consistently
pub fn format_label(val: f64) -> String {
    if (val - val.round()).abs() < f64::EPSILON {
        format!("{}", val.round())
    } else {
        format!("{val:.2}")
    }
}
