use std::time::Duration;

use crate::classify::{CharStats, Classification};
use crate::mode::TestMode;

/// Standard word length used by every WPM figure
pub const CHARS_PER_WORD: f64 = 5.0;

/// Lower bound on elapsed minutes so the first keystroke cannot divide by zero
pub const MIN_ELAPSED_MINUTES: f64 = 0.001;

/// One reading of the live WPM, `t` seconds after the session started
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WpmSample {
    pub t: f64,
    pub wpm: f64,
}

impl WpmSample {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<WpmSample> for (f64, f64) {
    fn from(s: WpmSample) -> Self {
        (s.t, s.wpm)
    }
}

pub fn elapsed_minutes(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() / 60.0).max(MIN_ELAPSED_MINUTES)
}

pub fn words_per_minute(chars: usize, minutes: f64) -> u32 {
    let minutes = minutes.max(MIN_ELAPSED_MINUTES);
    (chars as f64 / CHARS_PER_WORD / minutes).round() as u32
}

/// Share of typed characters that were correct, as a whole percentage
pub fn accuracy(correct_chars: usize, typed_chars: usize) -> u32 {
    let ratio = correct_chars as f64 / typed_chars.max(1) as f64;
    ((ratio * 100.0).round() as u32).min(100)
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = m - value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// 100 minus the coefficient of variation of the samples, in percent.
///
/// Fewer than two samples say nothing about variation and score 100. A run
/// whose samples average zero WPM scores 0.
pub fn consistency(samples: &[f64]) -> u32 {
    if samples.len() < 2 {
        return 100;
    }
    match (mean(samples), std_dev(samples)) {
        (Some(m), Some(sd)) if m > 0.0 => ((1.0 - sd / m) * 100.0).round().clamp(0.0, 100.0) as u32,
        _ => 0,
    }
}

/// Figures shown while a test is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveMetrics {
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
}

impl Default for LiveMetrics {
    fn default() -> Self {
        Self {
            wpm: 0,
            raw_wpm: 0,
            accuracy: 100,
        }
    }
}

pub fn live_metrics(classification: &Classification, input: &str, elapsed: Duration) -> LiveMetrics {
    let typed = input.chars().count();
    if typed == 0 {
        return LiveMetrics::default();
    }

    let minutes = elapsed_minutes(elapsed);
    let correct = classification.correct_chars();

    LiveMetrics {
        wpm: words_per_minute(correct, minutes),
        raw_wpm: words_per_minute(typed, minutes),
        accuracy: accuracy(correct, typed),
    }
}

/// Frozen outcome of a finished session
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub mode: TestMode,
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
    pub consistency: u32,
    pub char_stats: CharStats,
    /// the time the WPM figures are measured against
    pub elapsed_seconds: f64,
    pub samples: Vec<WpmSample>,
}

/// `scored_over` is the configured duration in time mode and the actual
/// elapsed time otherwise. An empty input scores 0% accuracy here, unlike
/// the live figure.
pub fn final_summary(
    mode: TestMode,
    classification: &Classification,
    input: &str,
    scored_over: Duration,
    samples: &[WpmSample],
) -> ResultSummary {
    let typed = input.chars().count();
    let minutes = elapsed_minutes(scored_over);
    let correct = classification.correct_chars();
    let sample_wpms: Vec<f64> = samples.iter().map(|s| s.wpm).collect();

    ResultSummary {
        mode,
        wpm: words_per_minute(correct, minutes),
        raw_wpm: words_per_minute(typed, minutes),
        accuracy: accuracy(correct, typed),
        consistency: consistency(&sample_wpms),
        char_stats: classification.char_stats(),
        elapsed_seconds: scored_over.as_secs_f64(),
        samples: samples.to_vec(),
    }
}
