use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of words generated for a timed test. Fast typists never reach the
/// end within the usual durations.
pub const TIME_MODE_WORDS: usize = 100;

pub const DURATION_PRESETS: [u64; 4] = [15, 30, 60, 120];
pub const WORD_COUNT_PRESETS: [usize; 4] = [10, 25, 50, 100];

/// What the user is asked to type and when the test ends
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TestMode {
    /// fixed duration, as many words as the user manages
    Time,
    /// fixed number of words
    Words,
    /// a code snippet typed verbatim, newlines and indentation included
    Code,
}

impl TestMode {
    pub fn next(self) -> Self {
        match self {
            TestMode::Time => TestMode::Words,
            TestMode::Words => TestMode::Code,
            TestMode::Code => TestMode::Time,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TestMode::Time => TestMode::Code,
            TestMode::Words => TestMode::Time,
            TestMode::Code => TestMode::Words,
        }
    }

    /// Word-based modes split the input on spaces, code compares whole strings
    pub fn is_word_based(self) -> bool {
        !matches!(self, TestMode::Code)
    }

    /// Label for the remaining-counter in the stats bar
    pub fn remaining_label(self) -> &'static str {
        match self {
            TestMode::Time => "sec",
            TestMode::Words => "words",
            TestMode::Code => "chars",
        }
    }
}

/// Step through a preset list, wrapping at both ends. A value that is not a
/// preset snaps to the first one.
pub fn cycle_preset<T: Copy + PartialEq>(presets: &[T], current: T, forward: bool) -> T {
    let Some(pos) = presets.iter().position(|p| *p == current) else {
        return presets[0];
    };
    let len = presets.len();
    let idx = if forward {
        (pos + 1) % len
    } else {
        (pos + len - 1) % len
    };
    presets[idx]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_display_is_lowercase() {
        assert_eq!(TestMode::Time.to_string(), "time");
        assert_eq!(TestMode::Words.to_string(), "words");
        assert_eq!(TestMode::Code.to_string(), "code");
    }

    #[test]
    fn test_mode_cycles_both_ways() {
        let mut mode = TestMode::Time;
        for _ in 0..3 {
            mode = mode.next();
        }
        assert_eq!(mode, TestMode::Time);
        assert_eq!(TestMode::Time.prev(), TestMode::Code);
        assert_eq!(TestMode::Code.next(), TestMode::Time);
    }

    #[test]
    fn test_mode_serde_names() {
        let json = serde_json::to_string(&TestMode::Words).unwrap();
        assert_eq!(json, "\"words\"");
        let mode: TestMode = serde_json::from_str("\"code\"").unwrap();
        assert_eq!(mode, TestMode::Code);
    }

    #[test]
    fn test_cycle_preset_wraps() {
        assert_eq!(cycle_preset(&DURATION_PRESETS, 120, true), 15);
        assert_eq!(cycle_preset(&DURATION_PRESETS, 15, false), 120);
        assert_eq!(cycle_preset(&WORD_COUNT_PRESETS, 25, true), 50);
    }

    #[test]
    fn test_cycle_preset_unknown_value_snaps_to_first() {
        assert_eq!(cycle_preset(&WORD_COUNT_PRESETS, 7, true), 10);
    }
}
