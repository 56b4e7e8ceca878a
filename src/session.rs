use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::classify::{classify, Classification, Pass};
use crate::completion::{self, CompletionReason};
use crate::content::{ContentProvider, TargetContent};
use crate::metrics::{final_summary, live_metrics, LiveMetrics, ResultSummary, WpmSample};
use crate::mode::{TestMode, TIME_MODE_WORDS};
use crate::runtime::PeriodicTimer;

pub const SAMPLE_PERIOD: Duration = Duration::from_secs(1);
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: TestMode,
    pub duration_secs: u64,
    pub word_count: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: TestMode::Time,
            duration_secs: 30,
            word_count: 50,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

/// Keys with a meaning beyond inserting a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionKey {
    Tab,
    Enter,
}

/// Exists only while the phase is `Running`; dropping it cancels both timers.
#[derive(Debug)]
struct RunningTimers {
    countdown: Option<PeriodicTimer>,
    sampler: PeriodicTimer,
}

/// One typing test attempt, from idle through finished
#[derive(Debug)]
pub struct TypingSession {
    config: SessionConfig,
    provider: Box<dyn ContentProvider>,
    target: TargetContent,
    input: String,
    started_at: Option<Instant>,
    phase: Phase,
    time_left: Option<u64>,
    wpm_samples: Vec<WpmSample>,
    timers: Option<RunningTimers>,
    live: LiveMetrics,
    result: Option<ResultSummary>,
}

impl TypingSession {
    pub fn new(config: SessionConfig, provider: Box<dyn ContentProvider>) -> Self {
        let mut session = Self {
            config,
            provider,
            target: TargetContent::Words(Vec::new()),
            input: String::new(),
            started_at: None,
            phase: Phase::Idle,
            time_left: None,
            wpm_samples: Vec::new(),
            timers: None,
            live: LiveMetrics::default(),
            result: None,
        };
        session.reset();
        session
    }

    /// Change the test settings. The target is regenerated to match, the
    /// session stays idle.
    pub fn configure(&mut self, mode: TestMode, duration_secs: Option<u64>, word_count: Option<usize>) {
        self.config.mode = mode;
        if let Some(secs) = duration_secs {
            self.config.duration_secs = secs;
        }
        if let Some(count) = word_count {
            self.config.word_count = count;
        }
        debug!(
            mode = %self.config.mode,
            duration_secs = self.config.duration_secs,
            word_count = self.config.word_count,
            "session configured"
        );
        self.reset();
    }

    pub fn reset(&mut self) {
        self.target = match self.config.mode {
            TestMode::Words => {
                TargetContent::Words(self.provider.generate_words(self.config.word_count))
            }
            TestMode::Time => TargetContent::Words(self.provider.generate_words(TIME_MODE_WORDS)),
            TestMode::Code => TargetContent::Code(self.provider.random_snippet()),
        };
        self.input.clear();
        self.started_at = None;
        self.phase = Phase::Idle;
        self.wpm_samples.clear();
        self.timers = None;
        self.live = LiveMetrics::default();
        self.result = None;
        self.time_left = (self.config.mode == TestMode::Time).then_some(self.config.duration_secs);

        debug!(
            mode = %self.config.mode,
            target_chars = self.target.char_len(),
            "session reset"
        );
    }

    pub fn on_input(&mut self, value: impl Into<String>) {
        self.on_input_at(value, Instant::now())
    }

    pub fn on_input_at(&mut self, value: impl Into<String>, now: Instant) {
        if self.phase == Phase::Finished {
            return;
        }
        // boundaries that passed before this input are scored against the
        // input as it stood, and an expired countdown rejects the new value
        if self.advance_timers(now) {
            return;
        }
        let value = value.into();

        if self.phase == Phase::Idle && !value.is_empty() {
            self.start(now);
        }
        self.input = value;

        if self.phase != Phase::Running {
            return;
        }
        self.refresh_live(now);

        if let Some(reason) = completion::check(
            self.config.mode,
            &self.target,
            &self.input,
            self.time_left,
        ) {
            self.finish(reason, now);
        }
    }

    pub fn on_key(&mut self, key: SessionKey) {
        self.on_key_at(key, Instant::now())
    }

    pub fn on_key_at(&mut self, key: SessionKey, now: Instant) {
        match key {
            SessionKey::Tab => self.reset(),
            SessionKey::Enter => {
                if self.config.mode != TestMode::Code || self.phase == Phase::Finished {
                    return;
                }
                let value = format!("{}{}", self.input, self.newline_insertion());
                self.on_input_at(value, now);
            }
        }
    }

    pub fn type_char(&mut self, c: char) {
        self.type_char_at(c, Instant::now())
    }

    pub fn type_char_at(&mut self, c: char, now: Instant) {
        if self.phase == Phase::Finished {
            return;
        }
        let mut value = self.input.clone();
        value.push(c);
        self.on_input_at(value, now);
    }

    pub fn backspace(&mut self) {
        self.backspace_at(Instant::now())
    }

    pub fn backspace_at(&mut self, now: Instant) {
        if self.phase == Phase::Finished || self.input.is_empty() {
            return;
        }
        let mut value = self.input.clone();
        value.pop();
        self.on_input_at(value, now);
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now())
    }

    /// Advance the countdown and WPM sampling timers to `now`
    pub fn on_tick_at(&mut self, now: Instant) {
        if !self.advance_timers(now) && self.phase == Phase::Running {
            self.refresh_live(now);
        }
    }

    /// Poll both timers up to `now`. Returns true when the countdown ran out
    /// and finished the session.
    fn advance_timers(&mut self, now: Instant) -> bool {
        let Some(timers) = self.timers.as_mut() else {
            return false;
        };
        let samples_due = timers.sampler.poll(now);
        let countdown_due = timers
            .countdown
            .as_mut()
            .map(|c| c.poll(now))
            .unwrap_or_default();

        let mut expired_at = None;
        for at in countdown_due {
            if let Some(left) = self.time_left.as_mut() {
                *left = left.saturating_sub(1);
                trace!(time_left = *left, "countdown tick");
                if *left == 0 {
                    expired_at = Some(at);
                    break;
                }
            }
        }

        for at in samples_due {
            if expired_at.is_some_and(|end| at > end) {
                break;
            }
            self.record_sample(at);
        }

        let Some(at) = expired_at else {
            return false;
        };
        match completion::check(self.config.mode, &self.target, &self.input, self.time_left) {
            Some(reason) => {
                self.finish(reason, at);
                true
            }
            None => false,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn mode(&self) -> TestMode {
        self.config.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn target(&self) -> &TargetContent {
        &self.target
    }

    pub fn time_left(&self) -> Option<u64> {
        self.time_left
    }

    pub fn wpm_samples(&self) -> &[WpmSample] {
        &self.wpm_samples
    }

    pub fn live(&self) -> LiveMetrics {
        self.live
    }

    pub fn result(&self) -> Option<&ResultSummary> {
        self.result.as_ref()
    }

    /// Classification of the current input, final once the session is over
    pub fn classification(&self) -> Classification {
        let pass = if self.is_finished() {
            Pass::Final
        } else {
            Pass::Live
        };
        classify(&self.target, &self.input, pass)
    }

    /// Seconds left in time mode, words left in words mode, characters left
    /// in code mode
    pub fn remaining(&self) -> usize {
        match self.config.mode {
            TestMode::Time => self.time_left.unwrap_or(0) as usize,
            TestMode::Words => {
                let target_words = self.target.words().map_or(0, |w| w.len());
                let typed_segments = self.input.split(' ').count();
                (target_words + 1).saturating_sub(typed_segments)
            }
            TestMode::Code => self
                .target
                .char_len()
                .saturating_sub(self.input.chars().count()),
        }
    }

    /// What Enter inserts in code mode: a newline, plus the indentation that
    /// follows it in the target when a newline is what comes next. At the
    /// start of a line whose indentation was deleted, Enter restores just
    /// the indentation.
    fn newline_insertion(&self) -> String {
        let TargetContent::Code(snippet) = &self.target else {
            return "\n".to_string();
        };
        let is_indent = |c: &char| *c == ' ' || *c == '\t';
        let mut rest = snippet.code.chars().skip(self.input.chars().count()).peekable();
        let at_line_start = self.input.is_empty() || self.input.ends_with('\n');

        match rest.peek().copied() {
            Some('\n') => std::iter::once('\n')
                .chain(rest.skip(1).take_while(is_indent))
                .collect(),
            Some(c) if at_line_start && is_indent(&c) => rest.take_while(is_indent).collect(),
            _ => "\n".to_string(),
        }
    }

    fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.phase = Phase::Running;
        self.timers = Some(RunningTimers {
            countdown: (self.config.mode == TestMode::Time)
                .then(|| PeriodicTimer::starting_at(now, COUNTDOWN_PERIOD)),
            sampler: PeriodicTimer::starting_at(now, SAMPLE_PERIOD),
        });
        info!(mode = %self.config.mode, "typing test started");
    }

    fn elapsed_at(&self, at: Instant) -> Duration {
        self.started_at
            .map_or(Duration::ZERO, |start| at.saturating_duration_since(start))
    }

    fn refresh_live(&mut self, now: Instant) {
        let classification = classify(&self.target, &self.input, Pass::Live);
        self.live = live_metrics(&classification, &self.input, self.elapsed_at(now));
    }

    fn record_sample(&mut self, at: Instant) {
        let elapsed = self.elapsed_at(at);
        let classification = classify(&self.target, &self.input, Pass::Live);
        let metrics = live_metrics(&classification, &self.input, elapsed);
        trace!(t = elapsed.as_secs_f64(), wpm = metrics.wpm, "wpm sample");
        self.wpm_samples
            .push(WpmSample::new(elapsed.as_secs_f64(), metrics.wpm as f64));
        self.live = metrics;
    }

    fn finish(&mut self, reason: CompletionReason, at: Instant) {
        self.phase = Phase::Finished;
        self.timers = None;

        let scored_over = match self.config.mode {
            TestMode::Time => Duration::from_secs(self.config.duration_secs),
            TestMode::Words | TestMode::Code => self.elapsed_at(at),
        };
        let classification = classify(&self.target, &self.input, Pass::Final);
        let summary = final_summary(
            self.config.mode,
            &classification,
            &self.input,
            scored_over,
            &self.wpm_samples,
        );

        self.live = LiveMetrics {
            wpm: summary.wpm,
            raw_wpm: summary.raw_wpm,
            accuracy: summary.accuracy,
        };
        info!(
            mode = %summary.mode,
            %reason,
            wpm = summary.wpm,
            raw_wpm = summary.raw_wpm,
            accuracy = summary.accuracy,
            consistency = summary.consistency,
            correct = summary.char_stats.correct,
            incorrect = summary.char_stats.incorrect,
            extra = summary.char_stats.extra,
            missed = summary.char_stats.missed,
            elapsed_secs = summary.elapsed_seconds,
            "typing test finished"
        );
        self.result = Some(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Snippet, StaticProvider};

    fn session(mode: TestMode, prompt: &str) -> TypingSession {
        TypingSession::new(
            SessionConfig {
                mode,
                duration_secs: 30,
                word_count: 50,
            },
            Box::new(StaticProvider::from_prompt(prompt)),
        )
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_new_session_is_idle() {
        let s = session(TestMode::Words, "the cat");

        assert_eq!(s.phase(), Phase::Idle);
        assert!(!s.has_started());
        assert_eq!(s.input(), "");
        assert_eq!(s.time_left(), None);
        assert_eq!(s.live(), LiveMetrics::default());
        assert!(s.result().is_none());
    }

    #[test]
    fn test_time_mode_starts_with_full_countdown() {
        let s = session(TestMode::Time, "the cat");
        assert_eq!(s.time_left(), Some(30));
        assert_eq!(s.remaining(), 30);
    }

    #[test]
    fn test_first_input_starts_the_clock() {
        let mut s = session(TestMode::Words, "the cat");
        let t0 = Instant::now();

        s.on_input_at("", t0);
        assert_eq!(s.phase(), Phase::Idle);

        s.on_input_at("t", t0 + secs(1));
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.started_at(), Some(t0 + secs(1)));

        s.on_input_at("th", t0 + secs(2));
        assert_eq!(s.started_at(), Some(t0 + secs(1)));
    }

    #[test]
    fn test_backspace_to_empty_keeps_running() {
        let mut s = session(TestMode::Words, "the cat");
        let t0 = Instant::now();

        s.type_char_at('t', t0);
        s.backspace_at(t0 + secs(1));

        assert_eq!(s.input(), "");
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.started_at(), Some(t0));
        assert_eq!(s.live().accuracy, 100);
    }

    #[test]
    fn test_words_mode_completion() {
        let mut s = session(TestMode::Words, "the cat");
        let t0 = Instant::now();

        s.on_input_at("t", t0);
        s.on_input_at("the ca", t0 + secs(5));
        assert_eq!(s.phase(), Phase::Running);

        s.on_input_at("the cat", t0 + secs(6));
        assert_eq!(s.phase(), Phase::Finished);

        let result = s.result().unwrap();
        // 7 correct chars in 0.1 minutes
        assert_eq!(result.wpm, 14);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.elapsed_seconds, 6.0);
    }

    #[test]
    fn test_finished_session_ignores_input() {
        let mut s = session(TestMode::Words, "hi");
        let t0 = Instant::now();

        s.on_input_at("h", t0);
        s.on_input_at("hi", t0 + secs(3));
        assert!(s.is_finished());
        let (wpm, accuracy) = (s.live().wpm, s.live().accuracy);
        let result = s.result().cloned();

        s.on_input_at("hi there", t0 + secs(4));
        s.type_char_at('x', t0 + secs(5));
        s.backspace_at(t0 + secs(6));
        s.on_key_at(SessionKey::Enter, t0 + secs(7));

        assert_eq!(s.input(), "hi");
        assert_eq!(s.live().wpm, wpm);
        assert_eq!(s.live().accuracy, accuracy);
        assert_eq!(s.result().cloned(), result);
    }

    #[test]
    fn test_code_mode_completion() {
        let mut s = session(TestMode::Code, "ab\ncd");
        let t0 = Instant::now();

        s.on_input_at("ab\nc", t0);
        assert_eq!(s.phase(), Phase::Running);
        assert_eq!(s.remaining(), 1);

        s.on_input_at("ab\ncd", t0 + secs(3));
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.result().unwrap().char_stats.correct, 5);
    }

    #[test]
    fn test_enter_auto_indents_in_code_mode() {
        let mut s = session(TestMode::Code, "if(x){\n  y();\n}");
        let t0 = Instant::now();

        s.on_input_at("if(x){", t0);
        s.on_key_at(SessionKey::Enter, t0 + secs(1));

        assert_eq!(s.input(), "if(x){\n  ");
    }

    #[test]
    fn test_enter_on_first_keystroke_starts_the_clock() {
        let mut s = session(TestMode::Code, "\n  x");
        let t0 = Instant::now();

        s.on_key_at(SessionKey::Enter, t0);

        assert_eq!(s.input(), "\n  ");
        assert_eq!(s.started_at(), Some(t0));
    }

    #[test]
    fn test_enter_mid_line_inserts_plain_newline() {
        let mut s = session(TestMode::Code, "abc\n  d");
        let t0 = Instant::now();

        s.on_input_at("a", t0);
        s.on_key_at(SessionKey::Enter, t0 + secs(1));

        assert_eq!(s.input(), "a\n");
        let stats = s.classification().char_stats();
        assert_eq!(stats.incorrect, 1);
    }

    #[test]
    fn test_enter_restores_deleted_indentation() {
        let mut s = session(TestMode::Code, "a {\n\tb\n}");
        let t0 = Instant::now();

        s.on_input_at("a {", t0);
        s.on_key_at(SessionKey::Enter, t0 + secs(1));
        assert_eq!(s.input(), "a {\n\t");

        s.backspace_at(t0 + secs(2));
        assert_eq!(s.input(), "a {\n");
        s.on_key_at(SessionKey::Enter, t0 + secs(3));
        assert_eq!(s.input(), "a {\n\t");
        assert_eq!(s.classification().char_stats().incorrect, 0);
    }

    #[test]
    fn test_enter_mid_indentation_is_a_plain_newline() {
        let mut s = session(TestMode::Code, "a\n    b");
        let t0 = Instant::now();

        s.on_input_at("a\n  ", t0);
        s.on_key_at(SessionKey::Enter, t0 + secs(1));
        assert_eq!(s.input(), "a\n  \n");
    }

    #[test]
    fn test_typing_past_the_countdown_is_rejected() {
        let mut s = TypingSession::new(
            SessionConfig {
                mode: TestMode::Time,
                duration_secs: 1,
                word_count: 50,
            },
            Box::new(StaticProvider::from_prompt("one two")),
        );
        let t0 = Instant::now();

        // a keystroke every 20ms and no ticks at all
        for i in 0..100u64 {
            s.type_char_at('a', t0 + Duration::from_millis(20 * i));
        }

        assert!(s.is_finished());
        assert_eq!(s.time_left(), Some(0));
        assert_eq!(s.input().chars().count(), 50);
        let result = s.result().unwrap();
        assert_eq!(result.elapsed_seconds, 1.0);
        assert_eq!(result.samples.len(), 1);
    }

    #[test]
    fn test_overdue_samples_use_the_input_of_their_moment() {
        let mut s = session(TestMode::Words, "abcdefghijklmnopqrstuvwxyz");
        let t0 = Instant::now();

        s.on_input_at("a", t0);
        s.on_input_at("abcdefghijklmnopqrst", t0 + Duration::from_millis(2900));
        s.on_tick_at(t0 + secs(3));

        let samples: Vec<(f64, f64)> = s.wpm_samples().iter().map(|w| (w.t, w.wpm)).collect();
        // one char at 1s and 2s, twenty chars at 3s
        assert_eq!(samples, vec![(1.0, 12.0), (2.0, 6.0), (3.0, 80.0)]);
    }

    #[test]
    fn test_enter_is_ignored_in_word_modes() {
        let mut s = session(TestMode::Words, "the cat");
        s.on_input_at("the", Instant::now());
        s.on_key(SessionKey::Enter);
        assert_eq!(s.input(), "the");
    }

    #[test]
    fn test_tab_resets_everything() {
        let mut s = session(TestMode::Time, "the cat");
        let t0 = Instant::now();

        s.on_input_at("the", t0);
        s.on_tick_at(t0 + secs(2));
        assert_eq!(s.wpm_samples().len(), 2);

        s.on_key(SessionKey::Tab);

        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.input(), "");
        assert!(!s.has_started());
        assert!(s.wpm_samples().is_empty());
        assert_eq!(s.time_left(), Some(30));
        assert_eq!(s.live(), LiveMetrics::default());
    }

    #[test]
    fn test_reset_cancels_running_timers() {
        let mut s = session(TestMode::Time, "the cat");
        let t0 = Instant::now();

        s.on_input_at("t", t0);
        s.reset();
        s.on_tick_at(t0 + secs(40));

        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.time_left(), Some(30));
        assert!(s.wpm_samples().is_empty());
    }

    #[test]
    fn test_reset_after_finish_allows_a_new_attempt() {
        let mut s = session(TestMode::Words, "hi");
        let t0 = Instant::now();

        s.on_input_at("hi", t0);
        assert!(s.is_finished());

        s.reset();
        assert!(s.result().is_none());
        s.on_input_at("h", t0 + secs(1));
        assert_eq!(s.phase(), Phase::Running);
    }

    #[test]
    fn test_countdown_finishes_time_mode() {
        let mut s = session(TestMode::Time, "the cat");
        let t0 = Instant::now();

        s.on_input_at("t", t0);
        s.on_input_at("the cat", t0 + secs(5));
        assert_eq!(s.phase(), Phase::Running);

        s.on_tick_at(t0 + secs(10));
        assert_eq!(s.time_left(), Some(20));

        s.on_tick_at(t0 + secs(30));
        assert_eq!(s.phase(), Phase::Finished);
        assert_eq!(s.time_left(), Some(0));

        let result = s.result().unwrap();
        // scored against the configured 30 seconds: 7 chars / 5 / 0.5
        assert_eq!(result.wpm, 3);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.elapsed_seconds, 30.0);
        assert_eq!(result.samples.len(), 30);
        assert!(result.consistency <= 100);
    }

    #[test]
    fn test_countdown_finishes_without_input_after_start() {
        let mut s = session(TestMode::Time, "the cat");
        let t0 = Instant::now();

        s.on_input_at("x", t0);
        for n in 1..=30 {
            s.on_tick_at(t0 + secs(n));
        }

        assert!(s.is_finished());
        assert_eq!(s.result().unwrap().accuracy, 0);
        assert_eq!(s.result().unwrap().char_stats.incorrect, 1);
    }

    #[test]
    fn test_stale_ticks_after_finish_change_nothing() {
        let mut s = session(TestMode::Time, "the cat");
        let t0 = Instant::now();

        s.on_input_at("the", t0);
        s.on_tick_at(t0 + secs(30));
        let samples = s.wpm_samples().len();

        s.on_tick_at(t0 + secs(60));
        assert_eq!(s.wpm_samples().len(), samples);
        assert_eq!(s.time_left(), Some(0));
    }

    #[test]
    fn test_samples_follow_the_clock_not_keystrokes() {
        let mut s = session(TestMode::Words, "the quick brown fox");
        let t0 = Instant::now();

        for (i, prefix) in ["t", "th", "the", "the ", "the q"].iter().enumerate() {
            s.on_input_at(*prefix, t0 + Duration::from_millis(100 * i as u64));
            s.on_tick_at(t0 + Duration::from_millis(100 * i as u64 + 50));
        }
        assert!(s.wpm_samples().is_empty());

        s.on_tick_at(t0 + Duration::from_millis(1500));
        assert_eq!(s.wpm_samples().len(), 1);
        assert_eq!(s.wpm_samples()[0].t, 1.0);
        // 5 correct chars including the space, over one second
        assert_eq!(s.wpm_samples()[0].wpm, 60.0);

        s.on_tick_at(t0 + Duration::from_millis(1900));
        assert_eq!(s.wpm_samples().len(), 1);
    }

    #[test]
    fn test_live_metrics_track_input() {
        let mut s = session(TestMode::Words, "the cat sat");
        let t0 = Instant::now();

        s.on_input_at("t", t0);
        s.on_input_at("thx", t0 + secs(6));

        let live = s.live();
        assert_eq!(live.accuracy, 67);
        // 2 correct chars over 0.1 minutes
        assert_eq!(live.wpm, 4);
        assert_eq!(live.raw_wpm, 6);
    }

    #[test]
    fn test_configure_regenerates_target() {
        let mut s = session(TestMode::Words, "the cat");
        s.on_input_at("th", Instant::now());

        s.configure(TestMode::Code, None, None);

        assert_eq!(s.mode(), TestMode::Code);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.input(), "");
        assert_eq!(
            s.target(),
            &TargetContent::Code(Snippet {
                language: "text".into(),
                code: "the cat".into(),
            })
        );
    }

    #[test]
    fn test_configure_keeps_unspecified_settings() {
        let mut s = session(TestMode::Words, "the cat");

        s.configure(TestMode::Time, Some(60), None);
        assert_eq!(s.config().duration_secs, 60);
        assert_eq!(s.config().word_count, 50);
        assert_eq!(s.time_left(), Some(60));

        s.configure(TestMode::Words, None, Some(10));
        assert_eq!(s.config().duration_secs, 60);
        assert_eq!(s.config().word_count, 10);
        assert_eq!(s.time_left(), None);
    }

    #[test]
    fn test_remaining_words() {
        let mut s = session(TestMode::Words, "the cat sat");
        assert_eq!(s.remaining(), 3);

        s.on_input_at("the c", Instant::now());
        assert_eq!(s.remaining(), 2);
    }

    #[test]
    fn test_classification_switches_to_final_pass() {
        let mut s = session(TestMode::Words, "the cat");
        let t0 = Instant::now();

        s.on_input_at("th cat", t0);
        let c = s.classification();

        assert!(s.is_finished());
        assert_eq!(c.char_stats().missed, 1);
        assert_eq!(s.result().unwrap().char_stats, c.char_stats());
    }
}
