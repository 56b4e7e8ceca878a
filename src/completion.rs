use crate::content::TargetContent;
use crate::mode::TestMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum CompletionReason {
    /// the countdown of a timed test ran out
    TimeExpired,
    /// the user typed through the last target character
    TargetReached,
    /// the user typed more words than the target holds
    WordOverflow,
}

/// Decide whether a session is over.
///
/// `time_left` is only consulted in time mode, where the input never ends a
/// test on its own.
pub fn check(
    mode: TestMode,
    target: &TargetContent,
    input: &str,
    time_left: Option<u64>,
) -> Option<CompletionReason> {
    match mode {
        TestMode::Time => match time_left {
            Some(0) => Some(CompletionReason::TimeExpired),
            _ => None,
        },
        TestMode::Words | TestMode::Code => check_content(target, input),
    }
}

fn check_content(target: &TargetContent, input: &str) -> Option<CompletionReason> {
    if input.is_empty() {
        return None;
    }
    match target {
        TargetContent::Words(words) => {
            let typed: Vec<&str> = input.split(' ').collect();
            let last_typed = typed.last().map_or(0, |w| w.chars().count());
            let last_target = words.last().map_or(0, |w| w.chars().count());

            if typed.len() > words.len() {
                Some(CompletionReason::WordOverflow)
            } else if typed.len() == words.len() && last_typed == last_target {
                Some(CompletionReason::TargetReached)
            } else {
                None
            }
        }
        TargetContent::Code(snippet) => {
            (input.chars().count() >= snippet.code.chars().count())
                .then_some(CompletionReason::TargetReached)
        }
    }
}
