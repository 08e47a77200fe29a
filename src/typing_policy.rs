use crate::session::{Difficulty, SessionConfig};

/// Number of back-to-back mismatches tolerated when errors are allowed.
/// The next mismatch after this many is rejected until a correct key resets the run.
pub const ERROR_TOLERANCE: usize = 3;

/// Compare one expected character against one typed character.
///
/// A missing side (past the end of a line, nothing typed) never matches.
pub fn match_char(expected: Option<char>, actual: Option<char>, case_sensitive: bool) -> bool {
    match (expected, actual) {
        (Some(e), Some(a)) if case_sensitive => e == a,
        (Some(e), Some(a)) => e.to_lowercase().eq(a.to_lowercase()),
        _ => false,
    }
}

/// What to do with the typed buffer when a keystroke is rejected
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectPolicy {
    /// Drop only the offending keystroke
    DiscardLast,
    /// Throw away the whole line typed so far
    ClearBuffer,
}

impl From<Difficulty> for RejectPolicy {
    fn from(d: Difficulty) -> Self {
        match d {
            Difficulty::Normal => RejectPolicy::DiscardLast,
            Difficulty::Hard => RejectPolicy::ClearBuffer,
        }
    }
}

/// Result of running one keystroke through the policy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    pub accepted: bool,
    pub is_error: bool,
    /// Consecutive error count to carry into the next keystroke
    pub consecutive_errors: usize,
}

impl Decision {
    /// Buffer handling the caller must apply, if the keystroke was rejected
    pub fn reject_policy(&self, config: &SessionConfig) -> Option<RejectPolicy> {
        if self.accepted {
            None
        } else {
            Some(config.difficulty.into())
        }
    }
}

pub fn accept_input(
    expected: Option<char>,
    actual: Option<char>,
    config: &SessionConfig,
    consecutive_errors: usize,
) -> Decision {
    if match_char(expected, actual, config.case_sensitive) {
        return Decision {
            accepted: true,
            is_error: false,
            consecutive_errors: 0,
        };
    }

    if config.allow_errors && consecutive_errors < ERROR_TOLERANCE {
        Decision {
            accepted: true,
            is_error: true,
            consecutive_errors: consecutive_errors + 1,
        }
    } else {
        Decision {
            accepted: false,
            is_error: true,
            consecutive_errors,
        }
    }
}

/// Whether `typed` completes `line` under the given settings.
///
/// With errors allowed, reaching the line's length is enough.
pub fn line_complete(line: &str, typed: &str, config: &SessionConfig) -> bool {
    let line_len = line.chars().count();
    let typed_len = typed.chars().count();

    if config.allow_errors && typed_len >= line_len {
        return true;
    }

    typed_len == line_len
        && line
            .chars()
            .zip(typed.chars())
            .all(|(e, a)| match_char(Some(e), Some(a), config.case_sensitive))
}
