use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::catalog::Language;
use crate::time_series::TimeSeries;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn toggled(self) -> Self {
        match self {
            Difficulty::Normal => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Normal,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub language: Language,
    pub difficulty: Difficulty,
    pub case_sensitive: bool,
    pub allow_errors: bool,
    /// Overrides the selected text's default duration when set
    pub duration_secs: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: Language::EnUs,
            difficulty: Difficulty::Normal,
            case_sensitive: true,
            allow_errors: false,
            duration_secs: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    Finished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub status: SessionStatus,
    pub current_line_index: usize,
    pub typed_so_far: String,
    pub total_typed: usize,
    pub total_errors: usize,
    pub consecutive_errors: usize,
    pub elapsed_seconds: u32,
    pub samples: TimeSeries,
}

impl SessionState {
    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }
}
