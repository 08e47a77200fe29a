use chrono::{DateTime, Local};
use serde::Serialize;
use std::sync::Arc;

use crate::catalog::Language;
use crate::session::SessionConfig;
use crate::summary::{summarize, Summary};
use crate::time_series::TimeSeries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FinishReason {
    /// The duration ran out
    Timeout,
    /// Every line of the text was typed
    Completed,
}

/// Frozen copy of a finished session for the results view
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub text_name: String,
    pub language: Language,
    pub config: SessionConfig,
    pub text_length: usize,
    pub lines_completed: usize,
    pub total_typed: usize,
    pub total_errors: usize,
    pub elapsed_seconds: u32,
    pub samples: TimeSeries,
    pub reason: FinishReason,
    pub finished_at: DateTime<Local>,
}

impl SessionSnapshot {
    pub fn summary(&self) -> Summary {
        summarize(self.samples.samples(), self.text_length)
    }
}

/// Holds the last finished session until the next reset.
///
/// Only the trainer publishes or clears; readers get shared read-only handles.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    latest: Option<Arc<SessionSnapshot>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn publish(&mut self, snapshot: SessionSnapshot) {
        self.latest = Some(Arc::new(snapshot));
    }

    pub(crate) fn clear(&mut self) {
        self.latest = None;
    }

    pub fn subscribe(&self) -> Option<Arc<SessionSnapshot>> {
        self.latest.clone()
    }
}
