use chrono::Local;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, trace, warn};

use crate::catalog::{Catalog, Language, Text};
use crate::context::{FinishReason, SessionContext, SessionSnapshot};
use crate::error::{Result, TrainerError};
use crate::sampler::SampleTimer;
use crate::session::{SessionConfig, SessionState, SessionStatus};
use crate::summary::Summary;
use crate::typing_policy::{accept_input, line_complete, RejectPolicy};

/// How a single keystroke was handled
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Keystroke {
    Correct,
    /// Wrong key, but let through by the error tolerance
    Tolerated,
    /// Wrong key, discarded
    Rejected,
    /// Not a typing key, or the session is already over
    Ignored,
}

/// Owns one typing session from the first keystroke to the results.
///
/// All session mutation goes through this type. Views read [`SessionState`]
/// and the published [`SessionSnapshot`].
#[derive(Debug)]
pub struct Trainer {
    config: SessionConfig,
    catalog: Catalog,
    text: Text,
    state: SessionState,
    timer: SampleTimer,
    context: SessionContext,
}

impl Trainer {
    /// Pick a random text for the configured language and wait for the first key
    pub fn new(config: SessionConfig, catalog: Catalog) -> Result<Self> {
        let text = catalog.get_text(config.language)?;
        Ok(Self::from_parts(config, catalog, text))
    }

    /// Train on one fixed text. Resets keep returning the same text.
    pub fn with_text(config: SessionConfig, text: Text) -> Self {
        let catalog = Catalog::single(config.language, text.clone());
        Self::from_parts(config, catalog, text)
    }

    fn from_parts(config: SessionConfig, catalog: Catalog, text: Text) -> Self {
        Self {
            config,
            catalog,
            text,
            state: SessionState::default(),
            timer: SampleTimer::default(),
            context: SessionContext::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn text(&self) -> &Text {
        &self.text
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn duration_secs(&self) -> u32 {
        self.config
            .duration_secs
            .unwrap_or(self.text.default_duration_secs)
    }

    pub fn seconds_remaining(&self) -> u32 {
        self.duration_secs()
            .saturating_sub(self.state.elapsed_seconds)
    }

    pub fn current_line(&self) -> Option<&str> {
        self.text.line(self.state.current_line_index)
    }

    pub fn typed(&self) -> &str {
        &self.state.typed_so_far
    }

    pub fn has_started(&self) -> bool {
        self.state.status != SessionStatus::Idle
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn has_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn snapshot(&self) -> Option<Arc<SessionSnapshot>> {
        self.context.subscribe()
    }

    pub fn summary(&self) -> Option<Summary> {
        self.snapshot().map(|s| s.summary())
    }

    pub fn write(&mut self, c: char) -> Result<Keystroke> {
        self.write_at(c, Instant::now())
    }

    /// Feed one typed character. The first printable key of an idle session
    /// starts it; keys after the finish are ignored.
    ///
    /// Sampler periods that came due before `now` run first, so a key
    /// pressed after the deadline finishes the session instead of counting.
    pub fn write_at(&mut self, c: char, now: Instant) -> Result<Keystroke> {
        if c.is_control() {
            return Ok(Keystroke::Ignored);
        }

        match self.state.status {
            SessionStatus::Finished => return Ok(Keystroke::Ignored),
            SessionStatus::Idle => self.start(now)?,
            SessionStatus::Running => {
                self.on_tick_at(now);
                if !self.is_running() {
                    return Ok(Keystroke::Ignored);
                }
            }
        }

        let Some(line) = self.text.line(self.state.current_line_index) else {
            return Ok(Keystroke::Ignored);
        };
        let expected = line.chars().nth(self.state.typed_so_far.chars().count());
        let decision = accept_input(
            expected,
            Some(c),
            &self.config,
            self.state.consecutive_errors,
        );

        self.state.consecutive_errors = decision.consecutive_errors;
        if decision.is_error {
            self.state.total_errors += 1;
        }

        if let Some(policy) = decision.reject_policy(&self.config) {
            if policy == RejectPolicy::ClearBuffer {
                self.state.typed_so_far.clear();
            }
            trace!(?expected, actual = %c, ?policy, "keystroke rejected");
            return Ok(Keystroke::Rejected);
        }

        self.state.typed_so_far.push(c);
        self.state.total_typed += 1;

        if line_complete(line, &self.state.typed_so_far, &self.config) {
            self.advance_line();
        }

        Ok(if decision.is_error {
            Keystroke::Tolerated
        } else {
            Keystroke::Correct
        })
    }

    fn start(&mut self, now: Instant) -> Result<()> {
        self.text.validate()?;
        if self.duration_secs() == 0 {
            return Err(TrainerError::ZeroDuration);
        }

        self.state.status = SessionStatus::Running;
        self.timer.start(now);
        info!(
            text = %self.text.name,
            language = %self.config.language,
            difficulty = %self.config.difficulty,
            duration_secs = self.duration_secs(),
            "session started"
        );
        Ok(())
    }

    fn advance_line(&mut self) {
        self.state.current_line_index += 1;
        self.state.typed_so_far.clear();
        debug!(line = self.state.current_line_index, "line completed");

        if self.state.current_line_index >= self.text.lines.len() {
            self.finalize(FinishReason::Completed);
        }
    }

    pub fn on_tick(&mut self) {
        self.on_tick_at(Instant::now())
    }

    /// Run every sampler tick that came due by `now`
    pub fn on_tick_at(&mut self, now: Instant) {
        for _ in 0..self.timer.poll(now) {
            if !self.is_running() {
                break;
            }
            self.tick();
        }
    }

    /// One sampler period: record the last second and advance the clock.
    /// The tick that reaches the duration finishes the session.
    pub fn tick(&mut self) {
        if !self.is_running() {
            return;
        }

        let sample = self.state.samples.record(
            self.state.elapsed_seconds,
            self.state.total_typed,
            self.state.total_errors,
        );
        self.state.elapsed_seconds += 1;
        trace!(?sample, "sampled");

        if self.state.elapsed_seconds >= self.duration_secs() {
            self.finalize(FinishReason::Timeout);
        }
    }

    /// The single exit path out of `Running`. A second call is a no-op.
    fn finalize(&mut self, reason: FinishReason) {
        if !self.is_running() {
            return;
        }

        self.timer.cancel();
        self.state.samples.record(
            self.state.elapsed_seconds,
            self.state.total_typed,
            self.state.total_errors,
        );
        self.state.status = SessionStatus::Finished;

        let snapshot = SessionSnapshot {
            text_name: self.text.name.clone(),
            language: self.config.language,
            config: self.config.clone(),
            text_length: self.text.char_count(),
            lines_completed: self.state.current_line_index.min(self.text.lines.len()),
            total_typed: self.state.total_typed,
            total_errors: self.state.total_errors,
            elapsed_seconds: self.state.elapsed_seconds,
            samples: self.state.samples.clone(),
            reason,
            finished_at: Local::now(),
        };
        info!(
            ?reason,
            total_typed = snapshot.total_typed,
            total_errors = snapshot.total_errors,
            elapsed_secs = snapshot.elapsed_seconds,
            "session finished"
        );
        self.context.publish(snapshot);
    }

    /// Back to idle with a freshly chosen text
    pub fn reset(&mut self) -> Result<()> {
        let text = self.catalog.get_text(self.config.language)?;
        self.clear_session();
        self.text = text;
        debug!(text = %self.text.name, "session reset");
        Ok(())
    }

    /// Back to idle on the same text
    pub fn restart(&mut self) {
        self.clear_session();
        debug!(text = %self.text.name, "session restarted");
    }

    fn clear_session(&mut self) {
        // the timer goes first so no tick can land on a half-cleared state
        self.timer.cancel();
        self.state = SessionState::default();
        self.context.clear();
    }

    /// Change settings. Rejected while running, except that a language
    /// change always resets onto a text of the new language.
    pub fn update_config(&mut self, f: impl FnOnce(&mut SessionConfig)) -> Result<()> {
        let mut next = self.config.clone();
        f(&mut next);
        if next == self.config {
            return Ok(());
        }

        if next.language != self.config.language {
            let text = self.catalog.get_text(next.language)?;
            self.clear_session();
            self.config = next;
            self.text = text;
            debug!(language = %self.config.language, text = %self.text.name, "language changed");
            return Ok(());
        }

        if self.is_running() {
            warn!("settings change rejected while session is running");
            return Err(TrainerError::SessionRunning);
        }
        self.config = next;
        Ok(())
    }

    pub fn set_language(&mut self, language: Language) -> Result<()> {
        self.update_config(|c| c.language = language)
    }
}
