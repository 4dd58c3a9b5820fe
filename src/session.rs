//! Per-open-model edit session.
//!
//! A session owns two copies of the model: `original` (last confirmed-saved
//! state) and `working` (live-edited). The copies are independent clones, so
//! edits can never leak into the original or into the registry. `original`
//! is refreshed from `working` only after the server confirms a save;
//! cancelling restores the working source text from `original` and the
//! session is discarded.

use serde::Serialize;

use crate::models::Model;

// ═══════════════════════════════════════════════════════════
// Modes and states
// ═══════════════════════════════════════════════════════════

/// How a session was opened. Exercise and proof-edit sessions open with the
/// editor enabled; plain edit sessions open read-only until the user
/// explicitly enables editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    Edit,
    Exercise,
    ProofEdit,
}

impl SessionMode {
    fn opens_editable(self) -> bool {
        matches!(self, SessionMode::Exercise | SessionMode::ProofEdit)
    }
}

/// Session lifecycle. `Saved`, `Cancelled` and `Closed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Viewing,
    Editing,
    Saved,
    Cancelled,
    Closed,
}

impl SessionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionState::Saved | SessionState::Cancelled | SessionState::Closed
        )
    }
}

/// Edit attempted in a state that does not allow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("model is read-only; enable editing first")]
    ReadOnly,
    #[error("session is closed")]
    Closed,
}

// ═══════════════════════════════════════════════════════════
// EditSession
// ═══════════════════════════════════════════════════════════

/// State machine for one open model.
#[derive(Debug)]
pub struct EditSession {
    mode: SessionMode,
    state: SessionState,
    original: Model,
    working: Model,
}

impl EditSession {
    /// Open a session on a freshly fetched model.
    pub fn open(model: Model, mode: SessionMode) -> Self {
        let state = if mode.opens_editable() {
            SessionState::Editing
        } else {
            SessionState::Viewing
        };
        tracing::debug!(model_id = %model.id, ?mode, ?state, "edit session opened");
        Self {
            mode,
            state,
            original: model.clone(),
            working: model,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.working.id
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// The live-edited copy.
    pub fn working(&self) -> &Model {
        &self.working
    }

    /// The last confirmed-saved copy.
    pub fn original(&self) -> &Model {
        &self.original
    }

    // ── Transitions ──────────────────────────────────────

    /// Explicit Viewing → Editing transition (user enabled editing).
    pub fn enable_editing(&mut self) -> Result<(), SessionError> {
        if self.state.is_terminal() {
            return Err(SessionError::Closed);
        }
        self.state = SessionState::Editing;
        Ok(())
    }

    /// Discard edits to the source text and terminate. Pure local revert,
    /// no persistence call: the working source text is restored from the
    /// original and the session is done.
    pub fn cancel(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        self.working.key_file = self.original.key_file.clone();
        self.state = SessionState::Cancelled;
        tracing::debug!(model_id = %self.working.id, "edit session cancelled");
    }

    /// Close without a round trip when nothing was changed. Returns true
    /// (and transitions to Closed) iff the session is clean, so the caller
    /// can run any pending follow-up action immediately.
    pub fn close_if_clean(&mut self) -> bool {
        if self.state.is_terminal() {
            return true;
        }
        if self.check_dirty() {
            return false;
        }
        self.state = SessionState::Closed;
        true
    }

    // ── Edits ────────────────────────────────────────────

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.working.name = name.into();
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.working.title = title.into();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.working.description = description.into();
        Ok(())
    }

    pub fn set_key_file(&mut self, key_file: impl Into<String>) -> Result<(), SessionError> {
        self.ensure_editable()?;
        self.working.key_file = key_file.into();
        Ok(())
    }

    fn ensure_editable(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Editing => Ok(()),
            SessionState::Viewing => Err(SessionError::ReadOnly),
            _ => Err(SessionError::Closed),
        }
    }

    // ── Dirtiness and save bookkeeping ───────────────────

    /// Whether any of the four persisted fields differs from the original.
    pub fn check_dirty(&self) -> bool {
        self.original.name != self.working.name
            || self.original.title != self.working.title
            || self.original.description != self.working.description
            || self.original.key_file != self.working.key_file
    }

    /// Record that the server confirmed deleting this model's proof steps.
    pub(crate) fn reset_proof_steps(&mut self) {
        self.working.num_all_proof_steps = 0;
    }

    /// Record a confirmed save: the working copy becomes the new original.
    pub(crate) fn mark_saved(&mut self) {
        self.original = self.working.clone();
        self.state = SessionState::Saved;
        tracing::debug!(model_id = %self.working.id, "edit session saved");
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
