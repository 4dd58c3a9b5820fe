//! Save workflow for edited models.
//!
//! Saving is the one place where an edit can destroy state: when a model
//! with recorded proof steps is changed, those steps must be deleted before
//! the model is persisted. The coordinator runs that chain as one sequential
//! workflow — validate, detect dirtiness, invalidate proof state, persist,
//! refresh — so the delete-before-persist ordering is an explicit dependency
//! rather than an accident of callback nesting.

use std::sync::Arc;

use serde::Serialize;

use crate::models::{check_name, NameError};
use crate::session::EditSession;
use crate::store::ModelRegistry;
use crate::transport::{ModelTransport, TransportError, UpdateModelRequest};

// ---------------------------------------------------------------------------
// Outcome and error types
// ---------------------------------------------------------------------------

/// How a save request resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    /// Nothing differed from the original; the session closed without a
    /// round trip. Pending follow-up actions may run immediately.
    NothingToSave,
    /// The model was persisted and the snapshot registry refreshed.
    Saved,
}

/// Save failures. None of these roll back the user's edits: the session
/// stays live so the user can correct and resave.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    /// Client-side validation failed; no request was made.
    #[error(transparent)]
    Validation(#[from] NameError),

    /// The session was already terminated; nothing to save.
    #[error("session is already closed")]
    SessionClosed,

    /// Proof-step deletion failed or was declined; the save was aborted
    /// before any persistence call.
    #[error("proof step deletion failed: {0}")]
    ProofStepDeletion(TransportError),

    /// The server could not parse the edited model text. Carries the
    /// rejected text so it can be shown next to the diagnostic.
    #[error("model text rejected: {details}")]
    Parse {
        details: String,
        rejected_text: String,
    },

    /// The update was rejected for a non-parse reason.
    #[error("model update failed: {0}")]
    Update(TransportError),
}

// ---------------------------------------------------------------------------
// Coordinator
// ---------------------------------------------------------------------------

/// Drives the save chain for one user's edit sessions.
pub struct SaveCoordinator {
    transport: Arc<dyn ModelTransport>,
}

impl SaveCoordinator {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }

    /// Save a session's edits.
    ///
    /// 1. A clean session closes immediately (no round trip).
    /// 2. The candidate name is pre-checked against the registry; failure
    ///    blocks locally.
    /// 3. If the model has recorded proof steps, every edit counts as
    ///    structural: the steps are deleted first, and only a confirmed
    ///    deletion lets the chain continue.
    /// 4. The four edited fields are persisted. On success the registry
    ///    entry is refreshed in place and the working copy becomes the new
    ///    original. On failure the working copy is left untouched.
    pub async fn save(
        &self,
        user_id: &str,
        session: &mut EditSession,
        registry: &mut ModelRegistry,
    ) -> Result<SaveOutcome, SaveError> {
        if session.is_terminal() {
            return Err(SaveError::SessionClosed);
        }
        if session.close_if_clean() {
            tracing::debug!(model_id = %session.model_id(), "nothing to save");
            return Ok(SaveOutcome::NothingToSave);
        }

        let model_id = session.model_id().to_string();
        check_name(Some(session.working().name.as_str()), &model_id, &registry.all())?;

        if session.working().num_all_proof_steps > 0 {
            tracing::info!(
                model_id,
                steps = session.working().num_all_proof_steps,
                "edit invalidates recorded proofs; deleting proof steps"
            );
            match self.transport.delete_proof_steps(user_id, &model_id).await {
                Ok(true) => session.reset_proof_steps(),
                Ok(false) => {
                    tracing::warn!(model_id, "server declined proof step deletion; aborting save");
                    return Err(SaveError::ProofStepDeletion(TransportError::Rejected(
                        "server declined to delete proof steps".to_string(),
                    )));
                }
                Err(error) => {
                    tracing::warn!(model_id, %error, "proof step deletion failed; aborting save");
                    return Err(SaveError::ProofStepDeletion(error));
                }
            }
        }

        let update = UpdateModelRequest::for_model(session.working());
        match self.transport.update_model(user_id, &model_id, &update).await {
            Ok(()) => {}
            Err(TransportError::Parse { details }) => {
                tracing::warn!(model_id, "model text rejected by parser");
                return Err(SaveError::Parse {
                    details,
                    rejected_text: session.working().key_file.clone(),
                });
            }
            Err(error) => {
                tracing::warn!(model_id, %error, "model update failed");
                return Err(SaveError::Update(error));
            }
        }

        registry.update_saved_fields(&model_id, session.working());
        session.mark_saved();
        tracing::info!(model_id, "model saved");
        Ok(SaveOutcome::Saved)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
