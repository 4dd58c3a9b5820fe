//! Upload of new model/archive text.
//!
//! Before anything touches the network the raw text is classified: archives
//! with several entries or bundled tactic scripts need per-entry handling
//! after import, so a proof is auto-started only for a single plain entry.
//! The flow itself mirrors the dialog it backs: submit, then either jump
//! into a fresh proof or refresh the model list.

use std::sync::Arc;

use serde::Serialize;

use crate::archive;
use crate::store::ModelRegistry;
use crate::transport::{ModelTransport, TransportError};

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Whether an upload should immediately start a proof. True only if the
/// caller requested it AND the archive holds at most one entry AND no
/// tactics: anything richer requires the user to choose per entry.
pub fn should_auto_start_proof(content: &str, requested_start: bool) -> bool {
    requested_start
        && archive::count_entries(content) <= 1
        && archive::count_tactics(content) == 0
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Form state of the upload dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadDraft {
    /// Explicit model name; derived from the file name when the content has
    /// no named entries.
    pub model_name: Option<String>,
    pub content: String,
}

impl UploadDraft {
    /// Fresh draft, seeded with the new-entry template.
    pub fn new() -> Self {
        Self {
            model_name: None,
            content: archive::NEW_ENTRY_TEMPLATE.to_string(),
        }
    }

    /// Replace the draft content with an uploaded file. Empty files re-seed
    /// the template; files without named entries get their model name from
    /// the file name.
    pub fn set_content_from_file(&mut self, file_name: &str, file_content: &str) {
        self.content = if file_content.is_empty() {
            archive::NEW_ENTRY_TEMPLATE.to_string()
        } else {
            file_content.to_string()
        };
        if archive::count_entries(file_content) == 0 {
            self.model_name = Some(archive::default_model_name(file_name).to_string());
        }
    }
}

impl Default for UploadDraft {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Flow
// ---------------------------------------------------------------------------

/// How an upload resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UploadOutcome {
    /// The server stored the model. `proof_id` is set when a proof was
    /// auto-started for it.
    Created {
        model_id: String,
        proof_id: Option<String>,
    },
    /// The server declined the upload; `error_text` is its diagnostic, if
    /// it provided one.
    Rejected { error_text: Option<String> },
}

/// Upload failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    /// The server could not parse the submitted text. Carries the text for
    /// display next to the diagnostic.
    #[error("archive text rejected: {details}")]
    Parse {
        details: String,
        submitted_text: String,
    },

    #[error(transparent)]
    Transport(TransportError),
}

/// Drives uploads for one user.
pub struct UploadCoordinator {
    transport: Arc<dyn ModelTransport>,
}

impl UploadCoordinator {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }

    /// Submit a draft. On success, either auto-start a proof (when the
    /// classification allows it and `start_proof` was requested) or refresh
    /// the registry with the server's new listing.
    pub async fn upload(
        &self,
        user_id: &str,
        draft: &UploadDraft,
        start_proof: bool,
        registry: &mut ModelRegistry,
    ) -> Result<UploadOutcome, UploadError> {
        let model_name = draft.model_name.as_deref().unwrap_or_default();
        let auto_start = should_auto_start_proof(&draft.content, start_proof);

        let response = match self
            .transport
            .upload_model(user_id, model_name, &draft.content)
            .await
        {
            Ok(response) => response,
            Err(TransportError::Parse { details }) => {
                return Err(UploadError::Parse {
                    details,
                    submitted_text: draft.content.clone(),
                })
            }
            Err(error) => return Err(UploadError::Transport(error)),
        };

        if !response.success {
            tracing::warn!(model_name, "upload rejected by server");
            return Ok(UploadOutcome::Rejected {
                error_text: response.error_text,
            });
        }
        let model_id = response.model_id.ok_or_else(|| {
            UploadError::Transport(TransportError::Rejected(
                "upload succeeded without a model id".to_string(),
            ))
        })?;
        tracing::info!(model_name, model_id, "model uploaded");

        if auto_start {
            match self.transport.create_proof(user_id, &model_id, "", "").await {
                Ok(proof_id) => {
                    return Ok(UploadOutcome::Created {
                        model_id,
                        proof_id: Some(proof_id),
                    })
                }
                Err(error) => {
                    // The upload itself succeeded; surface the model anyway.
                    tracing::warn!(model_id, %error, "could not start proof for uploaded model");
                    return Ok(UploadOutcome::Created {
                        model_id,
                        proof_id: None,
                    });
                }
            }
        }

        match self.transport.list_models(user_id, &[]).await {
            Ok(models) => registry.set_models(models),
            Err(error) => {
                tracing::warn!(%error, "model list refresh failed after upload");
            }
        }
        Ok(UploadOutcome::Created {
            model_id,
            proof_id: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
