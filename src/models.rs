//! Model entity and client-side validation.
//!
//! `Model` mirrors the server's wire shape (camelCase JSON). It is a plain
//! value type: sessions and the registry exchange explicit clones, never
//! shared references, so an edit in one place can never alias state in
//! another.

use serde::{Deserialize, Serialize};

use crate::archive;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A user's formal model as last reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Stable, server-assigned identifier.
    pub id: String,
    /// Unique among this user's models.
    pub name: String,
    pub title: String,
    pub description: String,
    /// Raw model source text.
    pub key_file: String,
    /// Proof steps recorded across all proofs of this model.
    pub num_all_proof_steps: u32,
    pub is_exercise: bool,
}

impl Model {
    /// Whether the source text is complete (no fill-in marker left).
    pub fn is_complete(&self) -> bool {
        archive::is_complete(&self.key_file)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_key_file(mut self, key_file: impl Into<String>) -> Self {
        self.key_file = key_file.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Name pre-check
// ---------------------------------------------------------------------------

/// Client-side name validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("Name is mandatory. Please enter a name.")]
    Missing,
    #[error("Model with name {0} already exists. Please choose a different name.")]
    Duplicate(String),
}

/// Optimistic pre-check that `candidate` can be used as the name of model
/// `model_id`. A model keeping its own name passes; the server remains the
/// final arbiter (it may still reject, e.g. on concurrent creation).
pub fn check_name(
    candidate: Option<&str>,
    model_id: &str,
    known_models: &[Model],
) -> Result<(), NameError> {
    let name = match candidate {
        None | Some("") => return Err(NameError::Missing),
        Some(name) => name,
    };
    let taken = known_models
        .iter()
        .any(|m| m.name == name && m.id != model_id);
    if taken {
        return Err(NameError::Duplicate(name.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
