//! In-memory registry of last-known-saved models.
//!
//! Backs the model list views: one entry per model the server has reported,
//! in server list order. The registry is owned by the composition root and
//! passed `&mut` into the workflows that refresh it — there is no global
//! state. Reads hand out clones so a caller's copy can never alias a
//! registry entry; writes happen only after a server confirmed the change.

use crate::models::Model;

// ═══════════════════════════════════════════════════════════
// ModelRegistry
// ═══════════════════════════════════════════════════════════

/// Snapshot registry of the user's models.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: Vec<Model>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { models: Vec::new() }
    }

    /// Replace the whole registry with a fresh server listing.
    pub fn set_models(&mut self, models: Vec<Model>) {
        tracing::debug!(count = models.len(), "registry replaced");
        self.models = models;
    }

    /// Append models from a bulk import to the current listing.
    pub fn add_models(&mut self, models: Vec<Model>) {
        tracing::debug!(count = models.len(), "registry extended");
        self.models.extend(models);
    }

    /// Copy-on-read lookup by id. Mutating the returned model does not
    /// touch the registry.
    pub fn get(&self, model_id: &str) -> Option<Model> {
        self.models.iter().find(|m| m.id == model_id).cloned()
    }

    /// Copy-on-read listing in server order.
    pub fn all(&self) -> Vec<Model> {
        self.models.clone()
    }

    /// Refresh the four editable fields of one entry after a confirmed
    /// save. Unknown ids are tolerated: the list view may simply not be
    /// loaded (e.g. a session opened from a proof page). Returns whether an
    /// entry was updated.
    pub fn update_saved_fields(&mut self, model_id: &str, saved: &Model) -> bool {
        match self.models.iter_mut().find(|m| m.id == model_id) {
            Some(entry) => {
                entry.name = saved.name.clone();
                entry.title = saved.title.clone();
                entry.description = saved.description.clone();
                entry.key_file = saved.key_file.clone();
                tracing::debug!(model_id, "registry entry refreshed after save");
                true
            }
            None => {
                tracing::debug!(model_id, "no registry entry to refresh");
                false
            }
        }
    }

    /// Drop one entry (model deleted on the server). Returns whether it
    /// was present.
    pub fn remove(&mut self, model_id: &str) -> bool {
        let before = self.models.len();
        self.models.retain(|m| m.id != model_id);
        self.models.len() != before
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.models.clear();
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
