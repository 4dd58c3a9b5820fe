//! Browsing the model list in its folder-like hierarchy.
//!
//! `WorkingDir` tracks the breadcrumb path; `ModelBrowser` runs the
//! list/open/delete workflows against the transport and keeps the snapshot
//! registry in sync with whatever the server last reported.

use std::sync::Arc;

use crate::session::{EditSession, SessionMode};
use crate::store::ModelRegistry;
use crate::transport::{ModelTransport, TransportError};

// ---------------------------------------------------------------------------
// WorkingDir
// ---------------------------------------------------------------------------

/// Current folder path, root by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkingDir {
    segments: Vec<String>,
}

impl WorkingDir {
    pub fn root() -> Self {
        Self::default()
    }

    /// Descend into a subfolder.
    pub fn enter(&mut self, folder: impl Into<String>) {
        self.segments.push(folder.into());
    }

    /// Jump to a breadcrumb: `None` returns to the root, `Some(n)` keeps
    /// the first `n` segments.
    pub fn jump_to(&mut self, level: Option<usize>) {
        match level {
            None => self.segments.clear(),
            Some(n) => self.segments.truncate(n),
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Display path, `/`-joined.
    pub fn path(&self) -> String {
        self.segments.join("/")
    }
}

// ---------------------------------------------------------------------------
// ModelBrowser
// ---------------------------------------------------------------------------

/// List/open/delete workflows for one user's models.
pub struct ModelBrowser {
    transport: Arc<dyn ModelTransport>,
}

impl ModelBrowser {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }

    /// Re-read the listing for the current folder into the registry.
    pub async fn refresh(
        &self,
        user_id: &str,
        dir: &WorkingDir,
        registry: &mut ModelRegistry,
    ) -> Result<(), TransportError> {
        let models = self.transport.list_models(user_id, dir.segments()).await?;
        tracing::debug!(folder = %dir.path(), count = models.len(), "model list refreshed");
        registry.set_models(models);
        Ok(())
    }

    /// Fetch a model and open an edit session on it. Models flagged as
    /// exercises open in exercise mode (editable); everything else opens
    /// for viewing.
    pub async fn open_session(
        &self,
        user_id: &str,
        model_id: &str,
        registry: &ModelRegistry,
    ) -> Result<EditSession, TransportError> {
        let mode = match registry.get(model_id) {
            Some(entry) if entry.is_exercise => SessionMode::Exercise,
            _ => SessionMode::Edit,
        };
        let model = self.transport.fetch_model(user_id, model_id).await?;
        Ok(EditSession::open(model, mode))
    }

    /// Import a tutorial/case-study repository, then re-read the root
    /// listing: the server reports the imported models only through the
    /// listing, so the registry is refreshed wholesale.
    pub async fn import_repository(
        &self,
        user_id: &str,
        repo_url: &str,
        registry: &mut ModelRegistry,
    ) -> Result<(), TransportError> {
        self.transport.import_repository(user_id, repo_url).await?;
        tracing::info!(repo_url, "repository imported");
        let models = self.transport.list_models(user_id, &[]).await?;
        registry.set_models(models);
        Ok(())
    }

    /// Start a proof for a model; returns the new proof id. The proof is
    /// created unnamed, like a proof started right after upload.
    pub async fn start_proof(
        &self,
        user_id: &str,
        model_id: &str,
    ) -> Result<String, TransportError> {
        let proof_id = self
            .transport
            .create_proof(user_id, model_id, "", "")
            .await?;
        tracing::info!(model_id, proof_id, "proof created");
        Ok(proof_id)
    }

    /// Delete one model on the server, then re-read the current folder.
    pub async fn delete_model(
        &self,
        user_id: &str,
        model_id: &str,
        dir: &WorkingDir,
        registry: &mut ModelRegistry,
    ) -> Result<(), TransportError> {
        self.transport.delete_model(user_id, model_id).await?;
        tracing::info!(model_id, "model deleted");
        self.refresh(user_id, dir, registry).await
    }

    /// Delete all of the user's models and empty the registry.
    pub async fn delete_all(
        &self,
        user_id: &str,
        registry: &mut ModelRegistry,
    ) -> Result<(), TransportError> {
        self.transport.delete_all_models(user_id).await?;
        tracing::info!("all models deleted");
        registry.set_models(Vec::new());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
