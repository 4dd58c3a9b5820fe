//! Abstract transport to the model server.
//!
//! Everything the core needs from the outside world goes through
//! `ModelTransport`: fetching and updating models, deleting proof state,
//! uploads, proof creation, listings, and archive downloads. Implementations
//! (HTTP client, test doubles) live outside this crate; the workflows only
//! depend on the trait so they stay fully testable with mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::Model;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Body of a model update: the four editable fields, with the source text
/// sent as `content`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateModelRequest {
    pub name: String,
    pub title: String,
    pub description: String,
    pub content: String,
}

impl UpdateModelRequest {
    /// Build the update body from a model's current field values.
    pub fn for_model(model: &Model) -> Self {
        Self {
            name: model.name.clone(),
            title: model.title.clone(),
            description: model.description.clone(),
            content: model.key_file.clone(),
        }
    }
}

/// Server reply to a model upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub model_id: Option<String>,
    pub error_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The server could not parse the submitted model text.
    #[error("model text rejected by parser: {details}")]
    Parse { details: String },

    /// The server understood the request but declined it.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The request never completed (connectivity, timeout).
    #[error("network failure: {0}")]
    Network(String),
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Collaborator contract for all server interactions of the model workbench.
#[async_trait]
pub trait ModelTransport: Send + Sync {
    /// Full model including source text and proof-step count.
    async fn fetch_model(&self, user_id: &str, model_id: &str) -> Result<Model, TransportError>;

    /// Persist the four editable fields of a model.
    async fn update_model(
        &self,
        user_id: &str,
        model_id: &str,
        update: &UpdateModelRequest,
    ) -> Result<(), TransportError>;

    /// Delete all proof steps of all proofs of a model. Destructive and not
    /// reversible. The flag reports whether the server performed the
    /// deletion.
    async fn delete_proof_steps(
        &self,
        user_id: &str,
        model_id: &str,
    ) -> Result<bool, TransportError>;

    /// Submit new model/archive text under the given name.
    async fn upload_model(
        &self,
        user_id: &str,
        model_name: &str,
        content: &str,
    ) -> Result<UploadResponse, TransportError>;

    /// Create a proof for a model; returns the new proof id.
    async fn create_proof(
        &self,
        user_id: &str,
        model_id: &str,
        proof_name: &str,
        proof_description: &str,
    ) -> Result<String, TransportError>;

    /// List the user's models within a folder path (empty = root).
    async fn list_models(
        &self,
        user_id: &str,
        folder: &[String],
    ) -> Result<Vec<Model>, TransportError>;

    /// Import a tutorial/case-study repository by URL into the user's model
    /// set. The imported models are reported only through a later listing.
    async fn import_repository(
        &self,
        user_id: &str,
        repo_url: &str,
    ) -> Result<(), TransportError>;

    /// Delete one model and its proofs.
    async fn delete_model(&self, user_id: &str, model_id: &str) -> Result<(), TransportError>;

    /// Delete all of the user's models.
    async fn delete_all_models(&self, user_id: &str) -> Result<(), TransportError>;

    /// Archive text of all models, with or without proofs.
    async fn download_all_models(
        &self,
        user_id: &str,
        with_proofs: bool,
    ) -> Result<String, TransportError>;

    /// Archive text of one model's proofs.
    async fn download_model_proofs(
        &self,
        user_id: &str,
        model_id: &str,
    ) -> Result<String, TransportError>;
}

// ---------------------------------------------------------------------------
// Test double
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use super::*;

    /// Scripted transport that records every call in order, so tests can
    /// assert both replies and call sequencing.
    pub(crate) struct MockTransport {
        calls: Mutex<Vec<String>>,
        models: Mutex<Vec<Model>>,
        update_error: Mutex<Option<TransportError>>,
        delete_steps_reply: Mutex<Result<bool, TransportError>>,
        upload_reply: Mutex<Result<UploadResponse, TransportError>>,
        create_proof_reply: Mutex<Result<String, TransportError>>,
        import_reply: Mutex<Result<(), TransportError>>,
        archive_contents: Mutex<String>,
    }

    impl MockTransport {
        pub(crate) fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                models: Mutex::new(Vec::new()),
                update_error: Mutex::new(None),
                delete_steps_reply: Mutex::new(Ok(true)),
                upload_reply: Mutex::new(Ok(UploadResponse {
                    success: true,
                    model_id: Some("m-new".to_string()),
                    error_text: None,
                })),
                create_proof_reply: Mutex::new(Ok("p1".to_string())),
                import_reply: Mutex::new(Ok(())),
                archive_contents: Mutex::new(String::new()),
            }
        }

        pub(crate) fn with_models(models: Vec<Model>) -> Self {
            let transport = Self::new();
            *transport.models.lock().unwrap() = models;
            transport
        }

        pub(crate) fn set_update_error(&self, error: TransportError) {
            *self.update_error.lock().unwrap() = Some(error);
        }

        pub(crate) fn set_delete_steps_reply(&self, reply: Result<bool, TransportError>) {
            *self.delete_steps_reply.lock().unwrap() = reply;
        }

        pub(crate) fn set_upload_reply(&self, reply: Result<UploadResponse, TransportError>) {
            *self.upload_reply.lock().unwrap() = reply;
        }

        pub(crate) fn set_create_proof_reply(&self, reply: Result<String, TransportError>) {
            *self.create_proof_reply.lock().unwrap() = reply;
        }

        pub(crate) fn set_import_reply(&self, reply: Result<(), TransportError>) {
            *self.import_reply.lock().unwrap() = reply;
        }

        pub(crate) fn set_archive_contents(&self, contents: &str) {
            *self.archive_contents.lock().unwrap() = contents.to_string();
        }

        /// Snapshot of the recorded call sequence.
        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl ModelTransport for MockTransport {
        async fn fetch_model(
            &self,
            _user_id: &str,
            model_id: &str,
        ) -> Result<Model, TransportError> {
            self.record(format!("fetchModel {model_id}"));
            self.models
                .lock()
                .unwrap()
                .iter()
                .find(|m| m.id == model_id)
                .cloned()
                .ok_or_else(|| TransportError::Rejected(format!("no model {model_id}")))
        }

        async fn update_model(
            &self,
            _user_id: &str,
            model_id: &str,
            _update: &UpdateModelRequest,
        ) -> Result<(), TransportError> {
            self.record(format!("updateModel {model_id}"));
            match self.update_error.lock().unwrap().clone() {
                Some(error) => Err(error),
                None => Ok(()),
            }
        }

        async fn delete_proof_steps(
            &self,
            _user_id: &str,
            model_id: &str,
        ) -> Result<bool, TransportError> {
            self.record(format!("deleteProofSteps {model_id}"));
            self.delete_steps_reply.lock().unwrap().clone()
        }

        async fn upload_model(
            &self,
            _user_id: &str,
            model_name: &str,
            _content: &str,
        ) -> Result<UploadResponse, TransportError> {
            self.record(format!("uploadModel {model_name}"));
            self.upload_reply.lock().unwrap().clone()
        }

        async fn create_proof(
            &self,
            _user_id: &str,
            model_id: &str,
            _proof_name: &str,
            _proof_description: &str,
        ) -> Result<String, TransportError> {
            self.record(format!("createProof {model_id}"));
            self.create_proof_reply.lock().unwrap().clone()
        }

        async fn list_models(
            &self,
            _user_id: &str,
            folder: &[String],
        ) -> Result<Vec<Model>, TransportError> {
            self.record(format!("listModels /{}", folder.join("/")));
            Ok(self.models.lock().unwrap().clone())
        }

        async fn import_repository(
            &self,
            _user_id: &str,
            repo_url: &str,
        ) -> Result<(), TransportError> {
            self.record(format!("importRepo {repo_url}"));
            self.import_reply.lock().unwrap().clone()
        }

        async fn delete_model(
            &self,
            _user_id: &str,
            model_id: &str,
        ) -> Result<(), TransportError> {
            self.record(format!("deleteModel {model_id}"));
            self.models.lock().unwrap().retain(|m| m.id != model_id);
            Ok(())
        }

        async fn delete_all_models(&self, _user_id: &str) -> Result<(), TransportError> {
            self.record("deleteAllModels".to_string());
            self.models.lock().unwrap().clear();
            Ok(())
        }

        async fn download_all_models(
            &self,
            _user_id: &str,
            with_proofs: bool,
        ) -> Result<String, TransportError> {
            self.record(format!("downloadAllModels withProofs={with_proofs}"));
            Ok(self.archive_contents.lock().unwrap().clone())
        }

        async fn download_model_proofs(
            &self,
            _user_id: &str,
            model_id: &str,
        ) -> Result<String, TransportError> {
            self.record(format!("downloadModelProofs {model_id}"));
            Ok(self.archive_contents.lock().unwrap().clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_maps_key_file_to_content() {
        let model = Model {
            id: "m1".to_string(),
            name: "Bouncing ball".to_string(),
            title: "A title".to_string(),
            description: "A description".to_string(),
            key_file: "Problem x>0 End.".to_string(),
            num_all_proof_steps: 7,
            is_exercise: false,
        };
        let update = UpdateModelRequest::for_model(&model);
        assert_eq!(update.name, "Bouncing ball");
        assert_eq!(update.title, "A title");
        assert_eq!(update.description, "A description");
        assert_eq!(update.content, "Problem x>0 End.");
    }
}
