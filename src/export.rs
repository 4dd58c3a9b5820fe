//! Export of models and proofs as downloadable files.
//!
//! The core produces named text blobs; actually saving them to disk is the
//! embedding client's job. Bulk exports are stamped with the current date so
//! repeated downloads do not collide.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::ARCHIVE_EXTENSION;
use crate::transport::{ModelTransport, TransportError};

/// A downloadable text file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub file_name: String,
    pub content: String,
}

/// Zero-padded month-day-year stamp used in bulk export names.
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%m%d%Y").to_string()
}

/// Today in the client's local timezone.
pub fn current_date() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Builds export files from server-side archive content.
pub struct Exporter {
    transport: Arc<dyn ModelTransport>,
}

impl Exporter {
    pub fn new(transport: Arc<dyn ModelTransport>) -> Self {
        Self { transport }
    }

    /// One model's source text as `<name>.kyx`.
    pub async fn export_model(
        &self,
        user_id: &str,
        model_id: &str,
    ) -> Result<ExportFile, TransportError> {
        let model = self.transport.fetch_model(user_id, model_id).await?;
        Ok(ExportFile {
            file_name: format!("{}.{ARCHIVE_EXTENSION}", model.name),
            content: model.key_file,
        })
    }

    /// All models without proofs as `models_<MMDDYYYY>.kyx`.
    pub async fn export_all_models(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<ExportFile, TransportError> {
        let content = self.transport.download_all_models(user_id, false).await?;
        Ok(ExportFile {
            file_name: format!("models_{}.{ARCHIVE_EXTENSION}", date_stamp(date)),
            content,
        })
    }

    /// All models with their proofs as `proofs_<MMDDYYYY>.kyx`.
    pub async fn export_all_proofs(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<ExportFile, TransportError> {
        let content = self.transport.download_all_models(user_id, true).await?;
        Ok(ExportFile {
            file_name: format!("proofs_{}.{ARCHIVE_EXTENSION}", date_stamp(date)),
            content,
        })
    }

    /// One model's proofs as `<modelId>_<MMDDYYYY>.kyx`.
    pub async fn export_model_proofs(
        &self,
        user_id: &str,
        model_id: &str,
        date: NaiveDate,
    ) -> Result<ExportFile, TransportError> {
        let content = self
            .transport
            .download_model_proofs(user_id, model_id)
            .await?;
        Ok(ExportFile {
            file_name: format!("{model_id}_{}.{ARCHIVE_EXTENSION}", date_stamp(date)),
            content,
        })
    }
}
