use std::path::Path;

use async_trait::async_trait;
use fractic_server_error::ServerError;
use tracing::debug;

use crate::{
    data::models::records_document_model::RecordsDocumentModel,
    entities::RecordsSnapshot,
    errors::{InvalidJson, ReadError, WriteError},
};

#[async_trait]
pub(crate) trait RecordsJsonDatasource: Send + Sync {
    fn from_string(&self, s: &str) -> Result<RecordsSnapshot, ServerError>;

    fn to_string(&self, snapshot: &RecordsSnapshot) -> Result<String, ServerError>;

    /// A missing file reads as an empty snapshot.
    async fn load(&self, path: &Path) -> Result<RecordsSnapshot, ServerError>;

    async fn save(&self, path: &Path, snapshot: &RecordsSnapshot) -> Result<(), ServerError>;
}

pub(crate) struct RecordsJsonDatasourceImpl;

impl RecordsJsonDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RecordsJsonDatasource for RecordsJsonDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<RecordsSnapshot, ServerError> {
        let model: RecordsDocumentModel = serde_json::from_str(s)
            .map_err(|e| InvalidJson::with_debug("records document", &e))?;
        Ok(model.into())
    }

    fn to_string(&self, snapshot: &RecordsSnapshot) -> Result<String, ServerError> {
        serde_json::to_string_pretty(&RecordsDocumentModel::from(snapshot))
            .map_err(|e| InvalidJson::with_debug("records document", &e))
    }

    async fn load(&self, path: &Path) -> Result<RecordsSnapshot, ServerError> {
        match tokio::fs::read_to_string(path).await {
            Ok(s) => self.from_string(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no records document yet, starting empty");
                Ok(RecordsSnapshot::default())
            }
            Err(e) => Err(ReadError::with_debug(&e)),
        }
    }

    async fn save(&self, path: &Path, snapshot: &RecordsSnapshot) -> Result<(), ServerError> {
        let contents = self.to_string(snapshot)?;
        // Write next to the target and rename, so readers never observe a
        // half-written document.
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, contents)
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| WriteError::with_debug(&e))?;
        Ok(())
    }
}
