//! Data models for the PDF tools API

use serde::{Deserialize, Serialize};

/// Handle for a produced artifact: the identifier doubles as the storage
/// filename, and the download URL is derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResponse {
    pub file_id: String,
    pub filename: String,
    pub download_url: String,
}

impl FileResponse {
    /// Build the response for an artifact stored under `file_id`.
    pub fn for_artifact(file_id: String) -> Self {
        let download_url = format!("/api/download/{}", file_id);
        Self {
            filename: file_id.clone(),
            file_id,
            download_url,
        }
    }
}
