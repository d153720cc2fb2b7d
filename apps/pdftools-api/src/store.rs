//! Upload store and artifact naming.
//!
//! Every stored file lives directly under the temp root with a generated
//! name; the artifact identifier *is* its filename, so download lookups are
//! a sanitized join against the root and nothing else.

use crate::error::ApiError;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Persist an uploaded file under the temp root as `{uuid}.{ext}`.
///
/// Only the extension of the claimed filename survives; everything else the
/// client sent is discarded. An empty claimed filename is rejected.
pub async fn save_upload(
    temp_dir: &Path,
    claimed_name: &str,
    bytes: &[u8],
) -> Result<PathBuf, ApiError> {
    if claimed_name.is_empty() {
        return Err(ApiError::InvalidRequest(
            "File must have a filename".to_string(),
        ));
    }

    let name = match file_extension(claimed_name) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };
    let dest = temp_dir.join(name);
    tokio::fs::write(&dest, bytes).await?;
    Ok(dest)
}

/// Lowercased extension after the last `.`, if any.
pub fn file_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Reduce a client-supplied identifier to a bare filename.
///
/// Strips every directory component, so `../secret` or `a/b/c.pdf` can never
/// resolve outside the temp root. Returns `None` when nothing usable is left.
pub fn sanitize_file_id(file_id: &str) -> Option<String> {
    let name = Path::new(file_id)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .last()?;
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Best-effort removal of transient inputs; failures never mask the
/// handler's primary result.
pub async fn remove_all(paths: &[PathBuf]) {
    for path in paths {
        let _ = tokio::fs::remove_file(path).await;
    }
}
