//! Application state for the PDF tools API

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Shared request context: the sandboxed temp root all uploads and
/// artifacts live under. Injected explicitly so tests can point each
/// router instance at its own directory.
pub struct AppState {
    pub temp_dir: PathBuf,
}

impl AppState {
    /// Build state from the environment (`TEMP_DIR`, else the OS temp dir).
    pub fn from_env() -> Result<Self> {
        let temp_dir = std::env::var("TEMP_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir().join("pdftools-api"));
        Self::with_temp_dir(temp_dir)
    }

    /// Build state rooted at an explicit directory.
    ///
    /// Creating the directory up front doubles as the startup capability
    /// check: if the temp root cannot be created the server refuses to boot
    /// instead of failing per-request.
    pub fn with_temp_dir(temp_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&temp_dir)
            .with_context(|| format!("failed to create temp root {}", temp_dir.display()))?;
        tracing::info!("Using temp root: {}", temp_dir.display());
        Ok(Self { temp_dir })
    }
}
