//! HTTP handlers for the PDF tools API
//!
//! Every operation handler follows the same shape: an inner fallible future
//! does the multipart parsing, validation, and engine call, and the outer
//! handler unconditionally deletes the persisted inputs afterwards. That
//! keeps the "no orphaned uploads" guarantee on every exit path, including
//! early validation failures.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::FileResponse;
use crate::state::AppState;
use crate::store;

/// Image formats the images-to-pdf operation accepts, by extension.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "webp", "bmp"];

/// Liveness message
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "PDF Tools backend is running" }))
}

/// Health check endpoint
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Merge two or more uploaded PDFs into one document, in upload order.
pub async fn merge_pdfs(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<FileResponse>, ApiError> {
    let mut inputs = Vec::new();
    let result = merge_inner(&state, &mut multipart, &mut inputs).await;
    store::remove_all(&inputs).await;
    result.map(Json)
}

async fn merge_inner(
    state: &AppState,
    multipart: &mut Multipart,
    inputs: &mut Vec<PathBuf>,
) -> Result<FileResponse, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let Some(claimed) = field.file_name().map(str::to_string) else {
            continue;
        };
        if store::file_extension(&claimed).as_deref() != Some("pdf") {
            return Err(ApiError::InvalidRequest(format!(
                "{} is not a PDF",
                claimed
            )));
        }
        let bytes = field.bytes().await?;
        inputs.push(store::save_upload(&state.temp_dir, &claimed, &bytes).await?);
    }

    if inputs.len() < 2 {
        return Err(ApiError::InvalidRequest(
            "Please upload at least two PDF files to merge".to_string(),
        ));
    }

    let mut documents = Vec::with_capacity(inputs.len());
    for path in inputs.iter() {
        documents.push(tokio::fs::read(path).await?);
    }

    let merged = pdftools_core::merge_documents(documents)?;
    let file_id = format!("merged_{}.pdf", Uuid::new_v4());
    tokio::fs::write(state.temp_dir.join(&file_id), &merged).await?;

    tracing::info!("Merged {} documents into {}", inputs.len(), file_id);
    Ok(FileResponse::for_artifact(file_id))
}

/// Extract a 1-indexed inclusive page range from a single uploaded PDF.
pub async fn split_pdf(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<FileResponse>, ApiError> {
    let mut inputs = Vec::new();
    let result = split_inner(&state, &mut multipart, &mut inputs).await;
    store::remove_all(&inputs).await;
    result.map(Json)
}

async fn split_inner(
    state: &AppState,
    multipart: &mut Multipart,
    inputs: &mut Vec<PathBuf>,
) -> Result<FileResponse, ApiError> {
    let mut start_page: Option<i64> = None;
    let mut end_page: Option<i64> = None;

    while let Some(field) = multipart.next_field().await? {
        if let Some(claimed) = field.file_name().map(str::to_string) {
            if store::file_extension(&claimed).as_deref() != Some("pdf") {
                return Err(ApiError::InvalidRequest(
                    "Uploaded file must be a PDF".to_string(),
                ));
            }
            if !inputs.is_empty() {
                return Err(ApiError::InvalidRequest(
                    "Split accepts exactly one PDF file".to_string(),
                ));
            }
            let bytes = field.bytes().await?;
            inputs.push(store::save_upload(&state.temp_dir, &claimed, &bytes).await?);
            continue;
        }

        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("start_page") => start_page = Some(parse_page_number(&field.text().await?)?),
            Some("end_page") => end_page = Some(parse_page_number(&field.text().await?)?),
            _ => {}
        }
    }

    let input = inputs
        .first()
        .ok_or_else(|| ApiError::InvalidRequest("No PDF file uploaded".to_string()))?;
    let start = start_page
        .ok_or_else(|| ApiError::InvalidRequest("Missing start_page".to_string()))?;
    let end = end_page.ok_or_else(|| ApiError::InvalidRequest("Missing end_page".to_string()))?;

    let bytes = tokio::fs::read(input).await?;
    // Out-of-range values collapse to an invalid range the engine rejects
    // with the document's real page count in the message.
    let result = pdftools_core::extract_range(
        &bytes,
        start.clamp(0, u32::MAX as i64) as u32,
        end.clamp(0, u32::MAX as i64) as u32,
    )?;

    let file_id = format!("split_{}.pdf", Uuid::new_v4());
    tokio::fs::write(state.temp_dir.join(&file_id), &result).await?;

    tracing::info!("Split pages {}-{} into {}", start, end, file_id);
    Ok(FileResponse::for_artifact(file_id))
}

fn parse_page_number(text: &str) -> Result<i64, ApiError> {
    text.trim()
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("Invalid page number: {}", text)))
}

/// Assemble one or more uploaded images into a single multi-page PDF.
pub async fn images_to_pdf(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<FileResponse>, ApiError> {
    let mut inputs = Vec::new();
    let result = images_inner(&state, &mut multipart, &mut inputs).await;
    store::remove_all(&inputs).await;
    result.map(Json)
}

async fn images_inner(
    state: &AppState,
    multipart: &mut Multipart,
    inputs: &mut Vec<PathBuf>,
) -> Result<FileResponse, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        let Some(claimed) = field.file_name().map(str::to_string) else {
            continue;
        };
        let supported = store::file_extension(&claimed)
            .map(|ext| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false);
        if !supported {
            return Err(ApiError::InvalidRequest(format!(
                "Unsupported image format: {}",
                claimed
            )));
        }
        let bytes = field.bytes().await?;
        inputs.push(store::save_upload(&state.temp_dir, &claimed, &bytes).await?);
    }

    if inputs.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Please upload at least one image".to_string(),
        ));
    }

    let mut images = Vec::with_capacity(inputs.len());
    for path in inputs.iter() {
        images.push(tokio::fs::read(path).await?);
    }

    let pdf = pdftools_core::images_to_pdf(&images)?;
    let file_id = format!("images_{}.pdf", Uuid::new_v4());
    tokio::fs::write(state.temp_dir.join(&file_id), &pdf).await?;

    tracing::info!("Converted {} images into {}", inputs.len(), file_id);
    Ok(FileResponse::for_artifact(file_id))
}

/// Stream a previously produced artifact back by identifier.
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<(StatusCode, [(String, String); 2], Vec<u8>), ApiError> {
    // The identifier is untrusted: reduce it to a bare filename before the
    // join so it can never escape the temp root.
    let safe_name =
        store::sanitize_file_id(&file_id).ok_or_else(|| ApiError::NotFound(file_id.clone()))?;

    let path = state.temp_dir.join(&safe_name);
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| ApiError::NotFound(safe_name.clone()))?;

    tracing::info!("Serving artifact {}", safe_name);
    Ok((
        StatusCode::OK,
        [
            ("Content-Type".to_string(), "application/pdf".to_string()),
            (
                "Content-Disposition".to_string(),
                format!("attachment; filename=\"{}\"", safe_name),
            ),
        ],
        bytes,
    ))
}
