//! File upload endpoints.
//!
//! Uploaded material (lesson videos, homework attachments, submission
//! archives) lands in the configured storage backend under a
//! date-partitioned key owned by the uploading user.

use axum::{
    Router,
    extract::{Multipart, State},
    routing::post,
};
use edura_common::{
    AppResult, generate_storage_key,
    validation::{
        HOMEWORK_FILE_EXTENSIONS, SUBMISSION_FILE_EXTENSIONS, VIDEO_EXTENSIONS, validate_extension,
    },
};
use serde::Serialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(upload_file))
}

/// Uploaded file response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResponse {
    pub key: String,
    pub url: String,
    pub size: u64,
    pub content_type: String,
}

/// Map an upload kind to its extension allow-list.
fn allowed_extensions(kind: &str) -> AppResult<&'static [&'static str]> {
    match kind {
        "video" => Ok(VIDEO_EXTENSIONS),
        "homework" => Ok(HOMEWORK_FILE_EXTENSIONS),
        "submission" => Ok(SUBMISSION_FILE_EXTENSIONS),
        other => Err(edura_common::AppError::BadRequest(format!(
            "Unknown upload kind: {other}"
        ))),
    }
}

/// Upload a file via multipart form.
///
/// Expects a `kind` field (`video`, `homework` or `submission`) selecting
/// the extension allow-list, and a `file` field with the payload.
async fn upload_file(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<ApiResponse<FileResponse>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut kind: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| edura_common::AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                file_name = field.file_name().map(std::string::ToString::to_string);
                content_type = field.content_type().map(std::string::ToString::to_string);
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| edura_common::AppError::BadRequest(e.to_string()))?
                        .to_vec(),
                );
            }
            "kind" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| edura_common::AppError::BadRequest(e.to_string()))?;
                if !text.is_empty() {
                    kind = Some(text);
                }
            }
            _ => {}
        }
    }

    let data = file_data
        .ok_or_else(|| edura_common::AppError::BadRequest("Missing file field".to_string()))?;
    let file_name = file_name
        .ok_or_else(|| edura_common::AppError::BadRequest("Missing file name".to_string()))?;
    let kind = kind
        .ok_or_else(|| edura_common::AppError::BadRequest("Missing kind field".to_string()))?;

    validate_extension(&file_name, allowed_extensions(&kind)?)?;

    let key = generate_storage_key(&user.id, &file_name);
    let content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    let uploaded = state.storage.upload(&key, &data, &content_type).await?;

    Ok(ApiResponse::ok(FileResponse {
        key: uploaded.key,
        url: uploaded.url,
        size: uploaded.size,
        content_type: uploaded.content_type,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions_by_kind() {
        assert_eq!(allowed_extensions("video").unwrap(), VIDEO_EXTENSIONS);
        assert_eq!(
            allowed_extensions("submission").unwrap(),
            SUBMISSION_FILE_EXTENSIONS
        );
        assert!(allowed_extensions("avatar").is_err());
    }
}
