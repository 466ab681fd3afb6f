use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::Profile;
use crate::resume::{parse_resume, sanitize_for_display, RawDocument, SanitizedText};
use crate::state::AppState;

pub const UPLOAD_FIELD: &str = "resume";
const DEFAULT_FILENAME: &str = "resume";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResumeResponse {
    pub success: bool,
    pub upload_id: Uuid,
    pub parsed_at: DateTime<Utc>,
    #[serde(flatten)]
    pub profile: Profile,
}

#[derive(Debug, Deserialize)]
pub struct DisplayTextRequest {
    pub text: String,
}

/// POST /api/v1/resumes/parse
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, AppError> {
    let limit = state.config.max_upload_bytes;
    let doc = read_upload(multipart, limit).await?;
    let upload_id = Uuid::new_v4();

    info!(
        %upload_id,
        filename = %doc.filename,
        content_type = %doc.content_type,
        bytes = doc.bytes.len(),
        "Resume upload received"
    );

    // CPU-bound parsing, kept off the async executor.
    let extraction = state.config.extraction;
    let profile = tokio::task::spawn_blocking(move || parse_resume(&doc, &extraction))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in resume parse: {e}")))?;

    Ok(Json(ParseResumeResponse {
        success: true,
        upload_id,
        parsed_at: Utc::now(),
        profile,
    }))
}

/// POST /api/v1/resumes/display-text
pub async fn handle_display_text(
    State(state): State<AppState>,
    Json(req): Json<DisplayTextRequest>,
) -> Json<SanitizedText> {
    Json(sanitize_for_display(&req.text, state.config.display_max_chars))
}

async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<RawDocument, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, limit))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or(DEFAULT_FILENAME).to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes: Bytes = field.bytes().await.map_err(|e| multipart_error(e, limit))?;

        if bytes.len() > limit {
            return Err(AppError::PayloadTooLarge { limit });
        }
        return Ok(RawDocument::new(bytes, content_type, filename));
    }

    Err(AppError::Validation(format!(
        "multipart field '{UPLOAD_FIELD}' is required"
    )))
}

fn multipart_error(e: MultipartError, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::UploadRead(e.body_text())
    }
}
