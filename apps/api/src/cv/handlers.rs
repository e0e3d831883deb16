//! Axum route handlers for the CV API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::cv::service::ExtractOutcome;
use crate::cv::taxonomy::Section;
use crate::errors::AppError;
use crate::models::document::StructuredDocument;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Serialize)]
pub struct AskApiResponse {
    pub success: bool,
    pub answer: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Serialize)]
pub struct SectionCount {
    pub section: Section,
    pub lines: usize,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    /// `None` when lazy initialization ran but could not produce a document.
    pub outcome: Option<ExtractOutcome>,
    pub ready: bool,
    pub sections: Vec<SectionCount>,
}

/// POST /api/v1/cv/ask
pub async fn handle_ask(
    State(state): State<AppState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskApiResponse>, AppError> {
    if req.question.is_empty() {
        return Err(AppError::Validation("Question is required".to_string()));
    }

    let response = state.cv.ask(&req.question).await;
    Ok(Json(AskApiResponse {
        success: true,
        answer: response.text,
    }))
}

/// POST /api/v1/cv/extract
///
/// `force: true` re-reads the source and overwrites the cache; otherwise this
/// only triggers lazy initialization.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(req): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    let outcome = if req.force {
        Some(state.cv.reextract().await?)
    } else {
        state.cv.ensure_initialized().await
    };

    let doc = state.cv.document().await;
    let sections = doc
        .as_deref()
        .map(|doc| {
            doc.sections
                .iter()
                .map(|(section, lines)| SectionCount {
                    section,
                    lines: lines.len(),
                })
                .collect()
        })
        .unwrap_or_default();

    Ok(Json(ExtractResponse {
        outcome,
        ready: doc.is_some(),
        sections,
    }))
}

/// GET /api/v1/cv
pub async fn handle_get_document(
    State(state): State<AppState>,
) -> Result<Json<StructuredDocument>, AppError> {
    state.cv.ensure_initialized().await;
    let doc = state
        .cv
        .document()
        .await
        .ok_or_else(|| AppError::NotFound("CV data is not loaded".to_string()))?;
    Ok(Json(StructuredDocument::clone(&doc)))
}
