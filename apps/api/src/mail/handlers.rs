use axum::{extract::State, http::StatusCode, Json};

use crate::mail::{send_notification, EmailRequest, EmailResponse};
use crate::state::AppState;

/// POST /api/v1/email
///
/// 200 when the provider accepted the email, 400 for validation or provider failures.
pub async fn handle_send_email(
    State(state): State<AppState>,
    Json(req): Json<EmailRequest>,
) -> (StatusCode, Json<EmailResponse>) {
    let response = send_notification(state.mailer.as_ref(), &req).await;
    let status = if response.success {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response))
}
