use std::sync::Arc;

use crate::cv::service::CvService;
use crate::mail::MailClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the one structured CV for the process lifetime.
    pub cv: Arc<CvService>,
    /// `None` when `RESEND_API_KEY` is not configured.
    pub mailer: Option<MailClient>,
}
