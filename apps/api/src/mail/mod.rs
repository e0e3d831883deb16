/// Mail: notification emails sent through the Resend HTTP API.
///
/// `send_notification` is the only entry point handlers use. It validates the
/// request and never fails: every problem becomes a `success: false` response.
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info};

pub mod handlers;

const RESEND_API_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("RESEND_API_KEY environment variable is required")]
    MissingApiKey,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub recipient: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct EmailResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl EmailResponse {
    fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: String,
}

#[derive(Debug, Deserialize)]
struct ResendResponse {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResendError {
    message: String,
}

/// Thin client over the Resend "send email" endpoint.
#[derive(Clone)]
pub struct MailClient {
    client: Client,
    api_key: String,
    from: String,
    base_url: String,
}

impl MailClient {
    pub fn new(api_key: String, from: String) -> Result<Self, MailError> {
        Self::with_base_url(api_key, from, RESEND_API_URL)
    }

    /// Same as `new`, posting to `base_url` instead of the Resend endpoint.
    pub(crate) fn with_base_url(
        api_key: String,
        from: String,
        base_url: impl Into<String>,
    ) -> Result<Self, MailError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()?,
            api_key,
            from,
            base_url: base_url.into(),
        })
    }

    /// Sends one email and returns the provider's message id.
    pub async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
    ) -> Result<Option<String>, MailError> {
        let request = ResendRequest {
            from: &self.from,
            to: recipient,
            subject,
            html: render_html(body),
        };

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ResendError>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: ResendResponse = response.json().await?;
        Ok(sent.id)
    }
}

/// Validates and sends a notification email. `mailer` is `None` when no API key is configured.
pub async fn send_notification(mailer: Option<&MailClient>, request: &EmailRequest) -> EmailResponse {
    if let Err(message) = validate_request(request) {
        return EmailResponse::failure(message);
    }

    let Some(mailer) = mailer else {
        error!("Email sending error: {}", MailError::MissingApiKey);
        return EmailResponse::failure(MailError::MissingApiKey.to_string());
    };

    match mailer
        .send(&request.recipient, &request.subject, &request.body)
        .await
    {
        Ok(id) => {
            info!("Email sent to {} (id: {:?})", request.recipient, id);
            EmailResponse {
                success: true,
                message: Some("Email sent successfully".to_string()),
                id,
                ..Default::default()
            }
        }
        Err(e) => {
            error!("Email sending error: {e}");
            EmailResponse::failure(e.to_string())
        }
    }
}

/// Collects every validation failure, joined with ", ".
pub fn validate_request(request: &EmailRequest) -> Result<(), String> {
    let mut errors = Vec::new();
    if !is_valid_email(&request.recipient) {
        errors.push("Invalid email format");
    }
    if request.subject.is_empty() {
        errors.push("Subject is required");
    }
    if request.body.is_empty() {
        errors.push("Body is required");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join(", "))
    }
}

/// `local@domain.tld` with no whitespace and exactly one `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Needs a dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn render_html(body: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; line-height: 1.6;">{}</div>"#,
        body.replace('\n', "<br>")
    )
}
