use axum::Json;
use serde_json::{json, Value};

/// GET /api/v1/tools
/// Describes the two callable tools and their JSON input schemas.
pub async fn tools_handler() -> Json<Value> {
    Json(json!({ "tools": [ask_about_cv_tool(), send_email_tool()] }))
}

pub fn ask_about_cv_tool() -> Value {
    json!({
        "name": "ask_about_cv",
        "description": "Answer questions about the CV/resume",
        "inputSchema": {
            "type": "object",
            "properties": {
                "question": { "type": "string", "description": "Question about the CV" }
            },
            "required": ["question"]
        }
    })
}

pub fn send_email_tool() -> Value {
    json!({
        "name": "send_email",
        "description": "Send email notifications",
        "inputSchema": {
            "type": "object",
            "properties": {
                "recipient": {
                    "type": "string",
                    "format": "email",
                    "description": "Email address of the recipient"
                },
                "subject": { "type": "string", "description": "Email subject line" },
                "body": { "type": "string", "description": "Email body content" }
            },
            "required": ["recipient", "subject", "body"]
        }
    })
}
