use axum::Json;
use serde_json::{json, Value};

use hubdash_core::domain::ClientErrorReport;

/// `POST /api/client-error` - record a browser-side fault.
pub async fn report_client_error(Json(report): Json<ClientErrorReport>) -> Json<Value> {
    tracing::error!(
        error_message = %report.message,
        source = report.source.as_deref().unwrap_or("unknown"),
        location = %report.location(),
        stack = report.stack.as_deref().unwrap_or(""),
        user_agent = report.user_agent.as_deref().unwrap_or(""),
        page = report.page.as_deref().unwrap_or(""),
        kind = report.kind.map(|k| k.as_str()).unwrap_or("unknown"),
        "Client error reported"
    );
    Json(json!({ "success": true }))
}
