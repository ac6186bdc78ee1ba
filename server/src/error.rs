use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use kernel::KernelError;
use serde_json::json;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let context = self.0.current_context();
        let status = match context {
            KernelError::InvalidDateRange
            | KernelError::CapacityExceeded(_)
            | KernelError::Validation(_)
            | KernelError::SignatureInvalid => StatusCode::BAD_REQUEST,
            KernelError::NotFound(_) => StatusCode::NOT_FOUND,
            KernelError::PropertyUnavailable => StatusCode::CONFLICT,
            KernelError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Upstream => StatusCode::BAD_GATEWAY,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 5xx detail stays in the logs, not the response body.
        let message = if status.is_server_error() {
            tracing::error!("{:?}", self.0);
            "Internal error, please try again".to_string()
        } else {
            context.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
