use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use derive_more::{Display, Error, From};
use serde_json::json;

/// Rule violations reported by the punch workflow. All are user-facing and
/// none is fatal: the request is rejected and the store stays untouched.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum AttendanceError {
    #[display(fmt = "You are {}m away from office. Must be within {}m", distance, radius)]
    OutOfRange { distance: u32, radius: u32 },

    #[display(fmt = "Invalid coordinates")]
    InvalidLocation,

    #[display(fmt = "Punch in allowed only after 9:00 AM")]
    TooEarly,

    #[display(fmt = "Already punched in today")]
    DuplicatePunchIn,

    #[display(fmt = "No punch in record found")]
    NoOpenPunchIn,
}

#[derive(Debug, Display, Error, From)]
pub enum StoreError {
    #[display(fmt = "data file I/O failed: {}", _0)]
    Io(std::io::Error),

    #[display(fmt = "data file is not valid JSON: {}", _0)]
    Json(serde_json::Error),

    #[display(fmt = "password hashing failed")]
    #[from(ignore)]
    Hash,

    #[display(fmt = "blocking task was cancelled")]
    #[from(ignore)]
    Blocking,
}

/// Error type returned by every handler.
#[derive(Debug, Display, From)]
pub enum AppError {
    #[display(fmt = "{}", _0)]
    Attendance(AttendanceError),

    #[display(fmt = "Internal Server Error")]
    Storage(StoreError),

    #[display(fmt = "{}", _0)]
    #[from(ignore)]
    BadRequest(String),

    #[display(fmt = "{}", _0)]
    #[from(ignore)]
    Unauthorized(String),

    #[display(fmt = "Access denied")]
    #[from(ignore)]
    Forbidden,

    #[display(fmt = "Internal Server Error")]
    #[from(ignore)]
    Internal,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Attendance(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Storage(_) | AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let AppError::Storage(e) = self {
            tracing::error!(error = %e, "Store operation failed");
        }
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}
