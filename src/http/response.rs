//! Response mapping.
//!
//! Every pipeline failure becomes a 500 whose plain-text body is the error
//! message. The failure kind is only visible in the text, never in the status.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::dispatch::DispatchError;

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
