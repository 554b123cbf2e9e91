use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Wire format for every failure: a single human-readable error string.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub error: String,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
