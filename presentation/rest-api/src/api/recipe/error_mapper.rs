use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::recipe::errors::RecipeError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for RecipeError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, message) = match self {
            RecipeError::MissingIngredients => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "recipe.missing_ingredients".to_string(),
            ),
            // The upstream code of the last attempt drives the status when
            // one was reported; otherwise this is a plain server failure.
            RecipeError::AllAttemptsFailed { code, reason } => (
                code.and_then(|code| StatusCode::from_u16(code).ok())
                    .filter(|status| status.is_client_error() || status.is_server_error())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                reason,
            ),
        };

        (status, Json(ErrorResponse { error: message }))
    }
}
