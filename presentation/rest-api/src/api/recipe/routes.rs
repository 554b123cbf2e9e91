use std::sync::Arc;

use poem::http::StatusCode;
use poem_openapi::{OpenApi, payload::Json};

use business::domain::recipe::use_cases::generate::{
    GenerateRecipeParams, GenerateRecipeUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::recipe::dto::{GenerateRecipeRequest, RecipeResponse};
use crate::api::tags::ApiTags;

pub struct RecipeApi {
    generate_use_case: Arc<dyn GenerateRecipeUseCase>,
}

impl RecipeApi {
    pub fn new(generate_use_case: Arc<dyn GenerateRecipeUseCase>) -> Self {
        Self { generate_use_case }
    }
}

/// Recipe API
///
/// Endpoint for generating a recipe from leftover ingredients.
#[OpenApi]
impl RecipeApi {
    /// Generate a recipe
    ///
    /// Builds a prompt from the submitted ingredients and preferences, then
    /// runs the model fallback chain until one candidate produces usable
    /// text. Only POST is routed here; other verbs get 405 from the router.
    #[oai(path = "/recipes", method = "post", tag = "ApiTags::Recipes")]
    async fn generate_recipe(
        &self,
        body: Json<GenerateRecipeRequest>,
    ) -> GenerateRecipeResponse {
        match self
            .generate_use_case
            .execute(GenerateRecipeParams {
                request: body.0.into(),
            })
            .await
        {
            Ok(recipe) => GenerateRecipeResponse::Ok(Json(recipe.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status {
                    StatusCode::BAD_REQUEST => GenerateRecipeResponse::BadRequest(json),
                    StatusCode::NOT_FOUND => GenerateRecipeResponse::NotFound(json),
                    StatusCode::UNPROCESSABLE_ENTITY => {
                        GenerateRecipeResponse::UnprocessableEntity(json)
                    }
                    StatusCode::TOO_MANY_REQUESTS => GenerateRecipeResponse::TooManyRequests(json),
                    StatusCode::SERVICE_UNAVAILABLE => {
                        GenerateRecipeResponse::ServiceUnavailable(json)
                    }
                    _ => GenerateRecipeResponse::InternalError(json),
                }
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GenerateRecipeResponse {
    #[oai(status = 200)]
    Ok(Json<RecipeResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 422)]
    UnprocessableEntity(Json<ErrorResponse>),
    #[oai(status = 429)]
    TooManyRequests(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 503)]
    ServiceUnavailable(Json<ErrorResponse>),
}
