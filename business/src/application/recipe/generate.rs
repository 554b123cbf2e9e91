use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::logger::Logger;
use crate::domain::recipe::errors::RecipeError;
use crate::domain::recipe::model::{CandidateModel, Recipe, RecipeRequest};
use crate::domain::recipe::sanitize::sanitize;
use crate::domain::recipe::services::{
    GenerationReply, ModelCatalogService, RecipeGeneratorService,
};
use crate::domain::recipe::use_cases::generate::{GenerateRecipeParams, GenerateRecipeUseCase};

/// Upper bound on generation attempts per request. Candidates beyond this
/// are never tried, bounding latency and upstream cost.
pub const MAX_ATTEMPTS: usize = 3;

/// Known-good identifiers used when discovery fails or filters down to nothing.
const DEFAULT_CANDIDATES: &[&str] = &["gemini-1.5-flash"];

/// Failure of a single generation attempt. The fallback chain keeps only the
/// most recent one; earlier failures are superseded, not accumulated.
#[derive(Debug, Clone)]
struct AttemptFailure {
    code: Option<u16>,
    reason: String,
}

/// Result of running the whole fallback chain.
#[derive(Debug)]
enum AggregatedOutcome {
    Success { model: CandidateModel, text: String },
    Exhausted { last: Option<AttemptFailure> },
}

pub struct GenerateRecipeUseCaseImpl {
    pub catalog: Arc<dyn ModelCatalogService>,
    pub generator: Arc<dyn RecipeGeneratorService>,
    pub logger: Arc<dyn Logger>,
}

impl GenerateRecipeUseCaseImpl {
    /// Resolves the candidate list for this request. Discovery failure is
    /// not a request failure: it only narrows the set to the static default.
    async fn resolve_candidates(&self) -> Vec<CandidateModel> {
        match self.catalog.list_generation_models().await {
            Ok(models) if !models.is_empty() => models,
            Ok(_) => {
                self.logger
                    .warn("Model discovery returned no usable candidates, using default list");
                Self::default_candidates()
            }
            Err(err) => {
                self.logger.warn(&format!(
                    "Model discovery failed ({}), using default list",
                    err
                ));
                Self::default_candidates()
            }
        }
    }

    fn default_candidates() -> Vec<CandidateModel> {
        DEFAULT_CANDIDATES
            .iter()
            .map(|name| CandidateModel::new(*name))
            .collect()
    }

    /// Tries candidates in order, at most `MAX_ATTEMPTS` of them, one awaited
    /// call at a time. First structurally valid reply wins and stops the
    /// chain; every failure mode inside the loop (transport fault, provider
    /// error object, malformed body, empty text) just moves on to the next
    /// candidate.
    async fn run_fallback_chain(
        &self,
        candidates: &[CandidateModel],
        request: &RecipeRequest,
    ) -> AggregatedOutcome {
        let mut last: Option<AttemptFailure> = None;

        for model in candidates.iter().take(MAX_ATTEMPTS) {
            self.logger
                .info(&format!("Attempting generation with model {}", model));

            let failure = match self.generator.generate(model, request).await {
                Ok(GenerationReply::Text(text)) if !text.trim().is_empty() => {
                    return AggregatedOutcome::Success {
                        model: model.clone(),
                        text,
                    };
                }
                Ok(GenerationReply::Text(_)) => AttemptFailure {
                    code: None,
                    reason: "empty generated text".to_string(),
                },
                Ok(GenerationReply::ProviderError { code, message }) => AttemptFailure {
                    code,
                    reason: message,
                },
                Ok(GenerationReply::Malformed) => AttemptFailure {
                    code: None,
                    reason: "malformed provider response".to_string(),
                },
                Err(err) => AttemptFailure {
                    code: None,
                    reason: err.to_string(),
                },
            };

            self.logger.warn(&format!(
                "Model {} failed: {}, trying next candidate",
                model, failure.reason
            ));
            last = Some(failure);
        }

        AggregatedOutcome::Exhausted { last }
    }
}

#[async_trait]
impl GenerateRecipeUseCase for GenerateRecipeUseCaseImpl {
    async fn execute(&self, params: GenerateRecipeParams) -> Result<Recipe, RecipeError> {
        let request = params.request;

        if request.ingredients.trim().is_empty() {
            return Err(RecipeError::MissingIngredients);
        }

        self.logger.info(&format!(
            "Generating recipe for lang={} use_extra={}",
            request.lang, request.use_extra
        ));

        let candidates = self.resolve_candidates().await;

        match self.run_fallback_chain(&candidates, &request).await {
            AggregatedOutcome::Success { model, text } => {
                self.logger
                    .info(&format!("Recipe generated by model {}", model));
                Ok(Recipe {
                    text: sanitize(&text),
                    model: model.as_str().to_string(),
                    created_at: Utc::now(),
                })
            }
            AggregatedOutcome::Exhausted { last } => {
                // A failure without a message (bare transport fault) is as
                // good as no failure record at all.
                let (code, reason) = match last {
                    Some(f) if !f.reason.trim().is_empty() => (f.code, f.reason),
                    _ => (None, "unknown error".to_string()),
                };
                self.logger.error(&format!(
                    "All generation attempts failed, last reason: {}",
                    reason
                ));
                Err(RecipeError::AllAttemptsFailed { code, reason })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recipe::services::TransportError;
    use mockall::mock;

    mock! {
        pub Catalog {}

        #[async_trait]
        impl ModelCatalogService for Catalog {
            async fn list_generation_models(&self) -> Result<Vec<CandidateModel>, TransportError>;
        }
    }

    mock! {
        pub Generator {}

        #[async_trait]
        impl RecipeGeneratorService for Generator {
            async fn generate(
                &self,
                model: &CandidateModel,
                request: &RecipeRequest,
            ) -> Result<GenerationReply, TransportError>;
        }
    }

    mock! {
        pub Log {}

        impl Logger for Log {
            fn info(&self, message: &str);
            fn warn(&self, message: &str);
            fn error(&self, message: &str);
            fn debug(&self, message: &str);
        }
    }

    fn mock_logger() -> Arc<dyn Logger> {
        let mut logger = MockLog::new();
        logger.expect_info().returning(|_| ());
        logger.expect_warn().returning(|_| ());
        logger.expect_error().returning(|_| ());
        logger.expect_debug().returning(|_| ());
        Arc::new(logger)
    }

    fn sample_request() -> RecipeRequest {
        RecipeRequest {
            ingredients: "계란, 라면, 대파".to_string(),
            use_extra: true,
            lang: "ko".to_string(),
        }
    }

    fn use_case(
        catalog: MockCatalog,
        generator: MockGenerator,
    ) -> GenerateRecipeUseCaseImpl {
        GenerateRecipeUseCaseImpl {
            catalog: Arc::new(catalog),
            generator: Arc::new(generator),
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_return_recipe_from_first_candidate_and_stop() {
        let mut catalog = MockCatalog::new();
        catalog.expect_list_generation_models().returning(|| {
            Ok(vec![
                CandidateModel::new("models/gemini-1.5-flash"),
                CandidateModel::new("models/gemini-pro"),
            ])
        });

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .withf(|model, _| model.as_str() == "gemini-1.5-flash")
            .returning(|_, _| Ok(GenerationReply::Text("계란 라면 레시피".to_string())));

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        let recipe = result.unwrap();
        assert_eq!(recipe.text, "계란 라면 레시피");
        assert_eq!(recipe.model, "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn should_fall_back_to_next_candidate_after_transport_error() {
        let mut catalog = MockCatalog::new();
        catalog.expect_list_generation_models().returning(|| {
            Ok(vec![
                CandidateModel::new("models/gemini-1.5-flash"),
                CandidateModel::new("models/gemini-pro"),
            ])
        });

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(2)
            .returning(|model, _| match model.as_str() {
                "gemini-1.5-flash" => Err(TransportError("connection reset".to_string())),
                _ => Ok(GenerationReply::Text("오늘의 추천...".to_string())),
            });

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        let recipe = result.unwrap();
        assert_eq!(recipe.text, "오늘의 추천...");
        assert_eq!(recipe.model, "gemini-pro");
    }

    #[tokio::test]
    async fn should_use_default_list_when_discovery_returns_empty() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_generation_models()
            .returning(|| Ok(vec![]));

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .withf(|model, _| model.as_str() == "gemini-1.5-flash")
            .returning(|_, _| {
                Ok(GenerationReply::ProviderError {
                    code: Some(429),
                    message: "quota exceeded".to_string(),
                })
            });

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
        match err {
            RecipeError::AllAttemptsFailed { code, .. } => assert_eq!(code, Some(429)),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn should_use_default_list_when_discovery_fails() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_generation_models()
            .returning(|| Err(TransportError("discovery unreachable".to_string())));

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .withf(|model, _| model.as_str() == "gemini-1.5-flash")
            .returning(|_, _| Ok(GenerationReply::Text("볶음밥".to_string())));

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_truncate_candidates_to_max_attempts() {
        let mut catalog = MockCatalog::new();
        catalog.expect_list_generation_models().returning(|| {
            Ok((1..=5)
                .map(|i| CandidateModel::new(format!("models/gemini-v{}", i)))
                .collect())
        });

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(MAX_ATTEMPTS)
            .returning(|_, _| Ok(GenerationReply::Malformed));

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn should_surface_last_failure_reason_when_all_attempts_fail() {
        let mut catalog = MockCatalog::new();
        catalog.expect_list_generation_models().returning(|| {
            Ok(vec![
                CandidateModel::new("gemini-a"),
                CandidateModel::new("gemini-b"),
                CandidateModel::new("gemini-c"),
            ])
        });

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(3)
            .returning(|model, _| match model.as_str() {
                "gemini-a" => Err(TransportError("first error".to_string())),
                "gemini-b" => Ok(GenerationReply::ProviderError {
                    code: Some(500),
                    message: "second error".to_string(),
                }),
                _ => Err(TransportError("third error".to_string())),
            });

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        match result.unwrap_err() {
            RecipeError::AllAttemptsFailed { code, reason } => {
                assert_eq!(reason, "third error");
                assert_eq!(code, None);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn should_treat_empty_generated_text_as_attempt_failure() {
        let mut catalog = MockCatalog::new();
        catalog.expect_list_generation_models().returning(|| {
            Ok(vec![
                CandidateModel::new("gemini-a"),
                CandidateModel::new("gemini-b"),
            ])
        });

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .times(2)
            .returning(|model, _| match model.as_str() {
                "gemini-a" => Ok(GenerationReply::Text("   ".to_string())),
                _ => Ok(GenerationReply::Text("김치찌개".to_string())),
            });

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        assert_eq!(result.unwrap().text, "김치찌개");
    }

    #[tokio::test]
    async fn should_sanitize_generated_text() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_generation_models()
            .returning(|| Ok(vec![CandidateModel::new("gemini-a")]));

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Ok(GenerationReply::Text("**계란볶음밥**\n---\n볶는다".to_string())));

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        assert_eq!(result.unwrap().text, "계란볶음밥\n\n볶는다");
    }

    #[tokio::test]
    async fn should_reject_blank_ingredients_without_any_call() {
        // No expectations set: any catalog or generator call would panic.
        let catalog = MockCatalog::new();
        let generator = MockGenerator::new();

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: RecipeRequest {
                    ingredients: "   ".to_string(),
                    use_extra: false,
                    lang: "ko".to_string(),
                },
            })
            .await;

        assert!(matches!(
            result.unwrap_err(),
            RecipeError::MissingIngredients
        ));
    }

    #[tokio::test]
    async fn should_report_unknown_error_when_no_failure_reason_recorded() {
        let mut catalog = MockCatalog::new();
        catalog
            .expect_list_generation_models()
            .returning(|| Ok(vec![CandidateModel::new("gemini-a")]));

        let mut generator = MockGenerator::new();
        generator
            .expect_generate()
            .returning(|_, _| Err(TransportError(String::new())));

        let result = use_case(catalog, generator)
            .execute(GenerateRecipeParams {
                request: sample_request(),
            })
            .await;

        match result.unwrap_err() {
            RecipeError::AllAttemptsFailed { reason, .. } => assert_eq!(reason, "unknown error"),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
