use async_trait::async_trait;

use super::model::{CandidateModel, RecipeRequest};

/// A network-level fault while talking to the provider. Inside the fallback
/// loop this is an attempt failure, not a request failure.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Structured decode of a provider generation response.
///
/// Anything that is not a non-empty generated text at the expected path is a
/// failure for that candidate: an explicit provider error object, or a body
/// that decodes to no usable text at all.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationReply {
    Text(String),
    ProviderError { code: Option<u16>, message: String },
    Malformed,
}

/// Service port for listing which candidate models currently exist.
#[async_trait]
pub trait ModelCatalogService: Send + Sync {
    async fn list_generation_models(&self) -> Result<Vec<CandidateModel>, TransportError>;
}

/// Service port for one generation attempt against one candidate model.
#[async_trait]
pub trait RecipeGeneratorService: Send + Sync {
    async fn generate(
        &self,
        model: &CandidateModel,
        request: &RecipeRequest,
    ) -> Result<GenerationReply, TransportError>;
}
