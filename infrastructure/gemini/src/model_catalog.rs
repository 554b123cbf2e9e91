use async_trait::async_trait;
use serde::Deserialize;

use business::domain::recipe::model::CandidateModel;
use business::domain::recipe::services::{ModelCatalogService, TransportError};

use crate::client::GeminiClient;

/// Only this model family supports text generation in a shape we can use.
const GENERATION_FAMILY_PREFIX: &str = "gemini";

#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    name: String,
}

pub struct ModelCatalogGemini {
    client: GeminiClient,
}

impl ModelCatalogGemini {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    fn usable_candidates(response: ListModelsResponse) -> Vec<CandidateModel> {
        response
            .models
            .into_iter()
            .map(|entry| CandidateModel::new(entry.name))
            .filter(|candidate| candidate.as_str().starts_with(GENERATION_FAMILY_PREFIX))
            .collect()
    }
}

#[async_trait]
impl ModelCatalogService for ModelCatalogGemini {
    async fn list_generation_models(&self) -> Result<Vec<CandidateModel>, TransportError> {
        let response = self
            .client
            .client
            .get(self.client.list_models_url())
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        if !response.status().is_success() {
            return Err(TransportError(format!(
                "model catalog returned {}",
                response.status()
            )));
        }

        let body: ListModelsResponse = response
            .json()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        Ok(Self::usable_candidates(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> ListModelsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn should_filter_catalog_to_generation_family_in_order() {
        let response = decode(
            r#"{"models":[
                {"name":"models/gemini-1.5-flash"},
                {"name":"models/embedding-001"},
                {"name":"models/gemini-pro"}
            ]}"#,
        );

        let candidates = ModelCatalogGemini::usable_candidates(response);

        assert_eq!(
            candidates,
            vec![
                CandidateModel::new("gemini-1.5-flash"),
                CandidateModel::new("gemini-pro"),
            ]
        );
    }

    #[test]
    fn should_return_empty_when_catalog_has_no_generation_models() {
        let response = decode(r#"{"models":[{"name":"models/embedding-001"}]}"#);
        assert!(ModelCatalogGemini::usable_candidates(response).is_empty());
    }

    #[test]
    fn should_tolerate_missing_models_field() {
        let response = decode("{}");
        assert!(ModelCatalogGemini::usable_candidates(response).is_empty());
    }
}
