use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use business::domain::recipe::model::{CandidateModel, RecipeRequest};
use business::domain::recipe::services::{GenerationReply, RecipeGeneratorService, TransportError};

use crate::client::GeminiClient;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    error: Option<ProviderErrorBody>,
    candidates: Option<Vec<ResponseCandidate>>,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    code: Option<u16>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

pub struct RecipeGeneratorGemini {
    client: GeminiClient,
}

impl RecipeGeneratorGemini {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    fn build_prompt(request: &RecipeRequest) -> String {
        let extras = if request.use_extra { "예" } else { "아니오" };
        format!(
            "재료: {}, 양념포함: {}, 언어: {}로 맛있는 요리 레시피 1개를 추천해줘.",
            request.ingredients, extras, request.lang
        )
    }

    /// Decodes a generation response body into its structured form. An
    /// undecodable body, a missing candidates array, or an empty text field
    /// all land on `Malformed`; the caller treats them as attempt failures.
    fn decode_reply(body: &str) -> GenerationReply {
        let Ok(parsed) = serde_json::from_str::<GenerateContentResponse>(body) else {
            return GenerationReply::Malformed;
        };

        if let Some(error) = parsed.error {
            return GenerationReply::ProviderError {
                code: error.code,
                message: error
                    .message
                    .unwrap_or_else(|| "provider error without message".to_string()),
            };
        }

        let text = parsed
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts)
            .and_then(|parts| parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.trim().is_empty());

        match text {
            Some(text) => GenerationReply::Text(text),
            None => GenerationReply::Malformed,
        }
    }
}

#[async_trait]
impl RecipeGeneratorService for RecipeGeneratorGemini {
    async fn generate(
        &self,
        model: &CandidateModel,
        request: &RecipeRequest,
    ) -> Result<GenerationReply, TransportError> {
        let body = json!({
            "contents": [{ "parts": [{ "text": Self::build_prompt(request) }] }]
        });

        let response = self
            .client
            .client
            .post(self.client.generate_content_url(model))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        // Provider errors arrive as JSON bodies on non-2xx statuses too,
        // so decode the body either way instead of gating on the status.
        let text = response
            .text()
            .await
            .map_err(|err| TransportError(err.to_string()))?;

        Ok(Self::decode_reply(&text))
    }
}
