use business::domain::recipe::model::CandidateModel;
use reqwest::Client;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Shared Gemini HTTP client configuration.
///
/// The API authenticates via a `key` query parameter rather than a header.
/// The 30s timeout bounds each individual generation attempt.
pub struct GeminiClient {
    pub client: Client,
    pub api_key: String,
    pub base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Returns the model-catalog endpoint URL.
    pub fn list_models_url(&self) -> String {
        format!("{}/models?key={}", self.base_url, self.api_key)
    }

    /// Returns the content-generation endpoint URL for one model.
    pub fn generate_content_url(&self, model: &CandidateModel) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_generation_url_from_short_model_name() {
        let client = GeminiClient::with_base_url("secret".to_string(), "http://api".to_string());
        let url = client.generate_content_url(&CandidateModel::new("models/gemini-pro"));
        assert_eq!(url, "http://api/models/gemini-pro:generateContent?key=secret");
    }
}
