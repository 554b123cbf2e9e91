use anyhow::Context;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for Google Generative Language API access.
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
}

impl GeminiConfig {
    /// Load from environment variables.
    ///
    /// - GEMINI_API_KEY: required; without it the server refuses to start
    /// - GEMINI_BASE_URL: optional override of the provider endpoint
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("GEMINI_BASE_URL").ok(),
        )
    }

    fn from_vars(api_key: Option<String>, base_url: Option<String>) -> anyhow::Result<Self> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .context("GEMINI_API_KEY environment variable must be set")?;

        Ok(Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fail_without_api_key() {
        assert!(GeminiConfig::from_vars(None, None).is_err());
        assert!(GeminiConfig::from_vars(Some("  ".to_string()), None).is_err());
    }

    #[test]
    fn should_default_base_url() {
        let config = GeminiConfig::from_vars(Some("secret".to_string()), None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn should_accept_base_url_override() {
        let config = GeminiConfig::from_vars(
            Some("secret".to_string()),
            Some("http://localhost:9090".to_string()),
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:9090");
    }
}
