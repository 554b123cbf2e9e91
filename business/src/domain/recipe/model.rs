use chrono::{DateTime, Utc};

/// One upstream model identifier eligible for a generation attempt.
///
/// The discovery endpoint returns fully qualified names ("models/gemini-pro");
/// generation calls want the short form. The newtype always stores the short
/// form so the two never get mixed up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateModel(String);

impl CandidateModel {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let short = name.strip_prefix("models/").unwrap_or(&name).to_string();
        CandidateModel(short)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CandidateModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Incoming request: leftover ingredients plus preferences.
/// Immutable once received, discarded after the response is produced.
#[derive(Debug, Clone)]
pub struct RecipeRequest {
    pub ingredients: String,
    pub use_extra: bool,
    pub lang: String,
}

/// A generated recipe and the model that produced it.
#[derive(Debug, Clone)]
pub struct Recipe {
    pub text: String,
    pub model: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_strip_qualified_prefix_from_candidate_name() {
        let candidate = CandidateModel::new("models/gemini-1.5-flash");
        assert_eq!(candidate.as_str(), "gemini-1.5-flash");
    }

    #[test]
    fn should_keep_short_candidate_name_as_is() {
        let candidate = CandidateModel::new("gemini-pro");
        assert_eq!(candidate.as_str(), "gemini-pro");
    }
}
