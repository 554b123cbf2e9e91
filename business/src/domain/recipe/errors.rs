/// Recipe generation errors.
/// Validation variants use code-style identifier messages for i18n
/// compatibility; exhaustion carries the upstream reason verbatim.
#[derive(Debug, thiserror::Error)]
pub enum RecipeError {
    #[error("recipe.missing_ingredients")]
    MissingIngredients,
    /// Every bounded attempt failed; carries the reason from the last
    /// attempted candidate and, when the provider supplied one, its code.
    #[error("recipe.all_attempts_failed: {reason}")]
    AllAttemptsFailed { code: Option<u16>, reason: String },
}
