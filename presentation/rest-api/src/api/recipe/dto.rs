use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use business::domain::recipe::model::{Recipe, RecipeRequest};

/// Request body from the ingredient form.
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct GenerateRecipeRequest {
    /// Leftover ingredients, free text
    pub ingredients: String,
    /// Whether pantry seasonings may be assumed
    #[oai(rename = "useExtra")]
    pub use_extra: bool,
    /// Target language tag for the generated recipe
    pub lang: String,
}

impl From<GenerateRecipeRequest> for RecipeRequest {
    fn from(r: GenerateRecipeRequest) -> Self {
        Self {
            ingredients: r.ingredients,
            use_extra: r.use_extra,
            lang: r.lang,
        }
    }
}

#[derive(Debug, Clone, Object)]
pub struct RecipeResponse {
    /// Generated recipe text, sanitized
    pub recipe: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            recipe: recipe.text,
        }
    }
}
