use std::sync::Arc;

use logger::TracingLogger;

use gemini::client::GeminiClient;
use gemini::model_catalog::ModelCatalogGemini;
use gemini::recipe_generator::RecipeGeneratorGemini;

use business::application::recipe::generate::GenerateRecipeUseCaseImpl;

use crate::config::gemini_config::GeminiConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub recipe_api: crate::api::recipe::routes::RecipeApi,
}

impl DependencyContainer {
    pub fn new(gemini_config: GeminiConfig) -> Self {
        let logger = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let catalog_client = GeminiClient::with_base_url(
            gemini_config.api_key.clone(),
            gemini_config.base_url.clone(),
        );
        let generator_client =
            GeminiClient::with_base_url(gemini_config.api_key, gemini_config.base_url);

        let catalog = Arc::new(ModelCatalogGemini::new(catalog_client));
        let generator = Arc::new(RecipeGeneratorGemini::new(generator_client));

        // Recipe use case
        let generate_use_case = Arc::new(GenerateRecipeUseCaseImpl {
            catalog,
            generator,
            logger,
        });

        let recipe_api = crate::api::recipe::routes::RecipeApi::new(generate_use_case);

        Self {
            health_api,
            recipe_api,
        }
    }
}
