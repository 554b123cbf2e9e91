pub mod client;
pub mod model_catalog;
pub mod recipe_generator;
