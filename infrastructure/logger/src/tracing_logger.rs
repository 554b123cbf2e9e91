use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

pub struct TracingLogger;

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "RecipeBackend -- ", "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "RecipeBackend -- ", "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "RecipeBackend -- ", "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "RecipeBackend -- ", "{}", message);
    }
}
