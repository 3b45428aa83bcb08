pub mod config;
pub mod container;
pub mod database;
pub mod http;
pub mod logging;
pub mod pdf;
pub mod step_runner;

// Re-export commonly used items
pub use config::IngestConfig;
pub use container::AppContainer;
pub use logging::init_logging;
