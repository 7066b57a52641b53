pub mod api;
pub mod azure;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use azure::FormRecognizerClient;
pub use config::AppConfig;
pub use error::{ErrorCode, ExtractError};
pub use service::ExtractorService;
