mod config;
mod environment;
mod error;

pub use config::AppConfig;
pub use environment::Environment;
pub use error::{AppError, ErrorResponse};
