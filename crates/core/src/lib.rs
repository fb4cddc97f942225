pub mod config;
pub mod error;
pub mod seed;
pub mod types;

pub use config::AppConfig;
pub use error::{DreamTrafficError, DtResult};
