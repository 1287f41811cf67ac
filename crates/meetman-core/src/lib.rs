pub mod config;
pub mod error;

pub use config::MeetmanConfig;
pub use error::ConfigError;
