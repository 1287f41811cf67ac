use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file or an env override could not be parsed.
    #[error("configuration error: {0}")]
    Load(String),

    /// The configured timezone is not a known IANA name.
    #[error("unknown timezone: {0}")]
    Timezone(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
