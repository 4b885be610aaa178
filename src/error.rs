//! Error types for chatsweep.
//!
//! The pipeline itself is infallible — malformed chat lines degrade to a
//! no-op rather than an error, since the message stream must never stall.
//! Errors exist only at the edges (configuration loading).

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
