// src/error.rs

use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Validation failed")]
    ValidationFailure(#[from] ValidationErrors),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Ticket API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// バリデーション系（ネットワークに出る前に弾くエラー）かどうか
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::ValidationFailure(_))
    }
}

// Result 型のエイリアス
pub type AppResult<T> = Result<T, AppError>;
