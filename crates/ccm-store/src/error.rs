//! Storage error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Cookie jar error: {0}")]
    Jar(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
