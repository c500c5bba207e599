//! Data access layer

pub mod memory;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to render entity for querying: {0}")]
    Render(#[from] serde_json::Error),
}
