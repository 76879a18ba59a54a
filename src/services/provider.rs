use async_trait::async_trait;
use thiserror::Error;

use crate::models::payment::{PixCharge, ProviderChargeResult};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("provider request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider response is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid provider URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A payment provider able to create PIX charges.
#[async_trait]
pub trait PixProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_pix_charge(&self, charge: &PixCharge) -> Result<ProviderChargeResult, ProviderError>;
}
