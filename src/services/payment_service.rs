use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::app::config::Config;
use crate::models::payment::{PaymentRequest, PaymentResponse, ValidationError};
use crate::services::mercadopago_client::MercadoPagoClient;
use crate::services::mock_pix::MockPixGenerator;
use crate::services::provider::{PixProvider, ProviderError};
use crate::utils::qr::{self, QrError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    InvalidBody(String),
    #[error("{0}")]
    Internal(String),
}

impl From<QrError> for ServiceError {
    fn from(err: QrError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

pub struct PaymentService {
    provider: Option<Arc<dyn PixProvider>>,
    mock: MockPixGenerator,
}

impl PaymentService {
    pub fn new(provider: Option<Arc<dyn PixProvider>>) -> Self {
        Self {
            provider,
            mock: MockPixGenerator,
        }
    }

    /// Wires Mercado Pago only when an access token is configured.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let provider: Option<Arc<dyn PixProvider>> = if config.has_provider_credential() {
            let client = MercadoPagoClient::new(config)?;
            info!("Mercado Pago charges go to {}", client.payments_url());
            Some(Arc::new(client))
        } else {
            None
        };
        Ok(Self::new(provider))
    }

    pub fn is_mock_only(&self) -> bool {
        self.provider.is_none()
    }

    pub async fn create_payment(&self, request: PaymentRequest) -> Result<PaymentResponse, ServiceError> {
        let charge = request.validate().map_err(|e| {
            warn!("Rejected payment request: {}", e);
            e
        })?;

        if let Some(provider) = &self.provider {
            match provider.create_pix_charge(&charge).await {
                Ok(result) => {
                    info!("PIX charge of {} created via {}", charge.amount, provider.name());
                    let image = result
                        .qr_image_base64
                        .clone()
                        .filter(|image| !image.is_empty())
                        .map(qr::ensure_data_url);
                    return Ok(PaymentResponse::from_provider(result, image));
                }
                Err(e) => {
                    // Falls through to the mock charge; the caller never sees this.
                    error!("{} error, falling back to mock: {}", provider.name(), e);
                }
            }
        }

        let mock = self.mock.generate(&charge)?;
        info!("Mock PIX charge {} created for {}", mock.transaction_id, charge.amount);
        Ok(PaymentResponse::from_mock(mock))
    }
}
