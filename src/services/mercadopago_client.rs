use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::{debug, info};
use url::Url;

use crate::app::config::Config;
use crate::models::mercadopago::{CreatePaymentBody, PaymentCreated};
use crate::models::payment::{PixCharge, ProviderChargeResult};
use crate::services::provider::{PixProvider, ProviderError};

const PAYMENTS_PATH: &str = "v1/payments";

pub struct MercadoPagoClient {
    client: Client,
    payments_url: Url,
    access_token: String,
}

impl MercadoPagoClient {
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        // No timeout override: the transport default applies.
        let client = Client::builder().build()?;
        let payments_url = Url::parse(&config.mp_api_url)?.join(PAYMENTS_PATH)?;

        Ok(Self {
            client,
            payments_url,
            access_token: config.access_token.clone(),
        })
    }

    pub fn payments_url(&self) -> &Url {
        &self.payments_url
    }
}

#[async_trait]
impl PixProvider for MercadoPagoClient {
    fn name(&self) -> &'static str {
        "mercadopago"
    }

    async fn create_pix_charge(&self, charge: &PixCharge) -> Result<ProviderChargeResult, ProviderError> {
        debug!("Creating PIX charge of {} at {}", charge.amount, self.payments_url);

        let response = self
            .client
            .post(self.payments_url.clone())
            .header(header::AUTHORIZATION, format!("Bearer {}", self.access_token))
            .json(&CreatePaymentBody::from(charge))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        let raw: serde_json::Value = serde_json::from_slice(&body)?;
        let data = serde_json::from_value::<PaymentCreated>(raw.clone())?.into_transaction_data();

        info!(
            "Mercado Pago created PIX charge (qr_code: {}, qr_code_base64: {})",
            data.qr_code.is_some(),
            data.qr_code_base64.is_some()
        );

        Ok(ProviderChargeResult {
            qr_text: data.qr_code,
            qr_image_base64: data.qr_code_base64,
            raw,
        })
    }
}
