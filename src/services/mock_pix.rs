use uuid::Uuid;

use crate::models::payment::{MockChargeResult, PixCharge};
use crate::utils::qr::{self, QrError};

pub const MOCK_MERCHANT: &str = "pix-shop-demo";
pub const MOCK_PIX_KEY: &str = "00000000-0000-0000-0000-000000000000";
pub const MOCK_DESCRIPTION: &str = "Compra";

/// Builds offline PIX-like charges. The payload is human readable and is
/// not a valid BR Code; it must never be used for a real charge.
#[derive(Debug, Clone, Copy)]
pub struct MockPixGenerator;

impl MockPixGenerator {
    pub fn generate(&self, charge: &PixCharge) -> Result<MockChargeResult, QrError> {
        let transaction_id = Uuid::new_v4();
        let payload = mock_payload(transaction_id, charge.amount, charge.description_or(MOCK_DESCRIPTION));
        let qr_image_data_url = qr::png_data_url(&payload)?;

        Ok(MockChargeResult {
            payload,
            qr_image_data_url,
            transaction_id,
        })
    }
}

pub fn mock_payload(transaction_id: Uuid, amount: f64, description: &str) -> String {
    format!(
        "PIX|merchant:{}|txid:{}|amount:{}|desc:{}|key:{}",
        MOCK_MERCHANT, transaction_id, amount, description, MOCK_PIX_KEY
    )
}
