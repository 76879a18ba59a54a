// Wire types for the Mercado Pago payments API
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::payment::PixCharge;

pub const PIX_PAYMENT_METHOD_ID: &str = "pix";
pub const FALLBACK_DESCRIPTION: &str = "Compra via PIX";

#[derive(Debug, Serialize)]
pub struct CreatePaymentBody<'a> {
    pub transaction_amount: f64,
    pub description: &'a str,
    pub payment_method_id: &'static str,
    pub payer: &'a Value,
}

impl<'a> From<&'a PixCharge> for CreatePaymentBody<'a> {
    fn from(charge: &'a PixCharge) -> Self {
        Self {
            transaction_amount: charge.amount,
            description: charge.description_or(FALLBACK_DESCRIPTION),
            payment_method_id: PIX_PAYMENT_METHOD_ID,
            payer: &charge.payer,
        }
    }
}

/// The part of a created payment we read. Each level may be missing.
#[derive(Debug, Default, Deserialize)]
pub struct PaymentCreated {
    #[serde(default)]
    pub point_of_interaction: Option<PointOfInteraction>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PointOfInteraction {
    #[serde(default)]
    pub transaction_data: Option<TransactionData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TransactionData {
    #[serde(default)]
    pub qr_code: Option<String>,
    #[serde(default)]
    pub qr_code_base64: Option<String>,
}

impl PaymentCreated {
    pub fn into_transaction_data(self) -> TransactionData {
        self.point_of_interaction
            .and_then(|poi| poi.transaction_data)
            .unwrap_or_default()
    }
}
