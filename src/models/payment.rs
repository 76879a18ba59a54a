use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_AMOUNT: f64 = 1.0;
pub const DEFAULT_DESCRIPTION: &str = "Compra PIX";
pub const DEFAULT_PAYER_EMAIL: &str = "customer@example.com";

fn default_amount() -> Option<f64> {
    Some(DEFAULT_AMOUNT)
}

fn default_description() -> Option<Value> {
    Some(Value::String(DEFAULT_DESCRIPTION.to_string()))
}

/// Body of `POST /create-payment`.
///
/// Missing `amount` and `description` get their defaults. An explicit `null`
/// is kept as `None`: a null amount is rejected by
/// [`PaymentRequest::validate`], a null description falls back to the
/// default of whichever path builds the charge.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentRequest {
    #[serde(default = "default_amount")]
    pub amount: Option<f64>,
    #[serde(default = "default_description")]
    pub description: Option<Value>,
    #[serde(default)]
    pub payer: Option<Value>,
}

impl Default for PaymentRequest {
    fn default() -> Self {
        Self {
            amount: default_amount(),
            description: default_description(),
            payer: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("amount must be > 0")]
    NonPositiveAmount,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct PixCharge {
    pub amount: f64,
    /// `None` when the caller sent an empty value (`null`, `""`, `0`, `false`).
    pub description: Option<String>,
    pub payer: Value,
}

impl PixCharge {
    pub fn description_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.description.as_deref().unwrap_or(fallback)
    }
}

impl PaymentRequest {
    pub fn validate(self) -> Result<PixCharge, ValidationError> {
        let amount = match self.amount {
            Some(amount) if amount > 0.0 => amount,
            _ => return Err(ValidationError::NonPositiveAmount),
        };

        Ok(PixCharge {
            amount,
            description: self.description.filter(is_present).map(describe),
            payer: self
                .payer
                .filter(is_present)
                .unwrap_or_else(|| serde_json::json!({ "email": DEFAULT_PAYER_EMAIL })),
        })
    }
}

/// False for the JSON values a browser client treats as "nothing":
/// `null`, `false`, `0` and `""`.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Non-strings are rendered as JSON text.
fn describe(description: Value) -> String {
    match description {
        Value::String(text) => text,
        other => other.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct ProviderChargeResult {
    pub qr_text: Option<String>,
    pub qr_image_base64: Option<String>,
    pub raw: Value,
}

#[derive(Debug, Clone)]
pub struct MockChargeResult {
    pub payload: String,
    pub qr_image_data_url: String,
    pub transaction_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Mercadopago,
    Mock,
}

#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub provider: ProviderKind,
    pub qr_base64: Option<String>,
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub txid: Option<Uuid>,
    // Outer None omits the field; Some(None) serializes as null.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl PaymentResponse {
    pub fn from_provider(result: ProviderChargeResult, qr_image_data_url: Option<String>) -> Self {
        Self {
            success: true,
            provider: ProviderKind::Mercadopago,
            qr_base64: qr_image_data_url,
            payload: result.qr_text.filter(|text| !text.is_empty()),
            raw: Some(result.raw),
            txid: None,
            expires_at: None,
        }
    }

    pub fn from_mock(result: MockChargeResult) -> Self {
        Self {
            success: true,
            provider: ProviderKind::Mock,
            qr_base64: Some(result.qr_image_data_url),
            payload: Some(result.payload),
            raw: None,
            txid: Some(result.transaction_id),
            expires_at: Some(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> PaymentRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_empty_body_gets_defaults() {
        let charge = parse(json!({})).validate().unwrap();
        assert_eq!(charge.amount, 1.0);
        assert_eq!(charge.description.as_deref(), Some("Compra PIX"));
        assert_eq!(charge.payer, json!({ "email": "customer@example.com" }));
    }

    #[test]
    fn test_explicit_null_amount_is_rejected() {
        let err = parse(json!({ "amount": null })).validate().unwrap_err();
        assert_eq!(err, ValidationError::NonPositiveAmount);
        assert_eq!(err.to_string(), "amount must be > 0");
    }

    #[test]
    fn test_zero_and_negative_amounts_are_rejected() {
        assert!(parse(json!({ "amount": 0 })).validate().is_err());
        assert!(parse(json!({ "amount": -10.5 })).validate().is_err());
    }

    #[test]
    fn test_description_and_payer_pass_through() {
        let charge = parse(json!({
            "amount": 49.9,
            "description": "Camiseta",
            "payer": { "email": "ana@example.com", "first_name": "Ana" }
        }))
        .validate()
        .unwrap();

        assert_eq!(charge.amount, 49.9);
        assert_eq!(charge.description.as_deref(), Some("Camiseta"));
        assert_eq!(charge.payer["first_name"], "Ana");
    }

    #[test]
    fn test_non_string_description_is_rendered_as_json() {
        let charge = parse(json!({ "description": 42 })).validate().unwrap();
        assert_eq!(charge.description.as_deref(), Some("42"));

        let charge = parse(json!({ "description": ["a", 1] })).validate().unwrap();
        assert_eq!(charge.description.as_deref(), Some(r#"["a",1]"#));
    }

    #[test]
    fn test_empty_description_values_are_dropped() {
        for empty in [json!(null), json!(""), json!(0), json!(false)] {
            let charge = parse(json!({ "description": empty })).validate().unwrap();
            assert!(charge.description.is_none(), "{empty} should be dropped");
            assert_eq!(charge.description_or("Compra"), "Compra");
        }
    }

    #[test]
    fn test_empty_payer_values_get_placeholder() {
        for empty in [json!(null), json!(""), json!(0), json!(false)] {
            let charge = parse(json!({ "payer": empty })).validate().unwrap();
            assert_eq!(charge.payer, json!({ "email": "customer@example.com" }));
        }

        let charge = parse(json!({ "payer": {} })).validate().unwrap();
        assert_eq!(charge.payer, json!({}));
    }

    #[test]
    fn test_mock_response_carries_null_expiry() {
        let response = PaymentResponse::from_mock(MockChargeResult {
            payload: "PIX|demo".to_string(),
            qr_image_data_url: "data:image/png;base64,AAAA".to_string(),
            transaction_id: Uuid::nil(),
        });
        let body = serde_json::to_value(&response).unwrap();

        assert_eq!(body["provider"], "mock");
        assert!(body["expires_at"].is_null());
        assert!(body.as_object().unwrap().contains_key("expires_at"));
        assert!(!body.as_object().unwrap().contains_key("raw"));
    }

    #[test]
    fn test_empty_provider_qr_text_becomes_null() {
        let response = PaymentResponse::from_provider(
            ProviderChargeResult {
                qr_text: Some(String::new()),
                qr_image_base64: None,
                raw: json!({}),
            },
            None,
        );
        assert!(response.payload.is_none());
    }

    #[test]
    fn test_provider_response_omits_mock_fields() {
        let response = PaymentResponse::from_provider(
            ProviderChargeResult {
                qr_text: None,
                qr_image_base64: None,
                raw: json!({ "id": 1 }),
            },
            None,
        );
        let body = serde_json::to_value(&response).unwrap();
        let fields = body.as_object().unwrap();

        assert_eq!(body["provider"], "mercadopago");
        assert!(body["qr_base64"].is_null());
        assert!(body["payload"].is_null());
        assert_eq!(body["raw"], json!({ "id": 1 }));
        assert!(!fields.contains_key("txid"));
        assert!(!fields.contains_key("expires_at"));
    }
}
