pub mod mercadopago_client;
pub mod mock_pix;
pub mod payment_service;
pub mod provider;

pub use payment_service::{PaymentService, ServiceError};
