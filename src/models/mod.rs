pub mod mercadopago;
pub mod payment;
