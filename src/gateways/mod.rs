use std::collections::BTreeMap;

use crate::domain::order::Purchasable;
use crate::domain::response::PaymentResponse;
use crate::error::GatewayError;

pub mod csob;
pub mod mock;
pub mod stripe;

/// Extra per-payment inputs the host may pass along. Gateways that have no
/// use for a field ignore it (CSOB drops metadata).
#[derive(Debug, Clone, Default)]
pub struct PaymentParams {
    pub metadata: BTreeMap<String, String>,
}

/// The contract every gateway adapter implements: create a payment for an
/// order and report the status of an existing one, both normalized into a
/// `PaymentResponse`.
#[async_trait::async_trait]
pub trait PaymentOption: Send + Sync {
    fn gateway(&self) -> &'static str;

    async fn create_payment(
        &self,
        order: &dyn Purchasable,
        params: &PaymentParams,
    ) -> Result<PaymentResponse, GatewayError>;

    async fn get_status(&self, id: &str) -> Result<PaymentResponse, GatewayError>;
}
