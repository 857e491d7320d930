use crate::domain::order::Purchasable;
use crate::domain::response::{PaymentResponse, PaymentStatus};
use crate::error::GatewayError;
use crate::gateways::{PaymentOption, PaymentParams};
use crate::items;

/// Canned-response gateway for exercising hosts without a live processor.
pub struct MockGateway {
    pub status: PaymentStatus,
    pub redirect: bool,
}

#[async_trait::async_trait]
impl PaymentOption for MockGateway {
    fn gateway(&self) -> &'static str {
        "mock"
    }

    async fn create_payment(
        &self,
        order: &dyn Purchasable,
        _params: &PaymentParams,
    ) -> Result<PaymentResponse, GatewayError> {
        items::map_items(order)?;

        let payment_id = format!("mock_txn_{}", uuid::Uuid::new_v4());
        Ok(PaymentResponse {
            status_code: 200,
            status: self.status,
            payment_id: payment_id.clone(),
            order_number: Some(order.uuid().to_string()),
            amount: Some(order.final_amount()),
            currency: Some(order.currency().to_string()),
            payment_method: None,
            gateway: "mock",
            redirect: self.redirect,
            redirect_url: self
                .redirect
                .then(|| format!("https://pay.invalid/process/{payment_id}")),
            client_secret: None,
        })
    }

    async fn get_status(&self, id: &str) -> Result<PaymentResponse, GatewayError> {
        Ok(PaymentResponse {
            status_code: 200,
            status: self.status,
            payment_id: id.to_string(),
            order_number: None,
            amount: None,
            currency: None,
            payment_method: None,
            gateway: "mock",
            redirect: false,
            redirect_url: None,
            client_secret: None,
        })
    }
}
