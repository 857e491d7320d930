use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::config::StripeConfig;
use crate::domain::order::Purchasable;
use crate::domain::response::{PaymentResponse, PaymentStatus};
use crate::error::GatewayError;
use crate::gateways::{PaymentOption, PaymentParams};
use crate::items;

const GATEWAY: &str = "stripe";

#[derive(Debug, Clone)]
pub struct PaymentIntentRequest {
    pub amount: i64,
    pub currency: String,
    pub description: String,
    pub receipt_email: String,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripePaymentIntent {
    pub id: String,
    pub description: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub payment_method: Option<String>,
    pub client_secret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeCharge {
    pub id: String,
    pub description: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub payment_method: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEvent {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventData {
    pub object: StripeEventObject,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StripeEventObject {
    #[serde(rename = "object")]
    pub object_type: String,
    pub id: String,
}

/// The slice of the Stripe API the adapter consumes.
#[async_trait::async_trait]
pub trait StripeApi: Send + Sync {
    async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<StripePaymentIntent, GatewayError>;

    async fn find_event(&self, id: &str) -> Result<StripeEvent, GatewayError>;

    async fn find_charge(&self, id: &str) -> Result<StripeCharge, GatewayError>;

    async fn find_payment_intent(&self, id: &str) -> Result<StripePaymentIntent, GatewayError>;
}

pub struct HttpStripeClient {
    pub api_url: String,
    pub api_key: String,
    pub client: reqwest::Client,
}

impl HttpStripeClient {
    pub fn new(config: &StripeConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, GatewayError> {
        let resp = self
            .client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        read_response(resp).await
    }
}

#[async_trait::async_trait]
impl StripeApi for HttpStripeClient {
    async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<StripePaymentIntent, GatewayError> {
        // Stripe takes form-encoded bodies; nested maps use bracket keys.
        let mut form: Vec<(String, String)> = vec![
            ("amount".to_string(), req.amount.to_string()),
            ("currency".to_string(), req.currency.clone()),
            ("description".to_string(), req.description.clone()),
            ("receipt_email".to_string(), req.receipt_email.clone()),
        ];
        for (key, value) in &req.metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        let resp = self
            .client
            .post(format!("{}/v1/payment_intents", self.api_url))
            .bearer_auth(&self.api_key)
            .form(&form)
            .send()
            .await?;

        read_response(resp).await
    }

    async fn find_event(&self, id: &str) -> Result<StripeEvent, GatewayError> {
        self.get_json(&format!("/v1/events/{id}")).await
    }

    async fn find_charge(&self, id: &str) -> Result<StripeCharge, GatewayError> {
        self.get_json(&format!("/v1/charges/{id}")).await
    }

    async fn find_payment_intent(&self, id: &str) -> Result<StripePaymentIntent, GatewayError> {
        self.get_json(&format!("/v1/payment_intents/{id}")).await
    }
}

async fn read_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, GatewayError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(GatewayError::Gateway {
            gateway: GATEWAY,
            code: Some(format!("HTTP_{}", status.as_u16())),
            message: body.chars().take(200).collect(),
        });
    }

    Ok(resp.json::<T>().await?)
}

/// Card-network adapter: payment intents created server-side, confirmed
/// client-side with the returned client secret, so no redirect URL.
pub struct StripeGateway {
    client: Arc<dyn StripeApi>,
}

impl StripeGateway {
    pub fn new(client: Arc<dyn StripeApi>) -> Self {
        Self { client }
    }

    pub fn from_config(config: &StripeConfig) -> Self {
        Self::new(Arc::new(HttpStripeClient::new(config)))
    }
}

#[async_trait::async_trait]
impl PaymentOption for StripeGateway {
    fn gateway(&self) -> &'static str {
        GATEWAY
    }

    async fn create_payment(
        &self,
        order: &dyn Purchasable,
        params: &PaymentParams,
    ) -> Result<PaymentResponse, GatewayError> {
        let line_items = items::map_items(order)?;
        tracing::debug!(order = order.uuid(), items = line_items.len(), "creating payment intent");

        let request = PaymentIntentRequest {
            // major units, not cents
            amount: order.final_price(),
            currency: order.currency().to_lowercase(),
            // the order UUID refers back to the host's order
            description: order.uuid().to_string(),
            receipt_email: order.payer().email().to_string(),
            metadata: params.metadata.clone(),
        };

        let intent = self.client.create_payment_intent(&request).await?;

        Ok(PaymentResponse {
            status_code: 200,
            status: PaymentStatus::Created,
            payment_id: intent.id,
            order_number: Some(order.uuid().to_string()),
            amount: Some(intent.amount),
            currency: Some(intent.currency.to_uppercase()),
            payment_method: intent.payment_method,
            gateway: GATEWAY,
            redirect: false,
            redirect_url: None,
            client_secret: intent.client_secret,
        })
    }

    async fn get_status(&self, id: &str) -> Result<PaymentResponse, GatewayError> {
        let event = self.client.find_event(id).await?;
        let status = translate_event(&event.event_type);
        let object_id = event.data.object.id.as_str();

        let (payment_id, order_number, amount, currency, payment_method) =
            match event.data.object.object_type.as_str() {
                "charge" => {
                    let charge = self.client.find_charge(object_id).await?;
                    (
                        charge.id,
                        charge.description,
                        charge.amount,
                        charge.currency,
                        charge.payment_method,
                    )
                }
                "payment_intent" => {
                    let intent = self.client.find_payment_intent(object_id).await?;
                    (
                        intent.id,
                        intent.description,
                        intent.amount,
                        intent.currency,
                        intent.payment_method,
                    )
                }
                other => {
                    return Err(GatewayError::UnsupportedObjectType(other.to_string()));
                }
            };

        Ok(PaymentResponse {
            status_code: 200,
            status,
            payment_id,
            order_number,
            amount: Some(amount),
            currency: Some(currency.to_uppercase()),
            payment_method,
            gateway: GATEWAY,
            redirect: false,
            redirect_url: None,
            client_secret: None,
        })
    }
}

/// Webhook event name to normalized status. Total: anything outside the
/// table degrades to `Unknown` rather than failing the call.
pub fn translate_event(event_type: &str) -> PaymentStatus {
    match event_type {
        "payment_intent.succeeded" | "charge.succeeded" => PaymentStatus::Paid,
        _ => PaymentStatus::Unknown,
    }
}
