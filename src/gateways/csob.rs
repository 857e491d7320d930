use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::CsobConfig;
use crate::domain::order::Purchasable;
use crate::domain::response::{PaymentResponse, PaymentStatus};
use crate::error::GatewayError;
use crate::gateways::{PaymentOption, PaymentParams};
use crate::items::{self, PurchaseItem};

const GATEWAY: &str = "csob";

/// Signs the bank's `|`-joined base string with the merchant RSA key. The
/// crate assembles base strings; key handling and the signature itself
/// belong to the host's implementation.
pub trait PayloadSigner: Send + Sync {
    fn sign(&self, base: &str) -> Result<String, GatewayError>;
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInitRequest {
    pub merchant_id: String,
    pub order_no: String,
    pub dttm: String,
    pub pay_operation: String,
    pub pay_method: String,
    pub total_amount: i64,
    pub currency: String,
    pub close_payment: bool,
    pub return_url: String,
    pub return_method: String,
    pub cart: Vec<PurchaseItem>,
    pub description: String,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsobPaymentResult {
    pub pay_id: String,
    pub result_code: i32,
    pub result_message: String,
    #[serde(default)]
    pub payment_status: i32,
}

/// The slice of the bank gateway API the adapter consumes.
#[async_trait::async_trait]
pub trait CsobApi: Send + Sync {
    async fn payment_init(
        &self,
        req: &PaymentInitRequest,
    ) -> Result<CsobPaymentResult, GatewayError>;

    /// Plain status query by payId; does not trigger a gateway-side
    /// status recalculation.
    async fn payment_status(&self, pay_id: &str) -> Result<CsobPaymentResult, GatewayError>;

    /// Signed URL of the gateway-hosted payment page for a payId.
    fn payment_url(&self, pay_id: &str) -> Result<String, GatewayError>;
}

pub struct HttpCsobClient {
    pub config: CsobConfig,
    pub signer: Arc<dyn PayloadSigner>,
    pub client: reqwest::Client,
}

impl HttpCsobClient {
    pub fn new(config: CsobConfig, signer: Arc<dyn PayloadSigner>) -> Self {
        Self {
            config,
            signer,
            client: reqwest::Client::new(),
        }
    }
}

fn dttm_now() -> String {
    chrono::Utc::now().format("%Y%m%d%H%M%S").to_string()
}

#[async_trait::async_trait]
impl CsobApi for HttpCsobClient {
    async fn payment_init(
        &self,
        req: &PaymentInitRequest,
    ) -> Result<CsobPaymentResult, GatewayError> {
        let base = format!(
            "{}|{}|{}|{}|{}|{}|{}|{}|{}",
            req.merchant_id,
            req.order_no,
            req.dttm,
            req.pay_operation,
            req.pay_method,
            req.total_amount,
            req.currency,
            req.close_payment,
            req.return_url,
        );
        let signature = self.signer.sign(&base)?;

        let mut body = serde_json::to_value(req)?;
        body["signature"] = serde_json::Value::String(signature);

        let resp = self
            .client
            .post(format!("{}/payment/init", self.config.api_url))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Gateway {
                gateway: GATEWAY,
                code: Some(format!("HTTP_{}", status.as_u16())),
                message: body.chars().take(200).collect(),
            });
        }

        check_result(resp.json::<CsobPaymentResult>().await?)
    }

    async fn payment_status(&self, pay_id: &str) -> Result<CsobPaymentResult, GatewayError> {
        let dttm = dttm_now();
        let base = format!("{}|{}|{}", self.config.merchant_id, pay_id, dttm);
        let signature = self.signer.sign(&base)?;

        let resp = self
            .client
            .get(format!(
                "{}/payment/status/{}/{}/{}/{}",
                self.config.api_url,
                self.config.merchant_id,
                pay_id,
                dttm,
                urlencoding::encode(&signature),
            ))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Gateway {
                gateway: GATEWAY,
                code: Some(format!("HTTP_{}", status.as_u16())),
                message: body.chars().take(200).collect(),
            });
        }

        check_result(resp.json::<CsobPaymentResult>().await?)
    }

    fn payment_url(&self, pay_id: &str) -> Result<String, GatewayError> {
        let dttm = dttm_now();
        let base = format!("{}|{}|{}", self.config.merchant_id, pay_id, dttm);
        let signature = self.signer.sign(&base)?;

        Ok(format!(
            "{}/payment/process/{}/{}/{}/{}",
            self.config.api_url,
            self.config.merchant_id,
            pay_id,
            dttm,
            urlencoding::encode(&signature),
        ))
    }
}

fn check_result(result: CsobPaymentResult) -> Result<CsobPaymentResult, GatewayError> {
    if result.result_code != 0 {
        tracing::warn!(
            code = result.result_code,
            message = %result.result_message,
            "csob rejected the request"
        );
        return Err(GatewayError::Gateway {
            gateway: GATEWAY,
            code: Some(result.result_code.to_string()),
            message: result.result_message,
        });
    }

    Ok(result)
}

/// Bank gateway adapter: payments initialize server-side, then the payer's
/// browser is redirected to the gateway-hosted page.
pub struct CsobGateway {
    config: CsobConfig,
    client: Arc<dyn CsobApi>,
}

impl CsobGateway {
    pub fn new(config: CsobConfig, client: Arc<dyn CsobApi>) -> Self {
        Self { config, client }
    }

    pub fn from_config(config: CsobConfig, signer: Arc<dyn PayloadSigner>) -> Self {
        let client = Arc::new(HttpCsobClient::new(config.clone(), signer));
        Self::new(config, client)
    }
}

#[async_trait::async_trait]
impl PaymentOption for CsobGateway {
    fn gateway(&self) -> &'static str {
        GATEWAY
    }

    async fn create_payment(
        &self,
        order: &dyn Purchasable,
        _params: &PaymentParams,
    ) -> Result<PaymentResponse, GatewayError> {
        let line_items = items::map_items(order)?;
        tracing::debug!(order = order.uuid(), items = line_items.len(), "initializing csob payment");

        // single cart entry labeled with the order UUID, minor units
        let cart = vec![PurchaseItem::new(order.uuid(), order.final_amount(), 1, 0)];

        let request = PaymentInitRequest {
            merchant_id: self.config.merchant_id.clone(),
            order_no: order.uuid().to_string(),
            dttm: dttm_now(),
            pay_operation: "payment".to_string(),
            pay_method: "card".to_string(),
            total_amount: order.final_amount(),
            currency: order.currency().to_string(),
            close_payment: true,
            return_url: self.config.return_url.clone(),
            return_method: "POST".to_string(),
            cart,
            description: self.config.shop_name.clone(),
            language: "CZ".to_string(),
        };

        let result = self.client.payment_init(&request).await?;
        let redirect_url = self.client.payment_url(&result.pay_id)?;

        Ok(PaymentResponse {
            status_code: 200,
            status: translate_payment_status(result.payment_status),
            payment_id: result.pay_id,
            order_number: Some(order.uuid().to_string()),
            amount: Some(order.final_amount()),
            currency: Some(order.currency().to_string()),
            payment_method: None,
            gateway: GATEWAY,
            redirect: true,
            redirect_url: Some(redirect_url),
            client_secret: None,
        })
    }

    async fn get_status(&self, id: &str) -> Result<PaymentResponse, GatewayError> {
        let result = self.client.payment_status(id).await?;

        // the status endpoint does not echo amount, currency or order number
        Ok(PaymentResponse {
            status_code: 200,
            status: translate_payment_status(result.payment_status),
            payment_id: result.pay_id,
            order_number: None,
            amount: None,
            currency: None,
            payment_method: None,
            gateway: GATEWAY,
            redirect: false,
            redirect_url: None,
            client_secret: None,
        })
    }
}

/// Numeric gateway status to normalized status. Total: codes outside the
/// documented 1..=10 range degrade to `Unknown`.
pub fn translate_payment_status(code: i32) -> PaymentStatus {
    match code {
        1 | 2 => PaymentStatus::Created,
        4 => PaymentStatus::Authorized,
        3 | 5 | 6 => PaymentStatus::Canceled,
        7 | 8 => PaymentStatus::Paid,
        9 | 10 => PaymentStatus::Refunded,
        other => {
            tracing::warn!(code = other, "unknown csob payment status");
            PaymentStatus::Unknown
        }
    }
}
