use serde::{Deserialize, Serialize};

/// Normalized status shared by every gateway. Native codes and webhook
/// event names translate into this enum; codes a translator does not
/// recognize degrade to `Unknown` instead of failing the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Created,
    Authorized,
    Paid,
    Canceled,
    Refunded,
    Error,
    Unknown,
}

/// Result of a gateway call, normalized across gateways. Built once per
/// call and never mutated afterwards. Fields a gateway cannot supply
/// (the CSOB status endpoint does not echo amount or currency) stay `None`.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentResponse {
    pub status_code: u16,
    pub status: PaymentStatus,
    pub payment_id: String,
    pub order_number: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub payment_method: Option<String>,
    pub gateway: &'static str,
    pub redirect: bool,
    pub redirect_url: Option<String>,
    pub client_secret: Option<String>,
}
