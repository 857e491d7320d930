use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("there are no items to be purchased")]
    EmptyCart,

    #[error("cannot handle webhook object type `{0}`")]
    UnsupportedObjectType(String),

    /// The gateway reached but rejected the request, e.g. a declined init
    /// or invalid merchant credentials.
    #[error("{gateway} gateway error: {message}")]
    Gateway {
        gateway: &'static str,
        code: Option<String>,
        message: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("request signing failed: {0}")]
    Signing(String),
}
