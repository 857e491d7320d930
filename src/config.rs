#[derive(Clone)]
pub struct StripeConfig {
    pub api_key: String,
    pub api_url: String,
}

impl StripeConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("STRIPE_API_KEY").unwrap_or_default(),
            api_url: std::env::var("STRIPE_API_URL")
                .unwrap_or_else(|_| "https://api.stripe.com".to_string()),
        }
    }
}

#[derive(Clone)]
pub struct CsobConfig {
    pub merchant_id: String,
    pub private_key: String,
    pub public_key: String,
    pub shop_name: String,
    pub return_url: String,
    pub api_url: String,
}

impl CsobConfig {
    pub fn from_env() -> Self {
        Self {
            merchant_id: std::env::var("CSOB_MERCHANT_ID").unwrap_or_default(),
            private_key: std::env::var("CSOB_PRIVATE_KEY_PATH").unwrap_or_default(),
            public_key: std::env::var("CSOB_PUBLIC_KEY_PATH").unwrap_or_default(),
            shop_name: std::env::var("CSOB_SHOP_NAME").unwrap_or_else(|_| "eshop".to_string()),
            return_url: std::env::var("CSOB_RETURN_URL").unwrap_or_default(),
            api_url: std::env::var("CSOB_API_URL")
                .unwrap_or_else(|_| "https://iapi.iplatebnibrana.csob.cz/api/v1.9".to_string()),
        }
    }
}
