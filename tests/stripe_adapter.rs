use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use payment_options::domain::order::{PayerInfo, Purchasable, PurchasableItem};
use payment_options::domain::response::PaymentStatus;
use payment_options::error::GatewayError;
use payment_options::gateways::stripe::{
    PaymentIntentRequest, StripeApi, StripeCharge, StripeEvent, StripeEventData,
    StripeEventObject, StripeGateway, StripePaymentIntent,
};
use payment_options::gateways::{PaymentOption, PaymentParams};

struct TestItem;

impl PurchasableItem for TestItem {
    fn title(&self) -> &str {
        "Blue mug"
    }

    fn amount(&self) -> i64 {
        1999
    }

    fn quantity(&self) -> u32 {
        1
    }

    fn vat_rate(&self) -> u32 {
        21
    }
}

struct TestPayer;

impl PayerInfo for TestPayer {
    fn email(&self) -> &str {
        "payer@example.com"
    }
}

struct TestOrder {
    items: Vec<TestItem>,
    payer: TestPayer,
}

impl TestOrder {
    fn with_items() -> Self {
        Self {
            items: vec![TestItem],
            payer: TestPayer,
        }
    }

    fn empty() -> Self {
        Self {
            items: vec![],
            payer: TestPayer,
        }
    }
}

impl Purchasable for TestOrder {
    fn uuid(&self) -> &str {
        "abc-123"
    }

    fn final_price(&self) -> i64 {
        1999
    }

    fn final_amount(&self) -> i64 {
        1999
    }

    fn currency(&self) -> &str {
        "CZK"
    }

    fn items(&self) -> Vec<&dyn PurchasableItem> {
        self.items.iter().map(|i| i as &dyn PurchasableItem).collect()
    }

    fn payer(&self) -> &dyn PayerInfo {
        &self.payer
    }
}

struct MockStripe {
    create_calls: AtomicUsize,
    charge_calls: AtomicUsize,
    intent_calls: AtomicUsize,
    event_type: String,
    event_object_type: String,
    event_object_id: String,
}

impl MockStripe {
    fn new(event_type: &str, object_type: &str, object_id: &str) -> Self {
        Self {
            create_calls: AtomicUsize::new(0),
            charge_calls: AtomicUsize::new(0),
            intent_calls: AtomicUsize::new(0),
            event_type: event_type.to_string(),
            event_object_type: object_type.to_string(),
            event_object_id: object_id.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl StripeApi for MockStripe {
    async fn create_payment_intent(
        &self,
        req: &PaymentIntentRequest,
    ) -> Result<StripePaymentIntent, GatewayError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(StripePaymentIntent {
            id: "pi_1".to_string(),
            description: Some(req.description.clone()),
            amount: req.amount,
            currency: req.currency.clone(),
            payment_method: None,
            client_secret: Some("cs_1".to_string()),
        })
    }

    async fn find_event(&self, id: &str) -> Result<StripeEvent, GatewayError> {
        Ok(StripeEvent {
            id: id.to_string(),
            event_type: self.event_type.clone(),
            data: StripeEventData {
                object: StripeEventObject {
                    object_type: self.event_object_type.clone(),
                    id: self.event_object_id.clone(),
                },
            },
        })
    }

    async fn find_charge(&self, id: &str) -> Result<StripeCharge, GatewayError> {
        self.charge_calls.fetch_add(1, Ordering::SeqCst);
        Ok(StripeCharge {
            id: id.to_string(),
            description: Some("abc-123".to_string()),
            amount: 1999,
            currency: "czk".to_string(),
            payment_method: Some("card".to_string()),
        })
    }

    async fn find_payment_intent(&self, id: &str) -> Result<StripePaymentIntent, GatewayError> {
        self.intent_calls.fetch_add(1, Ordering::SeqCst);
        Ok(StripePaymentIntent {
            id: id.to_string(),
            description: Some("abc-123".to_string()),
            amount: 1999,
            currency: "czk".to_string(),
            payment_method: Some("card".to_string()),
            client_secret: Some("cs_1".to_string()),
        })
    }
}

#[tokio::test]
async fn create_payment_returns_created_with_client_secret() {
    let api = Arc::new(MockStripe::new("", "", ""));
    let gateway = StripeGateway::new(api.clone());

    let response = gateway
        .create_payment(&TestOrder::with_items(), &PaymentParams::default())
        .await
        .unwrap();

    assert_eq!(response.status, PaymentStatus::Created);
    assert_eq!(response.payment_id, "pi_1");
    assert_eq!(response.order_number.as_deref(), Some("abc-123"));
    assert_eq!(response.amount, Some(1999));
    assert_eq!(response.currency.as_deref(), Some("CZK"));
    assert!(!response.redirect);
    assert!(response.redirect_url.is_none());
    assert_eq!(response.client_secret.as_deref(), Some("cs_1"));
    assert_eq!(response.gateway, "stripe");
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn create_payment_with_empty_cart_makes_no_call() {
    let api = Arc::new(MockStripe::new("", "", ""));
    let gateway = StripeGateway::new(api.clone());

    let err = gateway
        .create_payment(&TestOrder::empty(), &PaymentParams::default())
        .await
        .unwrap_err();

    assert!(matches!(err, GatewayError::EmptyCart));
    assert_eq!(api.create_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn get_status_follows_charge_objects() {
    let api = Arc::new(MockStripe::new("charge.succeeded", "charge", "ch_1"));
    let gateway = StripeGateway::new(api.clone());

    let response = gateway.get_status("evt_1").await.unwrap();

    assert_eq!(response.status, PaymentStatus::Paid);
    assert_eq!(response.payment_id, "ch_1");
    assert_eq!(response.order_number.as_deref(), Some("abc-123"));
    assert_eq!(response.currency.as_deref(), Some("CZK"));
    assert_eq!(api.charge_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.intent_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn get_status_follows_payment_intent_objects() {
    let api = Arc::new(MockStripe::new("payment_intent.succeeded", "payment_intent", "pi_9"));
    let gateway = StripeGateway::new(api.clone());

    let response = gateway.get_status("evt_2").await.unwrap();

    assert_eq!(response.status, PaymentStatus::Paid);
    assert_eq!(response.payment_id, "pi_9");
    assert_eq!(api.intent_calls.load(Ordering::SeqCst), 1);
    assert_eq!(api.charge_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn get_status_rejects_unexpected_object_types() {
    let api = Arc::new(MockStripe::new("customer.subscription.updated", "subscription", "sub_1"));
    let gateway = StripeGateway::new(api.clone());

    let err = gateway.get_status("evt_3").await.unwrap_err();

    match err {
        GatewayError::UnsupportedObjectType(kind) => assert_eq!(kind, "subscription"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(api.charge_calls.load(Ordering::SeqCst), 0);
    assert_eq!(api.intent_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn get_status_degrades_unknown_events_to_unknown() {
    let api = Arc::new(MockStripe::new("charge.refunded", "charge", "ch_2"));
    let gateway = StripeGateway::new(api.clone());

    let response = gateway.get_status("evt_4").await.unwrap();

    assert_eq!(response.status, PaymentStatus::Unknown);
    assert_eq!(response.payment_id, "ch_2");
}
