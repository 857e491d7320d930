/// Host-side order being paid for. The host application owns the order
/// model; adapters only read from it.
pub trait Purchasable: Send + Sync {
    fn uuid(&self) -> &str;

    /// Final price in major currency units (Stripe convention).
    fn final_price(&self) -> i64;

    /// Final price in minor currency units (CSOB convention).
    fn final_amount(&self) -> i64;

    fn currency(&self) -> &str;

    fn items(&self) -> Vec<&dyn PurchasableItem>;

    fn payer(&self) -> &dyn PayerInfo;
}

/// A purchasable line item. `url` and `ean` are optional capabilities:
/// item types that carry them override the defaults.
pub trait PurchasableItem: Sync {
    fn title(&self) -> &str;

    fn amount(&self) -> i64;

    fn quantity(&self) -> u32;

    /// VAT rate as an integer percentage.
    fn vat_rate(&self) -> u32;

    fn url(&self) -> Option<&str> {
        None
    }

    fn ean(&self) -> Option<&str> {
        None
    }
}

pub trait ShippableItem: Sync {
    fn title(&self) -> &str;

    fn amount(&self) -> i64;
}

pub trait PayerInfo: Sync {
    fn email(&self) -> &str;
}
