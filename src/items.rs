use serde::Serialize;

use crate::domain::order::{Purchasable, PurchasableItem, ShippableItem};
use crate::error::GatewayError;

/// Ordinary cart entry in the gateway cart shape. `url` and `ean` are
/// serialized only when the source item carries them.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub amount: i64,
    pub count: u32,
    pub vat_rate: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ean: Option<String>,
}

impl PurchaseItem {
    pub fn new(name: &str, amount: i64, count: u32, vat_rate: u32) -> Self {
        Self {
            item_type: String::new(),
            name: name.to_string(),
            amount,
            count,
            vat_rate,
            url: None,
            ean: None,
        }
    }

    pub fn from_purchasable(item: &dyn PurchasableItem) -> Self {
        let mut entry = Self::new(item.title(), item.amount(), item.quantity(), item.vat_rate());
        entry.url = item.url().map(str::to_string);
        entry.ean = item.ean().map(str::to_string);
        entry
    }
}

/// Carriage-charge cart entry. Defaults to a single unit at the standard
/// 21% VAT rate.
#[derive(Debug, Clone, Serialize)]
pub struct ShippingItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub name: String,
    pub amount: i64,
    pub count: u32,
    pub vat_rate: u32,
}

impl ShippingItem {
    pub fn new(name: &str, amount: i64) -> Self {
        Self {
            item_type: "SHIPPING_ITEM".to_string(),
            name: name.to_string(),
            amount,
            count: 1,
            vat_rate: 21,
        }
    }

    pub fn from_shippable(shipping: &dyn ShippableItem) -> Self {
        Self::new(shipping.title(), shipping.amount())
    }
}

/// Maps an order's items into cart entries. Fails with `EmptyCart` before
/// any gateway call when there is nothing to purchase.
pub fn map_items(order: &dyn Purchasable) -> Result<Vec<PurchaseItem>, GatewayError> {
    let items = order.items();
    if items.is_empty() {
        return Err(GatewayError::EmptyCart);
    }

    Ok(items.into_iter().map(PurchaseItem::from_purchasable).collect())
}
