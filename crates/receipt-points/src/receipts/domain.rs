use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier handed back to callers once a receipt has been scored and stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReceiptId(pub String);

impl ReceiptId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw purchase description as submitted by a client.
///
/// Every field is optional so that a missing field and a blank one reach the validator
/// the same way; nothing here is trusted until [`super::validate`] accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retailer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<LineItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<String>,
}

impl PurchaseRecord {
    /// True when none of the recognized fields were supplied.
    pub fn is_empty(&self) -> bool {
        self.retailer.is_none()
            && self.purchase_date.is_none()
            && self.purchase_time.is_none()
            && self.items.is_none()
            && self.total.is_none()
    }

    pub fn items(&self) -> &[LineItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

/// One purchased product on a receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
}

impl LineItem {
    pub fn new(short_description: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            short_description: Some(short_description.into()),
            price: Some(price.into()),
        }
    }
}

/// Present and non-blank after trimming surrounding whitespace.
pub(crate) fn has_text(value: Option<&str>) -> bool {
    value.is_some_and(|text| !text.trim().is_empty())
}
