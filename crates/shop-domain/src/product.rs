//! Product details as served by the product service.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::ProductId;

/// Product payload fetched from the product service. Fields other than
/// `productId` pass through as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub product_id: ProductId,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl ProductSummary {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            details: Map::new(),
        }
    }
}
