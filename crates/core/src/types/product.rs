//! Product wire and domain types.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, UserId};

/// A catalog product, as stored and as served.
///
/// Field names on the wire are camelCase (`imageUrl`, `merchantId`) to match
/// the storefront client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product's database ID.
    pub id: ProductId,
    /// Display name. Free text, not validated.
    pub name: String,
    /// Longer free-text description.
    pub description: String,
    /// Non-negative price.
    pub price: Price,
    /// Optional hosted image URL. `None` means clients fall back to a
    /// deterministic placeholder derived from the id.
    pub image_url: Option<String>,
    /// Owning merchant's user id. The store does not verify that this
    /// references an existing user.
    pub merchant_id: UserId,
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: Option<String>,
    pub merchant_id: UserId,
}
