//! Product catalog route handlers.

use axum::{Json, extract::State};
use nexus_core::{NewProduct, Price, Product, UserId};
use serde::Deserialize;

use crate::{
    error::Result, middleware::RequireAuth, services::catalog::CatalogService, state::AppState,
};

/// Product creation request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Price,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Accepted for wire compatibility; the session identity wins.
    #[serde(default)]
    pub merchant_id: Option<UserId>,
}

/// List every product in the catalog.
///
/// The list is complete and unfiltered; merchant and search filtering are
/// client-side concerns.
///
/// # Errors
///
/// Returns 500 if the catalog cannot be read.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = CatalogService::new(state.pool()).list().await?;

    Ok(Json(products))
}

/// Create a product owned by the signed-in user.
///
/// The stored `merchant_id` is always the session identity. Nothing checks
/// that the identity belongs to a merchant, so any signed-in user can list
/// products.
///
/// # Errors
///
/// Returns 401 without a valid session, 500 if the insert fails.
pub async fn create(
    RequireAuth(identity): RequireAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<Json<Product>> {
    if let Some(merchant_id) = body.merchant_id
        && merchant_id != identity.id
    {
        tracing::warn!(
            requested = %merchant_id,
            session = %identity.id,
            "Ignoring merchantId from request body"
        );
    }

    let product = CatalogService::new(state.pool())
        .create(NewProduct {
            name: body.name,
            description: body.description,
            price: body.price,
            image_url: body.image_url,
            merchant_id: identity.id,
        })
        .await?;

    tracing::info!(
        product_id = %product.id,
        merchant_id = %product.merchant_id,
        "Product created"
    );

    Ok(Json(product))
}
