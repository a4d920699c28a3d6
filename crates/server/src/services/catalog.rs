//! Catalog service.
//!
//! Listing and creating products. Deliberately thin: there is no pagination,
//! no sorting contract beyond insertion order, and no check that a product's
//! merchant exists.

use sqlx::SqlitePool;

use nexus_core::{NewProduct, Product};

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;

/// Catalog service over the product store.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// Every product, unfiltered, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store cannot be read.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        self.products.list_all().await
    }

    /// Create a product and return it with its assigned id.
    ///
    /// The merchant id is stored as given, whether or not such a user
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the insert fails.
    pub async fn create(&self, mut new_product: NewProduct) -> Result<Product, RepositoryError> {
        // An empty string from a form means no image.
        new_product.image_url = new_product.image_url.take().filter(|url| !url.is_empty());

        self.products.create(&new_product).await
    }
}
