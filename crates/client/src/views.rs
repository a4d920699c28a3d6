//! Presentation helpers for the two catalog screens.
//!
//! The API returns the complete product list; narrowing it down happens
//! here, client-side. The merchant dashboard shows only the signed-in
//! merchant's rows, the storefront filters by the search box.

use nexus_core::{Product, ProductId, UserId};

/// Products owned by the given merchant, in catalog order.
#[must_use]
pub fn owned_by(products: &[Product], merchant_id: UserId) -> Vec<&Product> {
    products
        .iter()
        .filter(|product| product.merchant_id == merchant_id)
        .collect()
}

/// Case-insensitive substring search over name and description.
///
/// An empty query matches everything.
#[must_use]
pub fn search<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.to_lowercase();
    products
        .iter()
        .filter(|product| {
            product.name.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Deterministic placeholder image for a product without one of its own.
///
/// The product id seeds the image service, so the same product always shows
/// the same picture.
#[must_use]
pub fn placeholder_image_url(id: ProductId, width: u32, height: u32) -> String {
    format!("https://picsum.photos/seed/{id}/{width}/{height}")
}

/// The image URL a view should render for a product.
///
/// An absent or empty `image_url` falls back to the placeholder.
#[must_use]
pub fn display_image_url(product: &Product, width: u32, height: u32) -> String {
    match &product.image_url {
        Some(url) if !url.is_empty() => url.clone(),
        _ => placeholder_image_url(product.id, width, height),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nexus_core::Price;

    use super::*;

    fn product(id: i64, name: &str, description: &str, merchant: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: name.to_string(),
            description: description.to_string(),
            price: Price::parse("9.99").unwrap(),
            image_url: None,
            merchant_id: UserId::from(merchant),
        }
    }

    #[test]
    fn test_owned_by_filters_on_merchant_id() {
        let products = vec![
            product(1, "Mug", "Ceramic mug", 10),
            product(2, "Lamp", "Desk lamp", 11),
            product(3, "Pen", "Fountain pen", 10),
        ];

        let owned = owned_by(&products, UserId::from(10));
        let ids: Vec<_> = owned.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId::from(1), ProductId::from(3)]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let products = vec![
            product(1, "Ceramic Mug", "Holds coffee", 10),
            product(2, "Desk Lamp", "Warm LED light", 10),
            product(3, "Notebook", "Lined paper, MUG doodle on cover", 10),
        ];

        let hits = search(&products, "mug");
        let ids: Vec<_> = hits.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![ProductId::from(1), ProductId::from(3)]);

        let hits = search(&products, "LAMP");
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_search_empty_query_matches_everything() {
        let products = vec![
            product(1, "Mug", "Ceramic", 10),
            product(2, "Lamp", "LED", 10),
        ];

        assert_eq!(search(&products, "").len(), 2);
    }

    #[test]
    fn test_search_no_hits() {
        let products = vec![product(1, "Mug", "Ceramic", 10)];
        assert!(search(&products, "bicycle").is_empty());
    }

    #[test]
    fn test_placeholder_is_seeded_by_id() {
        assert_eq!(
            placeholder_image_url(ProductId::from(42), 400, 400),
            "https://picsum.photos/seed/42/400/400"
        );
    }

    #[test]
    fn test_display_image_url_falls_back_when_absent_or_empty() {
        let mut with_image = product(1, "Mug", "Ceramic", 10);
        with_image.image_url = Some("https://cdn.example.com/mug.jpg".to_string());
        assert_eq!(
            display_image_url(&with_image, 600, 800),
            "https://cdn.example.com/mug.jpg"
        );

        let without = product(2, "Lamp", "LED", 10);
        assert_eq!(
            display_image_url(&without, 600, 800),
            "https://picsum.photos/seed/2/600/800"
        );

        let mut empty = product(3, "Pen", "Fountain", 10);
        empty.image_url = Some(String::new());
        assert_eq!(
            display_image_url(&empty, 400, 400),
            "https://picsum.photos/seed/3/400/400"
        );
    }
}
