//! Seed the database with a demo merchant and a starter catalog.
//!
//! Everything goes through the real auth and catalog services, so seeded
//! rows are indistinguishable from rows created over HTTP. Re-running is
//! safe: the merchant is reused and existing products are skipped by name.

use nexus_core::{NewProduct, Price, Role};
use nexus_server::services::auth::{AuthError, AuthService};
use nexus_server::services::catalog::CatalogService;
use nexus_server::{ServerConfig, db};
use tracing::info;

const MERCHANT_USERNAME: &str = "demo-merchant";
const MERCHANT_PASSWORD: &str = "demo-password";

/// Name, description, price. Image URLs are left empty so every product
/// shows its deterministic placeholder.
const PRODUCTS: [(&str, &str, &str); 6] = [
    (
        "Ceramic Pour-Over Set",
        "Hand-thrown dripper and carafe in matte stoneware. Brews two cups.",
        "48.00",
    ),
    (
        "Linen Throw Blanket",
        "Stonewashed European flax, oversized and breathable year-round.",
        "89.50",
    ),
    (
        "Walnut Desk Organizer",
        "Solid walnut tray with compartments for pens, cards, and coins.",
        "36.00",
    ),
    (
        "Brass Pocket Knife",
        "Slim friction folder with a brass handle that patinas with use.",
        "64.00",
    ),
    (
        "Cold Brew Bottle",
        "Borosilicate glass bottle with a stainless mesh filter. 700 ml.",
        "29.00",
    ),
    (
        "Wool Felt Laptop Sleeve",
        "Dense merino felt with a leather closure, sized for 14-inch laptops.",
        "42.00",
    ),
];

/// Insert the demo merchant and catalog.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the database cannot be
/// opened, or an insert fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_path).await?;
    db::init_schema(&pool).await?;

    // Reuse the merchant if a previous run created it
    let auth = AuthService::new(&pool);
    let session = match auth
        .register(MERCHANT_USERNAME, MERCHANT_PASSWORD, Role::Merchant)
        .await
    {
        Ok(session) => {
            info!(username = MERCHANT_USERNAME, "Created demo merchant");
            session
        }
        Err(AuthError::UsernameTaken) => {
            info!(username = MERCHANT_USERNAME, "Demo merchant exists, signing in");
            auth.login(MERCHANT_USERNAME, MERCHANT_PASSWORD).await?
        }
        Err(e) => return Err(e.into()),
    };

    let catalog = CatalogService::new(&pool);
    let existing = catalog.list().await?;

    let mut inserted = 0_usize;
    let mut skipped = 0_usize;

    for (name, description, price) in PRODUCTS {
        let already_seeded = existing
            .iter()
            .any(|p| p.merchant_id == session.identity.id && p.name == name);
        if already_seeded {
            skipped += 1;
            continue;
        }

        catalog
            .create(NewProduct {
                name: name.to_string(),
                description: description.to_string(),
                price: Price::parse(price)?,
                image_url: None,
                merchant_id: session.identity.id,
            })
            .await?;
        inserted += 1;
    }

    info!("Seeding complete!");
    info!("  Products inserted: {inserted}");
    info!("  Products skipped (already exist): {skipped}");

    Ok(())
}
