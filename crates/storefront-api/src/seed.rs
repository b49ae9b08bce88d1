//! Startup sample data.

use storefront_core::error::DomainError;
use storefront_core::product::ProductDraft;
use tracing::info;

use crate::state::AppState;

fn sample_products() -> Vec<ProductDraft> {
    vec![
        ProductDraft {
            name: "Enamel Mug".into(),
            category: "drinkware".into(),
            description: "12oz camp-style enamel mug".into(),
            emoji: "☕".into(),
            price: 900,
            stock: 10,
        },
        ProductDraft {
            name: "Logo Tee".into(),
            category: "apparel".into(),
            description: "Soft cotton tee with front print".into(),
            emoji: "👕".into(),
            price: 1500,
            stock: 20,
        },
        ProductDraft {
            name: "Sticker Pack".into(),
            category: "accessories".into(),
            description: "Five die-cut vinyl stickers".into(),
            emoji: "🎨".into(),
            price: 450,
            stock: 12,
        },
        ProductDraft {
            name: "Zip Hoodie".into(),
            category: "apparel".into(),
            description: "Heavyweight fleece zip hoodie".into(),
            emoji: "🧥".into(),
            price: 2800,
            stock: 5,
        },
    ]
}

/// Seeds sample products when the catalog is empty, then refreshes the
/// aggregate stats. Safe to call on every startup.
///
/// # Errors
///
/// Returns a [`DomainError`] when the catalog cannot be read or written.
pub async fn init_sample_data(state: &AppState) -> Result<(), DomainError> {
    if state.catalog.list().await?.is_empty() {
        for draft in sample_products() {
            state.catalog.create(draft, state.clock.as_ref()).await?;
        }
        info!("sample products seeded");
    }
    storefront_ledger::stats::recompute(state.store.as_ref(), state.clock.as_ref()).await?;
    Ok(())
}
