//! # Demo Session
//!
//! Scripted walk through the storefront, driven by the same commands a
//! rendering surface would call. Each step logs the resulting state.
//!
//! ```text
//! browse ─► add product ─► add to cart ×2 ─► set quantity ─► remove line
//!                                                                 │
//!      confirmation hidden ◄── window elapses ◄── pay ◄───────────┘
//! ```

use storefront_core::{ProductForm, ProductId};
use tracing::info;

use crate::commands::{cart, catalog, checkout};
use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// Runs the scripted session to completion.
///
/// Returns once the payment confirmation has been hidden again.
pub async fn walkthrough(store: &StoreState, config: &ConfigState) -> Result<(), ApiError> {
    let mut views = store.subscribe();

    let products = catalog::list_products(store);
    for product in &products {
        info!(
            id = %product.id,
            name = %product.name,
            price = %config.format_currency(product.price),
            "Catalog entry"
        );
    }

    let view = catalog::add_product(
        store,
        ProductForm {
            name: "Lámpara de Escritorio".to_string(),
            price: "24.50".to_string(),
            image: "https://images.unsplash.com/photo-1507473885765-e6ed057f782c".to_string(),
            description: "Lámpara LED regulable con brazo articulado".to_string(),
        },
    )?;
    if let Some(added) = view.catalog.last() {
        info!(id = %added.id, name = %added.name, "Product added");
    }

    cart::add_to_cart(store, ProductId(1));
    cart::add_to_cart(store, ProductId(1));
    cart::add_to_cart(store, ProductId(3));
    cart::update_quantity(store, ProductId(1), 5);
    let summary = cart::remove_from_cart(store, ProductId(3));
    info!(
        lines = summary.totals.item_count,
        units = summary.totals.total_quantity,
        total = %config.format_currency(summary.totals.total),
        "Cart ready"
    );

    let receipt = checkout::process_payment(store, config)?;
    info!(
        receipt_id = %receipt.receipt_id,
        total = %receipt.formatted_total,
        "Payment processed successfully"
    );

    // The sender lives inside `store`, so the channel cannot close here.
    let _ = views.wait_for(|v| !v.payment_confirmed).await;
    info!(store = %config.store_name, "Confirmation dismissed");

    Ok(())
}
