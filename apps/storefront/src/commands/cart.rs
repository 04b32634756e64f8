//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────────┐   │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Confirmation │   │
//! │  │  Cart    │     │          │     │          │     │  (3 seconds) │   │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────┬───────┘   │
//! │       ▲                │           process_payment         │           │
//! │       │           add_to_cart      (checkout.rs)           │           │
//! │       │           update_quantity                          │           │
//! │       │           remove_from_cart                         │           │
//! │       └────────────────────────────────────────────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use storefront_core::{Action, CartLine, Money, ProductId, StoreView};
use tracing::debug;

use super::dispatch_infallible;
use crate::state::StoreState;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartLine>,
    pub totals: CartTotals,
}

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<StoreView> for CartResponse {
    fn from(view: StoreView) -> Self {
        CartResponse {
            totals: CartTotals {
                item_count: view.item_count,
                total_quantity: view.total_quantity,
                total: view.total,
            },
            items: view.cart,
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(store: &StoreState) -> CartResponse {
    debug!("get_cart command");
    CartResponse::from(store.view())
}

/// Adds one unit of a product to the cart.
///
/// ## Behavior
/// - Product already in cart: quantity increases by one
/// - Product not in cart: appended with quantity 1
/// - Product no longer in the catalog: nothing happens
pub fn add_to_cart(store: &StoreState, product_id: ProductId) -> CartResponse {
    debug!(product_id = %product_id, "add_to_cart command");
    dispatch_infallible(store, Action::AddToCart { product_id }).into()
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity below 1: ignored, the cart is returned unchanged
/// - Product not in cart: ignored
pub fn update_quantity(store: &StoreState, product_id: ProductId, quantity: i64) -> CartResponse {
    debug!(product_id = %product_id, quantity = %quantity, "update_quantity command");
    dispatch_infallible(
        store,
        Action::UpdateQuantity {
            product_id,
            quantity,
        },
    )
    .into()
}

/// Removes a line from the cart.
pub fn remove_from_cart(store: &StoreState, product_id: ProductId) -> CartResponse {
    debug!(product_id = %product_id, "remove_from_cart command");
    dispatch_infallible(store, Action::RemoveFromCart { product_id }).into()
}
