//! # Commands Module
//!
//! Everything the rendering surface can ask of the session.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── List, add and remove products
//! ├── cart.rs      ◄─── Cart manipulation
//! └── checkout.rs  ◄─── Simulated payment and confirmation status
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Rendering surface                                                      │
//! │  ─────────────────                                                      │
//! │  cart::update_quantity(&store, ProductId(1), 5)                         │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  StoreState::dispatch(Action::UpdateQuantity { .. })                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CartResponse { items, totals }  ──► redraw                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs: `&StoreState`, plus
//! `&ConfigState` where amounts are formatted for display.

pub mod cart;
pub mod catalog;
pub mod checkout;

use storefront_core::{Action, StoreView};

use crate::state::StoreState;

/// Runs an action the session only ever absorbs as a no-op when it does
/// not apply (unknown ids, quantities below one).
pub(crate) fn dispatch_infallible(store: &StoreState, action: Action) -> StoreView {
    store.dispatch(action).unwrap_or_else(|_| store.view())
}
