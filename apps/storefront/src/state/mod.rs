//! # State Module
//!
//! Manages application state for the storefront shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────┐        │
//! │  │         StoreState           │  │       ConfigState        │        │
//! │  │                              │  │                          │        │
//! │  │  Arc<Mutex<Session>>         │  │  store_name              │        │
//! │  │  watch::Sender<StoreView>    │  │  currency_symbol         │        │
//! │  │  pending revert JoinHandle   │  │  confirmation_window_ms  │        │
//! │  └──────────────────────────────┘  └──────────────────────────┘        │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • StoreState: one Mutex around the snapshot, swapped whole            │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod store;

pub use config::ConfigState;
pub use store::{Checkout, StoreState};
