//! # storefront-core: Pure Session Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It holds the catalog, the
//! cart and the payment-confirmation flag as one immutable [`Session`] value
//! and every user action as a pure transition from one snapshot to the next.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Storefront Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Rendering Surface (external)                    │   │
//! │  │   Product list ──► Cart summary ──► Checkout ──► Confirmation  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / StoreView snapshots         │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 apps/storefront (session shell)                 │   │
//! │  │   StoreState (Mutex + watch) · confirmation timer · config      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  session  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  reducer  │  │   drafts  │  │   │
//! │  │   │ CartLine  │  │  totals   │  │  Action   │  │   prices  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO LOGGING • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, StoreView, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Draft and price validation
//! - [`seed`] - The sample catalog every session starts with
//! - [`session`] - The session snapshot and its transitions
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{ProductId, Session};
//!
//! let session = Session::new();
//! let product = session.find_product(ProductId(1)).unwrap().clone();
//!
//! let session = session.add_to_cart(&product).add_to_cart(&product);
//! let session = session.update_quantity(ProductId(1), 5);
//!
//! assert_eq!(session.cart().len(), 1);
//! assert_eq!(session.compute_total().cents(), 5 * 5999);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod seed;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use session::{Action, Session};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length of a product description, in characters.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// How long the payment confirmation stays visible, in milliseconds.
///
/// The core only records which payment is being confirmed; the shell owns
/// the clock and uses this as its default window.
pub const DEFAULT_CONFIRMATION_WINDOW_MS: u64 = 3000;
