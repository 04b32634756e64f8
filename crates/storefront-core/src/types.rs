//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  ProductForm    │──►│  ProductDraft   │──►│    Product      │       │
//! │  │  (raw text)     │   │  (validated)    │   │  id (assigned)  │       │
//! │  │  price: "9.99"  │   │  price: Money   │   │  price: Money   │       │
//! │  └─────────────────┘   └─────────────────┘   └────────┬────────┘       │
//! │                                                        │ snapshot       │
//! │                                               ┌────────▼────────┐       │
//! │  ┌─────────────────┐                          │    CartLine     │       │
//! │  │   StoreView     │◄── Session::view() ──────│  product        │       │
//! │  │  catalog, cart  │                          │  quantity ≥ 1   │       │
//! │  │  total, flag    │                          └─────────────────┘       │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation;

// =============================================================================
// Identifiers
// =============================================================================

/// Catalog identifier of a product.
///
/// Assigned by the session on creation: one more than the highest id the
/// session has ever assigned or seen. Never supplied by the caller.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies which payment the visible confirmation belongs to.
///
/// Every checkout bumps the session's payment generation. Whoever schedules
/// the revert keeps the token and hands it back when the window elapses; a
/// token from an older payment no longer matches and is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ConfirmationToken(pub u64);

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier within the session.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Unit price, always positive.
    pub price: Money,

    /// Image URL. Opaque to the core.
    pub image: String,

    /// Free-form description, never blank.
    pub description: String,
}

impl Product {
    pub(crate) fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Product {
            id,
            name: draft.name,
            price: draft.price,
            image: draft.image,
            description: draft.description,
        }
    }
}

// =============================================================================
// Product Draft
// =============================================================================

/// A product about to be added, before the session assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductDraft {
    pub name: String,
    pub price: Money,
    pub image: String,
    pub description: String,
}

impl ProductDraft {
    pub fn new(
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        ProductDraft {
            name: name.into(),
            price,
            image: image.into(),
            description: description.into(),
        }
    }
}

// =============================================================================
// Product Form
// =============================================================================

/// Product fields exactly as typed into the "new product" form.
///
/// All four fields are required and the price arrives as text. Use
/// [`ProductForm::parse`] to turn it into a [`ProductDraft`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
}

impl ProductForm {
    /// Validates every field and parses the price.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::ProductForm;
    ///
    /// let form = ProductForm {
    ///     name: "X".into(),
    ///     price: "abc".into(),
    ///     image: "u".into(),
    ///     description: "d".into(),
    /// };
    /// assert!(form.parse().is_err());
    /// ```
    pub fn parse(&self) -> Result<ProductDraft, ValidationError> {
        validation::validate_product_name(&self.name)?;
        let price = validation::parse_price(&self.price)?;
        validation::validate_image(&self.image)?;
        validation::validate_description(&self.description)?;

        Ok(ProductDraft::new(
            self.name.trim(),
            price,
            self.image.trim(),
            self.description.trim(),
        ))
    }
}

impl TryFrom<ProductForm> for ProductDraft {
    type Error = ValidationError;

    fn try_from(form: ProductForm) -> Result<Self, Self::Error> {
        form.parse()
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart with its requested quantity.
///
/// ## Snapshot Pattern
/// `product` is copied from the catalog when the line is created. Removing
/// the product from the catalog removes the line too, so a line never
/// outlives its product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    pub product: Product,

    /// Always at least 1.
    pub quantity: i64,
}

impl CartLine {
    pub(crate) fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
        }
    }

    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Store View
// =============================================================================

/// Everything the rendering surface draws, taken from one session snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StoreView {
    pub catalog: Vec<Product>,
    pub cart: Vec<CartLine>,
    pub total: Money,
    pub payment_confirmed: bool,
    /// Number of distinct products in the cart.
    pub item_count: usize,
    /// Sum of all line quantities.
    pub total_quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
