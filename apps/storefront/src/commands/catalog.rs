//! # Catalog Commands
//!
//! List, add and remove products.

use storefront_core::{Action, Product, ProductForm, ProductId, StoreView};
use tracing::{debug, warn};

use super::dispatch_infallible;
use crate::error::ApiError;
use crate::state::StoreState;

/// Returns the catalog in insertion order.
pub fn list_products(store: &StoreState) -> Vec<Product> {
    debug!("list_products command");
    store.with_session(|s| s.catalog().to_vec())
}

/// Adds a product entered through the "new product" form.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  User fills name, price, image URL, description and submits            │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ProductForm::parse()  ── blank field / bad price ──► VALIDATION_ERROR │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  Action::AddProduct(draft) ── id = max + 1, appended to catalog        │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  StoreView with the new product last in the catalog                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn add_product(store: &StoreState, form: ProductForm) -> Result<StoreView, ApiError> {
    debug!(name = %form.name, price = %form.price, "add_product command");

    let draft = form.parse().map_err(|e| {
        warn!(field = e.field(), error = %e, "Rejected product form");
        ApiError::from(e)
    })?;

    Ok(store.dispatch(Action::AddProduct(draft))?)
}

/// Removes a product and any cart line that refers to it.
///
/// Unknown ids are a no-op.
pub fn remove_product(store: &StoreState, product_id: ProductId) -> StoreView {
    debug!(product_id = %product_id, "remove_product command");
    dispatch_infallible(store, Action::RemoveProduct { product_id })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::time::Duration;

    fn store() -> StoreState {
        StoreState::new(Duration::from_secs(3))
    }

    fn form(price: &str) -> ProductForm {
        ProductForm {
            name: "Lámpara LED".to_string(),
            price: price.to_string(),
            image: "https://example.com/lamp.png".to_string(),
            description: "Lámpara de escritorio regulable".to_string(),
        }
    }

    #[test]
    fn test_add_product_appends_with_next_id() {
        let store = store();
        let view = add_product(&store, form("24.50")).unwrap();

        let added = view.catalog.last().unwrap();
        assert_eq!(added.id, ProductId(7));
        assert_eq!(added.price.cents(), 2450);
        assert_eq!(list_products(&store).len(), 7);
    }

    #[test]
    fn test_add_product_with_bad_price_is_rejected() {
        let store = store();
        let err = add_product(&store, form("abc")).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.field.as_deref(), Some("price"));
        assert_eq!(list_products(&store).len(), 6);
    }

    #[test]
    fn test_remove_product_unknown_id_is_noop() {
        let store = store();
        let before = store.view();
        assert_eq!(remove_product(&store, ProductId(99)), before);
    }
}
