//! # Session
//!
//! The session snapshot and every transition it supports.
//!
//! ## Snapshot Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One UI session, many snapshots                       │
//! │                                                                         │
//! │   Session::new() ── add_to_cart ──► s1 ── update_quantity ──► s2 ...   │
//! │     (seed, empty                                                        │
//! │      cart)          every transition borrows the current snapshot      │
//! │                     and returns a brand-new one; nothing observable    │
//! │                     is ever mutated in place                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transitions
//! ```text
//! add_product ─────────► catalog += draft (id assigned)    | ValidationError
//! remove_product ──────► catalog -= id, cart -= id         | no-op if absent
//! add_to_cart ─────────► line += 1 or new line (qty 1)     | no-op if absent
//! remove_from_cart ────► cart -= id                         | no-op if absent
//! update_quantity ─────► line.qty = n                       | no-op if n < 1
//! process_payment ─────► cart = [], confirmed = true, token
//! expire_confirmation ─► confirmed = false                  | no-op if stale
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;
use crate::money::Money;
use crate::seed;
use crate::types::{CartLine, ConfirmationToken, Product, ProductDraft, ProductId, StoreView};
use crate::validation;

// =============================================================================
// Action
// =============================================================================

/// A user action, as accepted by [`Session::apply`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    AddProduct(ProductDraft),
    RemoveProduct { product_id: ProductId },
    AddToCart { product_id: ProductId },
    RemoveFromCart { product_id: ProductId },
    UpdateQuantity { product_id: ProductId, quantity: i64 },
    ProcessPayment,
    ExpireConfirmation { token: ConfirmationToken },
}

// =============================================================================
// Session
// =============================================================================

/// Catalog, cart and payment confirmation for one UI session.
///
/// ## Invariants
/// - Product ids are unique and never reused
/// - At most one cart line per product id
/// - Every cart line refers to a product still in the catalog
/// - Every cart line has quantity ≥ 1
/// - `payment_confirmed` implies `confirmation` is the latest payment token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    catalog: Vec<Product>,
    cart: Vec<CartLine>,
    payment_confirmed: bool,
    confirmation: Option<ConfirmationToken>,
    payments_processed: u64,
    /// Highest id ever assigned or seeded, so removed ids are not handed out
    /// again.
    last_assigned_id: u64,
}

impl Session {
    /// Starts a session with the sample catalog and an empty cart.
    pub fn new() -> Self {
        Session::from_catalog(seed::sample_catalog())
    }

    /// Starts a session with a given catalog and an empty cart.
    ///
    /// ## Errors
    /// [`ValidationError`](crate::ValidationError) if a product would not pass
    /// [`Session::add_product`], or if two products share an id.
    pub fn with_catalog(catalog: Vec<Product>) -> CoreResult<Self> {
        validation::validate_catalog(&catalog)?;
        Ok(Session::from_catalog(catalog))
    }

    fn from_catalog(catalog: Vec<Product>) -> Self {
        let last_assigned_id = catalog.iter().map(|p| p.id.0).max().unwrap_or(0);
        Session {
            catalog,
            cart: Vec::new(),
            payment_confirmed: false,
            confirmation: None,
            payments_processed: 0,
            last_assigned_id,
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn cart(&self) -> &[CartLine] {
        &self.cart
    }

    pub fn payment_confirmed(&self) -> bool {
        self.payment_confirmed
    }

    /// Token of the payment whose confirmation is currently showing.
    pub fn confirmation(&self) -> Option<ConfirmationToken> {
        self.confirmation
    }

    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.catalog.iter().find(|p| p.id == id)
    }

    pub fn cart_line(&self, id: ProductId) -> Option<&CartLine> {
        self.cart.iter().find(|line| line.product_id() == id)
    }

    /// Number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.cart.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.cart
            .iter()
            .fold(0i64, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of price × quantity over every cart line. Zero for an empty cart.
    pub fn compute_total(&self) -> Money {
        self.cart.iter().map(CartLine::line_total).sum()
    }

    pub fn is_cart_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Read model for the rendering surface.
    pub fn view(&self) -> StoreView {
        StoreView {
            catalog: self.catalog.clone(),
            cart: self.cart.clone(),
            total: self.compute_total(),
            payment_confirmed: self.payment_confirmed,
            item_count: self.item_count(),
            total_quantity: self.total_quantity(),
        }
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Dispatches an [`Action`] to the matching transition.
    ///
    /// Only `AddProduct` can fail; every other action always yields a
    /// snapshot, possibly identical to `self`.
    pub fn apply(&self, action: Action) -> CoreResult<Session> {
        let next = match action {
            Action::AddProduct(draft) => self.add_product(draft)?,
            Action::RemoveProduct { product_id } => self.remove_product(product_id),
            Action::AddToCart { product_id } => self.add_to_cart_by_id(product_id),
            Action::RemoveFromCart { product_id } => self.remove_from_cart(product_id),
            Action::UpdateQuantity {
                product_id,
                quantity,
            } => self.update_quantity(product_id, quantity),
            Action::ProcessPayment => self.process_payment().0,
            Action::ExpireConfirmation { token } => self.expire_confirmation(token),
        };
        Ok(next)
    }

    /// Adds a product to the end of the catalog.
    ///
    /// The draft is validated again here, whatever the caller already
    /// checked. On failure no snapshot is produced.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::{Money, ProductDraft, ProductId, Session};
    ///
    /// let draft = ProductDraft::new("Lámpara", Money::from_cents(2450), "u", "d");
    /// let session = Session::new().add_product(draft).unwrap();
    /// assert_eq!(session.catalog().last().unwrap().id, ProductId(7));
    /// ```
    pub fn add_product(&self, draft: ProductDraft) -> CoreResult<Session> {
        validation::validate_draft(&draft)?;

        let id = self.next_product_id();
        let mut next = self.clone();
        next.last_assigned_id = id.0;
        next.catalog.push(Product::from_draft(id, draft));
        Ok(next)
    }

    /// Removes a product from the catalog and any cart line that refers to it.
    pub fn remove_product(&self, id: ProductId) -> Session {
        let mut next = self.clone();
        next.catalog.retain(|p| p.id != id);
        next.cart.retain(|line| line.product_id() != id);
        next
    }

    /// Puts one more unit of `product` in the cart.
    ///
    /// The catalog is authoritative: the line snapshots the catalog's entry
    /// for `product.id`, and a product no longer in the catalog is ignored.
    pub fn add_to_cart(&self, product: &Product) -> Session {
        self.add_to_cart_by_id(product.id)
    }

    fn add_to_cart_by_id(&self, id: ProductId) -> Session {
        let Some(product) = self.find_product(id) else {
            return self.clone();
        };

        let mut next = self.clone();
        match next.cart.iter_mut().find(|line| line.product_id() == id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => next.cart.push(CartLine::new(product.clone())),
        }
        next
    }

    /// Removes the cart line for `id`, if there is one.
    pub fn remove_from_cart(&self, id: ProductId) -> Session {
        let mut next = self.clone();
        next.cart.retain(|line| line.product_id() != id);
        next
    }

    /// Sets the quantity of an existing line.
    ///
    /// A quantity below one is refused and the snapshot is returned
    /// unchanged. Removing a line takes [`Session::remove_from_cart`].
    pub fn update_quantity(&self, id: ProductId, quantity: i64) -> Session {
        let mut next = self.clone();
        if validation::validate_quantity(quantity).is_err() {
            return next;
        }

        if let Some(line) = next.cart.iter_mut().find(|line| line.product_id() == id) {
            line.quantity = quantity;
        }
        next
    }

    /// Checks out: empties the cart and raises the confirmation flag.
    ///
    /// Returns the new snapshot and the token the scheduler must hand back to
    /// [`Session::expire_confirmation`] once the confirmation window is over.
    /// A later payment issues a new token, which invalidates this one.
    pub fn process_payment(&self) -> (Session, ConfirmationToken) {
        let token = ConfirmationToken(self.payments_processed + 1);

        let mut next = self.clone();
        next.cart.clear();
        next.payment_confirmed = true;
        next.confirmation = Some(token);
        next.payments_processed = token.0;
        (next, token)
    }

    /// Lowers the confirmation flag raised by the payment that issued `token`.
    ///
    /// Stale tokens and repeated deliveries are no-ops.
    pub fn expire_confirmation(&self, token: ConfirmationToken) -> Session {
        let mut next = self.clone();
        if next.confirmation == Some(token) {
            next.payment_confirmed = false;
            next.confirmation = None;
        }
        next
    }

    fn next_product_id(&self) -> ProductId {
        let max_existing = self.catalog.iter().map(|p| p.id.0).max().unwrap_or(0);
        ProductId(max_existing.max(self.last_assigned_id) + 1)
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};
    use crate::types::ProductForm;

    fn product(session: &Session, id: u64) -> Product {
        session.find_product(ProductId(id)).unwrap().clone()
    }

    fn draft(name: &str, cents: i64) -> ProductDraft {
        ProductDraft::new(name, Money::from_cents(cents), "https://example.com/x.png", "desc")
    }

    fn quantities(session: &Session) -> Vec<(u64, i64)> {
        session
            .cart()
            .iter()
            .map(|line| (line.product_id().0, line.quantity))
            .collect()
    }

    #[test]
    fn test_new_session_has_seed_catalog_and_empty_cart() {
        let session = Session::new();
        assert_eq!(session.catalog().len(), 6);
        assert!(session.is_cart_empty());
        assert!(!session.payment_confirmed());
        assert_eq!(session.confirmation(), None);
    }

    #[test]
    fn test_add_product_assigns_next_id() {
        let session = Session::new().add_product(draft("A", 100)).unwrap();
        let session = session.add_product(draft("B", 200)).unwrap();

        let ids: Vec<u64> = session.catalog().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(session.catalog()[7].name, "B");
    }

    #[test]
    fn test_add_product_on_empty_catalog_starts_at_one() {
        let session = Session::with_catalog(Vec::new())
            .unwrap()
            .add_product(draft("A", 100))
            .unwrap();
        assert_eq!(session.catalog()[0].id, ProductId(1));
    }

    #[test]
    fn test_add_product_does_not_reuse_removed_max_id() {
        let session = Session::new()
            .add_product(draft("A", 100))
            .unwrap()
            .remove_product(ProductId(7));

        let session = session.add_product(draft("B", 100)).unwrap();
        assert_eq!(session.catalog().last().unwrap().id, ProductId(8));
    }

    #[test]
    fn test_add_product_max_plus_one_after_removing_lower_id() {
        let session = Session::new().remove_product(ProductId(2));
        let session = session.add_product(draft("A", 100)).unwrap();
        assert_eq!(session.catalog().last().unwrap().id, ProductId(7));
    }

    #[test]
    fn test_with_catalog_rejects_duplicate_ids() {
        let mut catalog = seed::sample_catalog();
        let mut copy = catalog[0].clone();
        copy.name = "Otro".to_string();
        catalog.push(copy);

        let err = Session::with_catalog(catalog).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::InvalidFormat { ref field, .. }) if field == "id"
        ));
    }

    #[test]
    fn test_with_catalog_rejects_non_positive_price() {
        let mut catalog = seed::sample_catalog();
        catalog[2].price = Money::zero();

        let err = Session::with_catalog(catalog).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_with_catalog_accepts_sample_catalog() {
        let session = Session::with_catalog(seed::sample_catalog()).unwrap();
        assert_eq!(session, Session::new());
    }

    #[test]
    fn test_add_product_rejects_invalid_draft() {
        let session = Session::new();

        let err = session.add_product(draft("A", 0)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));

        let err = session.add_product(draft("   ", 100)).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { .. })
        ));

        assert_eq!(session.catalog().len(), 6);
    }

    #[test]
    fn test_add_product_from_form_with_bad_price() {
        let form = ProductForm {
            name: "X".to_string(),
            price: "abc".to_string(),
            image: "u".to_string(),
            description: "d".to_string(),
        };
        let session = Session::new();

        let result = form
            .parse()
            .map_err(CoreError::from)
            .and_then(|d| session.add_product(d));

        assert!(matches!(
            result,
            Err(CoreError::Validation(ValidationError::InvalidFormat { .. }))
        ));
        assert_eq!(session.catalog(), Session::new().catalog());
    }

    #[test]
    fn test_add_to_cart_twice_yields_one_line() {
        let session = Session::new();
        let p1 = product(&session, 1);

        let session = session.add_to_cart(&p1).add_to_cart(&p1);
        assert_eq!(quantities(&session), vec![(1, 2)]);
    }

    #[test]
    fn test_add_to_cart_preserves_first_add_order() {
        let session = Session::new();
        let (p3, p1) = (product(&session, 3), product(&session, 1));

        let session = session.add_to_cart(&p3).add_to_cart(&p1).add_to_cart(&p3);
        assert_eq!(quantities(&session), vec![(3, 2), (1, 1)]);
    }

    #[test]
    fn test_add_then_update_quantity_scenario() {
        let session = Session::new();
        let p1 = product(&session, 1);

        let session = session
            .add_to_cart(&p1)
            .add_to_cart(&p1)
            .update_quantity(ProductId(1), 5);

        assert_eq!(quantities(&session), vec![(1, 5)]);
        assert_eq!(session.compute_total(), p1.price.multiply_quantity(5));
        assert_eq!(session.compute_total().cents(), 29995);
    }

    #[test]
    fn test_remove_from_cart_scenario() {
        let session = Session::new();
        let (p2, p3) = (product(&session, 2), product(&session, 3));

        let session = session
            .add_to_cart(&p2)
            .add_to_cart(&p3)
            .remove_from_cart(ProductId(2));

        assert_eq!(quantities(&session), vec![(3, 1)]);
    }

    #[test]
    fn test_remove_from_cart_unknown_id_is_noop() {
        let session = Session::new();
        let p1 = product(&session, 1);
        let session = session.add_to_cart(&p1);

        assert_eq!(session.remove_from_cart(ProductId(42)), session);
    }

    #[test]
    fn test_update_quantity_below_one_is_ignored() {
        let session = Session::new();
        let p1 = product(&session, 1);
        let session = session.add_to_cart(&p1).add_to_cart(&p1);

        assert_eq!(quantities(&session.update_quantity(ProductId(1), 0)), vec![(1, 2)]);
        assert_eq!(quantities(&session.update_quantity(ProductId(1), -1)), vec![(1, 2)]);
    }

    #[test]
    fn test_update_quantity_without_line_is_noop() {
        let session = Session::new();
        assert_eq!(session.update_quantity(ProductId(1), 3), session);
    }

    #[test]
    fn test_remove_product_cascades_to_cart() {
        let session = Session::new();
        let (p1, p2) = (product(&session, 1), product(&session, 2));

        let session = session
            .add_to_cart(&p1)
            .add_to_cart(&p2)
            .remove_product(ProductId(1));

        assert!(session.find_product(ProductId(1)).is_none());
        assert_eq!(quantities(&session), vec![(2, 1)]);

        // the removed product can no longer be added
        let session = session.add_to_cart(&p1);
        assert_eq!(quantities(&session), vec![(2, 1)]);
    }

    #[test]
    fn test_remove_product_unknown_id_is_noop() {
        let session = Session::new();
        assert_eq!(session.remove_product(ProductId(99)), session);
    }

    #[test]
    fn test_cart_line_keeps_catalog_snapshot() {
        let session = Session::new();
        let mut stale = product(&session, 4);
        stale.price = Money::from_cents(1);

        let session = session.add_to_cart(&stale);
        assert_eq!(session.cart()[0].product.price.cents(), 29999);
    }

    #[test]
    fn test_compute_total() {
        let session = Session::new();
        assert!(session.compute_total().is_zero());

        let (p1, p6) = (product(&session, 1), product(&session, 6));
        let session = session
            .add_to_cart(&p1)
            .add_to_cart(&p6)
            .update_quantity(ProductId(6), 3);

        assert_eq!(session.compute_total().cents(), 5999 + 3 * 3999);
        assert_eq!(session.total_quantity(), 4);
        assert_eq!(session.item_count(), 2);
    }

    #[test]
    fn test_process_payment_clears_cart_and_confirms() {
        let session = Session::new();
        let p1 = product(&session, 1);
        let before = session.add_to_cart(&p1);

        let (paid, token) = before.process_payment();
        assert!(paid.is_cart_empty());
        assert!(paid.payment_confirmed());
        assert_eq!(paid.confirmation(), Some(token));
        assert_eq!(paid.catalog(), before.catalog());

        let expired = paid.expire_confirmation(token);
        assert!(!expired.payment_confirmed());
        assert_eq!(expired.catalog(), before.catalog());
        assert!(expired.is_cart_empty());
    }

    #[test]
    fn test_stale_token_does_not_clear_newer_confirmation() {
        let (first, old_token) = Session::new().process_payment();
        let (second, new_token) = first.process_payment();
        assert_ne!(old_token, new_token);

        let after_old = second.expire_confirmation(old_token);
        assert!(after_old.payment_confirmed());

        let after_new = after_old.expire_confirmation(new_token);
        assert!(!after_new.payment_confirmed());

        // repeated delivery is harmless
        assert_eq!(after_new.expire_confirmation(new_token), after_new);
    }

    #[test]
    fn test_transitions_leave_previous_snapshot_untouched() {
        let original = Session::new();
        let p1 = product(&original, 1);
        let copy = original.clone();

        let _ = original.add_to_cart(&p1);
        let _ = original.remove_product(ProductId(2));
        let _ = original.process_payment();

        assert_eq!(original, copy);
    }

    #[test]
    fn test_apply_dispatches_actions() {
        let session = Session::new();
        let session = session
            .apply(Action::AddToCart {
                product_id: ProductId(5),
            })
            .unwrap()
            .apply(Action::UpdateQuantity {
                product_id: ProductId(5),
                quantity: 2,
            })
            .unwrap();
        assert_eq!(quantities(&session), vec![(5, 2)]);

        let paid = session.apply(Action::ProcessPayment).unwrap();
        let token = paid.confirmation().unwrap();
        let cleared = paid
            .apply(Action::ExpireConfirmation { token })
            .unwrap();
        assert!(!cleared.payment_confirmed());

        let err = cleared.apply(Action::AddProduct(draft("", 100)));
        assert!(err.is_err());
    }

    #[test]
    fn test_view_mirrors_snapshot() {
        let session = Session::new();
        let p2 = product(&session, 2);
        let session = session.add_to_cart(&p2);

        let view = session.view();
        assert_eq!(view.catalog.len(), 6);
        assert_eq!(view.cart, session.cart());
        assert_eq!(view.total.cents(), 12999);
        assert_eq!(view.item_count, 1);
        assert!(!view.payment_confirmed);
    }
}
