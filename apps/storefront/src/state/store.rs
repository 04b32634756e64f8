//! # Store State
//!
//! Owns the one [`Session`] of this process and everything around it that
//! is not pure: the lock, snapshot publication and the confirmation timer.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store State Operations                               │
//! │                                                                         │
//! │  Command                 StoreState                 Session (core)      │
//! │  ───────                 ──────────                 ──────────────      │
//! │                                                                         │
//! │  add_to_cart ──────────► dispatch(Action) ────────► session.apply()    │
//! │                            │ swap in new snapshot                       │
//! │                            └► views.send_replace(view)                  │
//! │                                                                         │
//! │  process_payment ──────► process_payment() ───────► process_payment()  │
//! │                            │ abort pending revert                       │
//! │                            └► spawn: sleep(window) ─► expire(token)    │
//! │                                                                         │
//! │  NOTE: the session lock is held while the snapshot is swapped and       │
//! │        published, so subscribers see views in invocation order.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Repeated Payments
//! A new payment cancels the pending revert and schedules a fresh one
//! (cancel-and-reschedule). A revert that escapes cancellation still carries
//! the older token, which the session ignores.
//!
//! The pending revert remembers its token. Scheduling only ever replaces an
//! older one, so a payment whose scheduling runs late cannot cancel the
//! revert of a newer payment.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::Serialize;
use storefront_core::{Action, ConfirmationToken, CoreError, CoreResult, Session, StoreView};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// What was paid for, captured just before the cart was cleared.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    /// View of the session as it was at checkout.
    pub paid: StoreView,

    /// Token of the confirmation this payment raised.
    pub token: ConfirmationToken,
}

/// Shared handle to the session.
///
/// Cloning is cheap; every clone talks to the same session.
#[derive(Debug, Clone)]
pub struct StoreState {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    session: Mutex<Session>,
    views: watch::Sender<StoreView>,
    pending_revert: Mutex<Option<(ConfirmationToken, JoinHandle<()>)>>,
    confirmation_window: Duration,
}

impl StoreState {
    /// Creates a store over a fresh seeded session.
    pub fn new(confirmation_window: Duration) -> Self {
        Self::from_session(Session::new(), confirmation_window)
    }

    /// Creates a store over an existing session snapshot.
    pub fn from_session(session: Session, confirmation_window: Duration) -> Self {
        let (views, _) = watch::channel(session.view());
        StoreState {
            inner: Arc::new(Inner {
                session: Mutex::new(session),
                views,
                pending_revert: Mutex::new(None),
                confirmation_window,
            }),
        }
    }

    /// Executes a function with read access to the current snapshot.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = store.with_session(|s| s.compute_total());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = lock(&self.inner.session);
        f(&session)
    }

    /// Current read model.
    pub fn view(&self) -> StoreView {
        self.with_session(Session::view)
    }

    /// Receiver that is notified with every new view.
    pub fn subscribe(&self) -> watch::Receiver<StoreView> {
        self.inner.views.subscribe()
    }

    /// Applies one action and returns the resulting view.
    ///
    /// `ProcessPayment` is routed through [`StoreState::process_payment`] so
    /// that it always schedules its revert.
    pub fn dispatch(&self, action: Action) -> CoreResult<StoreView> {
        match action {
            Action::ProcessPayment => {
                self.process_payment()?;
                Ok(self.view())
            }
            other => self.transition(|session| session.apply(other)),
        }
    }

    /// Checks out the cart and schedules the confirmation revert.
    ///
    /// ## Errors
    /// [`CoreError::CartEmpty`] if there is nothing to pay for.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn process_payment(&self) -> CoreResult<Checkout> {
        let checkout = {
            let mut session = lock(&self.inner.session);
            if session.is_cart_empty() {
                return Err(CoreError::CartEmpty);
            }

            let paid = session.view();
            let (next, token) = session.process_payment();
            *session = next;
            self.inner.views.send_replace(session.view());
            Checkout { paid, token }
        };

        info!(
            token = checkout.token.0,
            total = %checkout.paid.total,
            lines = checkout.paid.item_count,
            "Payment processed"
        );

        self.schedule_revert(checkout.token);
        Ok(checkout)
    }

    /// Lowers the confirmation raised by the payment that issued `token`.
    ///
    /// Called by the revert task; a stale token leaves the session as is.
    pub fn expire_confirmation(&self, token: ConfirmationToken) -> StoreView {
        let mut session = lock(&self.inner.session);
        let next = session.expire_confirmation(token);
        if next == *session {
            debug!(token = token.0, "Stale confirmation revert ignored");
            return session.view();
        }

        *session = next;
        let view = session.view();
        self.inner.views.send_replace(view.clone());
        info!(token = token.0, "Payment confirmation cleared");
        view
    }

    fn transition<F>(&self, f: F) -> CoreResult<StoreView>
    where
        F: FnOnce(&Session) -> CoreResult<Session>,
    {
        let mut session = lock(&self.inner.session);
        let next = f(&session)?;
        *session = next;
        let view = session.view();
        self.inner.views.send_replace(view.clone());
        Ok(view)
    }

    fn schedule_revert(&self, token: ConfirmationToken) {
        let mut pending = lock(&self.inner.pending_revert);
        if let Some((scheduled, _)) = pending.as_ref() {
            if *scheduled >= token {
                debug!(
                    token = token.0,
                    scheduled = scheduled.0,
                    "Superseded confirmation revert not scheduled"
                );
                return;
            }
        }

        let store = self.clone();
        let window = self.inner.confirmation_window;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(window).await;
            store.expire_confirmation(token);
        });

        if let Some((_, previous)) = pending.replace((token, handle)) {
            previous.abort();
            debug!(token = token.0, "Rescheduled confirmation revert");
        }
    }
}

/// Locks a mutex, recovering the data if a previous holder panicked.
///
/// Every critical section swaps in a fully built snapshot, so the guarded
/// value is consistent even after a panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_core::{Money, ProductDraft, ProductId};

    const WINDOW: Duration = Duration::from_millis(3000);

    fn add(store: &StoreState, id: u64) -> StoreView {
        store
            .dispatch(Action::AddToCart {
                product_id: ProductId(id),
            })
            .unwrap()
    }

    #[test]
    fn test_dispatch_updates_view() {
        let store = StoreState::new(WINDOW);
        add(&store, 1);
        let view = add(&store, 1);

        assert_eq!(view.cart.len(), 1);
        assert_eq!(view.cart[0].quantity, 2);
        assert_eq!(store.view(), view);
    }

    #[test]
    fn test_dispatch_rejected_draft_keeps_state() {
        let store = StoreState::new(WINDOW);
        let before = store.view();

        let bad = ProductDraft::new("X", Money::zero(), "u", "d");
        assert!(store.dispatch(Action::AddProduct(bad)).is_err());
        assert_eq!(store.view(), before);
    }

    #[test]
    fn test_subscribers_see_each_change() {
        let store = StoreState::new(WINDOW);
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        add(&store, 2);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().cart.len(), 1);

        store
            .dispatch(Action::RemoveProduct {
                product_id: ProductId(2),
            })
            .unwrap();
        let view = rx.borrow_and_update().clone();
        assert!(view.cart.is_empty());
        assert_eq!(view.catalog.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_checkout_is_rejected() {
        let store = StoreState::new(WINDOW);
        assert_eq!(store.process_payment().unwrap_err(), CoreError::CartEmpty);
        assert!(!store.view().payment_confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_reverts_after_window() {
        let store = StoreState::new(WINDOW);
        add(&store, 1);
        add(&store, 4);

        let checkout = store.process_payment().unwrap();
        assert_eq!(checkout.paid.total.cents(), 5999 + 29999);
        assert_eq!(checkout.paid.item_count, 2);

        let view = store.view();
        assert!(view.cart.is_empty());
        assert!(view.payment_confirmed);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(store.view().payment_confirmed);

        tokio::time::sleep(Duration::from_millis(2)).await;
        let view = store.view();
        assert!(!view.payment_confirmed);
        assert_eq!(view.catalog.len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_payment_restarts_window() {
        let store = StoreState::new(WINDOW);
        add(&store, 1);
        store.process_payment().unwrap();

        tokio::time::sleep(Duration::from_millis(2000)).await;
        add(&store, 2);
        let second = store.process_payment().unwrap();

        // the first window has elapsed; the second has not
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(store.view().payment_confirmed);
        assert_eq!(
            store.with_session(|s| s.confirmation()),
            Some(second.token)
        );

        tokio::time::sleep(Duration::from_millis(1501)).await;
        assert!(!store.view().payment_confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_expiry_is_ignored() {
        let store = StoreState::new(WINDOW);
        add(&store, 3);
        let first = store.process_payment().unwrap();
        add(&store, 3);
        store.process_payment().unwrap();

        let view = store.expire_confirmation(first.token);
        assert!(view.payment_confirmed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_scheduling_of_older_payment_keeps_newer_revert() {
        let store = StoreState::new(WINDOW);
        add(&store, 1);

        // first payment swaps its snapshot in but has not scheduled yet
        let first = {
            let mut session = lock(&store.inner.session);
            let (next, token) = session.process_payment();
            *session = next;
            token
        };

        add(&store, 2);
        let second = store.process_payment().unwrap();
        assert!(second.token > first);

        store.schedule_revert(first);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(!store.view().payment_confirmed);
        assert_eq!(store.with_session(|s| s.confirmation()), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_process_payment_schedules_revert() {
        let store = StoreState::new(WINDOW);
        add(&store, 5);

        let view = store.dispatch(Action::ProcessPayment).unwrap();
        assert!(view.payment_confirmed);

        tokio::time::sleep(WINDOW + Duration::from_millis(1)).await;
        assert!(!store.view().payment_confirmed);
    }
}
