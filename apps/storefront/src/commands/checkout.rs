//! # Checkout Commands
//!
//! Simulated payment. Nothing is charged: paying empties the cart and shows
//! a confirmation for the configured window.

use chrono::{DateTime, Utc};
use serde::Serialize;
use storefront_core::{ConfirmationToken, Money};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::{ConfigState, StoreState};

/// Receipt for a simulated payment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub receipt_id: Uuid,
    pub store_name: String,
    pub paid_at: DateTime<Utc>,
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
    /// Total formatted for display, e.g. "$299.95".
    pub formatted_total: String,
    /// Confirmation this payment raised.
    pub token: ConfirmationToken,
}

/// Whether the payment confirmation is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    pub confirmed: bool,
}

/// Pays for the cart.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  "Proceder al Pago" clicked                                            │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  cart empty? ──────────────► CART_ERROR (button is disabled anyway)    │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  cart cleared, confirmation shown, receipt returned                     │
/// │                    │                                                    │
/// │                    ▼  after confirmation window                         │
/// │  confirmation hidden                                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Must be called from within a Tokio runtime.
pub fn process_payment(
    store: &StoreState,
    config: &ConfigState,
) -> Result<PaymentReceipt, ApiError> {
    debug!("process_payment command");

    let checkout = store.process_payment().map_err(|e| {
        warn!(error = %e, "Checkout refused");
        ApiError::from(e)
    })?;

    let paid = checkout.paid;
    Ok(PaymentReceipt {
        receipt_id: Uuid::new_v4(),
        store_name: config.store_name.clone(),
        paid_at: Utc::now(),
        line_count: paid.item_count,
        total_quantity: paid.total_quantity,
        formatted_total: config.format_currency(paid.total),
        total: paid.total,
        token: checkout.token,
    })
}

/// Reports whether the confirmation is showing.
pub fn payment_status(store: &StoreState) -> PaymentStatus {
    PaymentStatus {
        confirmed: store.with_session(|s| s.payment_confirmed()),
    }
}
