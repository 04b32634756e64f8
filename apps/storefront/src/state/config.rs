//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STOREFRONT_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use storefront_core::{Money, DEFAULT_CONFIRMATION_WINDOW_MS};
use tracing::warn;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name shown in the header
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// How long the payment confirmation stays up, in milliseconds
    pub confirmation_window_ms: u64,
}

impl Default for ConfigState {
    /// Returns default configuration.
    ///
    /// ## Default Values
    /// - Store: "Tienda Demo"
    /// - Currency: $
    /// - Confirmation window: 3 seconds
    fn default() -> Self {
        ConfigState {
            store_name: "Tienda Demo".to_string(),
            currency_symbol: "$".to_string(),
            confirmation_window_ms: DEFAULT_CONFIRMATION_WINDOW_MS,
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `STOREFRONT_STORE_NAME`: Override store name
    /// - `STOREFRONT_CURRENCY_SYMBOL`: Override currency symbol
    /// - `STOREFRONT_CONFIRMATION_MS`: Override confirmation window (e.g., "1500")
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("STOREFRONT_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(symbol) = lookup("STOREFRONT_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(window) = lookup("STOREFRONT_CONFIRMATION_MS") {
            match window.trim().parse::<u64>() {
                Ok(ms) => config.confirmation_window_ms = ms,
                Err(_) => warn!(
                    value = %window,
                    "Ignoring unparseable STOREFRONT_CONFIRMATION_MS"
                ),
            }
        }

        config
    }

    /// The confirmation window as a [`Duration`].
    pub fn confirmation_window(&self) -> Duration {
        Duration::from_millis(self.confirmation_window_ms)
    }

    /// Formats an amount with two decimals and the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_app::state::ConfigState;
    /// use storefront_core::Money;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.cents() < 0 { "-" } else { "" },
            self.currency_symbol,
            amount.dollars().abs(),
            amount.cents_part()
        )
    }
}
