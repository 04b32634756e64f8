//! # Storefront App Library
//!
//! Shell around the pure storefront session: owns the live [`Session`],
//! publishes every new snapshot and runs the payment-confirmation timer.
//!
//! [`Session`]: storefront_core::Session
//!
//! ## Module Organization
//! ```text
//! storefront_app/
//! ├── lib.rs          ◄─── You are here (logging setup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── store.rs    ◄─── Live session, snapshot channel, revert timer
//! │   └── config.rs   ◄─── Configuration state
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── List, add and remove products
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   └── checkout.rs ◄─── Simulated payment
//! ├── demo.rs         ◄─── Scripted session used by the binary
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## State Management
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Management                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │         StoreState           │   │         ConfigState          │   │
//! │  │  • Current Session snapshot  │   │  • Store name                │   │
//! │  │  • StoreView watch channel   │   │  • Currency symbol           │   │
//! │  │  • Pending revert task       │   │  • Confirmation window       │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! │                                                                         │
//! │  Each command only takes the state it needs.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod demo;
pub mod error;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

use state::{ConfigState, StoreState};

/// Runs the storefront.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter                                │
/// │     • Default: INFO, can be overridden with RUST_LOG                    │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • STOREFRONT_* environment variables over defaults                  │
/// │                                                                         │
/// │  3. Initialize State ─────────────────────────────────────────────────► │
/// │     • StoreState seeded with the sample catalog                         │
/// │                                                                         │
/// │  4. Run the scripted session on the Tokio runtime ────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting storefront");

    let config = ConfigState::from_env();
    info!(
        store = %config.store_name,
        confirmation_ms = config.confirmation_window_ms,
        "Configuration loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let store = StoreState::new(config.confirmation_window());
        info!(products = store.view().catalog.len(), "State initialized");
        demo::walkthrough(&store, &config).await
    })?;

    info!("Storefront session finished");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_app=trace` - Show trace for this crate only
/// - Default: INFO, DEBUG for `storefront_app`
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,storefront_app=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
