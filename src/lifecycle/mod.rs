//! # Lifecycle
//!
//! The orchestrator ([`SubscriptionsPlugin`]) and its state machine.
//!
//! ## Binding table
//!
//! | Phase | Priority | Work |
//! |-------|----------|------|
//! | construct | | init timestamp, construct-stage subsystems, hook wiring |
//! | `Init` | 3 | load translations |
//! | `Init` | 6 | register the subscription entity type |
//! | `Init` | 9 | register subscription statuses |
//! | `Init` | 10 | always-on subsystems, then scheduler and cache |
//! | `Init` | 11 | PayPal Standard and admin manager |
//! | `AfterSetupTheme` | 11 | upgrader |
//! | `PluginsLoaded` | 10 | version-dependent subsystems, gates, early renewal |
//! | `PluginsLoaded` | 11 | related-order and customer stores |
//! | `Deactivate` | 10 | [`DeactivationHandler`](crate::deactivation::DeactivationHandler) |
//!
//! Logging is set up by the binary through [`setup_tracing`].

mod plugin;
mod state;

pub use hook_framework::tracing::setup_tracing;
pub use plugin::{Collaborators, SubscriptionsPlugin};
pub use state::{init_timestamp, BootstrapState};
