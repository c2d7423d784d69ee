//! # Subscriptions Bootstrap
//!
//! > **The composition root of a subscriptions plugin.**
//!
//! This crate brings a large plugin up inside a host with a phase-driven
//! lifecycle. It constructs dozens of independent subsystems, binds each one
//! to a host phase at a priority, and registers the plugin's entity type,
//! statuses and data stores through typed extension points that third
//! parties can override.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Explicit composition root
//! Nothing here is a global. The scheduler, the status label source, the
//! availability probe and the subsystem factory are handed to
//! [`SubscriptionsPlugin`] through [`Collaborators`], so every dependency is
//! visible and replaceable in tests.
//!
//! ### Order is data
//! What comes up when is a [`BootstrapPlan`](subsystems::BootstrapPlan): a list
//! of entries with a stage, a priority and an optional
//! [`FeatureGate`](gates::FeatureGate). The orchestrator only interprets it.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Orchestrator ([`lifecycle`])
//! - **Role**: Runs the construct stage and binds everything else to host phases.
//! - **Key items**: [`SubscriptionsPlugin`], [`BootstrapState`].
//!
//! ### 2. The Registrars ([`registrar`], [`data_stores`])
//! - **Role**: Register the entity type, statuses, translations and data-store bindings.
//! - **Key items**: [`Registrar`](registrar::Registrar), [`contribute_bindings`](data_stores::contribute_bindings).
//!
//! ### 3. Decisions ([`gates`], [`subsystems`])
//! - **Role**: Decide which optional subsystems exist and which scheduler is used.
//!
//! ### 4. Surfaces ([`hooks`], [`admin`], [`deactivation`])
//! - **Role**: The extension points the plugin fires, the plugins-screen
//!   integration and the teardown contract.
//!
//! ## 🚀 Quick Start
//!
//! ```rust
//! use hook_framework::mock::RecordingFactory;
//! use hook_framework::Host;
//! use subscriptions_bootstrap::{Collaborators, PluginSettings, SubscriptionsPlugin};
//!
//! let host = Host::builder().with_type("WC_Query").build();
//! let factory = RecordingFactory::new();
//! let log = factory.log();
//!
//! let plugin = SubscriptionsPlugin::new(PluginSettings::default(), Collaborators::new(factory));
//! plugin.bootstrap(&host).unwrap();
//! host.run_sequence().unwrap();
//!
//! assert!(plugin.is_constructed("query"));
//! assert_eq!(
//!     host.data_store("subscription").as_deref(),
//!     Some("WCS_Subscription_Data_Store_CPT")
//! );
//! assert!(log.contains("construct:cache_manager"));
//!
//! host.deactivate().unwrap();
//! ```
//!
//! ## Observability
//!
//! Every step logs through `tracing` with structured fields. Binaries call
//! [`setup_tracing`](lifecycle::setup_tracing) and filter with `RUST_LOG`.

pub mod admin;
pub mod config;
pub mod data_stores;
pub mod deactivation;
pub mod error;
pub mod gates;
pub mod hooks;
pub mod lifecycle;
pub mod model;
pub mod registrar;
pub mod subsystems;

pub use config::{ConfigError, PluginSettings};
pub use error::BootstrapError;
pub use lifecycle::{BootstrapState, Collaborators, SubscriptionsPlugin};
