//! # Hook Framework
//!
//! This crate is the **host side** of a plugin runtime: the part that owns the
//! lifecycle, fires named phases, and exposes typed extension points that
//! plugins use to cooperate without knowing about each other.
//!
//! ## Why typed hooks?
//!
//! Classic hook systems key everything by string and pass untyped values.
//! Here every point carries its value type:
//!
//! - [`FilterPoint<T>`]: handlers take a `T` and return the next `T`
//! - [`ActionPoint<A>`]: handlers observe `&A` and return nothing
//!
//! The name still identifies the point (so independent crates can meet on
//! it), but the first registration fixes its kind and type, and a mismatched
//! registration is rejected instead of silently misbehaving at runtime.
//!
//! ## Architecture Overview
//!
//! 1. **Ordering Layer** ([`HandlerList`]): ascending priority, stable ties
//! 2. **Extension Layer** ([`ExtensionRegistry`]): filters and actions
//! 3. **Lifecycle Layer** ([`PhaseDispatcher`]): phases fired once, in order
//! 4. **Host Services** ([`Host`]): registration calls, options, routing
//!    cache, notices, translations, environment probes
//!
//! ## Quick Example
//!
//! ```rust
//! use hook_framework::{ActionPoint, FilterPoint, Host, Phase, DEFAULT_PRIORITY};
//!
//! const LABEL: FilterPoint<String> = FilterPoint::new("example_label");
//! const READY: ActionPoint<()> = ActionPoint::new("example_ready");
//!
//! let host = Host::default();
//!
//! // A third party overrides the label.
//! host.hooks()
//!     .add_filter(&LABEL, DEFAULT_PRIORITY, |label: String| label.to_uppercase())
//!     .unwrap();
//!
//! // The plugin computes its label during init.
//! host.bind(Phase::Init, 5, |host: &Host| {
//!     let label = host.hooks().apply_filters(&LABEL, "subscriptions".to_string());
//!     assert_eq!(label, "SUBSCRIPTIONS");
//!     host.hooks().do_action(&READY, &());
//!     Ok(())
//! });
//!
//! host.run_sequence().unwrap();
//! assert_eq!(host.hooks().fired_count(READY.name()), 1);
//! ```
//!
//! ## Concurrency Model
//!
//! Everything is single-threaded and synchronous. Shared state sits behind
//! `RefCell`, and no borrow is held while user callbacks run, so callbacks
//! may freely register further handlers or bindings.
//!
//! ## Testing
//!
//! See the [`mock`] module for [`CallLog`](mock::CallLog) and
//! [`RecordingFactory`](mock::RecordingFactory).

pub mod error;
pub mod extension;
pub mod host;
pub mod mock;
pub mod phase;
pub mod priority;
pub mod registration;
pub mod subsystem;
pub mod tracing;

pub use error::HostError;
pub use extension::{ActionPoint, ExtensionRegistry, FilterPoint, PointKind};
pub use host::{
    plugin_action_links, plugin_update_message, DataStoreMap, Host, HostBuilder, PluginUpdate,
    DATA_STORES,
};
pub use phase::{Phase, PhaseCallback, PhaseDispatcher};
pub use priority::{HandlerId, HandlerList, DEFAULT_PRIORITY};
pub use registration::{
    AdminNotice, EntityLabels, EntityTypeDefinition, LabelCount, MenuPlacement, NoticeAction,
    NoticeKind, OrderTypeFlags, StatusDefinition, Visibility,
};
pub use subsystem::{Subsystem, SubsystemFactory};
