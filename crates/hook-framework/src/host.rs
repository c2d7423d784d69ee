//! # Reference Host Runtime
//!
//! [`Host`] is an in-memory implementation of every service a plugin can ask
//! the host for: phase dispatch, the extension registry, entity-type and
//! status registration, lazily resolved data stores, a persisted option
//! store, the routing cache, admin notices, translation loading, and probes
//! for runtime types and user capabilities.
//!
//! The host is single-threaded. Plugins share it by reference; phase callbacks
//! receive `&Host` when they run, so no plugin needs to own it.
//!
//! ```rust
//! use hook_framework::{Host, Phase};
//!
//! let host = Host::builder()
//!     .with_type("WC_Query")
//!     .with_user_capability("manage_woocommerce")
//!     .build();
//!
//! host.bind(Phase::Init, 10, |host: &Host| {
//!     host.update_option("example_is_active", "yes");
//!     Ok(())
//! });
//!
//! host.run_sequence().unwrap();
//! assert_eq!(host.get_option("example_is_active").as_deref(), Some("yes"));
//! ```

use crate::error::HostError;
use crate::extension::{ActionPoint, ExtensionRegistry, FilterPoint};
use crate::phase::{Phase, PhaseDispatcher};
use crate::priority::HandlerId;
use crate::registration::{AdminNotice, EntityTypeDefinition, StatusDefinition};
use indexmap::IndexMap;
use std::cell::{Cell, OnceCell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tracing::{debug, error, info, instrument};

/// Entity key → implementation identifier.
pub type DataStoreMap = IndexMap<String, String>;

/// Filter through which plugins contribute data-store bindings.
pub const DATA_STORES: FilterPoint<DataStoreMap> = FilterPoint::new("woocommerce_data_stores");

/// Longest entity-type key the host accepts.
pub const MAX_ENTITY_TYPE_KEY: usize = 20;

/// Filter over the links shown under a plugin on the plugins screen.
pub fn plugin_action_links(basename: &str) -> FilterPoint<Vec<String>> {
    FilterPoint::named(format!("plugin_action_links_{basename}"))
}

/// Action fired when the plugins screen shows an available update.
pub fn plugin_update_message(basename: &str) -> ActionPoint<PluginUpdate> {
    ActionPoint::named(format!("in_plugin_update_message-{basename}"))
}

/// Arguments of [`plugin_update_message`]. Handlers write markup with
/// [`PluginUpdate::echo`].
#[derive(Debug)]
pub struct PluginUpdate {
    pub version: String,
    pub new_version: String,
    output: RefCell<String>,
}

impl PluginUpdate {
    pub fn new(version: impl Into<String>, new_version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            new_version: new_version.into(),
            output: RefCell::new(String::new()),
        }
    }

    pub fn echo(&self, markup: &str) {
        self.output.borrow_mut().push_str(markup);
    }

    pub fn output(&self) -> String {
        self.output.borrow().clone()
    }
}

/// The host runtime every plugin is loaded into.
pub struct Host {
    hooks: ExtensionRegistry,
    phases: PhaseDispatcher,
    entity_types: RefCell<IndexMap<String, EntityTypeDefinition>>,
    statuses: RefCell<IndexMap<String, StatusDefinition>>,
    core_data_stores: DataStoreMap,
    data_stores: OnceCell<DataStoreMap>,
    options: RefCell<HashMap<String, String>>,
    rewrite_flushes: Cell<usize>,
    notices: RefCell<Vec<AdminNotice>>,
    text_domains: RefCell<IndexMap<String, String>>,
    known_types: HashSet<String>,
    user_capabilities: HashSet<String>,
}

impl Default for Host {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Host {
    pub fn builder() -> HostBuilder {
        HostBuilder::default()
    }

    pub fn hooks(&self) -> &ExtensionRegistry {
        &self.hooks
    }

    // --- Phases ---

    pub fn sequence(&self) -> &[Phase] {
        self.phases.sequence()
    }

    /// Binds a callback to `phase` at `priority`.
    pub fn bind(
        &self,
        phase: Phase,
        priority: i32,
        callback: impl Fn(&Host) -> Result<(), HostError> + 'static,
    ) -> HandlerId {
        self.phases.bind(phase, priority, Rc::new(callback))
    }

    pub fn binding_count(&self, phase: Phase) -> usize {
        self.phases.binding_count(phase)
    }

    pub fn has_fired(&self, phase: Phase) -> bool {
        self.phases.has_fired(phase)
    }

    /// Fires `phase`. The first failing callback aborts the phase and its
    /// error is returned unchanged.
    #[instrument(skip(self))]
    pub fn run_phase(&self, phase: Phase) -> Result<(), HostError> {
        let callbacks = self.phases.begin(phase)?;
        info!(%phase, callbacks = callbacks.len(), "Phase started");
        for callback in callbacks {
            if let Err(e) = callback(self) {
                error!(%phase, error = %e, "Phase aborted");
                return Err(e);
            }
        }
        info!(%phase, "Phase complete");
        Ok(())
    }

    /// Fires every phase of the normal sequence that has not fired yet.
    pub fn run_sequence(&self) -> Result<(), HostError> {
        for phase in self.phases.sequence().to_vec() {
            if !self.has_fired(phase) {
                self.run_phase(phase)?;
            }
        }
        Ok(())
    }

    /// Sends the deactivation signal.
    pub fn deactivate(&self) -> Result<(), HostError> {
        self.run_phase(Phase::Deactivate)
    }

    // --- Entity types & statuses ---

    pub fn register_entity_type(
        &self,
        key: &str,
        definition: EntityTypeDefinition,
    ) -> Result<(), HostError> {
        if key.is_empty() || key.len() > MAX_ENTITY_TYPE_KEY {
            return Err(HostError::InvalidDefinition {
                key: key.to_owned(),
                reason: format!("key must be 1 to {MAX_ENTITY_TYPE_KEY} characters"),
            });
        }
        if definition.capability_type.trim().is_empty() {
            return Err(HostError::InvalidDefinition {
                key: key.to_owned(),
                reason: "capability type is empty".into(),
            });
        }
        let mut types = self.entity_types.borrow_mut();
        if types.contains_key(key) {
            return Err(HostError::DuplicateEntityType(key.to_owned()));
        }
        types.insert(key.to_owned(), definition);
        info!(key, "Entity type registered");
        Ok(())
    }

    pub fn entity_type(&self, key: &str) -> Option<EntityTypeDefinition> {
        self.entity_types.borrow().get(key).cloned()
    }

    /// Registers a status. Registering the same key again replaces it.
    pub fn register_status(&self, key: &str, definition: StatusDefinition) {
        debug!(key, label = %definition.label, "Status registered");
        self.statuses.borrow_mut().insert(key.to_owned(), definition);
    }

    pub fn status(&self, key: &str) -> Option<StatusDefinition> {
        self.statuses.borrow().get(key).cloned()
    }

    pub fn statuses(&self) -> IndexMap<String, StatusDefinition> {
        self.statuses.borrow().clone()
    }

    // --- Data stores ---

    /// Resolves the data-store map on first access by running the core map
    /// through [`DATA_STORES`]. Later calls reuse the committed map.
    pub fn data_stores(&self) -> DataStoreMap {
        self.data_stores
            .get_or_init(|| {
                let map = self.hooks.apply_filters(&DATA_STORES, self.core_data_stores.clone());
                info!(bindings = map.len(), "Data stores resolved");
                map
            })
            .clone()
    }

    pub fn data_store(&self, entity_key: &str) -> Option<String> {
        self.data_stores().get(entity_key).cloned()
    }

    // --- Options ---

    pub fn get_option(&self, name: &str) -> Option<String> {
        self.options.borrow().get(name).cloned()
    }

    pub fn update_option(&self, name: &str, value: impl Into<String>) {
        self.options.borrow_mut().insert(name.to_owned(), value.into());
    }

    /// Returns whether the option existed.
    pub fn delete_option(&self, name: &str) -> bool {
        self.options.borrow_mut().remove(name).is_some()
    }

    // --- Routing cache ---

    pub fn flush_rewrite_rules(&self) {
        self.rewrite_flushes.set(self.rewrite_flushes.get() + 1);
        info!(flushes = self.rewrite_flushes.get(), "Rewrite rules flushed");
    }

    pub fn rewrite_flush_count(&self) -> usize {
        self.rewrite_flushes.get()
    }

    // --- Notices & translations ---

    pub fn display_notice(&self, notice: AdminNotice) {
        info!(kind = ?notice.kind, "Admin notice displayed");
        self.notices.borrow_mut().push(notice);
    }

    pub fn notices(&self) -> Vec<AdminNotice> {
        self.notices.borrow().clone()
    }

    pub fn load_text_domain(&self, domain: &str, relative_path: &str) {
        info!(domain, path = relative_path, "Text domain loaded");
        self.text_domains
            .borrow_mut()
            .insert(domain.to_owned(), relative_path.to_owned());
    }

    pub fn text_domain_path(&self, domain: &str) -> Option<String> {
        self.text_domains.borrow().get(domain).cloned()
    }

    // --- Plugins screen ---

    /// Builds the link list shown under `basename` on the plugins screen.
    pub fn render_plugin_links(&self, basename: &str, links: Vec<String>) -> Vec<String> {
        self.hooks.apply_filters(&plugin_action_links(basename), links)
    }

    /// Collects the extra markup plugins add to an update row.
    pub fn render_update_message(&self, basename: &str, version: &str, new_version: &str) -> String {
        let update = PluginUpdate::new(version, new_version);
        self.hooks.do_action(&plugin_update_message(basename), &update);
        update.output()
    }

    // --- Environment probes ---

    /// Whether a named type (class) is available in this runtime.
    pub fn type_exists(&self, name: &str) -> bool {
        self.known_types.contains(name)
    }

    pub fn current_user_can(&self, capability: &str) -> bool {
        self.user_capabilities.contains(capability)
    }
}

/// Builds a [`Host`] with a chosen environment.
#[derive(Default)]
pub struct HostBuilder {
    sequence: Option<Vec<Phase>>,
    known_types: HashSet<String>,
    user_capabilities: HashSet<String>,
    core_data_stores: DataStoreMap,
    options: HashMap<String, String>,
}

impl HostBuilder {
    /// Overrides the normal phase sequence ([`Phase::SEQUENCE`]).
    pub fn with_sequence(mut self, sequence: Vec<Phase>) -> Self {
        self.sequence = Some(sequence);
        self
    }

    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.known_types.insert(name.into());
        self
    }

    pub fn with_user_capability(mut self, capability: impl Into<String>) -> Self {
        self.user_capabilities.insert(capability.into());
        self
    }

    pub fn with_data_store(mut self, key: impl Into<String>, class: impl Into<String>) -> Self {
        self.core_data_stores.insert(key.into(), class.into());
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> Host {
        let sequence = self.sequence.unwrap_or_else(|| Phase::SEQUENCE.to_vec());
        Host {
            hooks: ExtensionRegistry::new(),
            phases: PhaseDispatcher::new(sequence),
            entity_types: RefCell::new(IndexMap::new()),
            statuses: RefCell::new(IndexMap::new()),
            core_data_stores: self.core_data_stores,
            data_stores: OnceCell::new(),
            options: RefCell::new(self.options),
            rewrite_flushes: Cell::new(0),
            notices: RefCell::new(Vec::new()),
            text_domains: RefCell::new(IndexMap::new()),
            known_types: self.known_types,
            user_capabilities: self.user_capabilities,
        }
    }
}
