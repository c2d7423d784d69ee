use super::state::{init_timestamp, BootstrapState};
use crate::admin;
use crate::config::PluginSettings;
use crate::data_stores;
use crate::deactivation::DeactivationHandler;
use crate::error::BootstrapError;
use crate::gates::{early_renewal_conflict_notice, EarlyRenewalGates};
use crate::hooks::EARLY_RENEWAL_CONFLICT;
use crate::model::{CanonicalStatuses, StatusLabelSource};
use crate::registrar::{AvailabilityProbe, Registrar};
use crate::subsystems::{ids, BootstrapPlan, PhaseGroup, PlanEntry, SchedulerRegistry, DEFAULT_SCHEDULER};
use hook_framework::{
    plugin_action_links, plugin_update_message, Host, HostError, Phase, PluginUpdate, Subsystem,
    SubsystemFactory, DEFAULT_PRIORITY,
};
use indexmap::IndexMap;
use std::cell::{Cell, OnceCell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, instrument, warn};

/// External collaborators the plugin is composed from.
///
/// Only the subsystem factory is mandatory. The defaults register the
/// action scheduler under [`DEFAULT_SCHEDULER`], use the canonical status
/// labels and report that no subscriptions exist yet.
pub struct Collaborators {
    pub factory: Box<dyn SubsystemFactory>,
    pub schedulers: SchedulerRegistry,
    pub statuses: Box<dyn StatusLabelSource>,
    pub availability: AvailabilityProbe,
}

impl Collaborators {
    /// Defaults around `factory`.
    ///
    /// The default availability probe always answers "no subscriptions",
    /// so the entity type carries the guided empty-list message until a
    /// real probe is supplied through [`with_availability`](Self::with_availability)
    /// or a handler on [`NOT_EMPTY`](crate::hooks::NOT_EMPTY) says otherwise.
    pub fn new(factory: impl SubsystemFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            schedulers: SchedulerRegistry::new()
                .register_subsystem(DEFAULT_SCHEDULER, ids::ACTION_SCHEDULER),
            statuses: Box::new(CanonicalStatuses),
            availability: Rc::new(|_: &Host| false),
        }
    }

    pub fn with_schedulers(mut self, schedulers: SchedulerRegistry) -> Self {
        self.schedulers = schedulers;
        self
    }

    pub fn with_status_source(mut self, source: impl StatusLabelSource + 'static) -> Self {
        self.statuses = Box::new(source);
        self
    }

    pub fn with_availability(mut self, probe: impl Fn(&Host) -> bool + 'static) -> Self {
        self.availability = Rc::new(probe);
        self
    }
}

/// The composition root of the subscriptions plugin.
///
/// `SubscriptionsPlugin` is responsible for:
/// - **Construction**: building the construct-stage subsystems synchronously
/// - **Phase Wiring**: binding every later step to the host's phases
/// - **Gating**: constructing optional subsystems only when their gate is open
/// - **Teardown**: running the [`DeactivationHandler`] on the host's signal
///
/// # Architecture
///
/// The plugin never fires a phase. [`bootstrap`](Self::bootstrap) binds
/// closures holding an `Rc` of the plugin to the host; the host calls them
/// back with `&Host` when it fires each phase.
///
/// # Example
///
/// ```rust
/// use hook_framework::mock::RecordingFactory;
/// use hook_framework::Host;
/// use subscriptions_bootstrap::lifecycle::{BootstrapState, Collaborators, SubscriptionsPlugin};
/// use subscriptions_bootstrap::PluginSettings;
///
/// let host = Host::default();
/// let plugin = SubscriptionsPlugin::new(
///     PluginSettings::default(),
///     Collaborators::new(RecordingFactory::new()),
/// );
///
/// plugin.bootstrap(&host).unwrap();
/// host.run_sequence().unwrap();
///
/// assert_eq!(plugin.state(), BootstrapState::Steady);
/// assert!(host.entity_type("shop_subscription").is_some());
/// ```
pub struct SubscriptionsPlugin {
    settings: Rc<PluginSettings>,
    plan: BootstrapPlan,
    factory: Box<dyn SubsystemFactory>,
    schedulers: SchedulerRegistry,
    registrar: Registrar,
    deactivation: DeactivationHandler,
    early_renewal: EarlyRenewalGates,
    state: Cell<BootstrapState>,
    started_at: Cell<Option<i64>>,
    subsystems: RefCell<IndexMap<String, Box<dyn Subsystem>>>,
    scheduler: OnceCell<(String, Box<dyn Subsystem>)>,
}

impl SubscriptionsPlugin {
    /// Composes the plugin with the shipped [`BootstrapPlan`].
    pub fn new(settings: PluginSettings, collaborators: Collaborators) -> Rc<Self> {
        Self::with_plan(settings, collaborators, BootstrapPlan::subscriptions())
    }

    pub fn with_plan(
        settings: PluginSettings,
        collaborators: Collaborators,
        plan: BootstrapPlan,
    ) -> Rc<Self> {
        let settings = Rc::new(settings);
        Rc::new(Self {
            registrar: Registrar::new(
                Rc::clone(&settings),
                collaborators.statuses,
                collaborators.availability,
            ),
            deactivation: DeactivationHandler::new(&settings),
            early_renewal: EarlyRenewalGates::new(&settings),
            plan,
            factory: collaborators.factory,
            schedulers: collaborators.schedulers,
            state: Cell::new(BootstrapState::Unstarted),
            started_at: Cell::new(None),
            subsystems: RefCell::new(IndexMap::new()),
            scheduler: OnceCell::new(),
            settings,
        })
    }

    /// Runs the construct stage and binds everything else to `host`.
    ///
    /// This method:
    /// 1. Captures the process init timestamp
    /// 2. Constructs every construct-stage subsystem, in plan order
    /// 3. Binds the registrar, the plan's phase groups, the singletons, early
    ///    renewal and deactivation to the host's phases
    /// 4. Attaches the data-store and plugins-screen handlers
    ///
    /// Can only run once per plugin instance.
    #[instrument(skip_all, fields(version = %self.settings.version))]
    pub fn bootstrap(self: &Rc<Self>, host: &Host) -> Result<(), BootstrapError> {
        if self.state.get() != BootstrapState::Unstarted {
            return Err(BootstrapError::AlreadyBootstrapped);
        }
        self.enter(BootstrapState::Constructing);
        let started_at = init_timestamp();
        self.started_at.set(Some(started_at));
        info!(started_at, "Bootstrap started");

        // =====================================================================
        // Step 1: Construct-stage subsystems
        // =====================================================================

        for entry in self.plan.construct_entries() {
            self.run_entry(host, entry)?;
        }

        // =====================================================================
        // Step 2: Phase bindings and hooks
        // =====================================================================

        self.bind_phases(host);
        self.attach_hooks(host)?;

        info!(
            constructed = self.subsystems.borrow().len(),
            "Bootstrap complete, waiting for host phases"
        );
        Ok(())
    }

    fn bind_phases(self: &Rc<Self>, host: &Host) {
        // State markers bracket the host's sequence.
        let sequence = host.sequence().to_vec();
        for phase in sequence.iter().copied() {
            let plugin = Rc::clone(self);
            host.bind(phase, i32::MIN, move |_: &Host| {
                plugin.enter(BootstrapState::Phase(phase));
                Ok(())
            });
        }
        if let Some(last) = sequence.last().copied() {
            let plugin = Rc::clone(self);
            host.bind(last, i32::MAX, move |_: &Host| {
                plugin.enter(BootstrapState::Steady);
                Ok(())
            });
        }

        self.bind_step(host, Phase::Init, 3, |plugin, host| {
            plugin.registrar.load_text_domain(host);
            Ok(())
        });
        self.bind_step(host, Phase::Init, 6, |plugin, host| {
            Ok(plugin.registrar.register_entity_type(host)?)
        });
        self.bind_step(host, Phase::Init, 9, |plugin, host| {
            plugin.registrar.register_statuses(host);
            Ok(())
        });

        for PhaseGroup {
            phase,
            priority,
            entries,
        } in self.plan.phase_groups()
        {
            self.bind_step(host, phase, priority, move |plugin, host| {
                for entry in &entries {
                    plugin.run_entry(host, entry)?;
                }
                Ok(())
            });
        }

        // Bound after the plan so they run after same-priority groups.
        self.bind_step(host, Phase::Init, DEFAULT_PRIORITY, |plugin, host| {
            plugin.bind_singletons(host)
        });
        self.bind_step(host, Phase::PluginsLoaded, DEFAULT_PRIORITY, |plugin, host| {
            plugin.init_early_renewal(host)
        });

        let plugin = Rc::clone(self);
        host.bind(Phase::Deactivate, DEFAULT_PRIORITY, move |host: &Host| {
            plugin.deactivate(host);
            Ok(())
        });
    }

    /// Binds a unit of bootstrap work. Once the plugin is deactivated the
    /// step still fires but does nothing.
    fn bind_step(
        self: &Rc<Self>,
        host: &Host,
        phase: Phase,
        priority: i32,
        step: impl Fn(&Self, &Host) -> Result<(), BootstrapError> + 'static,
    ) {
        let plugin = Rc::clone(self);
        host.bind(phase, priority, move |host: &Host| {
            if plugin.state().is_terminal() {
                debug!(%phase, priority, "Plugin deactivated, step skipped");
                return Ok(());
            }
            Ok(step(&*plugin, host)?)
        });
    }

    fn attach_hooks(&self, host: &Host) -> Result<(), HostError> {
        data_stores::attach(host)?;

        let basename = &self.settings.plugin_file;
        let settings = Rc::clone(&self.settings);
        host.hooks().add_filter(
            &plugin_action_links(basename),
            DEFAULT_PRIORITY,
            move |links: Vec<String>| admin::action_links(&settings, links),
        )?;
        let settings = Rc::clone(&self.settings);
        host.hooks().add_action(
            &plugin_update_message(basename),
            DEFAULT_PRIORITY,
            move |update: &PluginUpdate| admin::update_notice(&settings, update),
        )?;
        Ok(())
    }

    fn enter(&self, next: BootstrapState) {
        let current = self.state.get();
        if current.is_terminal() && !next.is_terminal() {
            debug!(%current, ignored = %next, "Plugin already deactivated");
            return;
        }
        debug!(from = %current, to = %next, "State changed");
        self.state.set(next);
    }

    fn run_entry(&self, host: &Host, entry: &PlanEntry) -> Result<(), BootstrapError> {
        if let Some(gate) = &entry.gate {
            if !gate.is_open(host) {
                info!(gate = gate.name(), subsystems = ?entry.ids, "Gate closed, skipping");
                return Ok(());
            }
        }
        for id in &entry.ids {
            self.construct(host, id)?;
        }
        Ok(())
    }

    /// Builds and initializes subsystem `id` unless it already exists.
    /// Returns whether anything was constructed.
    fn construct(&self, host: &Host, id: &str) -> Result<bool, BootstrapError> {
        if self.state().is_terminal() {
            debug!(subsystem = id, "Plugin deactivated, not constructing");
            return Ok(false);
        }
        if self.subsystems.borrow().contains_key(id) {
            debug!(subsystem = id, "Already constructed");
            return Ok(false);
        }
        let mut subsystem = self
            .factory
            .build(id)
            .ok_or_else(|| BootstrapError::UnknownSubsystem(id.to_owned()))?;
        // No borrow is held while the subsystem talks to the host.
        subsystem.initialize(host)?;
        self.subsystems.borrow_mut().insert(id.to_owned(), subsystem);
        debug!(subsystem = id, "Subsystem constructed");
        Ok(true)
    }

    fn bind_singletons(&self, host: &Host) -> Result<(), BootstrapError> {
        if self.scheduler.get().is_none() {
            let (name, mut scheduler) = self.schedulers.resolve(host, self.factory.as_ref())?;
            scheduler.initialize(host)?;
            // Only Init reaches here, and Init fires once.
            let _ = self.scheduler.set((name, scheduler));
        }
        self.construct(host, ids::CACHE_MANAGER)?;
        Ok(())
    }

    /// Either shows the conflict notice or brings up the built-in early
    /// renewal, never both.
    fn init_early_renewal(&self, host: &Host) -> Result<(), BootstrapError> {
        if self.early_renewal.conflict.is_open(host) {
            warn!("Standalone early renewal extension is active, built-in early renewal disabled");
            let notice = early_renewal_conflict_notice(&self.settings);
            host.display_notice(notice.clone());
            host.hooks().do_action(&EARLY_RENEWAL_CONFLICT, &notice);
            return Ok(());
        }
        self.construct(host, ids::EARLY_RENEWAL_MANAGER)?;
        if self.early_renewal.enabled.is_open(host) {
            self.construct(host, ids::CART_EARLY_RENEWAL)?;
        }
        Ok(())
    }

    /// Runs the deactivation handler. Works in any state, including before
    /// [`bootstrap`](Self::bootstrap).
    pub fn deactivate(&self, host: &Host) {
        self.enter(BootstrapState::Deactivating);
        self.deactivation.run(host);
        self.enter(BootstrapState::Stopped);
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    pub fn plan(&self) -> &BootstrapPlan {
        &self.plan
    }

    pub fn state(&self) -> BootstrapState {
        self.state.get()
    }

    /// The init timestamp, once bootstrapped.
    pub fn started_at(&self) -> Option<i64> {
        self.started_at.get()
    }

    /// Subsystem ids in construction order.
    pub fn constructed(&self) -> Vec<String> {
        self.subsystems.borrow().keys().cloned().collect()
    }

    pub fn is_constructed(&self, id: &str) -> bool {
        self.subsystems.borrow().contains_key(id)
    }

    pub fn scheduler_name(&self) -> Option<&str> {
        self.scheduler.get().map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hook_framework::mock::RecordingFactory;

    fn plugin_with(factory: RecordingFactory, plan: BootstrapPlan) -> Rc<SubscriptionsPlugin> {
        SubscriptionsPlugin::with_plan(PluginSettings::default(), Collaborators::new(factory), plan)
    }

    #[test]
    fn test_bootstrap_only_once() {
        let host = Host::default();
        let plugin = plugin_with(RecordingFactory::new(), BootstrapPlan::new());

        plugin.bootstrap(&host).unwrap();
        assert!(matches!(
            plugin.bootstrap(&host),
            Err(BootstrapError::AlreadyBootstrapped)
        ));
        assert!(plugin.started_at().is_some());
    }

    #[test]
    fn test_construction_is_idempotent_per_id() {
        let host = Host::default();
        let factory = RecordingFactory::new();
        let log = factory.log();
        let plan = BootstrapPlan::new()
            .with(PlanEntry::construct(&["cart", "order"]))
            .with(PlanEntry::construct(&["cart"]));
        let plugin = plugin_with(factory, plan);

        plugin.bootstrap(&host).unwrap();

        assert_eq!(plugin.constructed(), vec!["cart", "order"]);
        assert_eq!(log.count("construct:cart"), 1);
    }

    #[test]
    fn test_unknown_construct_subsystem_fails_bootstrap() {
        let host = Host::default();
        let plan = BootstrapPlan::new().with(PlanEntry::construct(&["missing"]));
        let plugin = plugin_with(RecordingFactory::new().without("missing"), plan);

        let err = plugin.bootstrap(&host).unwrap_err();
        assert!(matches!(err, BootstrapError::UnknownSubsystem(id) if id == "missing"));
        assert_eq!(plugin.state(), BootstrapState::Constructing);
    }

    #[test]
    fn test_default_probe_shows_guided_empty_message() {
        let host = Host::default();
        let plugin = plugin_with(RecordingFactory::new(), BootstrapPlan::new());
        plugin.bootstrap(&host).unwrap();
        host.run_phase(Phase::Init).unwrap();

        let not_found = host.entity_type("shop_subscription").unwrap().labels.not_found;
        assert!(not_found.contains("Add a subscription product"));

        let host = Host::default();
        let collaborators = Collaborators::new(RecordingFactory::new()).with_availability(|_: &Host| true);
        let plugin =
            SubscriptionsPlugin::with_plan(PluginSettings::default(), collaborators, BootstrapPlan::new());
        plugin.bootstrap(&host).unwrap();
        host.run_phase(Phase::Init).unwrap();

        let not_found = host.entity_type("shop_subscription").unwrap().labels.not_found;
        assert_eq!(not_found, "No Subscriptions found");
    }

    #[test]
    fn test_failing_phase_subsystem_aborts_phase() {
        let host = Host::default();
        let plan = BootstrapPlan::new().with(PlanEntry::at(Phase::Init, 10, &["broken", "after"]));
        let factory = RecordingFactory::new().fail_initialize("broken");
        let plugin = plugin_with(factory, plan);

        plugin.bootstrap(&host).unwrap();
        let err = host.run_phase(Phase::Init).unwrap_err();

        assert!(matches!(err, HostError::Callback(_)));
        assert!(!plugin.is_constructed("after"));
        assert!(plugin.scheduler_name().is_none());
    }
}
