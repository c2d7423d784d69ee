//! Pluggable scheduler selection.
//!
//! Schedulers are registered by name. During `Init` the plugin asks
//! [`SCHEDULER`] which name to use and builds that one, once.

use crate::error::BootstrapError;
use crate::hooks::SCHEDULER;
use hook_framework::{Host, Subsystem, SubsystemFactory};
use indexmap::IndexMap;
use std::rc::Rc;
use tracing::info;

pub const DEFAULT_SCHEDULER: &str = "WCS_Action_Scheduler";

/// Builds a scheduler, optionally through the plugin's subsystem factory.
pub type SchedulerFactory = Rc<dyn Fn(&dyn SubsystemFactory) -> Option<Box<dyn Subsystem>>>;

#[derive(Clone, Default)]
pub struct SchedulerRegistry {
    factories: IndexMap<String, SchedulerFactory>,
}

impl SchedulerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a factory under `name`, replacing any previous one.
    pub fn register(
        mut self,
        name: impl Into<String>,
        factory: impl Fn(&dyn SubsystemFactory) -> Option<Box<dyn Subsystem>> + 'static,
    ) -> Self {
        self.factories.insert(name.into(), Rc::new(factory));
        self
    }

    /// Registers `name` as the subsystem `id` of the plugin's factory.
    pub fn register_subsystem(self, name: impl Into<String>, id: &'static str) -> Self {
        self.register(name, move |factory| factory.build(id))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Picks the scheduler name through [`SCHEDULER`] and builds it.
    pub fn resolve(
        &self,
        host: &Host,
        subsystems: &dyn SubsystemFactory,
    ) -> Result<(String, Box<dyn Subsystem>), BootstrapError> {
        let name = host
            .hooks()
            .apply_filters(&SCHEDULER, DEFAULT_SCHEDULER.to_owned());
        let factory = self
            .factories
            .get(&name)
            .ok_or_else(|| BootstrapError::UnknownScheduler(name.clone()))?;
        let scheduler = factory(subsystems).ok_or_else(|| BootstrapError::UnknownScheduler(name.clone()))?;
        info!(scheduler = %name, "Scheduler resolved");
        Ok((name, scheduler))
    }
}

impl std::fmt::Debug for SchedulerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.factories.keys()).finish()
    }
}
