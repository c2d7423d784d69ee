//! # Bootstrap Demo Library
//!
//! Wiring used by the demo binary, exposed for integration testing: a
//! subsystem factory whose subsystems only log, and a host configured like a
//! typical store.

use hook_framework::{Host, HostError, Subsystem, SubsystemFactory};
use subscriptions_bootstrap::gates::{PRIVACY_BASE_TYPE, QUERY_TYPE};
use subscriptions_bootstrap::model::MANAGE_STORE_CAPABILITY;
use subscriptions_bootstrap::{
    BootstrapError, BootstrapState, Collaborators, PluginSettings, SubscriptionsPlugin,
};
use tracing::{info, info_span};

/// A subsystem that announces itself and does nothing else.
pub struct LoggingSubsystem {
    id: String,
}

impl Subsystem for LoggingSubsystem {
    fn name(&self) -> &str {
        &self.id
    }

    fn initialize(&mut self, _host: &Host) -> Result<(), HostError> {
        info!(subsystem = %self.id, "Subsystem initialized");
        Ok(())
    }
}

/// Builds a [`LoggingSubsystem`] for every id.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingFactory;

impl SubsystemFactory for LoggingFactory {
    fn build(&self, id: &str) -> Option<Box<dyn Subsystem>> {
        Some(Box::new(LoggingSubsystem { id: id.to_owned() }))
    }
}

/// A store with a current host version and an administrator logged in.
pub fn store_host(settings: &PluginSettings) -> Host {
    Host::builder()
        .with_type(QUERY_TYPE)
        .with_type(PRIVACY_BASE_TYPE)
        .with_user_capability(MANAGE_STORE_CAPABILITY)
        .with_data_store("order", "WC_Order_Data_Store_CPT")
        .with_data_store("product", "WC_Product_Data_Store_CPT")
        .with_option(settings.is_active_option(), "true")
        .build()
}

/// What a demo run produced.
#[derive(Debug)]
pub struct DemoReport {
    pub constructed: Vec<String>,
    pub statuses: Vec<String>,
    pub data_stores: usize,
    pub final_state: BootstrapState,
}

/// Bootstraps the plugin, fires every phase, then deactivates.
pub fn run_lifecycle(host: &Host, settings: PluginSettings) -> Result<DemoReport, BootstrapError> {
    let plugin = SubscriptionsPlugin::new(settings, Collaborators::new(LoggingFactory));

    info_span!("construct").in_scope(|| plugin.bootstrap(host))?;
    info_span!("phases").in_scope(|| host.run_sequence())?;

    let data_stores = host.data_stores().len();
    let statuses = host.statuses().keys().cloned().collect();
    let constructed = plugin.constructed();
    info!(subsystems = constructed.len(), data_stores, "Plugin is steady");

    info_span!("deactivate").in_scope(|| host.deactivate())?;

    Ok(DemoReport {
        constructed,
        statuses,
        data_stores,
        final_state: plugin.state(),
    })
}
