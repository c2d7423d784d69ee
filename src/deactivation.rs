//! Teardown run when the host switches the plugin off.

use crate::config::PluginSettings;
use crate::hooks::DEACTIVATED;
use hook_framework::Host;
use tracing::{info, instrument};

/// Reverses the plugin's process-wide side effects.
///
/// Needs nothing from the bootstrap, so it is safe to run even when the
/// plugin never finished constructing.
#[derive(Debug, Clone)]
pub struct DeactivationHandler {
    is_active_option: String,
}

impl DeactivationHandler {
    pub fn new(settings: &PluginSettings) -> Self {
        Self {
            is_active_option: settings.is_active_option(),
        }
    }

    /// Clears the active flag, flushes the routing cache and announces the
    /// deactivation, in that order.
    #[instrument(skip_all)]
    pub fn run(&self, host: &Host) {
        let was_active = host.delete_option(&self.is_active_option);
        host.flush_rewrite_rules();
        host.hooks().do_action(&DEACTIVATED, &());
        info!(was_active, "Plugin deactivated");
    }
}
