//! # Subscriptions Bootstrap Demo
//!
//! Runs the subscriptions plugin through a full lifecycle against the
//! reference host and logs every step.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p bootstrap-demo
//! SUBSCRIPTIONS_CONFIG=./subscriptions.toml cargo run -p bootstrap-demo
//! ```

use bootstrap_demo::{run_lifecycle, store_host};
use subscriptions_bootstrap::lifecycle::setup_tracing;
use subscriptions_bootstrap::{BootstrapError, PluginSettings};
use tracing::info;

fn main() -> Result<(), BootstrapError> {
    setup_tracing();

    let settings = PluginSettings::load(&["subscriptions.toml"])?;
    info!(version = %settings.version, plugin = %settings.plugin_file, "Starting demo");

    let host = store_host(&settings);
    let report = run_lifecycle(&host, settings)?;

    info!(
        subsystems = report.constructed.len(),
        statuses = ?report.statuses,
        state = %report.final_state,
        "Demo completed"
    );
    Ok(())
}
