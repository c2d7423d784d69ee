//! # Feature Gates
//!
//! A gate is a named predicate over the host environment that guards the
//! construction of an optional subsystem. Gates are evaluated each time the
//! guarded work is about to run and never cache their answer. Evaluating a
//! gate has no side effects beyond firing the extension points it reads.
//!
//! ```rust
//! use subscriptions_bootstrap::gates::FeatureGate;
//! use hook_framework::Host;
//!
//! let gate = FeatureGate::type_exists("query", "WC_Query");
//!
//! assert!(!gate.is_open(&Host::default()));
//! assert!(gate.is_open(&Host::builder().with_type("WC_Query").build()));
//! ```

use crate::config::PluginSettings;
use crate::hooks::LOAD_DEPRECATION_HANDLERS;
use hook_framework::{AdminNotice, FilterPoint, Host, NoticeKind};
use std::fmt;
use std::rc::Rc;
use tracing::debug;

/// Present on hosts whose query layer the subscriptions query handler extends.
pub const QUERY_TYPE: &str = "WC_Query";

/// Present on host versions with the privacy export/erasure framework.
pub const PRIVACY_BASE_TYPE: &str = "WC_Abstract_Privacy";

/// Declared by the standalone early renewal extension.
pub const EARLY_RENEWAL_EXTENSION_TYPE: &str = "WCS_Early_Renewal";

pub type GatePredicate = Rc<dyn Fn(&Host) -> bool>;

#[derive(Clone)]
pub struct FeatureGate {
    name: &'static str,
    predicate: GatePredicate,
}

impl FeatureGate {
    pub fn new(name: &'static str, predicate: impl Fn(&Host) -> bool + 'static) -> Self {
        Self {
            name,
            predicate: Rc::new(predicate),
        }
    }

    /// Open when the runtime provides `type_name`.
    pub fn type_exists(name: &'static str, type_name: &'static str) -> Self {
        Self::new(name, move |host| host.type_exists(type_name))
    }

    /// Open when `point`, seeded with `default`, returns `true`.
    pub fn filter_flag(name: &'static str, point: FilterPoint<bool>, default: bool) -> Self {
        Self::new(name, move |host| host.hooks().apply_filters(&point, default))
    }

    /// Open when the persisted option equals `expected`.
    pub fn option_equals(name: &'static str, option: String, expected: &'static str) -> Self {
        Self::new(name, move |host| {
            host.get_option(&option).as_deref() == Some(expected)
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_open(&self, host: &Host) -> bool {
        let open = (self.predicate)(host);
        debug!(gate = self.name, open, "Feature gate evaluated");
        open
    }
}

impl fmt::Debug for FeatureGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureGate").field("name", &self.name).finish()
    }
}

pub fn query_gate() -> FeatureGate {
    FeatureGate::type_exists("query_handler", QUERY_TYPE)
}

pub fn deprecation_gate() -> FeatureGate {
    FeatureGate::filter_flag("deprecation_handlers", LOAD_DEPRECATION_HANDLERS, false)
}

pub fn privacy_gate() -> FeatureGate {
    FeatureGate::type_exists("privacy_handler", PRIVACY_BASE_TYPE)
}

/// The two gates deciding how early renewal comes up.
#[derive(Debug, Clone)]
pub struct EarlyRenewalGates {
    /// Open when the standalone extension is active.
    pub conflict: FeatureGate,
    /// Open when the store enabled early renewal in the cart.
    pub enabled: FeatureGate,
}

impl EarlyRenewalGates {
    pub fn new(settings: &PluginSettings) -> Self {
        Self {
            conflict: FeatureGate::type_exists("early_renewal_conflict", EARLY_RENEWAL_EXTENSION_TYPE),
            enabled: FeatureGate::option_equals(
                "early_renewal_enabled",
                settings.early_renewal_option(),
                "yes",
            ),
        }
    }
}

/// Notice shown instead of the built-in early renewal when the standalone
/// extension is active.
pub fn early_renewal_conflict_notice(settings: &PluginSettings) -> AdminNotice {
    AdminNotice::new(
        NoticeKind::Error,
        format!(
            "<b>Warning!</b> We can see the <b>WooCommerce Subscriptions Early Renewal</b> plugin is \
             active. Version {} of <b>WooCommerce Subscriptions</b> comes with that plugin's \
             functionality packaged into the core plugin. Please deactivate WooCommerce \
             Subscriptions Early Renewal to avoid any conflicts.",
            settings.version
        ),
    )
    .with_action("Installed Plugins", settings.installed_plugins_url())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hook_framework::DEFAULT_PRIORITY;

    #[test]
    fn test_filter_flag_defaults_closed_and_is_reevaluated() {
        let host = Host::default();
        let gate = deprecation_gate();

        assert!(!gate.is_open(&host));
        host.hooks()
            .add_filter(&LOAD_DEPRECATION_HANDLERS, DEFAULT_PRIORITY, |_: bool| true)
            .unwrap();
        assert!(gate.is_open(&host));
        assert_eq!(host.hooks().fired_count(LOAD_DEPRECATION_HANDLERS.name()), 2);
    }

    #[test]
    fn test_option_gate_needs_exact_value() {
        let settings = PluginSettings::default();
        let gates = EarlyRenewalGates::new(&settings);
        let host = Host::default();

        assert!(!gates.enabled.is_open(&host));
        host.update_option(&settings.early_renewal_option(), "no");
        assert!(!gates.enabled.is_open(&host));
        host.update_option(&settings.early_renewal_option(), "yes");
        assert!(gates.enabled.is_open(&host));
    }

    #[test]
    fn test_conflict_notice_points_at_plugins_screen() {
        let notice = early_renewal_conflict_notice(&PluginSettings::default());

        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.content.contains("Version 4.0.0"));
        assert_eq!(notice.actions[0].name, "Installed Plugins");
        assert_eq!(notice.actions[0].url, "/wp-admin/plugins.php");
    }
}
