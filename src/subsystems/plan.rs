//! The bootstrap plan: which subsystem comes up when.

use crate::gates::{deprecation_gate, privacy_gate, query_gate, FeatureGate};
use hook_framework::{Phase, DEFAULT_PRIORITY};

/// When a plan entry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// During the synchronous bootstrap call.
    Construct,
    /// When the host fires the phase.
    Phase(Phase),
}

/// One or more subsystems constructed together, optionally behind a gate.
#[derive(Debug, Clone)]
pub struct PlanEntry {
    pub ids: Vec<&'static str>,
    pub stage: Stage,
    pub priority: i32,
    pub gate: Option<FeatureGate>,
}

impl PlanEntry {
    pub fn new(stage: Stage, priority: i32, ids: &[&'static str]) -> Self {
        Self {
            ids: ids.to_vec(),
            stage,
            priority,
            gate: None,
        }
    }

    pub fn construct(ids: &[&'static str]) -> Self {
        Self::new(Stage::Construct, 0, ids)
    }

    pub fn at(phase: Phase, priority: i32, ids: &[&'static str]) -> Self {
        Self::new(Stage::Phase(phase), priority, ids)
    }

    /// Guards the whole entry with `gate`, evaluated once per run.
    pub fn gated(mut self, gate: FeatureGate) -> Self {
        self.gate = Some(gate);
        self
    }
}

/// Entries that share a phase and priority, in plan order.
#[derive(Debug, Clone)]
pub struct PhaseGroup {
    pub phase: Phase,
    pub priority: i32,
    pub entries: Vec<PlanEntry>,
}

/// Ordered list of plan entries. Order inside one stage and priority is the
/// construction order.
#[derive(Debug, Clone, Default)]
pub struct BootstrapPlan {
    entries: Vec<PlanEntry>,
}

impl BootstrapPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, entry: PlanEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn entries(&self) -> &[PlanEntry] {
        &self.entries
    }

    /// Every subsystem id named by the plan.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().flat_map(|e| e.ids.iter().copied())
    }

    pub fn construct_entries(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|e| e.stage == Stage::Construct)
    }

    /// Phase entries grouped by `(phase, priority)`, groups in order of
    /// first appearance.
    pub fn phase_groups(&self) -> Vec<PhaseGroup> {
        let mut groups: Vec<PhaseGroup> = Vec::new();
        for entry in &self.entries {
            let Stage::Phase(phase) = entry.stage else {
                continue;
            };
            match groups
                .iter_mut()
                .find(|g| g.phase == phase && g.priority == entry.priority)
            {
                Some(group) => group.entries.push(entry.clone()),
                None => groups.push(PhaseGroup {
                    phase,
                    priority: entry.priority,
                    entries: vec![entry.clone()],
                }),
            }
        }
        groups
    }

    /// The shipped layout of the subscriptions plugin.
    pub fn subscriptions() -> Self {
        Self::new()
            .with(PlanEntry::construct(&[
                "coupon",
                "product",
                "admin",
                "manager",
                "cart",
                "cart_validator",
                "order",
                "renewal_order",
                "checkout",
            ]))
            .with(PlanEntry::at(
                Phase::Init,
                DEFAULT_PRIORITY,
                &[
                    "email",
                    "addresses",
                    "change_payment_gateway",
                    "payment_gateways",
                    "paypal_standard_change_payment_method",
                    "switcher",
                    "tracker",
                    "upgrade_logger",
                    "cart_renewal",
                    "cart_resubscribe",
                    "cart_initial_payment",
                    "download_handler",
                    "retry_manager",
                    "cart_switch",
                    "limiter",
                    "admin_system_status",
                    "upgrade_notice_manager",
                    "staging",
                    "permalink_manager",
                    "custom_order_item_manager",
                    "early_renewal_modal_handler",
                    "dependent_hook_manager",
                    "admin_product_import_export_manager",
                    "frontend_scripts",
                    "synchroniser",
                ],
            ))
            .with(PlanEntry::at(Phase::Init, 11, &["paypal_standard_subscriptions", "wc_admin_manager"]))
            .with(PlanEntry::at(Phase::AfterSetupTheme, 11, &["upgrader"]))
            .with(PlanEntry::at(
                Phase::PluginsLoaded,
                DEFAULT_PRIORITY,
                &[
                    "admin_post_types",
                    "admin_meta_boxes",
                    "admin_reports",
                    "report_cache_manager",
                    "webhooks",
                    "auth",
                    "api",
                    "template_loader",
                    "remove_item",
                    "user_change_status_handler",
                    "my_account_payment_methods",
                    "my_account_auto_renew_toggle",
                    "deprecated_filter_hooks",
                ],
            ))
            .with(PlanEntry::at(Phase::PluginsLoaded, DEFAULT_PRIORITY, &["query"]).gated(query_gate()))
            .with(PlanEntry::at(
                Phase::PluginsLoaded,
                DEFAULT_PRIORITY,
                &["failed_scheduled_action_manager"],
            ))
            .with(
                PlanEntry::at(
                    Phase::PluginsLoaded,
                    DEFAULT_PRIORITY,
                    &[
                        "action_deprecator",
                        "filter_deprecator",
                        "dynamic_action_deprecator",
                        "dynamic_filter_deprecator",
                    ],
                )
                .gated(deprecation_gate()),
            )
            .with(PlanEntry::at(Phase::PluginsLoaded, DEFAULT_PRIORITY, &["privacy"]).gated(privacy_gate()))
            .with(PlanEntry::at(
                Phase::PluginsLoaded,
                11,
                &["related_order_store", "customer_store"],
            ))
    }
}
