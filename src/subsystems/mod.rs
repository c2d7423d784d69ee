//! Everything the orchestrator needs to know about subsystems: when they
//! come up ([`plan`]) and how the scheduler is chosen ([`scheduler`]).

pub mod plan;
pub mod scheduler;

pub use plan::{BootstrapPlan, PhaseGroup, PlanEntry, Stage};
pub use scheduler::{SchedulerFactory, SchedulerRegistry, DEFAULT_SCHEDULER};

/// Subsystems the orchestrator builds itself rather than through the plan.
pub mod ids {
    pub const ACTION_SCHEDULER: &str = "action_scheduler";
    pub const CACHE_MANAGER: &str = "cache_manager";
    pub const EARLY_RENEWAL_MANAGER: &str = "early_renewal_manager";
    pub const CART_EARLY_RENEWAL: &str = "cart_early_renewal";
}
