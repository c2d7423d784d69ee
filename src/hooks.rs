//! Extension points the subscriptions plugin fires.
//!
//! Third parties register handlers on these through the host's
//! [`ExtensionRegistry`](hook_framework::ExtensionRegistry). Points owned by
//! the host itself (data stores, plugin screen) live in `hook_framework`.

use hook_framework::{ActionPoint, AdminNotice, EntityTypeDefinition, FilterPoint, LabelCount};
use indexmap::IndexMap;

/// Requested status set, status key → count label.
pub type StatusSet = IndexMap<String, LabelCount>;

/// Name of the scheduler implementation to build.
pub const SCHEDULER: FilterPoint<String> = FilterPoint::new("woocommerce_subscriptions_scheduler");

/// Whether any subscriptions exist. Selects the empty-list message.
pub const NOT_EMPTY: FilterPoint<bool> = FilterPoint::new("woocommerce_subscriptions_not_empty");

pub const NOT_FOUND_LABEL: FilterPoint<String> =
    FilterPoint::new("woocommerce_subscriptions_not_found_label");

/// Full override of the entity-type definition before it is registered.
pub const ENTITY_TYPE_DEFINITION: FilterPoint<EntityTypeDefinition> =
    FilterPoint::new("woocommerce_register_post_type_subscription");

pub const REGISTERED_STATUSES: FilterPoint<StatusSet> =
    FilterPoint::new("woocommerce_subscriptions_registered_statuses");

/// Translation directory relative to the plugins directory.
pub const TRANSLATION_PATH: FilterPoint<String> =
    FilterPoint::new("woocommerce_subscriptions_translation_file_rel_path");

/// Opt-in for the legacy hook deprecation handlers. Off by default.
pub const LOAD_DEPRECATION_HANDLERS: FilterPoint<bool> =
    FilterPoint::new("woocommerce_subscriptions_load_deprecation_handlers");

/// Fired with the displayed notice when the standalone early renewal
/// extension is detected.
pub const EARLY_RENEWAL_CONFLICT: ActionPoint<AdminNotice> =
    ActionPoint::new("woocommerce_subscriptions_early_renewal_conflict");

pub const DEACTIVATED: ActionPoint<()> = ActionPoint::new("woocommerce_subscriptions_deactivated");
