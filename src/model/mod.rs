//! Plain data the plugin registers with the host.

pub mod entity_type;
pub mod status;

pub use entity_type::{not_found_message, subscription_definition, MANAGE_STORE_CAPABILITY};
pub use status::{default_status_set, CanonicalStatuses, StatusLabelSource};
