//! # Type/Status Registrar
//!
//! Registers what the plugin adds to the host's storage model during `Init`:
//!
//! | Priority | Step |
//! |----------|------|
//! | 3 | [`Registrar::load_text_domain`] |
//! | 6 | [`Registrar::register_entity_type`] |
//! | 9 | [`Registrar::register_statuses`] |
//!
//! Each step computes a base value, passes it through the matching
//! extension point in [`hooks`](crate::hooks), then hands the result to the
//! host.

mod entity_type;
mod status;
mod translation;

use crate::config::PluginSettings;
use crate::model::StatusLabelSource;
use hook_framework::Host;
use std::rc::Rc;

/// Answers "do any subscriptions exist yet?".
pub type AvailabilityProbe = Rc<dyn Fn(&Host) -> bool>;

pub struct Registrar {
    settings: Rc<PluginSettings>,
    statuses: Box<dyn StatusLabelSource>,
    availability: AvailabilityProbe,
}

impl Registrar {
    pub fn new(
        settings: Rc<PluginSettings>,
        statuses: Box<dyn StatusLabelSource>,
        availability: AvailabilityProbe,
    ) -> Self {
        Self {
            settings,
            statuses,
            availability,
        }
    }
}
