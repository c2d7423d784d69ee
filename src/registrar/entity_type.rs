use super::Registrar;
use crate::hooks::{ENTITY_TYPE_DEFINITION, NOT_EMPTY, NOT_FOUND_LABEL};
use crate::model::{not_found_message, subscription_definition, MANAGE_STORE_CAPABILITY};
use hook_framework::{Host, HostError};
use tracing::{debug, instrument};

impl Registrar {
    /// Registers the subscription entity type.
    ///
    /// Host rejections (duplicate key, invalid definition) are returned as-is.
    #[instrument(skip_all, fields(key = %self.settings.entity_type))]
    pub fn register_entity_type(&self, host: &Host) -> Result<(), HostError> {
        let probed = (self.availability)(host);
        let exist = host.hooks().apply_filters(&NOT_EMPTY, probed);
        debug!(probed, exist, "Availability resolved");

        let not_found = host
            .hooks()
            .apply_filters(&NOT_FOUND_LABEL, not_found_message(exist, &self.settings));
        let definition = subscription_definition(
            not_found,
            host.current_user_can(MANAGE_STORE_CAPABILITY),
        );
        let definition = host.hooks().apply_filters(&ENTITY_TYPE_DEFINITION, definition);

        host.register_entity_type(&self.settings.entity_type, definition)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::PluginSettings;
    use crate::hooks::{ENTITY_TYPE_DEFINITION, NOT_EMPTY, NOT_FOUND_LABEL};
    use crate::model::CanonicalStatuses;
    use crate::registrar::Registrar;
    use hook_framework::{EntityTypeDefinition, Host, HostError, MenuPlacement, DEFAULT_PRIORITY};
    use std::rc::Rc;

    fn registrar(exist: bool) -> Registrar {
        Registrar::new(
            Rc::new(PluginSettings::default()),
            Box::new(CanonicalStatuses),
            Rc::new(move |_: &Host| exist),
        )
    }

    #[test]
    fn test_registers_terse_message_when_subscriptions_exist() {
        let host = Host::builder().with_user_capability("manage_woocommerce").build();

        registrar(true).register_entity_type(&host).unwrap();

        let definition = host.entity_type("shop_subscription").unwrap();
        assert_eq!(definition.labels.not_found, "No Subscriptions found");
        assert_eq!(definition.show_in_menu, MenuPlacement::Under("woocommerce".into()));
    }

    #[test]
    fn test_handlers_override_flag_label_and_definition() {
        let host = Host::default();
        host.hooks().add_filter(&NOT_EMPTY, DEFAULT_PRIORITY, |_: bool| true).unwrap();
        host.hooks()
            .add_filter(&NOT_FOUND_LABEL, DEFAULT_PRIORITY, |label: String| format!("[{label}]"))
            .unwrap();
        host.hooks()
            .add_filter(&ENTITY_TYPE_DEFINITION, DEFAULT_PRIORITY, |mut d: EntityTypeDefinition| {
                d.description = "Custom".into();
                d
            })
            .unwrap();

        registrar(false).register_entity_type(&host).unwrap();

        let definition = host.entity_type("shop_subscription").unwrap();
        assert_eq!(definition.labels.not_found, "[No Subscriptions found]");
        assert_eq!(definition.description, "Custom");
        assert_eq!(definition.show_in_menu, MenuPlacement::TopLevel);
    }

    #[test]
    fn test_host_rejection_propagates_unchanged() {
        let host = Host::default();
        let registrar = registrar(false);

        registrar.register_entity_type(&host).unwrap();
        let err = registrar.register_entity_type(&host).unwrap_err();
        assert!(matches!(err, HostError::DuplicateEntityType(key) if key == "shop_subscription"));
    }

    #[test]
    fn test_invalid_override_is_rejected_by_host() {
        let host = Host::default();
        host.hooks()
            .add_filter(&ENTITY_TYPE_DEFINITION, DEFAULT_PRIORITY, |mut d: EntityTypeDefinition| {
                d.capability_type.clear();
                d
            })
            .unwrap();

        let err = registrar(true).register_entity_type(&host).unwrap_err();
        assert!(matches!(err, HostError::InvalidDefinition { .. }));
    }
}
