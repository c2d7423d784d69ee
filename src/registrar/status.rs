use super::Registrar;
use crate::hooks::REGISTERED_STATUSES;
use crate::model::default_status_set;
use hook_framework::{Host, StatusDefinition};
use tracing::{info, instrument, warn};

impl Registrar {
    /// Registers the requested statuses and returns how many were registered.
    ///
    /// A requested key missing from the canonical labels is skipped with a
    /// warning; nothing fails.
    #[instrument(skip_all)]
    pub fn register_statuses(&self, host: &Host) -> usize {
        let labels = self.statuses.labels();
        let requested = host
            .hooks()
            .apply_filters(&REGISTERED_STATUSES, default_status_set());

        let mut registered = 0;
        for (key, label_count) in requested {
            let Some(label) = labels.get(&key) else {
                warn!(status = %key, "Requested status has no canonical label, skipping");
                continue;
            };
            host.register_status(
                &key,
                StatusDefinition {
                    label: label.clone(),
                    label_count,
                    public: false,
                    exclude_from_search: false,
                    show_in_admin_all_list: true,
                    show_in_admin_status_list: true,
                },
            );
            registered += 1;
        }
        info!(registered, "Statuses registered");
        registered
    }
}

#[cfg(test)]
mod tests {
    use crate::config::PluginSettings;
    use crate::hooks::{StatusSet, REGISTERED_STATUSES};
    use crate::model::CanonicalStatuses;
    use crate::registrar::Registrar;
    use hook_framework::{Host, LabelCount, DEFAULT_PRIORITY};
    use std::rc::Rc;

    fn registrar() -> Registrar {
        Registrar::new(
            Rc::new(PluginSettings::default()),
            Box::new(CanonicalStatuses),
            Rc::new(|_: &Host| false),
        )
    }

    #[test]
    fn test_handler_can_shrink_but_not_relabel() {
        let host = Host::default();
        host.hooks()
            .add_filter(&REGISTERED_STATUSES, DEFAULT_PRIORITY, |mut set: StatusSet| {
                set.shift_remove("switched");
                set.insert("expired".into(), LabelCount::new("Gone", "Gone"));
                set
            })
            .unwrap();

        assert_eq!(registrar().register_statuses(&host), 3);

        let expired = host.status("expired").unwrap();
        assert_eq!(expired.label, "Expired");
        assert_eq!(expired.label_count.singular, "Gone");
        assert!(host.status("switched").is_none());
    }

    #[test]
    fn test_unknown_keys_are_skipped() {
        let host = Host::default();
        host.hooks()
            .add_filter(&REGISTERED_STATUSES, DEFAULT_PRIORITY, |mut set: StatusSet| {
                set.insert("paused".into(), LabelCount::new("Paused", "Paused"));
                set
            })
            .unwrap();

        assert_eq!(registrar().register_statuses(&host), 4);
        assert!(host.status("paused").is_none());
    }
}
