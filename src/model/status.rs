//! Subscription status vocabulary.

use crate::hooks::StatusSet;
use hook_framework::LabelCount;
use indexmap::IndexMap;

/// Supplies the canonical status key → display label pairs.
///
/// Registered status labels always come from here, so filter handlers can
/// choose which statuses exist but cannot relabel them.
pub trait StatusLabelSource {
    fn labels(&self) -> IndexMap<String, String>;
}

/// The statuses a subscription can be in.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalStatuses;

impl StatusLabelSource for CanonicalStatuses {
    fn labels(&self) -> IndexMap<String, String> {
        [
            ("pending", "Pending payment"),
            ("active", "Active"),
            ("on-hold", "On hold"),
            ("cancelled", "Cancelled"),
            ("switched", "Switched"),
            ("expired", "Expired"),
            ("pending-cancel", "Pending Cancellation"),
        ]
        .into_iter()
        .map(|(key, label)| (key.to_owned(), label.to_owned()))
        .collect()
    }
}

/// A fixed table, mostly useful in tests.
impl StatusLabelSource for IndexMap<String, String> {
    fn labels(&self) -> IndexMap<String, String> {
        self.clone()
    }
}

/// Statuses the plugin registers unless a handler changes the set. The
/// remaining canonical statuses share keys with the host's order statuses.
pub fn default_status_set() -> StatusSet {
    ["Active", "Switched", "Expired", "Pending Cancellation"]
        .into_iter()
        .zip(["active", "switched", "expired", "pending-cancel"])
        .map(|(label, key)| {
            let template = format!("{label} <span class=\"count\">(%s)</span>");
            (key.to_owned(), LabelCount::new(template.clone(), template))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_is_covered_by_canonical_labels() {
        let labels = CanonicalStatuses.labels();
        let defaults = default_status_set();

        assert_eq!(defaults.len(), 4);
        assert!(defaults.keys().all(|key| labels.contains_key(key)));
        assert_eq!(
            defaults["pending-cancel"].render(2),
            "Pending Cancellation <span class=\"count\">(2)</span>"
        );
    }
}
