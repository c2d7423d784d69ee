//! Data-store bindings contributed by the plugin.
//!
//! The host resolves its entity key → store map lazily through
//! [`DATA_STORES`]; this module only adds the plugin's entries to it.

use hook_framework::{DataStoreMap, HandlerId, Host, HostError, DATA_STORES, DEFAULT_PRIORITY};

/// Entity key → store implementation, in insertion order.
pub const BINDINGS: [(&str, &str); 4] = [
    ("subscription", "WCS_Subscription_Data_Store_CPT"),
    ("product-variable-subscription", "WCS_Product_Variable_Data_Store_CPT"),
    // Core stores reused for subscription products and switch items.
    ("product-subscription_variation", "WC_Product_Variation_Data_Store_CPT"),
    ("order-item-line_item_pending_switch", "WC_Order_Item_Product_Data_Store"),
];

/// Filter handler: inserts or overwrites the plugin's bindings.
pub fn contribute_bindings(mut stores: DataStoreMap) -> DataStoreMap {
    for (key, store) in BINDINGS {
        stores.insert(key.to_owned(), store.to_owned());
    }
    stores
}

pub fn attach(host: &Host) -> Result<HandlerId, HostError> {
    host.hooks()
        .add_filter(&DATA_STORES, DEFAULT_PRIORITY, contribute_bindings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contribution_overwrites_and_keeps_others() {
        let mut existing = DataStoreMap::new();
        existing.insert("order".into(), "WC_Order_Data_Store_CPT".into());
        existing.insert("subscription".into(), "Stale".into());

        let merged = contribute_bindings(existing);

        assert_eq!(merged.len(), 5);
        assert_eq!(merged["order"], "WC_Order_Data_Store_CPT");
        assert_eq!(merged["subscription"], "WCS_Subscription_Data_Store_CPT");
    }
}
