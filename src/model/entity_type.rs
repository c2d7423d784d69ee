//! The subscription entity type as registered with the host.

use crate::config::PluginSettings;
use hook_framework::{EntityLabels, EntityTypeDefinition, MenuPlacement, OrderTypeFlags, Visibility};

/// Capability that moves the admin screen under the store menu.
pub const MANAGE_STORE_CAPABILITY: &str = "manage_woocommerce";

/// Message shown on an empty list screen.
///
/// Stores that already have subscriptions get a terse message; new stores get
/// pointers to the manager guide and to creating a subscription product.
pub fn not_found_message(subscriptions_exist: bool, settings: &PluginSettings) -> String {
    if subscriptions_exist {
        return "No Subscriptions found".to_owned();
    }
    format!(
        "<p>Subscriptions will appear here for you to view and manage once purchased by a customer.</p>\
         <p><a href=\"{guide}\" target=\"_blank\">Learn more about managing subscriptions &raquo;</a></p>\
         <p><a href=\"{add}\">Add a subscription product &raquo;</a></p>",
        guide = settings.urls.store_manager_guide_url,
        add = settings.add_subscription_url(),
    )
}

/// The base definition, before any handler overrides it.
pub fn subscription_definition(not_found: String, can_manage_store: bool) -> EntityTypeDefinition {
    EntityTypeDefinition {
        labels: EntityLabels {
            name: "Subscriptions".into(),
            singular_name: "Subscription".into(),
            add_new: "Add Subscription".into(),
            add_new_item: "Add New Subscription".into(),
            edit: "Edit".into(),
            edit_item: "Edit Subscription".into(),
            new_item: "New Subscription".into(),
            view: "View Subscription".into(),
            view_item: "View Subscription".into(),
            search_items: "Search Subscriptions".into(),
            not_found,
            not_found_in_trash: "No Subscriptions found in trash".into(),
            parent: "Parent Subscriptions".into(),
            menu_name: "Subscriptions".into(),
        },
        description: "This is where subscriptions are stored.".into(),
        visibility: Visibility {
            public: false,
            show_ui: true,
            publicly_queryable: false,
            exclude_from_search: true,
            show_in_nav_menus: false,
            hierarchical: false,
            has_archive: false,
            rewrite: false,
            query_var: false,
        },
        capability_type: "shop_order".into(),
        map_meta_cap: true,
        show_in_menu: if can_manage_store {
            MenuPlacement::Under("woocommerce".into())
        } else {
            MenuPlacement::TopLevel
        },
        supports: vec!["title".into(), "comments".into(), "custom-fields".into()],
        order_type: OrderTypeFlags {
            exclude_from_orders_screen: true,
            add_order_meta_boxes: true,
            exclude_from_order_count: true,
            exclude_from_order_views: true,
            exclude_from_order_webhooks: true,
            exclude_from_order_reports: true,
            exclude_from_order_sales_reports: true,
        },
        class_name: "WC_Subscription".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_variants() {
        let settings = PluginSettings::default();

        assert_eq!(not_found_message(true, &settings), "No Subscriptions found");
        let verbose = not_found_message(false, &settings);
        assert!(verbose.contains(&settings.urls.store_manager_guide_url));
        assert!(verbose.contains("select_subscription=true"));
    }

    #[test]
    fn test_menu_placement_follows_capability() {
        let under = subscription_definition(String::new(), true);
        let top = subscription_definition(String::new(), false);

        assert_eq!(under.show_in_menu, MenuPlacement::Under("woocommerce".into()));
        assert_eq!(top.show_in_menu, MenuPlacement::TopLevel);
        assert_eq!(under.capability_type, "shop_order");
    }
}
