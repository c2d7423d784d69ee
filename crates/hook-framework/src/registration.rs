//! Records the host accepts from plugins: custom entity types, custom status
//! values and admin notices.

/// Human readable labels for an entity type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityLabels {
    pub name: String,
    pub singular_name: String,
    pub add_new: String,
    pub add_new_item: String,
    pub edit: String,
    pub edit_item: String,
    pub new_item: String,
    pub view: String,
    pub view_item: String,
    pub search_items: String,
    /// Shown when the list screen is empty.
    pub not_found: String,
    pub not_found_in_trash: String,
    pub parent: String,
    pub menu_name: String,
}

/// Where the type's admin screen is attached.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuPlacement {
    /// Nested under another top-level menu.
    Under(String),
    TopLevel,
}

/// Visibility and routing switches for an entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct Visibility {
    pub public: bool,
    pub show_ui: bool,
    pub publicly_queryable: bool,
    pub exclude_from_search: bool,
    pub show_in_nav_menus: bool,
    pub hierarchical: bool,
    pub has_archive: bool,
    pub rewrite: bool,
    pub query_var: bool,
}

/// Switches specific to order-like entity types.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTypeFlags {
    pub exclude_from_orders_screen: bool,
    pub add_order_meta_boxes: bool,
    pub exclude_from_order_count: bool,
    pub exclude_from_order_views: bool,
    pub exclude_from_order_webhooks: bool,
    pub exclude_from_order_reports: bool,
    pub exclude_from_order_sales_reports: bool,
}

/// Everything the host needs to register a custom entity type.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityTypeDefinition {
    pub labels: EntityLabels,
    pub description: String,
    pub visibility: Visibility,
    /// Capability family required to manage entities of this type.
    pub capability_type: String,
    pub map_meta_cap: bool,
    pub show_in_menu: MenuPlacement,
    pub supports: Vec<String>,
    pub order_type: OrderTypeFlags,
    /// Identifier of the class that loads/stores one entity.
    pub class_name: String,
}

/// A count label with singular and plural templates, `%s` being the count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelCount {
    pub singular: String,
    pub plural: String,
}

impl LabelCount {
    pub fn new(singular: impl Into<String>, plural: impl Into<String>) -> Self {
        Self {
            singular: singular.into(),
            plural: plural.into(),
        }
    }

    /// Renders the template for `count`.
    pub fn render(&self, count: u64) -> String {
        let template = if count == 1 { &self.singular } else { &self.plural };
        template.replace("%s", &count.to_string())
    }
}

/// A custom status value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDefinition {
    pub label: String,
    pub label_count: LabelCount,
    pub public: bool,
    pub exclude_from_search: bool,
    pub show_in_admin_all_list: bool,
    pub show_in_admin_status_list: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Error,
    Warning,
    Info,
}

/// A link rendered under an admin notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeAction {
    pub name: String,
    pub url: String,
}

/// A message shown to administrators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminNotice {
    pub kind: NoticeKind,
    pub content: String,
    pub actions: Vec<NoticeAction>,
}

impl AdminNotice {
    pub fn new(kind: NoticeKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            actions: Vec::new(),
        }
    }

    pub fn with_action(mut self, name: impl Into<String>, url: impl Into<String>) -> Self {
        self.actions.push(NoticeAction {
            name: name.into(),
            url: url.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_count_render() {
        let label = LabelCount::new("Active (%s)", "Active (%s)");
        assert_eq!(label.render(3), "Active (3)");

        let label = LabelCount::new("%s item", "%s items");
        assert_eq!(label.render(1), "1 item");
        assert_eq!(label.render(0), "0 items");
    }
}
