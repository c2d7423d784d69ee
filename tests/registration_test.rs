use hook_framework::mock::RecordingFactory;
use hook_framework::{DataStoreMap, Host, Phase, DATA_STORES, DEFAULT_PRIORITY};
use indexmap::IndexMap;
use std::rc::Rc;
use subscriptions_bootstrap::config::PluginSettings;
use subscriptions_bootstrap::data_stores;
use subscriptions_bootstrap::model::CanonicalStatuses;
use subscriptions_bootstrap::registrar::Registrar;
use subscriptions_bootstrap::subsystems::BootstrapPlan;
use subscriptions_bootstrap::{Collaborators, SubscriptionsPlugin};

fn four_statuses() -> IndexMap<String, String> {
    [
        ("active", "Active"),
        ("switched", "Switched"),
        ("expired", "Expired"),
        ("pending-cancel", "Pending Cancellation"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect()
}

fn registrar(source: IndexMap<String, String>) -> Registrar {
    Registrar::new(
        Rc::new(PluginSettings::default()),
        Box::new(source),
        Rc::new(|_: &Host| true),
    )
}

fn registered_labels(host: &Host) -> Vec<(String, String)> {
    host.statuses()
        .into_iter()
        .map(|(key, definition)| (key, definition.label))
        .collect()
}

/// The four default statuses are registered with their canonical labels,
/// verbatim and in order.
#[test]
fn test_default_statuses_registered_verbatim() {
    let host = Host::default();

    let count = registrar(four_statuses()).register_statuses(&host);

    assert_eq!(count, 4);
    assert_eq!(
        registered_labels(&host),
        vec![
            ("active".to_string(), "Active".to_string()),
            ("switched".to_string(), "Switched".to_string()),
            ("expired".to_string(), "Expired".to_string()),
            ("pending-cancel".to_string(), "Pending Cancellation".to_string()),
        ]
    );
    let active = host.status("active").expect("active registered");
    assert!(!active.public);
    assert!(active.show_in_admin_all_list);
    assert_eq!(active.label_count.render(3), "Active <span class=\"count\">(3)</span>");
}

#[test]
fn test_status_registration_is_idempotent() {
    let host = Host::default();
    let registrar = registrar(four_statuses());

    registrar.register_statuses(&host);
    let first = registered_labels(&host);
    registrar.register_statuses(&host);

    assert_eq!(registered_labels(&host), first);
}

/// A handler removing a binding wins no matter how many handlers ran before.
#[test]
fn test_handler_can_remove_data_store_binding() {
    let host = Host::builder().with_data_store("order", "WC_Order_Data_Store_CPT").build();
    data_stores::attach(&host).expect("Failed to attach data stores");
    for n in 0..3 {
        host.hooks()
            .add_filter(&DATA_STORES, DEFAULT_PRIORITY, move |mut map: DataStoreMap| {
                map.insert(format!("extra-{n}"), "Extra_Store".into());
                map
            })
            .unwrap();
    }
    host.hooks()
        .add_filter(&DATA_STORES, 20, |mut map: DataStoreMap| {
            map.shift_remove("product-subscription_variation");
            map
        })
        .unwrap();

    let stores = host.data_stores();

    assert!(!stores.contains_key("product-subscription_variation"));
    assert_eq!(stores["subscription"], "WCS_Subscription_Data_Store_CPT");
    assert_eq!(stores["extra-2"], "Extra_Store");
    assert_eq!(stores["order"], "WC_Order_Data_Store_CPT");
}

/// An earlier handler cannot override the plugin's own bindings, a later one can.
#[test]
fn test_data_store_last_write_wins() {
    let host = Host::default();
    host.hooks()
        .add_filter(&DATA_STORES, 5, |mut map: DataStoreMap| {
            map.insert("subscription".into(), "Early_Store".into());
            map
        })
        .unwrap();
    data_stores::attach(&host).unwrap();
    host.hooks()
        .add_filter(&DATA_STORES, 15, |mut map: DataStoreMap| {
            map.insert("product-variable-subscription".into(), "Late_Store".into());
            map
        })
        .unwrap();

    assert_eq!(host.data_store("subscription").as_deref(), Some("WCS_Subscription_Data_Store_CPT"));
    assert_eq!(host.data_store("product-variable-subscription").as_deref(), Some("Late_Store"));
}

/// The plugin's registrations happen at Init with the injected collaborators.
#[test]
fn test_plugin_registers_through_collaborators() {
    let host = Host::default();
    let mut source = four_statuses();
    source.shift_remove("expired");
    let plugin = SubscriptionsPlugin::with_plan(
        PluginSettings::default(),
        Collaborators::new(RecordingFactory::new())
            .with_status_source(source)
            .with_availability(|_: &Host| true),
        BootstrapPlan::new(),
    );

    plugin.bootstrap(&host).unwrap();
    assert!(host.entity_type("shop_subscription").is_none());
    host.run_phase(Phase::Init).unwrap();

    let definition = host.entity_type("shop_subscription").unwrap();
    assert_eq!(definition.labels.not_found, "No Subscriptions found");
    assert_eq!(host.statuses().len(), 3);
    assert!(host.status("expired").is_none());
    assert_eq!(
        host.text_domain_path("woocommerce-subscriptions").as_deref(),
        Some("woocommerce-subscriptions/languages")
    );
}

#[test]
fn test_canonical_source_covers_more_than_the_defaults() {
    let host = Host::default();
    let registrar = Registrar::new(
        Rc::new(PluginSettings::default()),
        Box::new(CanonicalStatuses),
        Rc::new(|_: &Host| false),
    );

    assert_eq!(registrar.register_statuses(&host), 4);
    assert!(host.status("on-hold").is_none());
}
