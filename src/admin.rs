//! Plugins-screen integration: action links and the major update warning.

use crate::config::PluginSettings;
use hook_framework::PluginUpdate;
use semver::Version;

/// Prepends the Settings, Docs and Support links to the host's list.
pub fn action_links(settings: &PluginSettings, links: Vec<String>) -> Vec<String> {
    let mut merged = vec![
        format!("<a href=\"{}\">Settings</a>", settings.settings_tab_url()),
        format!("<a href=\"{}\">Docs</a>", settings.urls.docs_url),
        format!("<a href=\"{}\">Support</a>", settings.urls.support_url),
    ];
    merged.extend(links);
    merged
}

/// Parses the loose version strings plugin headers carry ("2", "2.0",
/// "1.05", "1.5.20.1", "2.0.0-beta"). Numeric parts past the third are
/// dropped.
fn parse_version(raw: &str) -> Option<Version> {
    let raw = raw.trim().trim_start_matches('v');
    let (core, rest) = match raw.find(['-', '+']) {
        Some(at) => raw.split_at(at),
        None => (raw, ""),
    };
    let mut numbers = [0u64; 3];
    for (slot, part) in core.split('.').take(3).enumerate() {
        numbers[slot] = part.parse().ok()?;
    }
    let [major, minor, patch] = numbers;
    Version::parse(&format!("{major}.{minor}.{patch}{rest}")).ok()
}

/// True when updating from `installed` to `available` crosses into 2.x.
pub fn crosses_version_two(installed: &str, available: &str) -> bool {
    let two = Version::new(2, 0, 0);
    match (parse_version(installed), parse_version(available)) {
        (Some(installed), Some(available)) => installed < two && available >= two,
        _ => false,
    }
}

/// Writes the advisory warning when the update is the 2.0 jump. Never
/// blocks the update.
pub fn update_notice(settings: &PluginSettings, update: &PluginUpdate) {
    if !crosses_version_two(&update.version, &update.new_version) {
        return;
    }
    update.echo(&format!(
        "<div class=\"wc_plugin_upgrade_notice\">Warning! Version 2.0 is a major update to the \
         WooCommerce Subscriptions extension. Before updating, please create a backup, update all \
         WooCommerce extensions and test all plugins, custom code and payment gateways with \
         version 2.0 on a staging site. <a href=\"{}\">Learn more about the changes in version \
         2.0 &raquo;</a></div> ",
        settings.urls.version_two_guide_url
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_are_prepended() {
        let links = action_links(&PluginSettings::default(), vec!["<a>Deactivate</a>".into()]);

        assert_eq!(links.len(), 4);
        assert!(links[0].contains("tab=subscriptions"));
        assert!(links[2].contains("Support"));
        assert_eq!(links[3], "<a>Deactivate</a>");
    }

    #[test]
    fn test_only_the_two_point_oh_jump_warns() {
        assert!(crosses_version_two("1.5.20", "2.0.0"));
        assert!(crosses_version_two("1.5", "2.1"));
        assert!(!crosses_version_two("1.9.9", "2.0.0-beta.1"));
        assert!(!crosses_version_two("2.0.0", "2.1.0"));
        assert!(!crosses_version_two("1.4", "1.5"));
        assert!(!crosses_version_two("garbage", "2.0.0"));
    }

    #[test]
    fn test_loose_versions_still_warn() {
        assert!(crosses_version_two("1.5.20.1", "2.0.0"));
        assert!(crosses_version_two("1.05", "2.0"));
        assert!(crosses_version_two("1.9", "02.0.0.1"));
        assert!(!crosses_version_two("2.0.0.1", "2.1"));
        assert!(!crosses_version_two("1.5..2", "2.0.0"));
    }

    #[test]
    fn test_notice_written_to_update_row() {
        let settings = PluginSettings::default();

        let update = PluginUpdate::new("1.5.0", "2.0.0");
        update_notice(&settings, &update);
        assert!(update.output().contains("version-2"));

        let update = PluginUpdate::new("3.0.0", "4.0.0");
        update_notice(&settings, &update);
        assert!(update.output().is_empty());
    }
}
