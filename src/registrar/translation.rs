use super::Registrar;
use crate::hooks::TRANSLATION_PATH;
use hook_framework::Host;

impl Registrar {
    /// Loads the plugin's translations from `<plugin dir>/languages`, or
    /// wherever a handler points the path.
    pub fn load_text_domain(&self, host: &Host) {
        let seed = format!("{}/languages", self.settings.plugin_dir());
        let path = host.hooks().apply_filters(&TRANSLATION_PATH, seed);
        host.load_text_domain(&self.settings.text_domain, &path);
    }
}
