use std::collections::HashMap;

use crate::settings::services::Translator;

pub const PROVIDER_NAME: &str = "settings.data_sources.provider_name";
pub const CONFIRM_DISCONNECT: &str = "settings.data_sources.do_you_really_want_to_disconnect";
pub const YES_DELETE: &str = "app.yes_delete";
pub const NO_GO_BACK: &str = "app.no_go_back";

/// Key to template translations with `{{param}}` interpolation.
/// Unknown keys translate to the key itself.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    entries: HashMap<String, String>,
}

impl TranslationCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in Spanish strings used by the settings page.
    pub fn spanish() -> Self {
        Self::new()
            .with(PROVIDER_NAME, "Proveedor {{providerName}}")
            .with(CONFIRM_DISCONNECT, "¿Realmente desea desconectar esta fuente de datos?")
            .with(YES_DELETE, "Sí, eliminar")
            .with(NO_GO_BACK, "No, volver")
    }

    pub fn with(mut self, key: impl Into<String>, template: impl Into<String>) -> Self {
        self.entries.insert(key.into(), template.into());
        self
    }
}

impl Translator for TranslationCatalog {
    fn instant(&self, key: &str, params: &[(&str, &str)]) -> String {
        let Some(template) = self.entries.get(key) else {
            return key.to_string();
        };
        params.iter().fold(template.clone(), |text, (name, value)| {
            text.replace(&format!("{{{{{name}}}}}"), value)
        })
    }
}
