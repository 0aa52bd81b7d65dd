use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("Failed to fetch {source_name}: {message}")]
    Fetch {
        source_name: &'static str,
        message: String,
    },
    #[error("Failed to persist the providers configuration: {0}")]
    Persist(String),
    #[error("Data source <{0}> does not exist")]
    ProviderNotFound(String),
    #[error("No data source is selected")]
    NoProviderSelected,
    #[error("Providers configuration has not been loaded yet")]
    NotLoaded,
}

impl SettingsError {
    pub fn fetch(source_name: &'static str, message: impl ToString) -> Self {
        SettingsError::Fetch {
            source_name,
            message: message.to_string(),
        }
    }
}
