use queue_forward_core::contract::{DEFAULT_PARAMETER, DEFAULT_QUEUE_NAME};
use queue_forward_core::{ForwardingHandler, QueueBinding};
use thiserror::Error;

pub const QUEUE_URL_ENV: &str = "OUTPUT_QUEUE_URL";
pub const QUEUE_NAME_ENV: &str = "OUTPUT_QUEUE_NAME";
pub const PARAMETER_ENV: &str = "FORWARD_PARAMETER";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardConfig {
    pub binding: QueueBinding,
    pub parameter: String,
}

impl ForwardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values are treated the same as unset ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let queue_url = read(QUEUE_URL_ENV).ok_or(ConfigError::Missing(QUEUE_URL_ENV))?;
        let queue_name = read(QUEUE_NAME_ENV).unwrap_or_else(|| DEFAULT_QUEUE_NAME.to_string());
        let parameter = read(PARAMETER_ENV).unwrap_or_else(|| DEFAULT_PARAMETER.to_string());

        Ok(Self {
            binding: QueueBinding::new(queue_name, queue_url),
            parameter,
        })
    }

    pub fn handler(&self) -> ForwardingHandler {
        ForwardingHandler::with_parameter(self.parameter.clone())
    }
}
