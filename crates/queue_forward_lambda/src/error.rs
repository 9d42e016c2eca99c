use thiserror::Error;

use crate::adapters::queue_sink::SinkError;
use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Delivery failures are surfaced to the runtime as invocation errors.
    #[error(transparent)]
    Sink(#[from] SinkError),
}
