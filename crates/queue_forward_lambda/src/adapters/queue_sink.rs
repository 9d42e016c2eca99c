use std::sync::Mutex;

use queue_forward_core::OutboundMessage;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SinkError {
    message: String,
}

impl SinkError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Append-only message destination. One call appends one message.
pub trait QueueSink: Send + Sync {
    fn send_message(&self, message: OutboundMessage) -> Result<(), SinkError>;
}

/// Records message bodies in arrival order. Optionally fails every write.
#[derive(Debug, Default)]
pub struct InMemoryQueueSink {
    messages: Mutex<Vec<String>>,
    failure: Option<String>,
}

impl InMemoryQueueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            failure: Some(message.into()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(messages) => messages.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl QueueSink for InMemoryQueueSink {
    fn send_message(&self, message: OutboundMessage) -> Result<(), SinkError> {
        if let Some(failure) = &self.failure {
            return Err(SinkError::new(failure.clone()));
        }
        self.messages
            .lock()
            .map_err(|_| SinkError::new("in-memory queue lock poisoned"))?
            .push(message.into_body());
        Ok(())
    }
}
