use crate::contract::{
    HandlerResult, OutboundMessage, Request, DEFAULT_PARAMETER, MISSING_PARAMETER_PLACEHOLDER,
};

/// Decides whether one request becomes one queue message.
///
/// The handler holds no mutable state, so a single instance can serve any
/// number of concurrent invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardingHandler {
    parameter: String,
}

impl Default for ForwardingHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ForwardingHandler {
    pub fn new() -> Self {
        Self::with_parameter(DEFAULT_PARAMETER)
    }

    pub fn with_parameter(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
        }
    }

    pub fn parameter(&self) -> &str {
        &self.parameter
    }

    /// A present but empty value is rejected the same way as a missing one.
    pub fn handle(&self, request: &Request) -> HandlerResult {
        match request.param(&self.parameter) {
            Some(value) if !value.is_empty() => {
                HandlerResult::Accepted(OutboundMessage::new(value))
            }
            _ => HandlerResult::Rejected(MISSING_PARAMETER_PLACEHOLDER.to_string()),
        }
    }
}
