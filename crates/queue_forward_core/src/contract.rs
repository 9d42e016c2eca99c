use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

pub const DEFAULT_PARAMETER: &str = "name";
pub const MISSING_PARAMETER_PLACEHOLDER: &str = "No name found";
pub const DEFAULT_QUEUE_NAME: &str = "myqueue-items";

/// Query parameters of one inbound invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Request {
    params: BTreeMap<String, String>,
}

impl Request {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl From<BTreeMap<String, String>> for Request {
    fn from(params: BTreeMap<String, String>) -> Self {
        Self { params }
    }
}

impl<K, V> FromIterator<(K, V)> for Request
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

/// A single queue payload produced by the handler.
///
/// Only [`crate::ForwardingHandler`] creates messages; sinks consume them via
/// [`OutboundMessage::into_body`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    body: String,
}

impl OutboundMessage {
    pub(crate) fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }

    /// Hex SHA-256 of the payload, used to correlate log lines without
    /// writing the payload itself.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.body.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResult {
    /// Carries placeholder text for the response body. Not an error.
    Rejected(String),
    Accepted(OutboundMessage),
}

impl HandlerResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }

    pub fn message(&self) -> Option<&OutboundMessage> {
        match self {
            Self::Accepted(message) => Some(message),
            Self::Rejected(_) => None,
        }
    }
}

/// Output queue a deployment writes to: a logical name plus a connection
/// reference (for SQS, the queue URL).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueBinding {
    pub queue_name: String,
    pub connection: String,
}

impl QueueBinding {
    pub fn new(queue_name: impl Into<String>, connection: impl Into<String>) -> Self {
        Self {
            queue_name: queue_name.into(),
            connection: connection.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_lookup_is_exact_match() {
        let request = Request::new().with_param("name", "Alice");

        assert_eq!(request.param("name"), Some("Alice"));
        assert_eq!(request.param("Name"), None);
        assert_eq!(request.len(), 1);
    }

    #[test]
    fn request_collects_from_pairs() {
        let request: Request = [("name", "Bob"), ("lang", "en")].into_iter().collect();

        assert_eq!(request.param("lang"), Some("en"));
        assert!(!request.is_empty());
    }

    #[test]
    fn request_serializes_as_flat_map() {
        let request = Request::new().with_param("name", "Alice");

        let json = serde_json::to_value(&request).expect("request should serialize");
        assert_eq!(json, serde_json::json!({"name": "Alice"}));
    }

    #[test]
    fn fingerprint_is_sha256_hex() {
        let message = OutboundMessage::new("abc");

        assert_eq!(
            message.fingerprint(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn rejected_result_has_no_message() {
        let result = HandlerResult::Rejected(MISSING_PARAMETER_PLACEHOLDER.to_string());

        assert!(!result.is_accepted());
        assert!(result.message().is_none());
    }
}
