//! Translation of API Gateway proxy events into a plain [`Request`].
//!
//! REST API (v1) events carry decoded parameters in `queryStringParameters`.
//! HTTP API (v2) events may omit that map and only provide `rawQueryString`,
//! which is decoded here as `application/x-www-form-urlencoded`. Repeated keys
//! are comma-joined, the same way API Gateway fills `queryStringParameters`.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use queue_forward_core::Request;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("Request event must be a JSON object")]
    NotAnObject,

    #[error("queryStringParameters must be a JSON object")]
    InvalidParameters,

    #[error("query parameter '{name}' must be a string")]
    InvalidParameter { name: String },

    #[error("rawQueryString must be a string")]
    InvalidRawQuery,

    #[error("query parameter '{name}' is not valid percent-encoded UTF-8")]
    InvalidEncoding { name: String },
}

pub fn request_from_event(event: &Value) -> Result<Request, EventError> {
    let Some(object) = event.as_object() else {
        return Err(EventError::NotAnObject);
    };

    match object.get("queryStringParameters") {
        Some(Value::Object(params)) => return request_from_parameters(params),
        Some(Value::Null) | None => {}
        Some(_) => return Err(EventError::InvalidParameters),
    }

    match object.get("rawQueryString") {
        Some(Value::String(raw)) => request_from_raw_query(raw),
        Some(Value::Null) | None => Ok(Request::new()),
        Some(_) => Err(EventError::InvalidRawQuery),
    }
}

fn request_from_parameters(params: &Map<String, Value>) -> Result<Request, EventError> {
    params
        .iter()
        .map(|(name, value)| match value {
            Value::String(text) => Ok((name.clone(), text.clone())),
            _ => Err(EventError::InvalidParameter { name: name.clone() }),
        })
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map(Request::from)
}

fn request_from_raw_query(raw: &str) -> Result<Request, EventError> {
    let mut params = BTreeMap::new();
    for pair in raw.split('&').filter(|pair| !pair.is_empty()) {
        let (raw_name, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
        let name = decode_component(raw_name).ok_or_else(|| EventError::InvalidEncoding {
            name: raw_name.to_string(),
        })?;
        let Some(value) = decode_component(raw_value) else {
            return Err(EventError::InvalidEncoding { name });
        };

        match params.entry(name) {
            Entry::Occupied(mut entry) => {
                let joined: &mut String = entry.get_mut();
                joined.push(',');
                joined.push_str(&value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
        }
    }
    Ok(Request::from(params))
}

// `+` means space only in the unescaped text; `%2B` stays a literal plus.
fn decode_component(component: &str) -> Option<String> {
    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_rest_api_parameters() {
        let request = request_from_event(&json!({
            "httpMethod": "GET",
            "queryStringParameters": {"name": "Alice", "lang": "en"}
        }))
        .expect("event should parse");

        assert_eq!(request.param("name"), Some("Alice"));
        assert_eq!(request.param("lang"), Some("en"));
    }

    #[test]
    fn null_parameters_yield_empty_request() {
        let request = request_from_event(&json!({"queryStringParameters": null}))
            .expect("event should parse");

        assert!(request.is_empty());
    }

    #[test]
    fn decodes_raw_query_string() {
        let request = request_from_event(&json!({
            "version": "2.0",
            "rawQueryString": "name=Ada+Lovelace%2B1&empty=&flag"
        }))
        .expect("event should parse");

        assert_eq!(request.param("name"), Some("Ada Lovelace+1"));
        assert_eq!(request.param("empty"), Some(""));
        assert_eq!(request.param("flag"), Some(""));
    }

    #[test]
    fn repeated_raw_keys_are_comma_joined() {
        let request = request_from_event(&json!({"rawQueryString": "name=&name=Bob&name=Eve"}))
            .expect("event should parse");

        assert_eq!(request.param("name"), Some(",Bob,Eve"));
    }

    #[test]
    fn rejects_invalid_utf8_value() {
        let error = request_from_event(&json!({"rawQueryString": "name=%FF%FE"}))
            .expect_err("invalid utf-8 should fail");

        assert_eq!(
            error,
            EventError::InvalidEncoding {
                name: "name".to_string()
            }
        );
    }

    #[test]
    fn rejects_invalid_utf8_key() {
        let error = request_from_event(&json!({"rawQueryString": "%C3%28=x"}))
            .expect_err("invalid utf-8 key should fail");

        assert_eq!(
            error,
            EventError::InvalidEncoding {
                name: "%C3%28".to_string()
            }
        );
    }

    #[test]
    fn parameter_map_takes_precedence_over_raw_query() {
        let request = request_from_event(&json!({
            "queryStringParameters": {"name": "Alice"},
            "rawQueryString": "name=Bob"
        }))
        .expect("event should parse");

        assert_eq!(request.param("name"), Some("Alice"));
    }

    #[test]
    fn rejects_non_object_event() {
        let error = request_from_event(&json!("name=Alice")).expect_err("string event should fail");

        assert_eq!(error, EventError::NotAnObject);
    }

    #[test]
    fn rejects_non_string_parameter_value() {
        let error = request_from_event(&json!({"queryStringParameters": {"name": 42}}))
            .expect_err("numeric parameter should fail");

        assert_eq!(
            error.to_string(),
            "query parameter 'name' must be a string"
        );
    }

    #[test]
    fn rejects_non_string_raw_query() {
        let error = request_from_event(&json!({"rawQueryString": ["name=Alice"]}))
            .expect_err("array raw query should fail");

        assert_eq!(error, EventError::InvalidRawQuery);
    }
}
