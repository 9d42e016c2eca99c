use std::sync::Arc;

use queue_forward_core::{ForwardingHandler, HandlerResult, QueueBinding};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};

use crate::adapters::apigw::request_from_event;
use crate::adapters::queue_sink::QueueSink;
use crate::error::ForwardError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// HTTP-triggered forwarding function with its queue dependency wired in at
/// construction time.
pub struct ForwardingFunction {
    handler: ForwardingHandler,
    sink: Arc<dyn QueueSink>,
    binding: QueueBinding,
}

impl ForwardingFunction {
    pub fn new(handler: ForwardingHandler, sink: Arc<dyn QueueSink>, binding: QueueBinding) -> Self {
        Self {
            handler,
            sink,
            binding,
        }
    }

    pub fn binding(&self) -> &QueueBinding {
        &self.binding
    }

    /// Handles one API Gateway proxy event.
    ///
    /// Writes at most one message. Missing parameters and malformed events
    /// produce a response; only a failed queue write returns `Err`.
    pub fn handle_event(&self, event: &Value) -> Result<ApiGatewayResponse, ForwardError> {
        let request = match request_from_event(event) {
            Ok(value) => value,
            Err(error) => {
                warn!(error = %error, "invalid_event");
                return Ok(validation_error_response(&error.to_string()));
            }
        };

        match self.handler.handle(&request) {
            HandlerResult::Rejected(placeholder) => {
                debug!(parameter = self.handler.parameter(), "forwarding_rejected");
                Ok(text_response(200, placeholder))
            }
            HandlerResult::Accepted(message) => {
                let fingerprint = message.fingerprint();
                let payload_bytes = message.body().len();

                if let Err(sink_error) = self.sink.send_message(message) {
                    error!(
                        queue_name = %self.binding.queue_name,
                        fingerprint = %fingerprint,
                        error = %sink_error,
                        "sink_write_failed"
                    );
                    return Err(ForwardError::Sink(sink_error));
                }

                info!(
                    queue_name = %self.binding.queue_name,
                    payload_bytes,
                    fingerprint = %fingerprint,
                    "message_forwarded"
                );
                Ok(json_response(
                    202,
                    json!({
                        "status": "queued",
                        "queue_name": self.binding.queue_name,
                    }),
                ))
            }
        }
    }
}

fn validation_error_response(message: &str) -> ApiGatewayResponse {
    json_response(
        400,
        json!({
            "error": "validation_error",
            "message": message,
        }),
    )
}

fn text_response(status_code: u16, body: String) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "text/plain; charset=utf-8"}),
        body,
    }
}

fn json_response(status_code: u16, payload: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: json!({"Content-Type": "application/json"}),
        body: payload.to_string(),
    }
}
