use queue_forward_core::OutboundMessage;

use crate::adapters::queue_sink::{QueueSink, SinkError};

/// Delivers each message as one SQS `SendMessage` call.
///
/// Must be called from within a multi-threaded tokio runtime.
pub struct SqsQueueSink {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsQueueSink {
    pub fn new(client: aws_sdk_sqs::Client, queue_url: impl Into<String>) -> Self {
        Self {
            client,
            queue_url: queue_url.into(),
        }
    }
}

impl QueueSink for SqsQueueSink {
    fn send_message(&self, message: OutboundMessage) -> Result<(), SinkError> {
        let client = self.client.clone();
        let queue_url = self.queue_url.clone();
        let body = message.into_body();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .send_message()
                    .queue_url(queue_url)
                    .message_body(body)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| SinkError::new(format!("failed to enqueue message: {error}")))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_sqs::config::retry::RetryConfig;
    use aws_sdk_sqs::config::{BehaviorVersion, Credentials, Region};
    use queue_forward_core::{ForwardingHandler, Request};

    use super::*;

    fn unreachable_client() -> aws_sdk_sqs::Client {
        let config = aws_sdk_sqs::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "static"))
            .endpoint_url("http://127.0.0.1:1")
            .retry_config(RetryConfig::disabled())
            .build();
        aws_sdk_sqs::Client::from_conf(config)
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn unreachable_queue_surfaces_sink_error() {
        let sink = SqsQueueSink::new(
            unreachable_client(),
            "http://127.0.0.1:1/000000000000/myqueue-items",
        );
        let message = ForwardingHandler::new()
            .handle(&Request::new().with_param("name", "Alice"))
            .message()
            .cloned()
            .expect("name should produce a message");

        let result = tokio::spawn(async move { sink.send_message(message) })
            .await
            .expect("send task should not panic");

        let error = result.expect_err("nothing listens on the endpoint");
        assert!(error.message().starts_with("failed to enqueue message"));
    }
}
