use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use queue_forward_lambda::adapters::sqs::SqsQueueSink;
use queue_forward_lambda::config::ForwardConfig;
use queue_forward_lambda::error::ForwardError;
use queue_forward_lambda::handlers::http::{ApiGatewayResponse, ForwardingFunction};
use queue_forward_lambda::logging::init_tracing;
use serde_json::Value;

async fn build_function() -> Result<ForwardingFunction, ForwardError> {
    let config = ForwardConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let sink = SqsQueueSink::new(
        aws_sdk_sqs::Client::new(&aws_config),
        config.binding.connection.clone(),
    );

    tracing::info!(
        queue_name = %config.binding.queue_name,
        parameter = %config.parameter,
        "forward_lambda_started"
    );
    Ok(ForwardingFunction::new(
        config.handler(),
        Arc::new(sink),
        config.binding,
    ))
}

async fn handle_request(
    function: &ForwardingFunction,
    event: LambdaEvent<Value>,
) -> Result<ApiGatewayResponse, Error> {
    function.handle_event(&event.payload).map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    let function = Arc::new(build_function().await?);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let function = Arc::clone(&function);
        async move { handle_request(&function, event).await }
    }))
    .await
}
