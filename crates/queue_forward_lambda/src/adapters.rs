pub mod apigw;
pub mod queue_sink;
pub mod sqs;
