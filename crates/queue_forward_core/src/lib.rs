//! Shared request-to-queue forwarding primitives.
//!
//! This crate owns the forwarding decision and the request/message contracts.
//! It intentionally excludes AWS SDK and Lambda runtime concerns; those live in
//! `queue_forward_lambda`.

pub mod contract;
pub mod forwarding;

pub use contract::{HandlerResult, OutboundMessage, QueueBinding, Request};
pub use forwarding::ForwardingHandler;
