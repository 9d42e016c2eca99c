//! AWS-oriented adapters and handlers for the queue forwarding function.
//!
//! This crate owns runtime integration details (API Gateway event translation,
//! SQS delivery, environment configuration and log setup) and delegates the
//! forwarding decision to `queue_forward_core`.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
