//! CloudFormation resource handler logic for `AWS::Logs::LogGroup`.
//!
//! This crate implements the four lifecycle operations (Create, Read, Update,
//! Delete) that converge a declarative log group model onto CloudWatch Logs,
//! plus the stabilization polling that absorbs the service's eventual
//! consistency. It deliberately contains no runtime of its own: the
//! CloudFormation orchestration framework owns credential resolution, retry
//! scheduling, and the callback transport, and calls into
//! [`LogGroupHandler`] with an already-resolved `aws_config::SdkConfig`.
//!
//! # Reconciliation model
//!
//! - **One pass per invocation**: a handler issues its remote calls in a
//!   fixed order and returns a [`ProgressEvent`]. Work that needs more time
//!   (KMS key propagation, delete stabilization) comes back as
//!   [`ProgressEvent::InProgress`] carrying an opaque [`CallbackContext`];
//!   the framework re-invokes the handler with that context after the
//!   requested delay. The handler never sleeps or spawns.
//! - **Resumability**: the context records which remote calls already
//!   committed, so a resumed flow never re-issues them, and how often a
//!   retryable call has been attempted, which bounds the retry budget.
//! - **Read as the source of truth**: Create and Update both finish by
//!   re-reading remote state; the model they return is materialized entirely
//!   from the service's answer, never echoed from caller input.
//!
//! # Module map
//!
//! - [`model`]: the declarative resource model and the request envelope
//! - [`progress`]: progress events and the resumable callback context
//! - [`error`]: error taxonomy and retry classification
//! - [`client`]: the narrow CloudWatch Logs seam and its SDK implementation
//! - [`handlers`]: the four lifecycle flows
//! - [`identifier`]: deterministic generated log group names

#![warn(clippy::all, rust_2018_idioms)]

pub mod client;
pub mod error;
pub mod handlers;
pub mod identifier;
pub mod model;
pub mod progress;
mod steps;
mod translator;

pub use client::{CloudWatchLogs, LogGroupSummary, SdkCloudWatchLogs};
pub use error::{HandlerErrorCode, LogsApiError};
pub use handlers::LogGroupHandler;
pub use model::{HandlerRequest, LogGroupModel, TYPE_NAME};
pub use progress::{CallbackContext, ProgressEvent};
