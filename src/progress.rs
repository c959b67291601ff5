//! Progress token passed between the handler and the orchestration
//! framework, and the opaque callback state that lets a long-running
//! reconciliation resume across invocations.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HandlerErrorCode;
use crate::model::LogGroupModel;

/// Outcome of one handler invocation.
///
/// `InProgress` is the "not yet, re-invoke me" signal: the framework is
/// expected to call the same handler again after `callback_delay`, passing
/// `callback_context` back in. The handler itself never sleeps or polls
/// internally.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    Success {
        /// Final materialized state; `None` for a completed delete.
        resource_model: Option<LogGroupModel>,
    },
    InProgress {
        resource_model: LogGroupModel,
        callback_context: CallbackContext,
        callback_delay: Duration,
    },
    Failed {
        error_code: HandlerErrorCode,
        message: String,
    },
}

impl ProgressEvent {
    pub fn success(resource_model: Option<LogGroupModel>) -> Self {
        ProgressEvent::Success { resource_model }
    }

    pub fn in_progress(
        resource_model: LogGroupModel,
        callback_context: CallbackContext,
        callback_delay: Duration,
    ) -> Self {
        ProgressEvent::InProgress {
            resource_model,
            callback_context,
            callback_delay,
        }
    }

    pub fn failed(error_code: HandlerErrorCode, message: impl Into<String>) -> Self {
        ProgressEvent::Failed {
            error_code,
            message: message.into(),
        }
    }

    /// Standard not-found failure for the given identifier.
    pub fn not_found(identifier: &str) -> Self {
        ProgressEvent::failed(
            HandlerErrorCode::NotFound,
            format!(
                "Resource of type '{}' with identifier '{}' was not found.",
                crate::model::TYPE_NAME,
                identifier
            ),
        )
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProgressEvent::Success { .. })
    }

    pub fn is_in_progress(&self) -> bool {
        matches!(self, ProgressEvent::InProgress { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ProgressEvent::Failed { .. })
    }

    /// True once the invocation chain is finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        !self.is_in_progress()
    }

    pub fn resource_model(&self) -> Option<&LogGroupModel> {
        match self {
            ProgressEvent::Success { resource_model } => resource_model.as_ref(),
            ProgressEvent::InProgress { resource_model, .. } => Some(resource_model),
            ProgressEvent::Failed { .. } => None,
        }
    }

    pub fn error_code(&self) -> Option<HandlerErrorCode> {
        match self {
            ProgressEvent::Failed { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }
}

/// Opaque resumable state threaded between invocations of one lifecycle
/// operation.
///
/// Tracks which remote calls have already committed (so a resumed flow never
/// re-issues them — re-sending create-log-group after a retryable key
/// association failure would fail with `AlreadyExists`) and how many times a
/// retryable call has been attempted. Serialized by the framework between
/// invocations, so the maps use deterministic ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackContext {
    attempts: BTreeMap<String, u32>,
    completed: BTreeSet<String>,
}

impl CallbackContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of attempts recorded for `operation` so far.
    pub fn attempts(&self, operation: &str) -> u32 {
        self.attempts.get(operation).copied().unwrap_or(0)
    }

    /// Record one more attempt for `operation`, returning the new total.
    pub fn record_attempt(&mut self, operation: &str) -> u32 {
        let count = self.attempts.entry(operation.to_string()).or_insert(0);
        *count += 1;
        *count
    }

    /// Mark `operation` as committed remotely; resumed invocations skip it.
    pub fn mark_completed(&mut self, operation: &str) {
        self.completed.insert(operation.to_string());
    }

    pub fn is_completed(&self, operation: &str) -> bool {
        self.completed.contains(operation)
    }
}
