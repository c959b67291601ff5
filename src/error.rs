//! Error taxonomy for the log group handler.
//!
//! Remote failures are reduced to a [`LogsApiError`] carrying the service's
//! error code and message, then classified once: a small set of codes map to
//! the handler-level error codes the framework understands, and two
//! association-time failures are treated as KMS propagation lag and retried
//! instead of surfaced. Everything else is terminal and keeps the remote
//! message verbatim.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// CloudWatch Logs error code raised when a create hits a live name.
pub const CODE_RESOURCE_ALREADY_EXISTS: &str = "ResourceAlreadyExistsException";
/// CloudWatch Logs error code for a missing log group.
pub const CODE_RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";
/// CloudWatch Logs error code for a malformed or unusable parameter.
pub const CODE_INVALID_PARAMETER: &str = "InvalidParameterException";
/// Error code for a permission failure.
pub const CODE_ACCESS_DENIED: &str = "AccessDeniedException";

/// Fragment of the service message reported when an associate-kms-key call
/// names a key the logging service cannot see yet.
const KMS_KEY_NOT_FOUND_FRAGMENT: &str = "The specified KMS Key Id could not be found";

/// Handler-level error codes surfaced to the orchestration framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandlerErrorCode {
    AlreadyExists,
    NotFound,
    InvalidRequest,
    AccessDenied,
    Throttling,
    ResourceConflict,
    ServiceError,
}

impl HandlerErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerErrorCode::AlreadyExists => "AlreadyExists",
            HandlerErrorCode::NotFound => "NotFound",
            HandlerErrorCode::InvalidRequest => "InvalidRequest",
            HandlerErrorCode::AccessDenied => "AccessDenied",
            HandlerErrorCode::Throttling => "Throttling",
            HandlerErrorCode::ResourceConflict => "ResourceConflict",
            HandlerErrorCode::ServiceError => "ServiceError",
        }
    }
}

impl std::fmt::Display for HandlerErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure reported by the CloudWatch Logs API, reduced to the error code
/// and message the service returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{} ({})",
    .message.as_deref().unwrap_or("no message from service"),
    .code.as_deref().unwrap_or("UnknownError"))]
pub struct LogsApiError {
    pub code: Option<String>,
    pub message: Option<String>,
}

impl LogsApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: Some(message.into()),
        }
    }

    /// A failure with no modeled error code, e.g. a connection-level error.
    pub fn unmodeled(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: Some(message.into()),
        }
    }

    fn code_is(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }

    pub fn is_already_exists(&self) -> bool {
        self.code_is(CODE_RESOURCE_ALREADY_EXISTS)
    }

    pub fn is_not_found(&self) -> bool {
        self.code_is(CODE_RESOURCE_NOT_FOUND)
    }

    pub fn is_invalid_parameter(&self) -> bool {
        self.code_is(CODE_INVALID_PARAMETER)
    }

    pub fn is_access_denied(&self) -> bool {
        self.code_is(CODE_ACCESS_DENIED)
    }

    /// KMS-association propagation policy.
    ///
    /// Keys are frequently provisioned in the same stack operation as the
    /// log group, so two failures are treated as propagation lag and retried
    /// with bounded attempts instead of failing the operation:
    ///
    /// - the service reporting the key id as not found (key not visible in
    ///   the region yet), and
    /// - `AccessDeniedException` (key policy grants still propagating).
    ///
    /// Anything else (disabled key, malformed arn, throttling, ...) keeps its
    /// normal terminal classification.
    pub fn is_retryable_kms_association_failure(&self) -> bool {
        if self.is_access_denied() {
            return true;
        }
        self.message
            .as_deref()
            .is_some_and(|m| m.contains(KMS_KEY_NOT_FOUND_FRAGMENT))
    }

    /// Map the remote error code onto the handler-level taxonomy.
    pub fn handler_error_code(&self) -> HandlerErrorCode {
        match self.code.as_deref() {
            Some(CODE_RESOURCE_ALREADY_EXISTS) => HandlerErrorCode::AlreadyExists,
            Some(CODE_RESOURCE_NOT_FOUND) => HandlerErrorCode::NotFound,
            Some(CODE_INVALID_PARAMETER) => HandlerErrorCode::InvalidRequest,
            Some(CODE_ACCESS_DENIED) => HandlerErrorCode::AccessDenied,
            Some("OperationAbortedException") => HandlerErrorCode::ResourceConflict,
            Some("ThrottlingException") | Some("LimitExceededException") => {
                HandlerErrorCode::Throttling
            }
            _ => HandlerErrorCode::ServiceError,
        }
    }
}
