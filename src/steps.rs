//! Shared reconciliation steps.
//!
//! Each step issues at most one remote call and folds the outcome into the
//! callback context: committed calls are marked completed so a resumed
//! invocation skips them, and the KMS association step counts its attempts
//! against the bounded propagation-retry budget. Steps report
//! [`StepError::Retryable`] when the framework should re-invoke the handler
//! and [`StepError::Terminal`] when the operation has failed for good.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::client::CloudWatchLogs;
use crate::error::LogsApiError;
use crate::progress::CallbackContext;

pub(crate) const OP_CREATE_LOG_GROUP: &str = "logs:CreateLogGroup";
pub(crate) const OP_DELETE_LOG_GROUP: &str = "logs:DeleteLogGroup";
pub(crate) const OP_PUT_RETENTION_POLICY: &str = "logs:PutRetentionPolicy";
pub(crate) const OP_DELETE_RETENTION_POLICY: &str = "logs:DeleteRetentionPolicy";
pub(crate) const OP_ASSOCIATE_KMS_KEY: &str = "logs:AssociateKmsKey";
pub(crate) const OP_DISASSOCIATE_KMS_KEY: &str = "logs:DisassociateKmsKey";

/// Keys created in the same stack operation can take a while to become
/// visible to the logging service. A 5 second delay across 20 attempts is
/// enough to ride out both key and key-policy propagation.
pub(crate) const KMS_ASSOCIATION_MAX_ATTEMPTS: u32 = 20;
pub(crate) const KMS_ASSOCIATION_RETRY_DELAY: Duration = Duration::from_secs(5);

/// How a step failed: ask the framework to re-invoke, or give up.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum StepError {
    Retryable {
        error: LogsApiError,
        attempts: u32,
        delay: Duration,
    },
    Terminal {
        error: LogsApiError,
    },
}

impl From<LogsApiError> for StepError {
    fn from(error: LogsApiError) -> Self {
        StepError::Terminal { error }
    }
}

/// Create the log group unless an earlier invocation already did.
///
/// "Already exists" is terminal by contract: a create must never adopt a
/// live resource.
pub(crate) async fn ensure_log_group_created(
    client: &dyn CloudWatchLogs,
    log_group_name: &str,
    context: &mut CallbackContext,
) -> Result<(), StepError> {
    if context.is_completed(OP_CREATE_LOG_GROUP) {
        debug!("log group {} already created, skipping", log_group_name);
        return Ok(());
    }
    info!("creating log group {}", log_group_name);
    client.create_log_group(log_group_name).await?;
    context.mark_completed(OP_CREATE_LOG_GROUP);
    Ok(())
}

/// Issue the delete unless an earlier invocation already did.
///
/// "Not found" from the delete call itself propagates as a terminal failure;
/// only the delete flow's stabilization probe treats a missing group as the
/// desired end state.
pub(crate) async fn ensure_log_group_deleted(
    client: &dyn CloudWatchLogs,
    log_group_name: &str,
    context: &mut CallbackContext,
) -> Result<(), StepError> {
    if context.is_completed(OP_DELETE_LOG_GROUP) {
        debug!(
            "delete of log group {} already issued, skipping",
            log_group_name
        );
        return Ok(());
    }
    info!("deleting log group {}", log_group_name);
    client.delete_log_group(log_group_name).await?;
    context.mark_completed(OP_DELETE_LOG_GROUP);
    Ok(())
}

/// Apply the desired retention policy, if the model carries one.
///
/// An absent value is a no-op here: the service default for a new group is
/// already "no retention", and removing an existing policy is a separate
/// step driven by the update delta.
pub(crate) async fn apply_retention_policy(
    client: &dyn CloudWatchLogs,
    log_group_name: &str,
    retention_in_days: Option<i32>,
    context: &mut CallbackContext,
) -> Result<(), StepError> {
    let Some(days) = retention_in_days else {
        return Ok(());
    };
    if context.is_completed(OP_PUT_RETENTION_POLICY) {
        return Ok(());
    }
    info!("setting retention of {} days on {}", days, log_group_name);
    client.put_retention_policy(log_group_name, days).await?;
    context.mark_completed(OP_PUT_RETENTION_POLICY);
    Ok(())
}

/// Remove the retention policy, reverting to indefinite retention.
pub(crate) async fn remove_retention_policy(
    client: &dyn CloudWatchLogs,
    log_group_name: &str,
    context: &mut CallbackContext,
) -> Result<(), StepError> {
    if context.is_completed(OP_DELETE_RETENTION_POLICY) {
        return Ok(());
    }
    info!("deleting retention policy on {}", log_group_name);
    client.delete_retention_policy(log_group_name).await?;
    context.mark_completed(OP_DELETE_RETENTION_POLICY);
    Ok(())
}

/// Associate the desired KMS key, if the model carries one, under the
/// bounded propagation-retry policy.
///
/// Failures that look like the key not having propagated yet (see
/// [`LogsApiError::is_retryable_kms_association_failure`]) are converted to
/// a retryable signal until the attempt budget runs out; the last remote
/// error rides along either way.
pub(crate) async fn ensure_kms_key_associated(
    client: &dyn CloudWatchLogs,
    log_group_name: &str,
    kms_key_arn: Option<&str>,
    context: &mut CallbackContext,
) -> Result<(), StepError> {
    let Some(key) = kms_key_arn else {
        return Ok(());
    };
    if context.is_completed(OP_ASSOCIATE_KMS_KEY) {
        return Ok(());
    }
    info!("associating kms key {} with {}", key, log_group_name);
    match client.associate_kms_key(log_group_name, key).await {
        Ok(()) => {
            context.mark_completed(OP_ASSOCIATE_KMS_KEY);
            Ok(())
        }
        Err(error) if error.is_retryable_kms_association_failure() => {
            let attempts = context.record_attempt(OP_ASSOCIATE_KMS_KEY);
            if attempts >= KMS_ASSOCIATION_MAX_ATTEMPTS {
                warn!(
                    "kms key association with {} exhausted {} attempts: {}",
                    log_group_name, attempts, error
                );
                return Err(StepError::Terminal { error });
            }
            warn!(
                "kms key association with {} failed (attempt {}), retrying: {}",
                log_group_name, attempts, error
            );
            Err(StepError::Retryable {
                error,
                attempts,
                delay: KMS_ASSOCIATION_RETRY_DELAY,
            })
        }
        Err(error) => Err(StepError::Terminal { error }),
    }
}

/// Remove the KMS key association.
///
/// The service reports a key that is already gone as an invalid parameter;
/// since the desired end state ("no key associated") already holds, that
/// case counts as success.
pub(crate) async fn disassociate_kms_key(
    client: &dyn CloudWatchLogs,
    log_group_name: &str,
    context: &mut CallbackContext,
) -> Result<(), StepError> {
    if context.is_completed(OP_DISASSOCIATE_KMS_KEY) {
        return Ok(());
    }
    info!("disassociating kms key from {}", log_group_name);
    match client.disassociate_kms_key(log_group_name).await {
        Ok(()) => {
            context.mark_completed(OP_DISASSOCIATE_KMS_KEY);
            Ok(())
        }
        Err(error) if error.is_invalid_parameter() => {
            info!(
                "kms key already disassociated from {}: {}",
                log_group_name, error
            );
            context.mark_completed(OP_DISASSOCIATE_KMS_KEY);
            Ok(())
        }
        Err(error) => Err(StepError::Terminal { error }),
    }
}
