//! CloudWatch Logs client seam.
//!
//! The reconciliation flows only ever talk to [`CloudWatchLogs`], which
//! narrows the service surface to the seven calls this resource needs.
//! [`SdkCloudWatchLogs`] implements it over the real AWS SDK client; tests
//! substitute a scripted implementation.

use async_trait::async_trait;
use aws_sdk_cloudwatchlogs as logs;
use aws_smithy_runtime_api::client::result::SdkError;
use aws_smithy_types::error::metadata::ProvideErrorMetadata;

use crate::error::LogsApiError;

/// One remote log group record, as returned by describe-log-groups.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogGroupSummary {
    pub log_group_name: Option<String>,
    pub arn: Option<String>,
    pub retention_in_days: Option<i32>,
    pub kms_key_id: Option<String>,
}

impl From<&logs::types::LogGroup> for LogGroupSummary {
    fn from(log_group: &logs::types::LogGroup) -> Self {
        Self {
            log_group_name: log_group.log_group_name.clone(),
            arn: log_group.arn.clone(),
            retention_in_days: log_group.retention_in_days,
            kms_key_id: log_group.kms_key_id.clone(),
        }
    }
}

/// The CloudWatch Logs operations the lifecycle handlers reconcile against.
///
/// Every call maps to exactly one service operation; failures carry the
/// service's error code and message so callers can classify them.
#[async_trait]
pub trait CloudWatchLogs: Send + Sync {
    /// Create a log group. Fails with `ResourceAlreadyExistsException` when
    /// the name is already live.
    async fn create_log_group(&self, log_group_name: &str) -> Result<(), LogsApiError>;

    /// Delete a log group. Fails with `ResourceNotFoundException` when the
    /// name does not exist.
    async fn delete_log_group(&self, log_group_name: &str) -> Result<(), LogsApiError>;

    /// List log groups whose names start with `log_group_name_prefix`.
    /// The service only supports prefix search; exact-match filtering is the
    /// caller's job.
    async fn describe_log_groups(
        &self,
        log_group_name_prefix: &str,
    ) -> Result<Vec<LogGroupSummary>, LogsApiError>;

    /// Set the retention policy, in days.
    async fn put_retention_policy(
        &self,
        log_group_name: &str,
        retention_in_days: i32,
    ) -> Result<(), LogsApiError>;

    /// Remove the retention policy, reverting to indefinite retention.
    async fn delete_retention_policy(&self, log_group_name: &str) -> Result<(), LogsApiError>;

    /// Associate a KMS key with the log group.
    async fn associate_kms_key(
        &self,
        log_group_name: &str,
        kms_key_id: &str,
    ) -> Result<(), LogsApiError>;

    /// Remove the KMS key association, reverting to default encryption.
    async fn disassociate_kms_key(&self, log_group_name: &str) -> Result<(), LogsApiError>;
}

/// [`CloudWatchLogs`] backed by the AWS SDK client.
///
/// Credential resolution and region selection stay with the caller: the
/// orchestration framework builds the `SdkConfig` for the account being
/// deployed into and hands it over.
#[derive(Debug, Clone)]
pub struct SdkCloudWatchLogs {
    client: logs::Client,
}

impl SdkCloudWatchLogs {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: logs::Client::new(config),
        }
    }

    pub fn from_client(client: logs::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CloudWatchLogs for SdkCloudWatchLogs {
    async fn create_log_group(&self, log_group_name: &str) -> Result<(), LogsApiError> {
        self.client
            .create_log_group()
            .log_group_name(log_group_name)
            .send()
            .await
            .map(|_| ())
            .map_err(api_error)
    }

    async fn delete_log_group(&self, log_group_name: &str) -> Result<(), LogsApiError> {
        self.client
            .delete_log_group()
            .log_group_name(log_group_name)
            .send()
            .await
            .map(|_| ())
            .map_err(api_error)
    }

    async fn describe_log_groups(
        &self,
        log_group_name_prefix: &str,
    ) -> Result<Vec<LogGroupSummary>, LogsApiError> {
        let mut paginator = self
            .client
            .describe_log_groups()
            .log_group_name_prefix(log_group_name_prefix)
            .into_paginator()
            .send();

        let mut summaries = Vec::new();
        while let Some(page) = paginator.next().await {
            let page = page.map_err(api_error)?;
            if let Some(log_groups) = page.log_groups {
                summaries.extend(log_groups.iter().map(LogGroupSummary::from));
            }
        }
        Ok(summaries)
    }

    async fn put_retention_policy(
        &self,
        log_group_name: &str,
        retention_in_days: i32,
    ) -> Result<(), LogsApiError> {
        self.client
            .put_retention_policy()
            .log_group_name(log_group_name)
            .retention_in_days(retention_in_days)
            .send()
            .await
            .map(|_| ())
            .map_err(api_error)
    }

    async fn delete_retention_policy(&self, log_group_name: &str) -> Result<(), LogsApiError> {
        self.client
            .delete_retention_policy()
            .log_group_name(log_group_name)
            .send()
            .await
            .map(|_| ())
            .map_err(api_error)
    }

    async fn associate_kms_key(
        &self,
        log_group_name: &str,
        kms_key_id: &str,
    ) -> Result<(), LogsApiError> {
        self.client
            .associate_kms_key()
            .log_group_name(log_group_name)
            .kms_key_id(kms_key_id)
            .send()
            .await
            .map(|_| ())
            .map_err(api_error)
    }

    async fn disassociate_kms_key(&self, log_group_name: &str) -> Result<(), LogsApiError> {
        self.client
            .disassociate_kms_key()
            .log_group_name(log_group_name)
            .send()
            .await
            .map(|_| ())
            .map_err(api_error)
    }
}

/// Reduce an SDK error to the code and message the service reported.
///
/// Connection-level failures carry no modeled metadata; for those the
/// high-level error description stands in as the message so nothing is
/// silently dropped.
fn api_error<E, R>(err: SdkError<E, R>) -> LogsApiError
where
    SdkError<E, R>: ProvideErrorMetadata + std::fmt::Display,
{
    let code = err.code().map(str::to_string);
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| err.to_string());
    LogsApiError {
        code,
        message: Some(message),
    }
}
