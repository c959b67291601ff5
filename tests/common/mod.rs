//! Scripted CloudWatch Logs double shared by the handler integration tests.
//!
//! [`FakeCloudWatchLogs`] keeps an in-memory account of log groups so
//! lifecycle sequences behave like the real service: describe is a prefix
//! search, duplicate creates are rejected, deletes of missing groups fail.
//! On top of that, tests can script failures per operation (consumed
//! first-in-first-out before the stateful behavior runs) and make a deleted
//! group linger in describe results to exercise stabilization. Every remote
//! call is recorded for order and count assertions.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use cfn_logs_loggroup::{
    CallbackContext, CloudWatchLogs, HandlerErrorCode, HandlerRequest, LogGroupModel,
    LogGroupSummary, LogsApiError, ProgressEvent,
};

/// ARN the fake assigns to a group, mirroring the service's shape.
pub fn arn_for(log_group_name: &str) -> String {
    format!("arn:aws:logs:us-east-2:0123456789012:log-group:{log_group_name}:*")
}

/// Model with only the name set.
pub fn named_model(log_group_name: &str) -> LogGroupModel {
    LogGroupModel {
        log_group_name: Some(log_group_name.to_string()),
        ..LogGroupModel::default()
    }
}

/// Request envelope for an update from `previous` to `desired`.
pub fn update_request(desired: LogGroupModel, previous: LogGroupModel) -> HandlerRequest {
    HandlerRequest {
        desired_state: Some(desired),
        previous_state: Some(previous),
        ..HandlerRequest::default()
    }
}

pub fn group_already_exists_error() -> LogsApiError {
    LogsApiError::new(
        "ResourceAlreadyExistsException",
        "The specified log group already exists",
    )
}

pub fn group_not_found_error() -> LogsApiError {
    LogsApiError::new(
        "ResourceNotFoundException",
        "The specified log group does not exist.",
    )
}

pub fn kms_key_not_found_error() -> LogsApiError {
    LogsApiError::new(
        "InvalidParameterException",
        "The specified KMS Key Id could not be found in account 0123456789012",
    )
}

pub fn kms_access_denied_error() -> LogsApiError {
    LogsApiError::new(
        "AccessDeniedException",
        "User is not authorized to perform kms:DescribeKey on the specified key",
    )
}

#[derive(Default)]
struct FakeState {
    groups: BTreeMap<String, LogGroupSummary>,
    scripted_failures: HashMap<String, VecDeque<LogsApiError>>,
    calls: Vec<String>,
    /// Groups to keep visible to describe for N more calls after deletion.
    linger_config: HashMap<String, u32>,
    lingering: Vec<(String, u32)>,
}

impl FakeState {
    fn take_failure(&mut self, operation: &str) -> Option<LogsApiError> {
        self.scripted_failures
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
    }
}

#[derive(Default)]
pub struct FakeCloudWatchLogs {
    state: Mutex<FakeState>,
}

impl FakeCloudWatchLogs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a log group as pre-existing remote state.
    pub fn seed_group(
        &self,
        log_group_name: &str,
        retention_in_days: Option<i32>,
        kms_key_id: Option<&str>,
    ) {
        let mut state = self.state.lock().unwrap();
        state.groups.insert(
            log_group_name.to_string(),
            LogGroupSummary {
                log_group_name: Some(log_group_name.to_string()),
                arn: Some(arn_for(log_group_name)),
                retention_in_days,
                kms_key_id: kms_key_id.map(str::to_string),
            },
        );
    }

    /// Queue `error` as the outcome of the next `operation` call. Repeated
    /// calls queue further failures consumed in order.
    pub fn fail_next(&self, operation: &str, error: LogsApiError) {
        let mut state = self.state.lock().unwrap();
        state
            .scripted_failures
            .entry(operation.to_string())
            .or_default()
            .push_back(error);
    }

    /// After a successful delete, keep `log_group_name` visible to describe
    /// for `count` more calls before it disappears.
    pub fn linger_after_delete(&self, log_group_name: &str, count: u32) {
        let mut state = self.state.lock().unwrap();
        state.linger_config.insert(log_group_name.to_string(), count);
    }

    /// Every remote call so far, in order, e.g. `CreateLogGroup(my-group)`.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    /// How many calls to `operation` have been made so far.
    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| call.starts_with(operation))
            .count()
    }

    /// Current remote record for `log_group_name`, if it exists.
    pub fn group(&self, log_group_name: &str) -> Option<LogGroupSummary> {
        self.state.lock().unwrap().groups.get(log_group_name).cloned()
    }
}

#[async_trait]
impl CloudWatchLogs for FakeCloudWatchLogs {
    async fn create_log_group(&self, log_group_name: &str) -> Result<(), LogsApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("CreateLogGroup({log_group_name})"));
        if let Some(error) = state.take_failure("CreateLogGroup") {
            return Err(error);
        }
        if state.groups.contains_key(log_group_name) {
            return Err(group_already_exists_error());
        }
        state.groups.insert(
            log_group_name.to_string(),
            LogGroupSummary {
                log_group_name: Some(log_group_name.to_string()),
                arn: Some(arn_for(log_group_name)),
                retention_in_days: None,
                kms_key_id: None,
            },
        );
        Ok(())
    }

    async fn delete_log_group(&self, log_group_name: &str) -> Result<(), LogsApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("DeleteLogGroup({log_group_name})"));
        if let Some(error) = state.take_failure("DeleteLogGroup") {
            return Err(error);
        }
        if state.groups.remove(log_group_name).is_none() {
            return Err(group_not_found_error());
        }
        if let Some(count) = state.linger_config.remove(log_group_name) {
            state.lingering.push((log_group_name.to_string(), count));
        }
        Ok(())
    }

    async fn describe_log_groups(
        &self,
        log_group_name_prefix: &str,
    ) -> Result<Vec<LogGroupSummary>, LogsApiError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(format!("DescribeLogGroups({log_group_name_prefix})"));
        if let Some(error) = state.take_failure("DescribeLogGroups") {
            return Err(error);
        }
        let mut matches: Vec<LogGroupSummary> = state
            .groups
            .values()
            .filter(|group| {
                group
                    .log_group_name
                    .as_deref()
                    .is_some_and(|name| name.starts_with(log_group_name_prefix))
            })
            .cloned()
            .collect();
        for (name, remaining) in state.lingering.iter_mut() {
            if *remaining > 0 && name.starts_with(log_group_name_prefix) {
                *remaining -= 1;
                matches.push(LogGroupSummary {
                    log_group_name: Some(name.clone()),
                    arn: Some(arn_for(name)),
                    retention_in_days: None,
                    kms_key_id: None,
                });
            }
        }
        Ok(matches)
    }

    async fn put_retention_policy(
        &self,
        log_group_name: &str,
        retention_in_days: i32,
    ) -> Result<(), LogsApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!(
            "PutRetentionPolicy({log_group_name}, {retention_in_days})"
        ));
        if let Some(error) = state.take_failure("PutRetentionPolicy") {
            return Err(error);
        }
        match state.groups.get_mut(log_group_name) {
            Some(group) => {
                group.retention_in_days = Some(retention_in_days);
                Ok(())
            }
            None => Err(group_not_found_error()),
        }
    }

    async fn delete_retention_policy(&self, log_group_name: &str) -> Result<(), LogsApiError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(format!("DeleteRetentionPolicy({log_group_name})"));
        if let Some(error) = state.take_failure("DeleteRetentionPolicy") {
            return Err(error);
        }
        match state.groups.get_mut(log_group_name) {
            Some(group) => {
                group.retention_in_days = None;
                Ok(())
            }
            None => Err(group_not_found_error()),
        }
    }

    async fn associate_kms_key(
        &self,
        log_group_name: &str,
        kms_key_id: &str,
    ) -> Result<(), LogsApiError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(format!("AssociateKmsKey({log_group_name}, {kms_key_id})"));
        if let Some(error) = state.take_failure("AssociateKmsKey") {
            return Err(error);
        }
        match state.groups.get_mut(log_group_name) {
            Some(group) => {
                group.kms_key_id = Some(kms_key_id.to_string());
                Ok(())
            }
            None => Err(group_not_found_error()),
        }
    }

    async fn disassociate_kms_key(&self, log_group_name: &str) -> Result<(), LogsApiError> {
        let mut state = self.state.lock().unwrap();
        state
            .calls
            .push(format!("DisassociateKmsKey({log_group_name})"));
        if let Some(error) = state.take_failure("DisassociateKmsKey") {
            return Err(error);
        }
        match state.groups.get_mut(log_group_name) {
            Some(group) => {
                group.kms_key_id = None;
                Ok(())
            }
            None => Err(group_not_found_error()),
        }
    }
}

/// Unwrap a success event that carries the materialized model.
pub fn expect_success_model(event: ProgressEvent) -> LogGroupModel {
    match event {
        ProgressEvent::Success {
            resource_model: Some(model),
        } => model,
        other => panic!("expected success with a model, got {other:?}"),
    }
}

/// Unwrap a success event that carries no model (a completed delete).
pub fn expect_success_without_model(event: ProgressEvent) {
    match event {
        ProgressEvent::Success {
            resource_model: None,
        } => {}
        other => panic!("expected success without a model, got {other:?}"),
    }
}

/// Unwrap an in-progress event into its resume ingredients.
pub fn expect_in_progress(event: ProgressEvent) -> (LogGroupModel, CallbackContext, Duration) {
    match event {
        ProgressEvent::InProgress {
            resource_model,
            callback_context,
            callback_delay,
        } => (resource_model, callback_context, callback_delay),
        other => panic!("expected in-progress, got {other:?}"),
    }
}

/// Unwrap a terminal failure into its code and message.
pub fn expect_failure(event: ProgressEvent) -> (HandlerErrorCode, String) {
    match event {
        ProgressEvent::Failed {
            error_code,
            message,
        } => (error_code, message),
        other => panic!("expected failure, got {other:?}"),
    }
}
