//! Declarative resource model for an `AWS::Logs::LogGroup` and the request
//! envelope the orchestration framework hands to each lifecycle handler.

use serde::{Deserialize, Serialize};

/// CloudFormation resource type managed by this handler.
pub const TYPE_NAME: &str = "AWS::Logs::LogGroup";

/// Desired (or last-known) state of one log group.
///
/// `log_group_name` is the primary identifier and is immutable once the
/// resource exists; the Create handler generates one when it is absent.
/// `arn` is assigned by CloudWatch Logs and only ever populated from a read
/// of remote state. `retention_in_days` and `kms_key_arn` are independently
/// optional: an absent retention means "no expiration policy", an absent key
/// means "default encryption".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct LogGroupModel {
    pub log_group_name: Option<String>,
    pub arn: Option<String>,
    pub retention_in_days: Option<i32>,
    pub kms_key_arn: Option<String>,
}

impl LogGroupModel {
    /// The log group name, treating an empty string the same as absent.
    pub fn name(&self) -> Option<&str> {
        self.log_group_name.as_deref().filter(|n| !n.is_empty())
    }
}

/// Request envelope for one handler invocation.
///
/// Filled in by the orchestration framework: `previous_state` is only
/// present for Update, `logical_resource_id` comes from the template, and
/// `client_request_token` is the idempotency token for the in-flight
/// stack operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HandlerRequest {
    pub desired_state: Option<LogGroupModel>,
    pub previous_state: Option<LogGroupModel>,
    pub logical_resource_id: Option<String>,
    pub client_request_token: String,
}

impl HandlerRequest {
    /// Convenience constructor for the common "desired state only" case.
    pub fn for_model(model: LogGroupModel) -> Self {
        Self {
            desired_state: Some(model),
            ..Self::default()
        }
    }
}
