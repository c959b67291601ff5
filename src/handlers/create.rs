//! Create flow: name generation, group creation, initial retention and key
//! association, then a read of the authoritative final state.

use tracing::{debug, info};

use crate::client::CloudWatchLogs;
use crate::identifier;
use crate::model::{HandlerRequest, LogGroupModel};
use crate::progress::{CallbackContext, ProgressEvent};
use crate::steps;

use super::{progress_from_step_error, read};

/// Prefix for generated names when the request carries no logical resource
/// id to derive one from.
const DEFAULT_LOG_GROUP_NAME_PREFIX: &str = "LogGroup";

/// CloudWatch Logs caps log group names at 512 characters.
const MAX_LOG_GROUP_NAME_LENGTH: usize = 512;

pub(crate) async fn handle(
    client: &dyn CloudWatchLogs,
    request: &HandlerRequest,
    mut context: CallbackContext,
) -> ProgressEvent {
    let (model, name) = normalized_model(request);
    info!("create requested for log group {}", name);

    if let Err(step) = steps::ensure_log_group_created(client, &name, &mut context).await {
        return progress_from_step_error(step, model, context);
    }
    if let Err(step) =
        steps::apply_retention_policy(client, &name, model.retention_in_days, &mut context).await
    {
        return progress_from_step_error(step, model, context);
    }
    if let Err(step) =
        steps::ensure_kms_key_associated(client, &name, model.kms_key_arn.as_deref(), &mut context)
            .await
    {
        return progress_from_step_error(step, model, context);
    }

    // The create response carries no ARN, so the shared read tail is what
    // materializes the final state.
    read::read_log_group(client, &name).await
}

/// Prepare a model that is safe to operate on.
///
/// An absent desired state becomes an empty model, and a missing or empty
/// name is generated from the logical resource id and the client request
/// token. The token is what keeps generation deterministic: a retried create
/// carries the same token and converges on the same name instead of
/// provisioning a duplicate group.
fn normalized_model(request: &HandlerRequest) -> (LogGroupModel, String) {
    let mut model = request.desired_state.clone().unwrap_or_default();
    let name = match model.name() {
        Some(name) => name.to_string(),
        None => {
            let prefix = request
                .logical_resource_id
                .as_deref()
                .filter(|id| !id.is_empty())
                .unwrap_or(DEFAULT_LOG_GROUP_NAME_PREFIX);
            let generated = identifier::generate_resource_identifier(
                prefix,
                &request.client_request_token,
                MAX_LOG_GROUP_NAME_LENGTH,
            );
            debug!("generated log group name {} from {}", generated, prefix);
            model.log_group_name = Some(generated.clone());
            generated
        }
    };
    (model, name)
}
