//! Update flow: converge retention and key association from the previous
//! model to the desired one, then read back the final state.

use tracing::{debug, info};

use crate::client::CloudWatchLogs;
use crate::model::HandlerRequest;
use crate::progress::{CallbackContext, ProgressEvent};
use crate::steps;

use super::{progress_from_step_error, read};

pub(crate) async fn handle(
    client: &dyn CloudWatchLogs,
    request: &HandlerRequest,
    mut context: CallbackContext,
) -> ProgressEvent {
    let desired = request.desired_state.clone().unwrap_or_default();
    let previous = request.previous_state.clone().unwrap_or_default();
    let Some(name) = desired.name().map(str::to_string) else {
        return ProgressEvent::not_found("");
    };
    info!("update requested for log group {}", name);

    // Retention first. The policy is deleted only when the desired model
    // dropped it; a present value is re-put without diffing against the
    // previous one.
    if desired.retention_in_days.is_none() && previous.retention_in_days.is_some() {
        if let Err(step) = steps::remove_retention_policy(client, &name, &mut context).await {
            return progress_from_step_error(step, desired, context);
        }
    } else if let Err(step) =
        steps::apply_retention_policy(client, &name, desired.retention_in_days, &mut context).await
    {
        return progress_from_step_error(step, desired, context);
    }

    // Key association second: disassociate on removal, associate on a new or
    // changed key, and leave an unchanged key alone.
    if desired.kms_key_arn.is_none() && previous.kms_key_arn.is_some() {
        if let Err(step) = steps::disassociate_kms_key(client, &name, &mut context).await {
            return progress_from_step_error(step, desired, context);
        }
    } else if desired.kms_key_arn.is_some() && desired.kms_key_arn != previous.kms_key_arn {
        if let Err(step) = steps::ensure_kms_key_associated(
            client,
            &name,
            desired.kms_key_arn.as_deref(),
            &mut context,
        )
        .await
        {
            return progress_from_step_error(step, desired, context);
        }
    } else {
        debug!("kms key association for {} unchanged", name);
    }

    read::read_log_group(client, &name).await
}
