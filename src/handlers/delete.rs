//! Delete flow: issue the delete, then poll until the name stops appearing.

use std::time::Duration;

use tracing::{debug, info};

use crate::client::CloudWatchLogs;
use crate::model::HandlerRequest;
use crate::progress::{CallbackContext, ProgressEvent};
use crate::steps;
use crate::translator;

use super::progress_from_step_error;

/// Deletions usually settle quickly, but describe can trail the delete call
/// by a few seconds.
const STABILIZATION_DELAY: Duration = Duration::from_secs(5);

pub(crate) async fn handle(
    client: &dyn CloudWatchLogs,
    request: &HandlerRequest,
    mut context: CallbackContext,
) -> ProgressEvent {
    let model = request.desired_state.clone().unwrap_or_default();
    let Some(name) = model.name().map(str::to_string) else {
        return ProgressEvent::not_found("");
    };
    info!("delete requested for log group {}", name);

    if let Err(step) = steps::ensure_log_group_deleted(client, &name, &mut context).await {
        return progress_from_step_error(step, model, context);
    }

    // Stabilize: the delete has been accepted, so a probe that still shows
    // the name just needs more time, and a probe that cannot find it (empty
    // result or a not-found answer) confirms the end state. A completed
    // delete reports no resource model.
    match client.describe_log_groups(&name).await {
        Ok(summaries) if translator::find_exact(&summaries, &name).is_some() => {
            debug!("log group {} still visible, deletion not settled yet", name);
            ProgressEvent::in_progress(model, context, STABILIZATION_DELAY)
        }
        Ok(_) => ProgressEvent::success(None),
        Err(error) if error.is_not_found() => ProgressEvent::success(None),
        Err(error) => ProgressEvent::failed(error.handler_error_code(), error.to_string()),
    }
}
