//! Read flow: materialize the authoritative current state of a log group.

use tracing::debug;

use crate::client::CloudWatchLogs;
use crate::model::HandlerRequest;
use crate::progress::ProgressEvent;
use crate::translator;

pub(crate) async fn handle(
    client: &dyn CloudWatchLogs,
    request: &HandlerRequest,
) -> ProgressEvent {
    // A model with no name can never correspond to a remote resource, so
    // there is nothing to ask the service.
    let Some(name) = request.desired_state.as_ref().and_then(|model| model.name()) else {
        return ProgressEvent::not_found("");
    };
    read_log_group(client, name).await
}

/// Describe by prefix and settle on the exact name match.
///
/// The service only supports prefix search, so a non-empty answer may still
/// not contain the requested group. Shared as the final step of the Create
/// and Update flows, which keeps all three operations reporting state from
/// the same source.
pub(crate) async fn read_log_group(
    client: &dyn CloudWatchLogs,
    log_group_name: &str,
) -> ProgressEvent {
    debug!("reading log group {}", log_group_name);
    let summaries = match client.describe_log_groups(log_group_name).await {
        Ok(summaries) => summaries,
        Err(error) => {
            return ProgressEvent::failed(error.handler_error_code(), error.to_string())
        }
    };
    match translator::find_exact(&summaries, log_group_name) {
        Some(summary) => ProgressEvent::success(Some(translator::model_from_summary(summary))),
        None => ProgressEvent::not_found(log_group_name),
    }
}
