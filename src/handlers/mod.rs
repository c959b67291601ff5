//! Lifecycle handlers for the log group resource.
//!
//! Each handler composes the shared reconciliation steps into one of the four
//! operation flows the orchestration framework dispatches. A handler performs
//! one pass per invocation: it issues whatever remote calls its flow still
//! owes, then either finishes with a terminal event or hands back an
//! in-progress event whose callback context lets the next invocation resume
//! where this one stopped.

mod create;
mod delete;
mod read;
mod update;

use std::sync::Arc;

use tracing::debug;

use crate::client::{CloudWatchLogs, SdkCloudWatchLogs};
use crate::model::{HandlerRequest, LogGroupModel};
use crate::progress::{CallbackContext, ProgressEvent};
use crate::steps::StepError;

/// Entry point for the four lifecycle operations on a log group.
///
/// The orchestration framework resolves credentials for the target account,
/// builds one handler from the resulting config, and dispatches the requested
/// action with the request envelope plus the callback context returned by the
/// previous invocation, if any. The handler never sleeps or re-invokes
/// itself; wait-and-retry is expressed through the events it returns.
#[derive(Clone)]
pub struct LogGroupHandler {
    client: Arc<dyn CloudWatchLogs>,
}

impl std::fmt::Debug for LogGroupHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogGroupHandler")
            .field("client", &"<dyn CloudWatchLogs>")
            .finish()
    }
}

impl LogGroupHandler {
    /// Handler over the real CloudWatch Logs service in the account and
    /// region `config` was resolved for.
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self::with_client(Arc::new(SdkCloudWatchLogs::new(config)))
    }

    /// Handler over any [`CloudWatchLogs`] implementation. Tests use this
    /// with a scripted client.
    pub fn with_client(client: Arc<dyn CloudWatchLogs>) -> Self {
        Self { client }
    }

    /// Create the log group described by the request's desired state.
    pub async fn create(
        &self,
        request: &HandlerRequest,
        callback_context: Option<CallbackContext>,
    ) -> ProgressEvent {
        create::handle(
            self.client.as_ref(),
            request,
            callback_context.unwrap_or_default(),
        )
        .await
    }

    /// Materialize the current remote state of the requested log group.
    ///
    /// Read completes in a single pass and takes no callback context.
    pub async fn read(&self, request: &HandlerRequest) -> ProgressEvent {
        read::handle(self.client.as_ref(), request).await
    }

    /// Converge remote state from the request's previous state to its
    /// desired state.
    pub async fn update(
        &self,
        request: &HandlerRequest,
        callback_context: Option<CallbackContext>,
    ) -> ProgressEvent {
        update::handle(
            self.client.as_ref(),
            request,
            callback_context.unwrap_or_default(),
        )
        .await
    }

    /// Delete the requested log group and wait for the deletion to settle.
    pub async fn delete(
        &self,
        request: &HandlerRequest,
        callback_context: Option<CallbackContext>,
    ) -> ProgressEvent {
        delete::handle(
            self.client.as_ref(),
            request,
            callback_context.unwrap_or_default(),
        )
        .await
    }
}

/// Fold a failed step into the event handed back to the framework.
///
/// Retryable failures become in-progress events carrying the updated context,
/// so the framework re-invokes the handler after the step's delay. Terminal
/// failures map the remote error onto the handler taxonomy with the service
/// message intact.
fn progress_from_step_error(
    error: StepError,
    resource_model: LogGroupModel,
    context: CallbackContext,
) -> ProgressEvent {
    match error {
        StepError::Retryable {
            error,
            attempts,
            delay,
        } => {
            debug!(
                "re-invocation requested after {:?} (attempt {}): {}",
                delay, attempts, error
            );
            ProgressEvent::in_progress(resource_model, context, delay)
        }
        StepError::Terminal { error } => {
            ProgressEvent::failed(error.handler_error_code(), error.to_string())
        }
    }
}
