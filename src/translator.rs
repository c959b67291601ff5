//! Pure mapping between remote log group records and the resource model.

use crate::client::LogGroupSummary;
use crate::model::LogGroupModel;

/// Pick the record whose name matches `log_group_name` exactly.
///
/// describe-log-groups is a prefix search, so a non-empty result may still
/// not contain the requested resource.
pub(crate) fn find_exact<'a>(
    summaries: &'a [LogGroupSummary],
    log_group_name: &str,
) -> Option<&'a LogGroupSummary> {
    summaries
        .iter()
        .find(|summary| summary.log_group_name.as_deref() == Some(log_group_name))
}

/// Materialize the resource model from a remote record.
///
/// Every field comes from the remote side; nothing is echoed from caller
/// input, which keeps Read the single source of truth for current state.
pub(crate) fn model_from_summary(summary: &LogGroupSummary) -> LogGroupModel {
    LogGroupModel {
        log_group_name: summary.log_group_name.clone(),
        arn: summary.arn.clone(),
        retention_in_days: summary.retention_in_days,
        kms_key_arn: summary.kms_key_id.clone(),
    }
}
