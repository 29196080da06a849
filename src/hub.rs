//! Model hub metadata lookups.
//!
//! The hub's model API reports each model's `pipeline_tag`, the task the
//! model was published for. Task facades call [`ensure_task_match`] before
//! sending any inference request for an explicitly chosen model, so a
//! mismatched model is rejected without spending an inference call.

use crate::api::Task;
use crate::error::{Error, Result};
use crate::transport::HttpTransport;

/// Fetch the task a model declares on the hub, if any.
///
/// Returns `Ok(None)` when the model's metadata carries no `pipeline_tag`.
pub(crate) async fn declared_task(
    transport: &dyn HttpTransport,
    hub_api_url: &str,
    model: &str,
) -> Result<Option<String>> {
    let url = format!("{}/{}", hub_api_url.trim_end_matches('/'), model);
    let response = transport.get(&url).await?;

    if !response.is_success() {
        let message = response.error_message().unwrap_or_else(|| {
            format!("Failed to fetch hub metadata for model '{}'", model)
        });
        return Err(Error::ApiCall {
            status: response.status,
            message,
        });
    }

    let body = response.json()?;
    Ok(body
        .get("pipeline_tag")
        .and_then(|tag| tag.as_str())
        .map(str::to_string))
}

/// Verify that `model` is published for `expected` before any inference call.
///
/// A model with no declared task is treated as a mismatch.
pub(crate) async fn ensure_task_match(
    transport: &dyn HttpTransport,
    hub_api_url: &str,
    model: &str,
    expected: Task,
) -> Result<()> {
    match declared_task(transport, hub_api_url, model).await? {
        Some(tag) if tag == expected.wire_name() => Ok(()),
        Some(tag) => {
            tracing::warn!(
                model = %model,
                declared = %tag,
                expected = %expected,
                "model task mismatch"
            );
            Err(Error::TaskModelMismatch(format!(
                "Model '{}' is published for task '{}', not '{}'",
                model, tag, expected
            )))
        }
        None => Err(Error::TaskModelMismatch(format!(
            "Model '{}' declares no task on the hub; expected '{}'",
            model, expected
        ))),
    }
}
