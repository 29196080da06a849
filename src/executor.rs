//! Request execution: endpoint and model resolution, attempt classification,
//! and the fixed-interval retry loop shared by every task facade.

use crate::api::{Payload, Task};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::hub;
use crate::transport::{HttpResponse, HttpTransport};
use std::sync::Arc;
use std::time::Instant;

/// Outcome of a single HTTP attempt, decided from the status code alone.
#[derive(Debug)]
pub(crate) enum Attempt {
    /// 2xx with a valid JSON body.
    Success(serde_json::Value),
    /// The configured unavailable status, typically a model still loading.
    /// The only outcome worth another attempt.
    Retry,
    /// Anything else. Retrying cannot help.
    Fatal(Error),
}

/// Classify one attempt's response by its status code.
pub(crate) fn classify(response: HttpResponse, unavailable_status: u16) -> Attempt {
    if response.is_success() {
        return match response.json() {
            Ok(value) => Attempt::Success(value),
            Err(e) => Attempt::Fatal(e),
        };
    }
    if response.status == unavailable_status {
        return Attempt::Retry;
    }
    let message = response
        .error_message()
        .unwrap_or_else(|| response.text_lossy());
    Attempt::Fatal(Error::ApiCall {
        status: response.status,
        message,
    })
}

/// Shared request engine behind all task facades.
///
/// Holds the transport, configuration, and API token; facades only decide the
/// payload shape and which model to address.
pub struct RequestExecutor {
    transport: Arc<dyn HttpTransport>,
    config: Arc<ClientConfig>,
    api_token: String,
}

impl RequestExecutor {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        config: Arc<ClientConfig>,
        api_token: String,
    ) -> Self {
        Self {
            transport,
            config,
            api_token,
        }
    }

    pub(crate) fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), model)
    }

    /// Pick the model for a call.
    ///
    /// An explicitly chosen model is validated against the hub's declared
    /// task before anything is sent to the inference service; the configured
    /// defaults are trusted as-is.
    async fn resolve_model(&self, task: Task, model: Option<&str>) -> Result<String> {
        match model {
            Some(model) => {
                hub::ensure_task_match(
                    self.transport.as_ref(),
                    &self.config.hub_api_url,
                    model,
                    task,
                )
                .await?;
                Ok(model.to_string())
            }
            None => self.config.default_model(task).map(str::to_string),
        }
    }

    /// Run one logical inference call: resolve the model, then POST with
    /// fixed-interval retries while the service reports unavailable.
    ///
    /// The retry budget counts attempts, so `max_retries = 5` means at most
    /// five POSTs. Transport failures are terminal; only the unavailable
    /// status is retried.
    pub(crate) async fn execute(
        &self,
        task: Task,
        model: Option<&str>,
        payload: Payload,
    ) -> Result<serde_json::Value> {
        let model = self.resolve_model(task, model).await?;
        let url = self.endpoint(&model);

        let start = Instant::now();
        let mut attempts = 0;
        let max_attempts = self.config.max_retries;

        let res = loop {
            attempts += 1;
            let response = match self.transport.post(&url, &self.api_token, &payload).await {
                Ok(response) => response,
                Err(e) => break Err(e),
            };

            match classify(response, self.config.unavailable_status) {
                Attempt::Success(value) => break Ok(value),
                Attempt::Retry if attempts < max_attempts => {
                    metrics::counter!(
                        "inference_request.retries.total",
                        "task" => task.wire_name()
                    )
                    .increment(1);
                    tracing::warn!(
                        model = %model,
                        attempt = attempts,
                        interval_ms = self.config.retry_interval_ms,
                        "Service unavailable, retrying"
                    );
                    tokio::time::sleep(self.config.retry_interval()).await;
                    continue;
                }
                Attempt::Retry => break Err(Error::ServiceUnavailable { attempts }),
                Attempt::Fatal(e) => break Err(e),
            }
        };

        let duration = start.elapsed();
        let status = if res.is_ok() { "success" } else { "failure" };

        if let Err(e) = &res {
            tracing::error!(task = %task, model = %model, error = %e, "Inference request failed");
        }

        metrics::histogram!(
            "inference_request.duration_seconds",
            "task" => task.wire_name()
        )
        .record(duration.as_secs_f64());

        metrics::counter!(
            "inference_request.total",
            "task" => task.wire_name(),
            "status" => status
        )
        .increment(1);

        res
    }

    /// Load media input: a local file path, or an `http(s)` URL fetched over
    /// the transport.
    pub(crate) async fn resolve_media(&self, input: &str) -> Result<Vec<u8>> {
        if input.starts_with("http") {
            let response = self.transport.get(input).await?;
            if !response.is_success() {
                let message = response
                    .error_message()
                    .unwrap_or_else(|| format!("Failed to fetch media from '{}'", input));
                return Err(Error::ApiCall {
                    status: response.status,
                    message,
                });
            }
            return Ok(response.body);
        }

        tokio::fs::read(input).await.map_err(|e| {
            Error::InvalidInput(format!("Failed to read media file '{}': {}", input, e))
        })
    }

    /// Resolve a media input and run it through [`execute`](Self::execute)
    /// as a raw-bytes payload.
    pub(crate) async fn execute_media(
        &self,
        task: Task,
        model: Option<&str>,
        input: &str,
    ) -> Result<serde_json::Value> {
        let bytes = self.resolve_media(input).await?;
        self.execute(task, model, Payload::Media(bytes)).await
    }
}
