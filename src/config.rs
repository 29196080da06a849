//! Client configuration: service endpoints, the task/model defaults map, and
//! retry policy knobs.
//!
//! The configuration is constructed once (programmatically or from JSON) and
//! injected into [`InferenceClient`](crate::client::InferenceClient) at build
//! time; nothing in the crate reads process-global state.

use crate::api::Task;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

fn default_base_url() -> String {
    "https://api-inference.huggingface.co/models".to_string()
}

fn default_hub_api_url() -> String {
    "https://huggingface.co/api/models".to_string()
}

fn default_max_retries() -> u32 {
    5
}

fn default_unavailable_status() -> u16 {
    503
}

fn default_retry_interval_ms() -> u64 {
    1_000
}

/// Recommended default model for each supported task.
///
/// The translation entry is a model-id prefix completed with a language pair
/// at call time (e.g. `Helsinki-NLP/opus-mt-` + `en-fr`).
fn default_task_models() -> HashMap<Task, String> {
    [
        (Task::FillMask, "bert-base-uncased"),
        (Task::Summarization, "facebook/bart-large-cnn"),
        (
            Task::TextClassification,
            "distilbert-base-uncased-finetuned-sst-2-english",
        ),
        (Task::QuestionAnswering, "deepset/roberta-base-squad2"),
        (
            Task::TableQuestionAnswering,
            "google/tapas-base-finetuned-wtq",
        ),
        (
            Task::SentenceSimilarity,
            "sentence-transformers/all-MiniLM-L6-v2",
        ),
        (Task::TextGeneration, "gpt2"),
        (Task::ZeroShotClassification, "facebook/bart-large-mnli"),
        (Task::Conversational, "microsoft/DialoGPT-large"),
        (
            Task::FeatureExtraction,
            "sentence-transformers/paraphrase-xlm-r-multilingual-v1",
        ),
        (Task::Translation, "Helsinki-NLP/opus-mt-"),
        (Task::ImageClassification, "google/vit-base-patch16-224"),
        (Task::ObjectDetection, "facebook/detr-resnet-50"),
        (Task::SpeechRecognition, "facebook/wav2vec2-base-960h"),
        (Task::AudioClassification, "superb/hubert-large-superb-er"),
    ]
    .into_iter()
    .map(|(task, model)| (task, model.to_string()))
    .collect()
}

/// Immutable client configuration.
///
/// Every field has a serde default, so a JSON config may override any subset
/// of the shipped values:
///
/// ```json
/// {
///   "base_url": "https://inference.example.com/models",
///   "max_retries": 3,
///   "retry_interval_ms": 250
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the inference service; requests POST to
    /// `{base_url}/{model_id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL of the model hub metadata API, used by task/model
    /// validation; metadata is fetched from `{hub_api_url}/{model_id}`.
    #[serde(default = "default_hub_api_url")]
    pub hub_api_url: String,
    /// Default model id per task. Also defines the set of supported tasks.
    #[serde(default = "default_task_models")]
    pub task_models: HashMap<Task, String>,
    /// Maximum number of attempts for one logical call, counting the first.
    /// Must be at least 1.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// HTTP status the service returns while a model is still loading; the
    /// only status that triggers a retry.
    #[serde(default = "default_unavailable_status")]
    pub unavailable_status: u16,
    /// Fixed delay between attempts, in milliseconds. There is no backoff.
    #[serde(default = "default_retry_interval_ms")]
    pub retry_interval_ms: u64,
    /// Optional per-request transport timeout in seconds. `None` leaves the
    /// transport's default in place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            hub_api_url: default_hub_api_url(),
            task_models: default_task_models(),
            max_retries: default_max_retries(),
            unavailable_status: default_unavailable_status(),
            retry_interval_ms: default_retry_interval_ms(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    /// Parse a configuration from a JSON string and validate it.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)
            .map_err(|e| Error::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&contents)
    }

    /// Validate invariants: URLs and model ids must be non-empty, the retry
    /// budget at least 1, and the timeout non-zero when set.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url cannot be empty".to_string()));
        }
        if self.hub_api_url.is_empty() {
            return Err(Error::Config("hub_api_url cannot be empty".to_string()));
        }
        if self.max_retries == 0 {
            return Err(Error::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == Some(0) {
            return Err(Error::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        for (task, model) in &self.task_models {
            if model.is_empty() {
                return Err(Error::Config(format!(
                    "Default model for task '{}' cannot be empty",
                    task
                )));
            }
        }
        Ok(())
    }

    /// The configured default model for `task`, or `Error::Config` when the
    /// map has no entry and the caller supplied no explicit model.
    pub fn default_model(&self, task: Task) -> Result<&str> {
        self.task_models
            .get(&task)
            .map(String::as_str)
            .ok_or_else(|| {
                Error::Config(format!(
                    "No default model configured for task '{}' and no model was given",
                    task
                ))
            })
    }

    /// Tasks present in the task/model map, sorted by wire name.
    pub fn supported_tasks(&self) -> Vec<Task> {
        let mut tasks: Vec<Task> = self.task_models.keys().copied().collect();
        tasks.sort_by_key(|t| t.wire_name());
        tasks
    }

    /// Fixed inter-attempt delay.
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis(self.retry_interval_ms)
    }

    /// Per-request transport timeout, when configured.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
