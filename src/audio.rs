//! Audio task facade.
//!
//! Same input convention as the image tasks: local file paths or `http(s)`
//! URLs, posted as raw bytes.

use crate::api::Task;
use crate::error::{Error, Result};
use crate::executor::RequestExecutor;
use crate::frame::Frame;
use serde_json::Value;
use std::sync::Arc;

/// Handle for the audio tasks. Obtain via
/// [`InferenceClient::audio`](crate::client::InferenceClient::audio).
pub struct Audio {
    executor: Arc<RequestExecutor>,
}

impl Audio {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Transcribe speech. The response carries the transcript in `text`.
    pub async fn speech_recognition(&self, input: &str, model: Option<&str>) -> Result<Value> {
        self.executor
            .execute_media(Task::SpeechRecognition, model, input)
            .await
    }

    /// Speech recognition over several inputs, one request per input.
    pub async fn speech_recognition_batch(
        &self,
        inputs: &[&str],
        model: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut responses = Vec::with_capacity(inputs.len());
        for input in inputs {
            responses.push(self.speech_recognition(input, model).await?);
        }
        Ok(responses)
    }

    /// Classify an audio clip. Returns labels ordered by score.
    pub async fn audio_classification(&self, input: &str, model: Option<&str>) -> Result<Value> {
        self.executor
            .execute_media(Task::AudioClassification, model, input)
            .await
    }

    /// Audio classification over several inputs, one request per input.
    pub async fn audio_classification_batch(
        &self,
        inputs: &[&str],
        model: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut responses = Vec::with_capacity(inputs.len());
        for input in inputs {
            responses.push(self.audio_classification(input, model).await?);
        }
        Ok(responses)
    }

    /// Speech recognition over a frame column of paths or URLs; predictions
    /// are the transcripts.
    pub async fn speech_recognition_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for input in frame.string_column(column)? {
            let response = self.speech_recognition(input, model).await?;
            let text = response.get("text").cloned().ok_or_else(|| {
                Error::InvalidResponse("Response missing 'text'".to_string())
            })?;
            predictions.push(text);
        }
        frame.with_predictions(predictions)
    }

    /// Audio classification over a frame column; predictions are the top
    /// `label` per row.
    pub async fn audio_classification_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for input in frame.string_column(column)? {
            let response = self.audio_classification(input, model).await?;
            let label = response
                .get(0)
                .and_then(|first| first.get("label"))
                .cloned()
                .ok_or_else(|| {
                    Error::InvalidResponse("Response missing '[0].label'".to_string())
                })?;
            predictions.push(label);
        }
        frame.with_predictions(predictions)
    }
}
