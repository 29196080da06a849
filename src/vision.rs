//! Image task facade.
//!
//! Inputs are either local file paths or `http(s)` URLs; the executor reads
//! or fetches the bytes and posts them verbatim. Batch forms dispatch one
//! request per input, strictly in order.

use crate::api::Task;
use crate::error::{Error, Result};
use crate::executor::RequestExecutor;
use crate::frame::Frame;
use serde_json::Value;
use std::sync::Arc;

/// Handle for the image tasks. Obtain via
/// [`InferenceClient::vision`](crate::client::InferenceClient::vision).
pub struct Vision {
    executor: Arc<RequestExecutor>,
}

impl Vision {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Classify an image. Returns labels ordered by score.
    pub async fn image_classification(&self, input: &str, model: Option<&str>) -> Result<Value> {
        self.executor
            .execute_media(Task::ImageClassification, model, input)
            .await
    }

    /// Image classification over several inputs, one request per input.
    pub async fn image_classification_batch(
        &self,
        inputs: &[&str],
        model: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut responses = Vec::with_capacity(inputs.len());
        for input in inputs {
            responses.push(self.image_classification(input, model).await?);
        }
        Ok(responses)
    }

    /// Detect objects in an image. Each detection carries a `label`,
    /// `score`, and bounding `box`.
    pub async fn object_detection(&self, input: &str, model: Option<&str>) -> Result<Value> {
        self.executor
            .execute_media(Task::ObjectDetection, model, input)
            .await
    }

    /// Object detection over several inputs, one request per input.
    pub async fn object_detection_batch(
        &self,
        inputs: &[&str],
        model: Option<&str>,
    ) -> Result<Vec<Value>> {
        let mut responses = Vec::with_capacity(inputs.len());
        for input in inputs {
            responses.push(self.object_detection(input, model).await?);
        }
        Ok(responses)
    }

    /// Image classification over a frame column of paths or URLs;
    /// predictions are the top `label` per row.
    pub async fn image_classification_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for input in frame.string_column(column)? {
            let response = self.image_classification(input, model).await?;
            predictions.push(first_label(&response)?);
        }
        frame.with_predictions(predictions)
    }

    /// Object detection over a frame column; predictions are the full
    /// detection arrays.
    pub async fn object_detection_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for input in frame.string_column(column)? {
            predictions.push(self.object_detection(input, model).await?);
        }
        frame.with_predictions(predictions)
    }
}

fn first_label(value: &Value) -> Result<Value> {
    value
        .get(0)
        .and_then(|first| first.get("label"))
        .cloned()
        .ok_or_else(|| Error::InvalidResponse("Response missing '[0].label'".to_string()))
}
