//! Public API types: the task catalog and request payload shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A named inference task hosted by the service.
///
/// The serialized form is the kebab-case wire name, which doubles as the
/// key of the task/model configuration map and as the `pipeline_tag` value
/// the model hub reports for a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Task {
    /// Predict the masked token in a sentence.
    FillMask,
    /// Condense a longer text into a shorter one.
    Summarization,
    /// Assign sentiment/intent labels to a text.
    TextClassification,
    /// Extract an answer span for a question from a context passage.
    QuestionAnswering,
    /// Answer a question against a small tabular dataset.
    TableQuestionAnswering,
    /// Score candidate sentences for similarity to a source sentence.
    SentenceSimilarity,
    /// Continue a text prompt.
    TextGeneration,
    /// Classify a text against caller-supplied candidate labels.
    ZeroShotClassification,
    /// Multi-turn chat completion with conversation history.
    Conversational,
    /// Produce a dense vector representation of a text.
    FeatureExtraction,
    /// Translate text between two languages.
    Translation,
    /// Assign labels to an image.
    ImageClassification,
    /// Locate and label objects within an image.
    ObjectDetection,
    /// Transcribe speech audio to text.
    SpeechRecognition,
    /// Assign labels to an audio clip.
    AudioClassification,
}

impl Task {
    /// The kebab-case name used on the wire and in configuration.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::FillMask => "fill-mask",
            Self::Summarization => "summarization",
            Self::TextClassification => "text-classification",
            Self::QuestionAnswering => "question-answering",
            Self::TableQuestionAnswering => "table-question-answering",
            Self::SentenceSimilarity => "sentence-similarity",
            Self::TextGeneration => "text-generation",
            Self::ZeroShotClassification => "zero-shot-classification",
            Self::Conversational => "conversational",
            Self::FeatureExtraction => "feature-extraction",
            Self::Translation => "translation",
            Self::ImageClassification => "image-classification",
            Self::ObjectDetection => "object-detection",
            Self::SpeechRecognition => "speech-recognition",
            Self::AudioClassification => "audio-classification",
        }
    }

    /// Whether this task sends a raw binary payload (vision and audio tasks)
    /// rather than a JSON document.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            Self::ImageClassification
                | Self::ObjectDetection
                | Self::SpeechRecognition
                | Self::AudioClassification
        )
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// The body of one outbound inference request.
///
/// Media tasks post the input bytes verbatim; text tasks post a
/// [`TextPayload`] JSON document.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Raw bytes of an image or audio input.
    Media(Vec<u8>),
    /// Structured JSON document for a text task.
    Text(TextPayload),
}

/// JSON document sent for text tasks: `{"inputs": …, "parameters"?: …,
/// "options"?: …}`.
///
/// `parameters` and `options` are serialized only when present; the
/// constructors normalize `null` and empty objects away so an empty knob
/// never appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextPayload {
    /// Task input: a string, an array of strings, or a task-specific object.
    pub inputs: Value,
    /// Task-specific tuning parameters (e.g. `candidate_labels`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Value>,
    /// Service options (e.g. `{"wait_for_model": true}`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl TextPayload {
    /// Create a payload carrying only `inputs`.
    pub fn new(inputs: impl Into<Value>) -> Self {
        Self {
            inputs: inputs.into(),
            parameters: None,
            options: None,
        }
    }

    /// Attach task parameters, dropping `null` and empty objects.
    pub fn with_parameters(mut self, parameters: Option<Value>) -> Self {
        self.parameters = non_empty(parameters);
        self
    }

    /// Attach service options, dropping `null` and empty objects.
    pub fn with_options(mut self, options: Option<Value>) -> Self {
        self.options = non_empty(options);
        self
    }
}

/// Treat JSON `null` and `{}` as absent.
fn non_empty(value: Option<Value>) -> Option<Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Object(map)) if map.is_empty() => None,
        other => other,
    }
}
