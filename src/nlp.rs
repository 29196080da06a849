//! Text task facade.
//!
//! Every method shapes a JSON payload for one text task and hands it to the
//! shared [`RequestExecutor`]; no retry or validation logic lives here. The
//! `*_batch` forms send one request with an array of inputs, the `*_in_frame`
//! forms run the scalar method once per row of a [`Frame`] and append a
//! `predictions` column.

use crate::api::{Payload, Task, TextPayload};
use crate::error::{Error, Result};
use crate::executor::RequestExecutor;
use crate::frame::Frame;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Handle for the text tasks. Obtain via
/// [`InferenceClient::nlp`](crate::client::InferenceClient::nlp).
pub struct Nlp {
    executor: Arc<RequestExecutor>,
}

impl Nlp {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    async fn query(
        &self,
        task: Task,
        model: Option<&str>,
        payload: TextPayload,
    ) -> Result<Value> {
        self.executor.execute(task, model, Payload::Text(payload)).await
    }

    /// Complete a `[MASK]` token. Returns candidates ordered by score, each
    /// with a `sequence` and `score`.
    pub async fn fill_mask(
        &self,
        text: &str,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(text).with_options(options);
        self.query(Task::FillMask, model, payload).await
    }

    /// Fill-mask over several inputs in a single request.
    pub async fn fill_mask_batch(
        &self,
        texts: &[&str],
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(json!(texts)).with_options(options);
        self.query(Task::FillMask, model, payload).await
    }

    /// Summarize a longer text into a shorter one.
    pub async fn summarization(
        &self,
        text: &str,
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(text)
            .with_parameters(parameters)
            .with_options(options);
        self.query(Task::Summarization, model, payload).await
    }

    /// Summarization over several inputs in a single request.
    pub async fn summarization_batch(
        &self,
        texts: &[&str],
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(json!(texts))
            .with_parameters(parameters)
            .with_options(options);
        self.query(Task::Summarization, model, payload).await
    }

    /// Classify the sentiment or label of a text.
    pub async fn text_classification(
        &self,
        text: &str,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(text).with_options(options);
        self.query(Task::TextClassification, model, payload).await
    }

    /// Text classification over several inputs in a single request.
    pub async fn text_classification_batch(
        &self,
        texts: &[&str],
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(json!(texts)).with_options(options);
        self.query(Task::TextClassification, model, payload).await
    }

    /// Answer a question from a context passage. The response carries
    /// `answer`, `score`, `start`, and `end`.
    pub async fn question_answering(
        &self,
        question: &str,
        context: &str,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(json!({
            "question": question,
            "context": context,
        }));
        self.query(Task::QuestionAnswering, model, payload).await
    }

    /// Answer a question from a table of string columns.
    pub async fn table_question_answering(
        &self,
        query: &str,
        table: &HashMap<String, Vec<String>>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(json!({
            "query": query,
            "table": table,
        }))
        .with_options(options);
        self.query(Task::TableQuestionAnswering, model, payload).await
    }

    /// Score how similar each of `sentences` is to `source_sentence`.
    /// Returns one score per sentence, in order.
    pub async fn sentence_similarity(
        &self,
        source_sentence: &str,
        sentences: &[&str],
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(json!({
            "source_sentence": source_sentence,
            "sentences": sentences,
        }))
        .with_options(options);
        self.query(Task::SentenceSimilarity, model, payload).await
    }

    /// Continue a prompt. The response carries `generated_text` per input.
    pub async fn text_generation(
        &self,
        text: &str,
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(text)
            .with_parameters(parameters)
            .with_options(options);
        self.query(Task::TextGeneration, model, payload).await
    }

    /// Text generation over several prompts in a single request.
    pub async fn text_generation_batch(
        &self,
        texts: &[&str],
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(json!(texts))
            .with_parameters(parameters)
            .with_options(options);
        self.query(Task::TextGeneration, model, payload).await
    }

    /// Classify a text against caller-supplied candidate labels. The labels
    /// ride in `parameters.candidate_labels`; any other parameters given are
    /// preserved.
    pub async fn zero_shot_classification(
        &self,
        text: &str,
        candidate_labels: &[&str],
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let mut parameters = parameters.unwrap_or_else(|| json!({}));
        match parameters.as_object_mut() {
            Some(map) => {
                map.insert("candidate_labels".to_string(), json!(candidate_labels));
            }
            None => {
                return Err(Error::InvalidInput(
                    "zero-shot parameters must be a JSON object".to_string(),
                ));
            }
        }
        let payload = TextPayload::new(text)
            .with_parameters(Some(parameters))
            .with_options(options);
        self.query(Task::ZeroShotClassification, model, payload).await
    }

    /// One conversational turn. Past turns are threaded through
    /// `past_user_inputs` and `generated_responses`; the response's
    /// `generated_text` is the reply.
    pub async fn conversational(
        &self,
        text: &str,
        past_user_inputs: Option<&[&str]>,
        generated_responses: Option<&[&str]>,
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let mut inputs = serde_json::Map::new();
        inputs.insert("text".to_string(), json!(text));
        if let Some(past) = past_user_inputs {
            inputs.insert("past_user_inputs".to_string(), json!(past));
        }
        if let Some(responses) = generated_responses {
            inputs.insert("generated_responses".to_string(), json!(responses));
        }
        let payload = TextPayload::new(Value::Object(inputs))
            .with_parameters(parameters)
            .with_options(options);
        self.query(Task::Conversational, model, payload).await
    }

    /// Embed a text into a vector.
    pub async fn feature_extraction(
        &self,
        text: &str,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(text).with_options(options);
        self.query(Task::FeatureExtraction, model, payload).await
    }

    /// Feature extraction over several inputs in a single request.
    pub async fn feature_extraction_batch(
        &self,
        texts: &[&str],
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(json!(texts)).with_options(options);
        self.query(Task::FeatureExtraction, model, payload).await
    }

    /// Translate between two languages.
    ///
    /// An explicit `model` wins. Otherwise both language codes are required
    /// and the model id is composed from the configured translation prefix,
    /// e.g. `Helsinki-NLP/opus-mt-` + `en-fr`. Composed ids are validated
    /// against the hub like any explicitly chosen model.
    pub async fn translation(
        &self,
        text: &str,
        lang_input: Option<&str>,
        lang_output: Option<&str>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Value> {
        let payload = TextPayload::new(text).with_options(options);

        if let Some(model) = model {
            return self.query(Task::Translation, Some(model), payload).await;
        }

        match (lang_input, lang_output) {
            (Some(input), Some(output)) => {
                let prefix = self.executor.config().default_model(Task::Translation)?;
                let composed = format!("{}{}-{}", prefix, input, output);
                self.query(Task::Translation, Some(&composed), payload).await
            }
            _ => Err(Error::Config(
                "Translation needs an explicit model or both language codes".to_string(),
            )),
        }
    }

    // -----------------------------------------------------------------------
    // Tabular forms
    // -----------------------------------------------------------------------

    /// Fill-mask over a frame column; predictions are the top candidate's
    /// `sequence` per row.
    pub async fn fill_mask_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for text in frame.string_column(column)? {
            let response = self.fill_mask(text, options.clone(), model).await?;
            predictions.push(first_field(&response, "sequence")?);
        }
        frame.with_predictions(predictions)
    }

    /// Summarization over a frame column; predictions are `summary_text`.
    pub async fn summarization_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for text in frame.string_column(column)? {
            let response = self
                .summarization(text, parameters.clone(), options.clone(), model)
                .await?;
            predictions.push(first_field(&response, "summary_text")?);
        }
        frame.with_predictions(predictions)
    }

    /// Text classification over a frame column; predictions are the top
    /// `label` per row.
    pub async fn text_classification_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for text in frame.string_column(column)? {
            let response = self.text_classification(text, options.clone(), model).await?;
            let label = response
                .get(0)
                .and_then(|row| row.get(0))
                .and_then(|top| top.get("label"))
                .cloned()
                .ok_or_else(|| {
                    Error::InvalidResponse("Response missing '[0][0].label'".to_string())
                })?;
            predictions.push(label);
        }
        frame.with_predictions(predictions)
    }

    /// Question answering over two frame columns; predictions are `answer`.
    pub async fn question_answering_in_frame(
        &self,
        frame: &Frame,
        question_column: &str,
        context_column: &str,
        model: Option<&str>,
    ) -> Result<Frame> {
        let questions = frame.string_column(question_column)?;
        let contexts = frame.string_column(context_column)?;

        let mut predictions = Vec::with_capacity(frame.len());
        for (question, context) in questions.iter().zip(contexts.iter()) {
            let response = self.question_answering(question, context, model).await?;
            predictions.push(field(&response, "answer")?);
        }
        frame.with_predictions(predictions)
    }

    /// Table question answering over a frame column of queries against one
    /// shared table; predictions are `answer`.
    pub async fn table_question_answering_in_frame(
        &self,
        frame: &Frame,
        query_column: &str,
        table: &HashMap<String, Vec<String>>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for query in frame.string_column(query_column)? {
            let response = self
                .table_question_answering(query, table, options.clone(), model)
                .await?;
            predictions.push(field(&response, "answer")?);
        }
        frame.with_predictions(predictions)
    }

    /// Sentence similarity of each row against one shared source sentence;
    /// predictions are the raw score arrays.
    pub async fn sentence_similarity_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        source_sentence: &str,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for sentence in frame.string_column(column)? {
            let response = self
                .sentence_similarity(source_sentence, &[sentence], options.clone(), model)
                .await?;
            predictions.push(response);
        }
        frame.with_predictions(predictions)
    }

    /// Text generation over a frame column; predictions are
    /// `generated_text`.
    pub async fn text_generation_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for text in frame.string_column(column)? {
            let response = self
                .text_generation(text, parameters.clone(), options.clone(), model)
                .await?;
            predictions.push(first_field(&response, "generated_text")?);
        }
        frame.with_predictions(predictions)
    }

    /// Zero-shot classification over a frame column; predictions are the
    /// top-ranked label per row.
    pub async fn zero_shot_classification_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        candidate_labels: &[&str],
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for text in frame.string_column(column)? {
            let response = self
                .zero_shot_classification(
                    text,
                    candidate_labels,
                    parameters.clone(),
                    options.clone(),
                    model,
                )
                .await?;
            let label = response
                .get("labels")
                .and_then(|labels| labels.get(0))
                .cloned()
                .ok_or_else(|| {
                    Error::InvalidResponse("Response missing 'labels[0]'".to_string())
                })?;
            predictions.push(label);
        }
        frame.with_predictions(predictions)
    }

    /// One independent conversational turn per row; predictions are
    /// `generated_text`.
    pub async fn conversational_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        parameters: Option<Value>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for text in frame.string_column(column)? {
            let response = self
                .conversational(text, None, None, parameters.clone(), options.clone(), model)
                .await?;
            predictions.push(field(&response, "generated_text")?);
        }
        frame.with_predictions(predictions)
    }

    /// Feature extraction over a frame column; predictions are the raw
    /// embedding vectors.
    pub async fn feature_extraction_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for text in frame.string_column(column)? {
            predictions.push(self.feature_extraction(text, options.clone(), model).await?);
        }
        frame.with_predictions(predictions)
    }

    /// Translation over a frame column; predictions are `translation_text`.
    pub async fn translation_in_frame(
        &self,
        frame: &Frame,
        column: &str,
        lang_input: Option<&str>,
        lang_output: Option<&str>,
        options: Option<Value>,
        model: Option<&str>,
    ) -> Result<Frame> {
        let mut predictions = Vec::with_capacity(frame.len());
        for text in frame.string_column(column)? {
            let response = self
                .translation(text, lang_input, lang_output, options.clone(), model)
                .await?;
            predictions.push(first_field(&response, "translation_text")?);
        }
        frame.with_predictions(predictions)
    }
}

fn field(value: &Value, name: &str) -> Result<Value> {
    value
        .get(name)
        .cloned()
        .ok_or_else(|| Error::InvalidResponse(format!("Response missing '{}'", name)))
}

fn first_field(value: &Value, name: &str) -> Result<Value> {
    value
        .get(0)
        .and_then(|first| first.get(name))
        .cloned()
        .ok_or_else(|| Error::InvalidResponse(format!("Response missing '[0].{}'", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Payload;
    use crate::mock::{MockTransport, fast_config};
    use serde_json::json;

    fn nlp(transport: Arc<MockTransport>) -> Nlp {
        Nlp::new(Arc::new(RequestExecutor::new(
            transport,
            Arc::new(fast_config()),
            "test-token".to_string(),
        )))
    }

    fn sent_body(transport: &MockTransport, index: usize) -> Value {
        match &transport.posts()[index].payload {
            Payload::Text(payload) => serde_json::to_value(payload).unwrap(),
            other => panic!("expected text payload, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fill_mask_sends_bare_inputs() {
        let transport = Arc::new(MockTransport::new());
        nlp(transport.clone())
            .fill_mask("the goal of life is [MASK]", None, None)
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport, 0),
            json!({"inputs": "the goal of life is [MASK]"})
        );
        assert!(
            transport.posts()[0]
                .url
                .ends_with("/models/bert-base-uncased")
        );
    }

    #[tokio::test]
    async fn batch_form_sends_array_in_one_request() {
        let transport = Arc::new(MockTransport::new());
        nlp(transport.clone())
            .fill_mask_batch(&["a [MASK]", "b [MASK]"], None, None)
            .await
            .unwrap();

        assert_eq!(transport.post_count(), 1);
        assert_eq!(
            sent_body(&transport, 0),
            json!({"inputs": ["a [MASK]", "b [MASK]"]})
        );
    }

    #[tokio::test]
    async fn summarization_carries_parameters_and_options() {
        let transport = Arc::new(MockTransport::new());
        nlp(transport.clone())
            .summarization(
                "long text",
                Some(json!({"max_length": 50})),
                Some(json!({"wait_for_model": true})),
                None,
            )
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport, 0),
            json!({
                "inputs": "long text",
                "parameters": {"max_length": 50},
                "options": {"wait_for_model": true}
            })
        );
    }

    #[tokio::test]
    async fn empty_knobs_stay_off_the_wire() {
        let transport = Arc::new(MockTransport::new());
        nlp(transport.clone())
            .text_generation("hi", Some(json!({})), Some(Value::Null), None)
            .await
            .unwrap();

        assert_eq!(sent_body(&transport, 0), json!({"inputs": "hi"}));
    }

    #[tokio::test]
    async fn question_answering_shapes_inputs() {
        let transport = Arc::new(MockTransport::new());
        nlp(transport.clone())
            .question_answering("What is my name?", "My name is Clara.", None)
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport, 0),
            json!({"inputs": {"question": "What is my name?", "context": "My name is Clara."}})
        );
    }

    #[tokio::test]
    async fn table_question_answering_shapes_inputs() {
        let transport = Arc::new(MockTransport::new());
        let mut table = HashMap::new();
        table.insert("city".to_string(), vec!["Paris".to_string()]);

        nlp(transport.clone())
            .table_question_answering("which city?", &table, None, None)
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport, 0),
            json!({"inputs": {"query": "which city?", "table": {"city": ["Paris"]}}})
        );
    }

    #[tokio::test]
    async fn sentence_similarity_shapes_inputs() {
        let transport = Arc::new(MockTransport::new());
        nlp(transport.clone())
            .sentence_similarity("a cat", &["a feline", "a bridge"], None, None)
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport, 0),
            json!({"inputs": {"source_sentence": "a cat", "sentences": ["a feline", "a bridge"]}})
        );
    }

    #[tokio::test]
    async fn zero_shot_merges_labels_into_parameters() {
        let transport = Arc::new(MockTransport::new());
        nlp(transport.clone())
            .zero_shot_classification(
                "i want a refund",
                &["refund", "faq"],
                Some(json!({"multi_label": true})),
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport, 0),
            json!({
                "inputs": "i want a refund",
                "parameters": {"multi_label": true, "candidate_labels": ["refund", "faq"]}
            })
        );
    }

    #[tokio::test]
    async fn zero_shot_rejects_non_object_parameters() {
        let transport = Arc::new(MockTransport::new());
        let err = nlp(transport.clone())
            .zero_shot_classification("x", &["a"], Some(json!([1, 2])), None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(transport.post_count(), 0);
    }

    #[tokio::test]
    async fn conversational_includes_history_only_when_given() {
        let transport = Arc::new(MockTransport::new());
        let nlp = nlp(transport.clone());

        nlp.conversational("hi", None, None, None, None, None)
            .await
            .unwrap();
        assert_eq!(sent_body(&transport, 0), json!({"inputs": {"text": "hi"}}));

        nlp.conversational(
            "and now?",
            Some(&["hi"]),
            Some(&["hello there"]),
            None,
            None,
            None,
        )
        .await
        .unwrap();
        assert_eq!(
            sent_body(&transport, 1),
            json!({"inputs": {
                "text": "and now?",
                "past_user_inputs": ["hi"],
                "generated_responses": ["hello there"]
            }})
        );
    }

    #[tokio::test]
    async fn translation_composes_model_id_and_validates_it() {
        let transport = Arc::new(MockTransport::new().with_hub_task("translation"));
        nlp(transport.clone())
            .translation("hello", Some("en"), Some("fr"), None, None)
            .await
            .unwrap();

        assert_eq!(
            transport.get_urls(),
            vec!["http://mock.local/api/models/Helsinki-NLP/opus-mt-en-fr".to_string()]
        );
        assert!(
            transport.posts()[0]
                .url
                .ends_with("/models/Helsinki-NLP/opus-mt-en-fr")
        );
    }

    #[tokio::test]
    async fn translation_without_model_or_languages_is_config_error() {
        let transport = Arc::new(MockTransport::new());
        let err = nlp(transport.clone())
            .translation("hello", Some("en"), None, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Config(_)));
        assert_eq!(transport.post_count(), 0);
        assert_eq!(transport.get_count(), 0);
    }

    #[tokio::test]
    async fn translation_prefers_explicit_model() {
        let transport = Arc::new(MockTransport::new().with_hub_task("translation"));
        nlp(transport.clone())
            .translation("hallo", Some("de"), Some("en"), None, Some("my/translator"))
            .await
            .unwrap();

        assert_eq!(
            transport.get_urls(),
            vec!["http://mock.local/api/models/my/translator".to_string()]
        );
    }

    fn frame_of(texts: &[&str]) -> Frame {
        let mut frame = Frame::new();
        frame
            .push_string_column("text", texts.iter().map(|t| t.to_string()).collect())
            .unwrap();
        frame
    }

    #[tokio::test]
    async fn fill_mask_in_frame_appends_top_sequence() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json_response(json!([
                    {"sequence": "the sky is blue", "score": 0.9},
                    {"sequence": "the sky is red", "score": 0.1}
                ]))
                .with_json_response(json!([{"sequence": "water is wet", "score": 0.8}])),
        );
        let frame = frame_of(&["the sky is [MASK]", "water is [MASK]"]);

        let extended = nlp(transport.clone())
            .fill_mask_in_frame(&frame, "text", None, None)
            .await
            .unwrap();

        assert_eq!(transport.post_count(), 2);
        assert_eq!(frame.n_columns(), 1);
        assert_eq!(
            extended.column("predictions").unwrap(),
            &[json!("the sky is blue"), json!("water is wet")]
        );
    }

    #[tokio::test]
    async fn text_classification_in_frame_takes_top_label() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json_response(json!([[{"label": "POSITIVE", "score": 0.99}]]))
                .with_json_response(json!([[{"label": "NEGATIVE", "score": 0.98}]])),
        );
        let frame = frame_of(&["i like you", "i hate mondays"]);

        let extended = nlp(transport.clone())
            .text_classification_in_frame(&frame, "text", None, None)
            .await
            .unwrap();

        assert_eq!(
            extended.column("predictions").unwrap(),
            &[json!("POSITIVE"), json!("NEGATIVE")]
        );
    }

    #[tokio::test]
    async fn question_answering_in_frame_reads_two_columns() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json_response(json!({"answer": "Clara", "score": 0.97}))
                .with_json_response(json!({"answer": "Berlin", "score": 0.95})),
        );
        let mut frame = Frame::new();
        frame
            .push_string_column(
                "question",
                vec!["Who am I?".to_string(), "Where am I?".to_string()],
            )
            .unwrap();
        frame
            .push_string_column(
                "context",
                vec![
                    "My name is Clara.".to_string(),
                    "I live in Berlin.".to_string(),
                ],
            )
            .unwrap();

        let extended = nlp(transport.clone())
            .question_answering_in_frame(&frame, "question", "context", None)
            .await
            .unwrap();

        assert_eq!(
            extended.column("predictions").unwrap(),
            &[json!("Clara"), json!("Berlin")]
        );
        assert_eq!(
            sent_body(&transport, 1),
            json!({"inputs": {"question": "Where am I?", "context": "I live in Berlin."}})
        );
    }

    #[tokio::test]
    async fn in_frame_aborts_on_first_failure() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json_response(json!([{"generated_text": "one"}]))
                .with_response(400, json!({"error": "bad row"})),
        );
        let frame = frame_of(&["a", "b", "c"]);

        let err = nlp(transport.clone())
            .text_generation_in_frame(&frame, "text", None, None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ApiCall { status: 400, .. }));
        // third row never dispatched
        assert_eq!(transport.post_count(), 2);
        assert_eq!(frame.n_columns(), 1);
    }

    #[tokio::test]
    async fn in_frame_missing_reduction_field_is_invalid_response() {
        let transport =
            Arc::new(MockTransport::new().with_json_response(json!([{"score": 0.4}])));
        let frame = frame_of(&["the [MASK]"]);

        let err = nlp(transport.clone())
            .fill_mask_in_frame(&frame, "text", None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn in_frame_missing_column_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let frame = frame_of(&["x"]);

        let err = nlp(transport.clone())
            .fill_mask_in_frame(&frame, "no_such_column", None, None)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(transport.post_count(), 0);
    }

    #[tokio::test]
    async fn table_question_answering_in_frame_shares_one_table() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json_response(json!({"answer": "Paris", "coordinates": [[0, 0]]}))
                .with_json_response(json!({"answer": "2148000", "coordinates": [[0, 1]]})),
        );
        let mut table = HashMap::new();
        table.insert("city".to_string(), vec!["Paris".to_string()]);
        table.insert("population".to_string(), vec!["2148000".to_string()]);
        let frame = frame_of(&["which city?", "how many people?"]);

        let extended = nlp(transport.clone())
            .table_question_answering_in_frame(&frame, "text", &table, None, None)
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport, 0)["inputs"]["table"],
            json!({"city": ["Paris"], "population": ["2148000"]})
        );
        assert_eq!(
            extended.column("predictions").unwrap(),
            &[json!("Paris"), json!("2148000")]
        );
    }

    #[tokio::test]
    async fn feature_extraction_in_frame_keeps_full_vectors() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json_response(json!([0.1, 0.2, 0.3]))
                .with_json_response(json!([0.4, 0.5, 0.6])),
        );
        let frame = frame_of(&["first", "second"]);

        let extended = nlp(transport.clone())
            .feature_extraction_in_frame(&frame, "text", None, None)
            .await
            .unwrap();

        assert_eq!(
            extended.column("predictions").unwrap(),
            &[json!([0.1, 0.2, 0.3]), json!([0.4, 0.5, 0.6])]
        );
    }

    #[tokio::test]
    async fn sentence_similarity_in_frame_scores_against_shared_source() {
        let transport = Arc::new(
            MockTransport::new()
                .with_json_response(json!([0.92]))
                .with_json_response(json!([0.11])),
        );
        let frame = frame_of(&["a feline", "a bridge"]);

        let extended = nlp(transport.clone())
            .sentence_similarity_in_frame(&frame, "text", "a cat", None, None)
            .await
            .unwrap();

        assert_eq!(
            sent_body(&transport, 1),
            json!({"inputs": {"source_sentence": "a cat", "sentences": ["a bridge"]}})
        );
        assert_eq!(
            extended.column("predictions").unwrap(),
            &[json!([0.92]), json!([0.11])]
        );
    }

    #[tokio::test]
    async fn zero_shot_in_frame_takes_first_label() {
        let transport = Arc::new(MockTransport::new().with_json_response(
            json!({"sequence": "x", "labels": ["refund", "faq"], "scores": [0.9, 0.1]}),
        ));
        let frame = frame_of(&["i want my money back"]);

        let extended = nlp(transport.clone())
            .zero_shot_classification_in_frame(&frame, "text", &["refund", "faq"], None, None, None)
            .await
            .unwrap();

        assert_eq!(extended.column("predictions").unwrap(), &[json!("refund")]);
    }
}
