//! Generator implementation.
//!
//! [`generate`] is the orchestration pipeline; [`Generator`] bundles it with
//! a model lookup so callers can pass prompts that name their model.

use crate::error::AiError;
use crate::model::{Model, ModelLookup};
use crate::request::{to_generate_request, ModelPrompt};
use crate::response::GenerationResponse;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;

/// Run one generation call.
///
/// Resolves the model, builds the request, awaits the backend once and wraps
/// the result. When the prompt carries an output schema, the first candidate's
/// output must parse as JSON and satisfy that schema, otherwise the call fails
/// with [`AiError::Validation`]. Resolution and backend errors are returned
/// as-is; nothing is retried.
pub async fn generate<O>(
    lookup: &dyn ModelLookup,
    prompt: ModelPrompt<O>,
) -> Result<GenerationResponse<O>, AiError> {
    let request_id = uuid::Uuid::new_v4();
    let span = tracing::debug_span!("generate", %request_id);

    async move {
        let model = prompt.model.resolve(lookup).map_err(|e| {
            tracing::error!("model resolution failed: {}", e);
            e
        })?;

        let request = to_generate_request(&prompt)?;
        tracing::debug!(
            "generate request: model={}, messages={}, tools={}, format={:?}",
            model.info().name,
            request.messages.len(),
            request.tools.len(),
            request.output.format
        );

        let data = model.generate(request).await.map_err(|e| {
            tracing::error!("model {} failed: {}", model.info().name, e);
            e
        })?;

        let response = GenerationResponse::<O>::from(data);
        tracing::debug!(
            "generate response: candidates={}",
            response.candidates.len()
        );

        if let Some(schema) = prompt.output_schema() {
            let output = response
                .output_value()
                .ok_or_else(|| AiError::validation("candidate did not have valid JSON"))?;
            schema.validate(&output)?;
        }

        Ok(response)
    }
    .instrument(span)
    .await
}

/// Builder for a [`Generator`].
///
/// # Example
///
/// ```ignore
/// let mut models: HashMap<String, Arc<dyn Model>> = HashMap::new();
/// models.insert(model_key("echo"), Arc::new(echo_model));
///
/// let generator = Generator::builder().lookup(models).finish();
/// let response = generator.generate(ModelPrompt::new("echo", "Hi")).await?;
/// ```
pub struct GeneratorBuilder {
    lookup: Option<Arc<dyn ModelLookup>>,
}

impl GeneratorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { lookup: None }
    }

    /// Set the lookup used to resolve model names
    pub fn lookup(mut self, lookup: impl ModelLookup + 'static) -> Self {
        self.lookup = Some(Arc::new(lookup));
        self
    }

    /// Finish building. Without a lookup only direct model references resolve.
    pub fn finish(self) -> Generator {
        let lookup = self.lookup.unwrap_or_else(|| {
            Arc::new(HashMap::<String, Arc<dyn Model>>::new()) as Arc<dyn ModelLookup>
        });

        Generator { lookup }
    }
}

impl Default for GeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for generation calls.
///
/// Holds no per-call state; concurrent calls share only the lookup.
#[derive(Clone)]
pub struct Generator {
    lookup: Arc<dyn ModelLookup>,
}

impl Generator {
    /// Create a new builder
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::new()
    }

    /// Get the model lookup
    pub fn lookup(&self) -> &dyn ModelLookup {
        self.lookup.as_ref()
    }

    /// Run one generation call, see [`generate`]
    pub async fn generate<O>(
        &self,
        prompt: ModelPrompt<O>,
    ) -> Result<GenerationResponse<O>, AiError> {
        generate(self.lookup.as_ref(), prompt).await
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::builder().finish()
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{model_key, FunctionModel, ModelRef};
    use crate::schema::SchemaDocument;
    use crate::types::*;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Debug, Deserialize, JsonSchema, PartialEq)]
    struct ColorList {
        colors: Vec<String>,
    }

    fn reply(text: &'static str) -> FunctionModel {
        FunctionModel::new(ModelInfo::new("test/reply"), move |_req| async move {
            Ok(GenerationResponseData::new(vec![CandidateData::new(
                0,
                MessageData::model(text),
            )]))
        })
    }

    fn lookup_with(name: &str, model: FunctionModel) -> HashMap<String, Arc<dyn Model>> {
        let mut models: HashMap<String, Arc<dyn Model>> = HashMap::new();
        models.insert(model_key(name), Arc::new(model));
        models
    }

    #[tokio::test]
    async fn test_generate_by_name() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = {
            let seen = seen.clone();
            FunctionModel::new(ModelInfo::new("test/recorder"), move |req| {
                seen.lock().unwrap().push(req);
                async move {
                    Ok(GenerationResponseData::new(vec![CandidateData::new(
                        0,
                        MessageData::model("Why did the crab never share? Because it's shellfish."),
                    )]))
                }
            })
        };

        let generator = Generator::builder()
            .lookup(lookup_with("joker", recorder))
            .finish();
        let response = generator
            .generate(ModelPrompt::new("joker", "Tell me a joke"))
            .await
            .unwrap();

        assert!(response.text().contains("shellfish"));

        let requests = seen.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages.len(), 1);
        assert_eq!(requests[0].output.format, OutputFormat::Text);
    }

    #[tokio::test]
    async fn test_structured_output() {
        let prompt = ModelPrompt::new(
            ModelRef::direct(reply(
                "Sure:\n```json\n{\"colors\": [\"red\", \"green\", \"blue\"]}\n```",
            )),
            "List 3 colors",
        )
        .with_output_schema::<ColorList>();

        let response = Generator::default().generate(prompt).await.unwrap();
        assert_eq!(
            response.output(),
            Some(ColorList {
                colors: vec!["red".into(), "green".into(), "blue".into()]
            })
        );
    }

    #[tokio::test]
    async fn test_unparseable_output_fails() {
        let prompt = ModelPrompt::new(ModelRef::direct(reply("not json")), "List 3 colors")
            .with_output_schema::<ColorList>();

        let err = Generator::default().generate(prompt).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("candidate did not have valid JSON"));
    }

    #[tokio::test]
    async fn test_nonconforming_output_fails() {
        let prompt = ModelPrompt::new(ModelRef::direct(reply("{\"colors\": \"red\"}")), "List")
            .with_output_schema::<ColorList>();

        let err = Generator::default().generate(prompt).await.unwrap_err();
        assert!(err.to_string().contains("data did not match expected schema"));
    }

    #[tokio::test]
    async fn test_zero_candidates_without_schema() {
        let empty = FunctionModel::new(ModelInfo::new("test/empty"), |_req| async {
            Ok(GenerationResponseData::default())
        });

        let response = Generator::default()
            .generate(ModelPrompt::new(ModelRef::direct(empty), "Hello"))
            .await
            .unwrap();

        assert_eq!(response.text(), "");
        assert_eq!(response.output(), None);
        assert!(response.candidates.is_empty());
    }

    #[tokio::test]
    async fn test_zero_candidates_with_schema_fails() {
        let empty = FunctionModel::new(ModelInfo::new("test/empty"), |_req| async {
            Ok(GenerationResponseData::default())
        });
        let prompt = ModelPrompt::new(ModelRef::direct(empty), "List 3 colors")
            .with_output_schema::<ColorList>();

        let err = Generator::default().generate(prompt).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("candidate did not have valid JSON"));
    }

    #[tokio::test]
    async fn test_only_first_candidate_is_validated() {
        let mixed = FunctionModel::new(ModelInfo::new("test/mixed"), |_req| async {
            Ok(GenerationResponseData::new(vec![
                CandidateData::new(0, MessageData::model("not json")),
                CandidateData::new(1, MessageData::model("{\"colors\": [\"red\"]}")),
            ]))
        });
        let prompt = ModelPrompt::new(ModelRef::direct(mixed), "List colors")
            .with_candidates(2)
            .with_output_schema::<ColorList>();

        let err = Generator::default().generate(prompt).await.unwrap_err();
        assert!(err.to_string().contains("candidate did not have valid JSON"));
    }

    #[tokio::test]
    async fn test_schema_document_output() {
        let schema = Arc::new(SchemaDocument::new(serde_json::json!({
            "type": "object",
            "required": ["colors"],
            "properties": {"colors": {"type": "array", "items": {"type": "string"}}}
        })));

        let prompt = ModelPrompt::new(ModelRef::direct(reply("{\"colors\": [\"red\"]}")), "List")
            .with_schema(schema.clone());
        let response = Generator::default().generate(prompt).await.unwrap();
        assert_eq!(
            response.output_value(),
            Some(serde_json::json!({"colors": ["red"]}))
        );

        let prompt = ModelPrompt::new(ModelRef::direct(reply("{\"colors\": 3}")), "List")
            .with_schema(schema);
        let err = Generator::default().generate(prompt).await.unwrap_err();
        assert!(err.to_string().contains("data did not match expected schema"));
    }

    #[tokio::test]
    async fn test_unknown_model_fails_before_request() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counting = {
            let calls = calls.clone();
            FunctionModel::new(ModelInfo::new("test/counting"), move |_req| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(GenerationResponseData::default()) }
            })
        };

        let generator = Generator::builder()
            .lookup(lookup_with("registered", counting))
            .finish();
        let err = generator
            .generate(ModelPrompt::new("unregistered", "Hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, AiError::ModelNotFound(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_backend_error_propagates_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let failing = {
            let calls = calls.clone();
            FunctionModel::new(ModelInfo::new("test/failing"), move |_req| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(AiError::provider("quota exceeded")) }
            })
        };

        let err = generate(
            &HashMap::<String, Arc<dyn Model>>::new(),
            ModelPrompt::new(ModelRef::direct(failing), "Hello"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, AiError::Provider(msg) if msg == "quota exceeded"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
