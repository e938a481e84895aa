//! Prompt specifications and request building.

use crate::error::AiError;
use crate::model::ModelRef;
use crate::schema::{Schema, TypedSchema};
use crate::tool::{to_tool_definition, ToolAction};
use crate::types::*;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

/// Prompt content: plain text, a single part, or an ordered list of parts
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    Text(String),
    Part(Part),
    Parts(Vec<Part>),
}

impl Prompt {
    fn into_parts(self) -> Vec<Part> {
        match self {
            Prompt::Text(text) => vec![Part::Text { text }],
            Prompt::Part(part) => vec![part],
            Prompt::Parts(parts) => parts,
        }
    }
}

impl From<&str> for Prompt {
    fn from(text: &str) -> Self {
        Prompt::Text(text.to_string())
    }
}

impl From<String> for Prompt {
    fn from(text: String) -> Self {
        Prompt::Text(text)
    }
}

impl From<Part> for Prompt {
    fn from(part: Part) -> Self {
        Prompt::Part(part)
    }
}

impl From<Vec<Part>> for Prompt {
    fn from(parts: Vec<Part>) -> Self {
        Prompt::Parts(parts)
    }
}

/// Requested output contract
#[derive(Debug, Clone, Default)]
pub struct OutputSpec {
    /// Explicit format; defaults to `json` with a schema, `text` otherwise
    pub format: Option<OutputFormat>,
    /// Schema the first candidate's output must satisfy
    pub schema: Option<Arc<dyn Schema>>,
}

/// High-level description of one generation call.
///
/// `O` is the type structured output is parsed into on the returned
/// [`GenerationResponse`](crate::response::GenerationResponse).
pub struct ModelPrompt<O = Value> {
    pub model: ModelRef,
    pub prompt: Prompt,
    pub history: Vec<MessageData>,
    pub tools: Vec<Arc<dyn ToolAction>>,
    pub candidates: Option<u32>,
    pub config: Option<GenerationConfig>,
    pub output: Option<OutputSpec>,
    _output: PhantomData<fn() -> O>,
}

impl ModelPrompt {
    /// Create a prompt for `model`
    pub fn new(model: impl Into<ModelRef>, prompt: impl Into<Prompt>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            history: Vec::new(),
            tools: Vec::new(),
            candidates: None,
            config: None,
            output: None,
            _output: PhantomData,
        }
    }
}

impl<O> ModelPrompt<O> {
    /// Set conversation history, sent before the prompt message
    pub fn with_history(mut self, history: Vec<MessageData>) -> Self {
        self.history = history;
        self
    }

    /// Offer a tool to the model
    pub fn with_tool(mut self, tool: Arc<dyn ToolAction>) -> Self {
        self.tools.push(tool);
        self
    }

    /// Offer tools to the model
    pub fn with_tools(mut self, tools: impl IntoIterator<Item = Arc<dyn ToolAction>>) -> Self {
        self.tools.extend(tools);
        self
    }

    /// Set the number of candidates to request
    pub fn with_candidates(mut self, candidates: u32) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Set generation config
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the output format explicitly
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.output.get_or_insert_with(OutputSpec::default).format = Some(format);
        self
    }

    /// Require output matching `schema`, keeping the output type
    pub fn with_schema(mut self, schema: Arc<dyn Schema>) -> Self {
        self.output.get_or_insert_with(OutputSpec::default).schema = Some(schema);
        self
    }

    /// Require output matching the schema of `T` and parse output as `T`
    pub fn with_output_schema<T>(self) -> ModelPrompt<T>
    where
        T: JsonSchema + DeserializeOwned + 'static,
    {
        let schema: Arc<dyn Schema> = Arc::new(TypedSchema::<T>::new());
        ModelPrompt {
            model: self.model,
            prompt: self.prompt,
            history: self.history,
            tools: self.tools,
            candidates: self.candidates,
            config: self.config,
            output: self.output,
            _output: PhantomData,
        }
        .with_schema(schema)
    }

    /// Schema the output must satisfy, if any
    pub fn output_schema(&self) -> Option<&Arc<dyn Schema>> {
        self.output.as_ref().and_then(|output| output.schema.as_ref())
    }
}

impl<O> Debug for ModelPrompt<O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelPrompt")
            .field("model", &self.model)
            .field("prompt", &self.prompt)
            .field("history", &self.history)
            .field("tools", &self.tools)
            .field("candidates", &self.candidates)
            .field("config", &self.config)
            .field("output", &self.output)
            .finish()
    }
}

/// Build the instruction part asking for schema-conforming JSON
pub fn schema_instruction(schema: &Value) -> Result<Part, AiError> {
    let schema_str = serde_json::to_string(schema)?;
    Ok(Part::text(format!(
        "\n    \nOutput should be JSON formatted and conform to the following schema:\n\n```\n{}\n```",
        schema_str
    )))
}

/// Build the normalized request for `prompt`.
///
/// The prompt message comes last, after the history in its original order. With
/// an output schema, the instruction part is appended after all prompt content.
pub fn to_generate_request<O>(prompt: &ModelPrompt<O>) -> Result<GenerationRequest, AiError> {
    let mut content = prompt.prompt.clone().into_parts();

    let output_schema = prompt.output_schema().map(|schema| schema.to_json_schema());
    if let Some(schema) = &output_schema {
        content.push(schema_instruction(schema)?);
    }

    let mut messages = Vec::with_capacity(prompt.history.len() + 1);
    messages.extend(prompt.history.iter().cloned());
    messages.push(MessageData::new(Role::User, content));

    let tools = prompt
        .tools
        .iter()
        .map(|tool| to_tool_definition(tool.as_ref()))
        .collect();

    let format = prompt
        .output
        .as_ref()
        .and_then(|output| output.format)
        .unwrap_or(if output_schema.is_some() {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        });

    Ok(GenerationRequest {
        messages,
        candidates: prompt.candidates,
        config: prompt.config.clone(),
        tools,
        output: OutputConfig {
            format,
            schema: output_schema,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{typed, AnySchema};
    use crate::tool::FunctionTool;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, JsonSchema)]
    #[allow(dead_code)]
    struct ColorList {
        colors: Vec<String>,
    }

    fn instruction_count(message: &MessageData) -> usize {
        message
            .content
            .iter()
            .filter_map(Part::as_text)
            .filter(|text| text.contains("Output should be JSON formatted"))
            .count()
    }

    #[test]
    fn test_plain_text_prompt() {
        let req = to_generate_request(&ModelPrompt::new("echo", "Tell me a joke")).unwrap();

        assert_eq!(req.messages.len(), 1);
        assert_eq!(req.messages[0].role, Role::User);
        assert_eq!(req.messages[0].content, vec![Part::text("Tell me a joke")]);
        assert_eq!(req.output.format, OutputFormat::Text);
        assert!(req.output.schema.is_none());
        assert!(req.tools.is_empty());
        assert_eq!(
            serde_json::to_value(&req.output).unwrap(),
            json!({"format": "text"})
        );
    }

    #[test]
    fn test_schema_appends_instruction_last() {
        let prompt = ModelPrompt::new("echo", "List 3 colors").with_output_schema::<ColorList>();
        let req = to_generate_request(&prompt).unwrap();

        let message = req.prompt_message().unwrap();
        assert_eq!(message.content.len(), 2);
        assert_eq!(message.content[0], Part::text("List 3 colors"));
        assert_eq!(instruction_count(message), 1);

        let instruction = message.content[1].as_text().unwrap();
        let schema = req.output.schema.as_ref().unwrap();
        assert!(instruction.contains(&serde_json::to_string(schema).unwrap()));
        assert!(instruction.contains("colors"));
        assert_eq!(req.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_instruction_text() {
        let part = schema_instruction(&json!({"type": "string"})).unwrap();
        assert_eq!(
            part.as_text().unwrap(),
            "\n    \nOutput should be JSON formatted and conform to the following schema:\n\n```\n{\"type\":\"string\"}\n```"
        );
    }

    #[test]
    fn test_explicit_format_wins() {
        let prompt = ModelPrompt::new("echo", "List 3 colors")
            .with_format(OutputFormat::Text)
            .with_schema(typed::<ColorList>());
        let req = to_generate_request(&prompt).unwrap();

        assert_eq!(req.output.format, OutputFormat::Text);
        assert!(req.output.schema.is_some());
        assert_eq!(instruction_count(req.prompt_message().unwrap()), 1);

        let req = to_generate_request(
            &ModelPrompt::new("echo", "Say hi").with_format(OutputFormat::Json),
        )
        .unwrap();
        assert_eq!(req.output.format, OutputFormat::Json);
        assert_eq!(instruction_count(req.prompt_message().unwrap()), 0);
    }

    #[test]
    fn test_parts_prompt_and_history() {
        let history = vec![
            MessageData::system("Be brief."),
            MessageData::user("Hi"),
            MessageData::model("Hello!"),
        ];
        let parts = vec![
            Part::text("What is in this picture?"),
            Part::media("data:image/png;base64,AAAA", Some("image/png".into())),
        ];
        let prompt = ModelPrompt::new("echo", parts.clone())
            .with_history(history.clone())
            .with_schema(Arc::new(AnySchema));
        let req = to_generate_request(&prompt).unwrap();

        assert_eq!(req.messages.len(), 4);
        assert_eq!(&req.messages[..3], &history[..]);

        let content = &req.prompt_message().unwrap().content;
        assert_eq!(content.len(), 3);
        assert_eq!(&content[..2], &parts[..]);
        assert_eq!(instruction_count(req.prompt_message().unwrap()), 1);
    }

    #[test]
    fn test_single_part_prompt() {
        let part = Part::media("https://example.com/a.png", None);
        let req = to_generate_request(&ModelPrompt::new("echo", part.clone())).unwrap();
        assert_eq!(req.messages[0].content, vec![part]);
    }

    #[test]
    fn test_tools_candidates_config_pass_through() {
        let noop = |input: Value| async move { Ok(input) };
        let tools: Vec<Arc<dyn ToolAction>> = vec![
            Arc::new(FunctionTool::new("first", Arc::new(AnySchema), noop)),
            Arc::new(
                FunctionTool::new("second", typed::<ColorList>(), noop)
                    .with_output_schema(typed::<String>()),
            ),
        ];
        let config = GenerationConfig::new().with_custom(json!({"seed": 7}));
        let prompt = ModelPrompt::new("echo", "hi")
            .with_tools(tools)
            .with_candidates(3)
            .with_config(config.clone());
        let req = to_generate_request(&prompt).unwrap();

        let names: Vec<_> = req.tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(req.tools[0].output_schema, json!({}));
        assert_eq!(req.tools[1].output_schema["type"], json!("string"));
        assert_eq!(req.candidates, Some(3));
        assert_eq!(req.config, Some(config));
    }
}
