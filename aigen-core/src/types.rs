//! Core wire types shared by callers and model backends.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
    System,
    Tool,
}

/// Reference to media content. The url may be a `data:` URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// A tool invocation requested by the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolRequest {
    pub name: String,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Value>,
}

/// The result of a tool invocation, sent back to the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolResponse {
    pub name: String,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,
}

/// One unit of message content.
///
/// Each variant is keyed by a distinct field on the wire, so `{"text": ".."}`
/// and `{"media": {..}}` both round-trip without an explicit tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    Media {
        media: MediaRef,
    },
    ToolRequest {
        #[serde(rename = "toolRequest")]
        tool_request: ToolRequest,
    },
    ToolResponse {
        #[serde(rename = "toolResponse")]
        tool_response: ToolResponse,
    },
    Data {
        data: Value,
    },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    /// Create a media part
    pub fn media(url: impl Into<String>, content_type: Option<String>) -> Self {
        Part::Media {
            media: MediaRef {
                url: url.into(),
                content_type,
            },
        }
    }

    /// Create a part carrying an arbitrary payload
    pub fn data(data: Value) -> Self {
        Part::Data { data }
    }

    /// Text of this part, if it is a text part
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Media reference of this part, if it is a media part
    pub fn as_media(&self) -> Option<&MediaRef> {
        match self {
            Part::Media { media } => Some(media),
            _ => None,
        }
    }

    /// Payload of this part, if it is a data part
    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Part::Data { data } => Some(data),
            _ => None,
        }
    }
}

impl From<&str> for Part {
    fn from(text: &str) -> Self {
        Part::text(text)
    }
}

impl From<String> for Part {
    fn from(text: String) -> Self {
        Part::Text { text }
    }
}

/// A role-tagged message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageData {
    pub role: Role,
    #[serde(default)]
    pub content: Vec<Part>,
}

impl MessageData {
    /// Create a message with the given role and content
    pub fn new(role: Role, content: Vec<Part>) -> Self {
        Self { role, content }
    }

    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![Part::text(text)])
    }

    /// Create a model message with text
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, vec![Part::text(text)])
    }

    /// Create a system message with text
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(Role::System, vec![Part::text(text)])
    }
}

/// Backend-agnostic generation parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_sequences: Option<Vec<String>>,

    /// Provider-specific options, forwarded without inspection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl GenerationConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set max output tokens
    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    /// Set top-k sampling
    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set top-p sampling
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Set stop sequences
    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = Some(stop_sequences);
        self
    }

    /// Set provider-specific options
    pub fn with_custom(mut self, custom: Value) -> Self {
        self.custom = Some(custom);
        self
    }
}

/// Tool definition as seen by a backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// Output format requested from the model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Output contract attached to a request
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

/// Normalized, provider-agnostic generation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// History in original order, followed by the prompt message
    pub messages: Vec<MessageData>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<GenerationConfig>,

    #[serde(default)]
    pub tools: Vec<ToolDefinition>,

    #[serde(default)]
    pub output: OutputConfig,
}

impl GenerationRequest {
    /// The last message of the request, normally the prompt message
    pub fn prompt_message(&self) -> Option<&MessageData> {
        self.messages.last()
    }
}

/// Finish reason
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FinishReason {
    Stop,
    Length,
    Blocked,
    Other,
    #[default]
    Unknown,
}

/// Usage accounting. Never validated, only forwarded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationUsage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_characters: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_characters: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_images: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_images: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,

    /// Counts this record has no field for, kept as reported
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Raw candidate as returned by a backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CandidateData {
    pub message: MessageData,
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<GenerationUsage>,
    #[serde(default)]
    pub finish_reason: FinishReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl CandidateData {
    /// Create a candidate that finished normally
    pub fn new(index: u32, message: MessageData) -> Self {
        Self {
            message,
            index,
            usage: None,
            finish_reason: FinishReason::Stop,
            finish_message: None,
            custom: None,
        }
    }
}

/// Raw response as returned by a backend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GenerationResponseData {
    #[serde(default)]
    pub candidates: Vec<CandidateData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<GenerationUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<Value>,
}

impl GenerationResponseData {
    /// Create a response from candidates
    pub fn new(candidates: Vec<CandidateData>) -> Self {
        Self {
            candidates,
            usage: None,
            custom: None,
        }
    }

    /// Set usage
    pub fn with_usage(mut self, usage: GenerationUsage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Capabilities a model backend declares
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelSupports {
    pub multiturn: bool,
    pub media: bool,
    pub tools: bool,
    pub output: Vec<OutputFormat>,
}

impl Default for ModelSupports {
    fn default() -> Self {
        Self {
            multiturn: true,
            media: false,
            tools: false,
            output: vec![OutputFormat::Text, OutputFormat::Json],
        }
    }
}

/// Model information
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub supports: ModelSupports,
}

impl ModelInfo {
    /// Create model info with default capabilities
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            supports: ModelSupports::default(),
        }
    }

    /// Set a human readable label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set declared capabilities
    pub fn with_supports(mut self, supports: ModelSupports) -> Self {
        self.supports = supports;
        self
    }
}
