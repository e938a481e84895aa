//! Invocable tools and their wire definitions.

use crate::error::AiError;
use crate::schema::{AnySchema, Schema};
use crate::types::ToolDefinition;
use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

/// An invocable action a model may be offered as a tool.
#[async_trait]
pub trait ToolAction: Send + Sync + Debug {
    /// Tool name
    fn name(&self) -> &str;

    /// Human readable description
    fn description(&self) -> Option<&str> {
        None
    }

    /// Schema of the tool's input
    fn input_schema(&self) -> &dyn Schema;

    /// Schema of the tool's output, if it declares one
    fn output_schema(&self) -> Option<&dyn Schema> {
        None
    }

    /// Run the tool
    async fn invoke(&self, input: Value) -> Result<Value, AiError>;
}

/// Convert a tool into its wire definition.
///
/// A tool without an output schema gets `{}`, the schema accepting any value.
pub fn to_tool_definition(tool: &dyn ToolAction) -> ToolDefinition {
    ToolDefinition {
        name: tool.name().to_string(),
        description: tool.description().map(str::to_string),
        input_schema: tool.input_schema().to_json_schema(),
        output_schema: tool.output_schema().unwrap_or(&AnySchema).to_json_schema(),
    }
}

type Executor = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, AiError>> + Send + Sync>;

/// Tool backed by an async function
pub struct FunctionTool {
    name: String,
    description: Option<String>,
    input_schema: Arc<dyn Schema>,
    output_schema: Option<Arc<dyn Schema>>,
    executor: Executor,
}

impl FunctionTool {
    /// Create a new function tool
    pub fn new<F, Fut>(name: impl Into<String>, input_schema: Arc<dyn Schema>, executor: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, AiError>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: None,
            input_schema,
            output_schema: None,
            executor: Arc::new(move |input| Box::pin(executor(input))),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Declare the output schema
    pub fn with_output_schema(mut self, output_schema: Arc<dyn Schema>) -> Self {
        self.output_schema = Some(output_schema);
        self
    }

    /// Get tool definition
    pub fn definition(&self) -> ToolDefinition {
        to_tool_definition(self)
    }
}

impl Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool")
            .field("name", &self.name)
            .field("input_schema", &self.input_schema)
            .field("output_schema", &self.output_schema)
            .finish()
    }
}

#[async_trait]
impl ToolAction for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn input_schema(&self) -> &dyn Schema {
        self.input_schema.as_ref()
    }

    fn output_schema(&self) -> Option<&dyn Schema> {
        self.output_schema.as_deref()
    }

    async fn invoke(&self, input: Value) -> Result<Value, AiError> {
        self.input_schema.validate(&input)?;
        let output = (self.executor)(input).await?;
        if let Some(schema) = &self.output_schema {
            schema.validate(&output)?;
        }
        Ok(output)
    }
}
