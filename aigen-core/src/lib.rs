//! # aigen core
//!
//! Core data model and generation pipeline for aigen.
//!
//! This crate turns a high-level [`ModelPrompt`] into a normalized,
//! provider-agnostic [`GenerationRequest`], hands it to a pluggable [`Model`]
//! backend, and wraps the raw result in a [`GenerationResponse`] that can
//! enforce a structured output contract.

pub mod error;
pub mod extract;
pub mod layer;
pub mod model;
pub mod request;
pub mod response;
pub mod runtime;
pub mod schema;
pub mod tool;
pub mod types;

// Re-exports
pub use error::AiError;
pub use extract::extract_json;
pub use layer::{Layer, LayeredModel};
pub use model::{model_key, FunctionModel, Model, ModelLookup, ModelRef};
pub use request::{to_generate_request, ModelPrompt, OutputSpec, Prompt};
pub use response::{Candidate, GenerationResponse, Message};
pub use runtime::{generate, Generator, GeneratorBuilder};
pub use schema::{AnySchema, Schema, SchemaDocument, TypedSchema};
pub use tool::{to_tool_definition, FunctionTool, ToolAction};
pub use types::*;

/// Result type alias for generation operations
pub type Result<T> = std::result::Result<T, AiError>;
