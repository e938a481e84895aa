//! # aigen
//!
//! Provider-agnostic generation orchestration for Rust.
//!
//! aigen turns a high-level prompt into a normalized [`GenerationRequest`],
//! dispatches it to any backend implementing [`Model`], and returns a
//! [`GenerationResponse`] with typed accessors. When a prompt asks for
//! structured output, the response is validated against the schema before it
//! reaches the caller.
//!
//! ## Features
//!
//! - **Backend agnostic**: any `Model` implementation, looked up by name or passed directly
//! - **Composable layers**: wrap backends with logging and other concerns
//! - **Typed structured output**: schemas derived from Rust types via `schemars`
//! - **Tools**: invocable actions converted into wire-level tool definitions
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! aigen = { version = "0.1", features = ["full"] }
//! ```
//!
//! ```ignore
//! use aigen::prelude::*;
//!
//! # async fn example(backend: impl Model) -> Result<()> {
//! let mut models: HashMap<String, Arc<dyn Model>> = HashMap::new();
//! models.insert(model_key("my-model"), Arc::new(LoggingLayer::new().layer(backend)));
//!
//! let generator = Generator::builder().lookup(models).finish();
//! let response = generator
//!     .generate(ModelPrompt::new("my-model", "What is Rust?"))
//!     .await?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Includes `layers`
//! - `layers`: Built-in layers (logging)
//! - `schema`: Re-exports `schemars` for deriving output schemas
//! - `full`: All features enabled

// Re-export core types and traits
pub use aigen_core::*;

// Re-export layers under `layers` module
#[cfg(feature = "aigen-layer")]
pub mod layers {
    //! Built-in model layers.
    pub use aigen_layer::*;
}

// Re-export schemars when schema feature is enabled
#[cfg(feature = "schema")]
pub mod schemars {
    pub use ::schemars::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    //! Prelude module containing the most commonly used types and traits.
    //!
    //! ```
    //! use aigen::prelude::*;
    //! ```

    pub use crate::{
        model_key, AiError, FunctionModel, GenerationConfig, GenerationRequest,
        GenerationResponse, GenerationResponseData, Generator, Layer, MessageData, Model,
        ModelInfo, ModelPrompt, ModelRef, OutputFormat, Part, Result, Role, ToolAction,
    };
    pub use std::collections::HashMap;
    pub use std::sync::Arc;

    #[cfg(feature = "aigen-layer")]
    pub use crate::layers::*;
}
