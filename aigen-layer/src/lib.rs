//! # aigen layers
//!
//! Built-in layers for aigen model backends.
//!
//! Currently implemented layers:
//! - `LoggingLayer`: Logs every generate call with timing information
//!
//! ## Usage
//!
//! ```ignore
//! use aigen_core::{model_key, Layer, Model};
//! use aigen_layer::LoggingLayer;
//!
//! let model = LoggingLayer::new().layer(backend);
//! models.insert(model_key("gemini-pro"), Arc::new(model) as Arc<dyn Model>);
//! ```

pub mod logging;

// Re-exports
pub use logging::{LoggingLayer, LoggingModel};
