//! Runtime layer for aigen.
//!
//! This module turns a [`ModelPrompt`](crate::request::ModelPrompt) into a
//! finished [`GenerationResponse`](crate::response::GenerationResponse):
//! - Resolving the target model by name or taking it directly
//! - Building the normalized request
//! - Awaiting the backend exactly once
//! - Enforcing the structured output contract

pub mod generator;

pub use generator::{generate, Generator, GeneratorBuilder};
