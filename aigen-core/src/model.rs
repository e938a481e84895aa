//! Model backend trait and model resolution.

use crate::error::AiError;
use crate::types::*;
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;

/// Namespace under which models are looked up by name.
pub const MODEL_NAMESPACE: &str = "models";

/// Lookup key for a model name, e.g. `models/gemini-pro`.
pub fn model_key(name: &str) -> String {
    format!("{}/{}", MODEL_NAMESPACE, name)
}

/// Core trait for model backends.
///
/// A backend owns translating the request into its provider's wire format,
/// all network I/O, and any retry policy. Errors it returns reach the caller
/// of `generate` unchanged.
#[async_trait]
pub trait Model: Send + Sync + Debug + 'static {
    /// Get model information
    fn info(&self) -> Arc<ModelInfo>;

    /// Run a generation request
    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponseData, AiError>;
}

/// Capability for resolving a namespaced key to a model backend.
pub trait ModelLookup: Send + Sync {
    /// Resolve `key`, failing if nothing is registered under it
    fn lookup(&self, key: &str) -> Result<Arc<dyn Model>, AiError>;
}

impl ModelLookup for HashMap<String, Arc<dyn Model>> {
    fn lookup(&self, key: &str) -> Result<Arc<dyn Model>, AiError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| AiError::model_not_found(key))
    }
}

impl<L: ModelLookup + ?Sized> ModelLookup for Arc<L> {
    fn lookup(&self, key: &str) -> Result<Arc<dyn Model>, AiError> {
        (**self).lookup(key)
    }
}

/// Which model a prompt targets.
#[derive(Debug, Clone)]
pub enum ModelRef {
    /// Resolved through a [`ModelLookup`] under [`model_key`]
    ByName(String),
    /// Used as-is
    Direct(Arc<dyn Model>),
}

impl ModelRef {
    /// Reference a backend directly
    pub fn direct<M: Model>(model: M) -> Self {
        ModelRef::Direct(Arc::new(model))
    }

    /// Resolve to a concrete backend
    pub fn resolve(&self, lookup: &dyn ModelLookup) -> Result<Arc<dyn Model>, AiError> {
        match self {
            ModelRef::ByName(name) => lookup.lookup(&model_key(name)),
            ModelRef::Direct(model) => Ok(model.clone()),
        }
    }
}

impl From<&str> for ModelRef {
    fn from(name: &str) -> Self {
        ModelRef::ByName(name.to_string())
    }
}

impl From<String> for ModelRef {
    fn from(name: String) -> Self {
        ModelRef::ByName(name)
    }
}

impl From<Arc<dyn Model>> for ModelRef {
    fn from(model: Arc<dyn Model>) -> Self {
        ModelRef::Direct(model)
    }
}

type Handler = Arc<
    dyn Fn(GenerationRequest) -> BoxFuture<'static, Result<GenerationResponseData, AiError>>
        + Send
        + Sync,
>;

/// Model backed by an async function
#[derive(Clone)]
pub struct FunctionModel {
    info: Arc<ModelInfo>,
    handler: Handler,
}

impl FunctionModel {
    /// Create a new function model
    pub fn new<F, Fut>(info: ModelInfo, handler: F) -> Self
    where
        F: Fn(GenerationRequest) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<GenerationResponseData, AiError>> + Send + 'static,
    {
        Self {
            info: Arc::new(info),
            handler: Arc::new(move |req| Box::pin(handler(req))),
        }
    }
}

impl Debug for FunctionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionModel")
            .field("info", &self.info)
            .finish()
    }
}

#[async_trait]
impl Model for FunctionModel {
    fn info(&self) -> Arc<ModelInfo> {
        self.info.clone()
    }

    async fn generate(&self, req: GenerationRequest) -> Result<GenerationResponseData, AiError> {
        (self.handler)(req).await
    }
}
