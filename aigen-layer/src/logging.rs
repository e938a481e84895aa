//! Logging layer for model backends.

use aigen_core::error::AiError;
use aigen_core::impl_layered_model;
use aigen_core::layer::{Layer, LayeredModel};
use aigen_core::model::Model;
use aigen_core::types::*;
use async_trait::async_trait;
use std::fmt::Debug;

/// Logging layer that logs generate calls.
#[derive(Debug, Clone)]
pub struct LoggingLayer {
    prefix: String,
}

impl LoggingLayer {
    /// Create a new logging layer
    pub fn new() -> Self {
        Self {
            prefix: "[aigen]".to_string(),
        }
    }

    /// Create a logging layer with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Model> Layer<M> for LoggingLayer {
    type LayeredModel = LoggingModel<M>;

    fn layer(&self, inner: M) -> Self::LayeredModel {
        LoggingModel {
            inner,
            prefix: self.prefix.clone(),
        }
    }
}

/// Model wrapped with logging
#[derive(Debug)]
pub struct LoggingModel<M> {
    inner: M,
    prefix: String,
}

fn total_tokens(response: &GenerationResponseData) -> Option<u32> {
    response.usage.as_ref().and_then(|usage| usage.total_tokens)
}

#[async_trait]
impl<M: Model> LayeredModel for LoggingModel<M> {
    type Inner = M;

    fn inner(&self) -> &Self::Inner {
        &self.inner
    }

    async fn layered_generate(
        &self,
        req: GenerationRequest,
    ) -> Result<GenerationResponseData, AiError> {
        let info = self.inner.info();
        tracing::debug!(
            "{} generate request: model={}, messages={}, candidates={:?}, format={:?}",
            self.prefix,
            info.name,
            req.messages.len(),
            req.candidates,
            req.output.format
        );

        let start = std::time::Instant::now();
        let result = self.inner.generate(req).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::debug!(
                    "{} generate success: model={}, candidates={}, tokens={:?}, elapsed={:?}",
                    self.prefix,
                    info.name,
                    response.candidates.len(),
                    total_tokens(response),
                    elapsed
                );
            }
            Err(e) => {
                tracing::error!(
                    "{} generate error: model={}, error={:?}, elapsed={:?}",
                    self.prefix,
                    info.name,
                    e,
                    elapsed
                );
            }
        }

        result
    }
}

impl_layered_model!(impl<M> for LoggingModel<M>);
