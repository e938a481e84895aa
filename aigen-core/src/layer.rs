//! Layer trait and abstractions.
//!
//! Layers wrap a model backend with cross-cutting concerns (logging, metrics,
//! request rewriting) and yield another backend, so they compose before the
//! backend is handed to a lookup or referenced directly from a prompt.

use crate::error::AiError;
use crate::model::Model;
use crate::types::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Layer trait for wrapping model backends.
pub trait Layer<M: Model> {
    /// The type of the layered model
    type LayeredModel: Model;

    /// Wrap the inner model with this layer
    fn layer(&self, inner: M) -> Self::LayeredModel;
}

/// Helper trait for layered models.
///
/// Provides forwarding defaults for every [`Model`] method. Implementers only
/// override what they intercept and then call [`impl_layered_model!`].
#[async_trait]
pub trait LayeredModel: Sized + Send + Sync + 'static {
    /// The inner model type
    type Inner: Model;

    /// Get a reference to the inner model
    fn inner(&self) -> &Self::Inner;

    /// Default implementation for info - forwards to inner
    fn layered_info(&self) -> Arc<ModelInfo> {
        self.inner().info()
    }

    /// Default implementation for generate - forwards to inner
    async fn layered_generate(
        &self,
        req: GenerationRequest,
    ) -> Result<GenerationResponseData, AiError> {
        self.inner().generate(req).await
    }
}

/// Implement [`Model`] for a type by forwarding to its [`LayeredModel`] methods.
#[macro_export]
macro_rules! impl_layered_model {
    (impl<$param:ident> for $type:ty) => {
        #[async_trait::async_trait]
        impl<$param: $crate::model::Model> $crate::model::Model for $type {
            fn info(&self) -> std::sync::Arc<$crate::types::ModelInfo> {
                $crate::layer::LayeredModel::layered_info(self)
            }

            async fn generate(
                &self,
                req: $crate::types::GenerationRequest,
            ) -> Result<$crate::types::GenerationResponseData, $crate::error::AiError> {
                $crate::layer::LayeredModel::layered_generate(self, req).await
            }
        }
    };
    ($type:ty) => {
        #[async_trait::async_trait]
        impl $crate::model::Model for $type {
            fn info(&self) -> std::sync::Arc<$crate::types::ModelInfo> {
                $crate::layer::LayeredModel::layered_info(self)
            }

            async fn generate(
                &self,
                req: $crate::types::GenerationRequest,
            ) -> Result<$crate::types::GenerationResponseData, $crate::error::AiError> {
                $crate::layer::LayeredModel::layered_generate(self, req).await
            }
        }
    };
}
