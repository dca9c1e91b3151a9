//! Image provider trait.

use crate::error::Result;
use crate::types::{GenerationOutcome, GenerationRequest};
use async_trait::async_trait;

/// Trait for image generation providers.
///
/// The batch orchestrator only depends on this seam, so tests can drive it
/// with a stub instead of the live API.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Issues one synchronous generation call for the given request.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutcome>;
}
