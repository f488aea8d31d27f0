// Translation stage
//
// - request: pure builder for the structured-output request and its schema
// - envelope: the two upstream response shapes, resolved once
// - openai: client for the upstream responses endpoint
// - normalize: guarantees the paragraph list of the final result

pub mod envelope;
pub mod normalize;
pub mod openai;
pub mod request;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::RawTranslation;

pub use normalize::normalize;
pub use openai::OpenAITranslator;
pub use request::{StructuredRequest, build_translation_request};

/// Runs one structured translation call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Translator: Send + Sync {
    /// Send the request and decode the model's JSON reply.
    async fn translate(&self, request: &StructuredRequest) -> Result<RawTranslation>;
}
