//! Service layer for inference operations.
//!
//! This module provides the core service infrastructure:
//! - [`MachineLearningProvider`] - the contract every transport implements
//! - [`MachineLearningService`] - high-level wrapper with observability

mod machine_learning;

pub use machine_learning::MachineLearningService;

use url::Url;

use crate::Result;
use crate::facial::{FacialRecognitionOptions, FacialRecognitionResponse};
use crate::search::{ClipTextualOptions, ClipVisualOptions};
use crate::types::{Embedding, ServiceHealth, TextInput, VisionInput};

/// The three operations a consuming application may invoke against the
/// external machine-learning service.
///
/// Each operation is a single stateless request/response exchange against
/// the given endpoint: it suspends the caller until the remote response (or
/// failure) arrives, resolves exactly once, and carries no session state.
/// Whether concurrent calls to the same endpoint are pooled or fully
/// parallel is a property of the implementing transport, not of this
/// contract.
///
/// Failures are surfaced to the caller unchanged; no retry or recovery is
/// implied here. Transports distinguish failure kinds through
/// [`argus_core::ErrorKind`].
#[async_trait::async_trait]
pub trait MachineLearningProvider: Send + Sync {
    /// Encodes an image into an embedding using the named visual model.
    ///
    /// The image reference must resolve to a readable image at call time;
    /// validating that is the transport's or the service's responsibility.
    async fn encode_image(
        &self,
        endpoint: &Url,
        input: &VisionInput,
        options: &ClipVisualOptions,
    ) -> Result<Embedding>;

    /// Encodes a text string into an embedding using the named textual model.
    ///
    /// When visual and textual models come from the same family, the two
    /// encoders share a coordinate space; that guarantee belongs to the
    /// service.
    async fn encode_text(
        &self,
        endpoint: &Url,
        input: &TextInput,
        options: &ClipTextualOptions,
    ) -> Result<Embedding>;

    /// Detects faces in an image, returning zero or more detections plus
    /// the source image dimensions.
    ///
    /// Every returned detection is expected to score at or above the
    /// requested `min_score`; filtering happens on the service.
    async fn detect_faces(
        &self,
        endpoint: &Url,
        input: &VisionInput,
        options: &FacialRecognitionOptions,
    ) -> Result<FacialRecognitionResponse>;

    /// Performs a health check against the given endpoint.
    async fn health_check(&self, endpoint: &Url) -> Result<ServiceHealth>;
}
