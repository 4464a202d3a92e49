//! Unified inference service with observability.
//!
//! This module provides [`MachineLearningService`] which wraps a provider
//! and adds structured logging for all operations.

use std::fmt;
use std::sync::Arc;

use jiff::Timestamp;
use url::Url;

use super::MachineLearningProvider;
use crate::TRACING_TARGET;
use crate::facial::{FacialRecognitionOptions, FacialRecognitionResponse};
use crate::search::{ClipTextualOptions, ClipVisualOptions};
use crate::Result;
use crate::types::{Embedding, ServiceHealth, TextInput, VisionInput};

/// Unified inference service with observability.
///
/// Wraps any provider implementing [`MachineLearningProvider`] and adds
/// structured logging for all operations. Cloning is cheap; clones share
/// the underlying provider.
#[derive(Clone)]
pub struct MachineLearningService {
    provider: Arc<dyn MachineLearningProvider>,
}

impl fmt::Debug for MachineLearningService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MachineLearningService").finish_non_exhaustive()
    }
}

impl MachineLearningService {
    /// Create a new service from a provider.
    pub fn new<P>(provider: P) -> Self
    where
        P: MachineLearningProvider + 'static,
    {
        Self {
            provider: Arc::new(provider),
        }
    }

    /// Encode an image into an embedding.
    pub async fn encode_image(
        &self,
        endpoint: &Url,
        input: &VisionInput,
        options: &ClipVisualOptions,
    ) -> Result<Embedding> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            model = %options.model_name,
            image_path = %input.image_path.display(),
            "Encoding image"
        );

        let result = self.provider.encode_image(endpoint, input, options).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(embedding) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    model = %options.model_name,
                    dimensions = embedding.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Image encoded"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    model = %options.model_name,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Image encoding failed"
                );
            }
        }

        result
    }

    /// Encode a text string into an embedding.
    pub async fn encode_text(
        &self,
        endpoint: &Url,
        input: &TextInput,
        options: &ClipTextualOptions,
    ) -> Result<Embedding> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            model = %options.model_name,
            text_len = input.text.len(),
            "Encoding text"
        );

        let result = self.provider.encode_text(endpoint, input, options).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(embedding) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    model = %options.model_name,
                    dimensions = embedding.len(),
                    elapsed_ms = elapsed.as_millis(),
                    "Text encoded"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    model = %options.model_name,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Text encoding failed"
                );
            }
        }

        result
    }

    /// Detect faces in an image.
    pub async fn detect_faces(
        &self,
        endpoint: &Url,
        input: &VisionInput,
        options: &FacialRecognitionOptions,
    ) -> Result<FacialRecognitionResponse> {
        let started_at = Timestamp::now();

        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            model = %options.model_name,
            min_score = options.min_score,
            image_path = %input.image_path.display(),
            "Detecting faces"
        );

        let result = self.provider.detect_faces(endpoint, input, options).await;
        let elapsed = Timestamp::now().duration_since(started_at);

        match &result {
            Ok(response) => {
                tracing::debug!(
                    target: TRACING_TARGET,
                    model = %options.model_name,
                    faces = response.len(),
                    image_height = response.image_height,
                    image_width = response.image_width,
                    elapsed_ms = elapsed.as_millis(),
                    "Face detection completed"
                );
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    model = %options.model_name,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Face detection failed"
                );
            }
        }

        result
    }

    /// Perform a health check against the given endpoint.
    pub async fn health_check(&self, endpoint: &Url) -> Result<ServiceHealth> {
        self.provider.health_check(endpoint).await
    }
}
