//! Mock inference provider for testing.
//!
//! [`MockMlProvider`] stands in for the remote inference service in tests.
//! It behaves like a conforming service: embeddings have a fixed
//! dimensionality, face fixtures are filtered by the requested minimum
//! score, and the source image dimensions are passed through unmodified.

use std::sync::{Arc, Mutex};

use argus_core::{Result, ServiceHealth};
use argus_ml::{
    ClipTextualOptions, ClipVisualOptions, Embedding, FacialRecognitionOptions,
    FacialRecognitionResponse, FacialRecognitionResult, MachineLearningProvider,
    MachineLearningRequest, MachineLearningService, TextInput, VisionInput,
};
use url::Url;

/// Default embedding dimensionality for mock responses.
///
/// Matches the most common dimensionality of the real recognition models.
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 512;

/// A call received by the mock, recorded for assertions.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// Endpoint the call targeted.
    pub endpoint: Url,
    /// The request union the call carried.
    pub request: MachineLearningRequest,
}

/// Mock inference provider for testing.
///
/// Returns deterministic responses for all operations and records every
/// call. Face fixtures are filtered by the requested `min_score`, the way
/// a conforming service filters server-side.
#[derive(Clone, Debug)]
pub struct MockMlProvider {
    dimensions: usize,
    visual_embedding: Option<Embedding>,
    textual_embedding: Option<Embedding>,
    faces: Vec<FacialRecognitionResult>,
    image_height: u32,
    image_width: u32,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl Default for MockMlProvider {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_EMBEDDING_DIMENSIONS,
            visual_embedding: None,
            textual_embedding: None,
            faces: Vec::new(),
            image_height: 0,
            image_width: 0,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockMlProvider {
    /// Creates a new mock provider with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dimensionality of generated embeddings.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Pins the exact embedding returned by `encode_image`.
    pub fn with_visual_embedding(mut self, embedding: Embedding) -> Self {
        self.visual_embedding = Some(embedding);
        self
    }

    /// Pins the exact embedding returned by `encode_text`.
    pub fn with_textual_embedding(mut self, embedding: Embedding) -> Self {
        self.textual_embedding = Some(embedding);
        self
    }

    /// Adds a face fixture to return from `detect_faces`.
    pub fn with_face(mut self, face: FacialRecognitionResult) -> Self {
        self.faces.push(face);
        self
    }

    /// Sets the source image dimensions reported by `detect_faces`.
    pub fn with_image_size(mut self, image_height: u32, image_width: u32) -> Self {
        self.image_height = image_height;
        self.image_width = image_width;
        self
    }

    /// Returns all calls recorded so far.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }

    /// Deterministic embedding used when no exact vector is pinned.
    fn synthesize_embedding(&self) -> Embedding {
        (0..self.dimensions)
            .map(|i| i as f32 / self.dimensions.max(1) as f32)
            .collect()
    }

    fn record(&self, endpoint: &Url, request: MachineLearningRequest) {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push(RecordedCall {
                endpoint: endpoint.clone(),
                request,
            });
    }
}

#[async_trait::async_trait]
impl MachineLearningProvider for MockMlProvider {
    async fn encode_image(
        &self,
        endpoint: &Url,
        _input: &VisionInput,
        options: &ClipVisualOptions,
    ) -> Result<Embedding> {
        self.record(endpoint, MachineLearningRequest::ClipVisual(options.clone()));
        Ok(self
            .visual_embedding
            .clone()
            .unwrap_or_else(|| self.synthesize_embedding()))
    }

    async fn encode_text(
        &self,
        endpoint: &Url,
        _input: &TextInput,
        options: &ClipTextualOptions,
    ) -> Result<Embedding> {
        self.record(endpoint, MachineLearningRequest::ClipTextual(options.clone()));
        Ok(self
            .textual_embedding
            .clone()
            .unwrap_or_else(|| self.synthesize_embedding()))
    }

    async fn detect_faces(
        &self,
        endpoint: &Url,
        _input: &VisionInput,
        options: &FacialRecognitionOptions,
    ) -> Result<FacialRecognitionResponse> {
        self.record(
            endpoint,
            MachineLearningRequest::FacialRecognition(options.clone()),
        );
        let faces = self
            .faces
            .iter()
            .filter(|face| face.score >= options.min_score)
            .cloned()
            .collect();
        Ok(FacialRecognitionResponse::new(
            faces,
            self.image_height,
            self.image_width,
        ))
    }

    async fn health_check(&self, _endpoint: &Url) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

/// Creates a [`MachineLearningService`] backed by a default mock provider.
pub fn create_mock_service() -> MachineLearningService {
    MachineLearningService::new(MockMlProvider::default())
}

#[cfg(test)]
mod tests {
    use argus_ml::{BoundingBox, ModelTask, ModelType};

    use super::*;

    fn endpoint() -> Url {
        Url::parse("http://ml.local:3003").unwrap()
    }

    fn face(x: i32, score: f32) -> FacialRecognitionResult {
        FacialRecognitionResult {
            bounding_box: BoundingBox::new(x, 0, x + 64, 64),
            score,
            embedding: vec![0.5; DEFAULT_EMBEDDING_DIMENSIONS],
        }
    }

    #[tokio::test]
    async fn test_embeddings_have_configured_dimensions() {
        let provider = MockMlProvider::new().with_dimensions(512);
        let service = MachineLearningService::new(provider);

        let embedding = service
            .encode_image(
                &endpoint(),
                &VisionInput::new("/photos/beach.jpg"),
                &ClipVisualOptions::new("ViT-B-32__openai"),
            )
            .await
            .unwrap();
        assert_eq!(embedding.len(), 512);

        let embedding = service
            .encode_text(
                &endpoint(),
                &TextInput::new("a dog on a beach"),
                &ClipTextualOptions::new("ViT-B-32__openai"),
            )
            .await
            .unwrap();
        assert_eq!(embedding.len(), 512);
    }

    #[tokio::test]
    async fn test_pinned_embedding_round_trips_unchanged() {
        let pinned: Embedding = (0..512).map(|i| (i as f32).sin()).collect();
        let provider = MockMlProvider::new().with_visual_embedding(pinned.clone());
        let service = MachineLearningService::new(provider);

        let embedding = service
            .encode_image(
                &endpoint(),
                &VisionInput::new("/photos/beach.jpg"),
                &ClipVisualOptions::new("ViT-B-32__openai"),
            )
            .await
            .unwrap();
        assert_eq!(embedding, pinned);
    }

    #[tokio::test]
    async fn test_detect_faces_returns_fixtures_and_dimensions() {
        let provider = MockMlProvider::new()
            .with_face(face(0, 0.95))
            .with_face(face(100, 0.85))
            .with_face(face(200, 0.75))
            .with_image_size(1080, 1920);
        let service = MachineLearningService::new(provider);

        let response = service
            .detect_faces(
                &endpoint(),
                &VisionInput::new("/photos/group.jpg"),
                &FacialRecognitionOptions::new("buffalo_l").with_min_score(0.5),
            )
            .await
            .unwrap();

        assert_eq!(response.len(), 3);
        assert_eq!(response.image_height, 1080);
        assert_eq!(response.image_width, 1920);
        for result in &response.faces {
            assert_eq!(result.embedding.len(), DEFAULT_EMBEDDING_DIMENSIONS);
            assert!(result.bounding_box.width() > 0);
        }
    }

    #[tokio::test]
    async fn test_detect_faces_filters_below_min_score() {
        let provider = MockMlProvider::new()
            .with_face(face(0, 0.95))
            .with_face(face(100, 0.6))
            .with_face(face(200, 0.71))
            .with_image_size(480, 640);
        let service = MachineLearningService::new(provider);

        let response = service
            .detect_faces(
                &endpoint(),
                &VisionInput::new("/photos/group.jpg"),
                &FacialRecognitionOptions::new("buffalo_l").with_min_score(0.7),
            )
            .await
            .unwrap();

        assert_eq!(response.len(), 2);
        for result in &response.faces {
            assert!(result.score >= 0.7);
        }
    }

    #[tokio::test]
    async fn test_recorded_requests_carry_exact_discriminants() {
        let provider = MockMlProvider::new().with_image_size(480, 640);
        let service = MachineLearningService::new(provider.clone());

        service
            .encode_image(
                &endpoint(),
                &VisionInput::new("/photos/a.jpg"),
                &ClipVisualOptions::new("ViT-B-32__openai"),
            )
            .await
            .unwrap();
        service
            .encode_text(
                &endpoint(),
                &TextInput::new("query"),
                &ClipTextualOptions::new("ViT-B-32__openai"),
            )
            .await
            .unwrap();
        service
            .detect_faces(
                &endpoint(),
                &VisionInput::new("/photos/a.jpg"),
                &FacialRecognitionOptions::new("buffalo_l"),
            )
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 3);

        let pairs: Vec<(ModelTask, ModelType)> = calls
            .iter()
            .map(|call| (call.request.model_task(), call.request.model_type()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (ModelTask::Search, ModelType::Visual),
                (ModelTask::Search, ModelType::Textual),
                (ModelTask::FacialRecognition, ModelType::Pipeline),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_mock_service_is_healthy() {
        let service = create_mock_service();
        let health = service.health_check(&endpoint()).await.unwrap();
        assert_eq!(health.status, argus_core::ServiceStatus::Healthy);
    }
}
