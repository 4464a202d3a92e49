//! Facial recognition options and response types.

use serde::{Deserialize, Serialize};

use crate::types::{BoundingBox, Embedding};

/// Default minimum confidence score for face detections.
pub const DEFAULT_MIN_SCORE: f32 = 0.7;

/// Options naming the recognition model and a confidence threshold.
///
/// Filtering by `min_score` is the service's responsibility; the contract
/// only declares that the threshold is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialRecognitionOptions {
    /// Name of the recognition model known to the service.
    pub model_name: String,
    /// Minimum confidence score for returned detections.
    #[serde(default = "default_min_score")]
    pub min_score: f32,
}

fn default_min_score() -> f32 {
    DEFAULT_MIN_SCORE
}

impl FacialRecognitionOptions {
    /// Creates new facial recognition options with the default threshold.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            min_score: DEFAULT_MIN_SCORE,
        }
    }

    /// Sets the minimum confidence score.
    pub fn with_min_score(mut self, min_score: f32) -> Self {
        self.min_score = min_score;
        self
    }
}

/// A single detected face: location, confidence and identity embedding.
///
/// Scores are expected in `[0, 1]` but are carried unvalidated, as the
/// service produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialRecognitionResult {
    /// Location of the face in source image pixels.
    pub bounding_box: BoundingBox,
    /// Detection confidence.
    pub score: f32,
    /// Identity embedding for the face.
    pub embedding: Embedding,
}

/// All faces detected in one image, with the source image dimensions for
/// coordinate normalization by the caller.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialRecognitionResponse {
    /// Zero or more detected faces, in service order.
    pub faces: Vec<FacialRecognitionResult>,
    /// Height of the source image in pixels.
    pub image_height: u32,
    /// Width of the source image in pixels.
    pub image_width: u32,
}

impl FacialRecognitionResponse {
    /// Creates a new response from faces and image dimensions.
    pub fn new(faces: Vec<FacialRecognitionResult>, image_height: u32, image_width: u32) -> Self {
        Self {
            faces,
            image_height,
            image_width,
        }
    }

    /// Number of detected faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// True if no faces were detected.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// The highest-confidence detection, if any.
    pub fn best_face(&self) -> Option<&FacialRecognitionResult> {
        self.faces
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face(score: f32) -> FacialRecognitionResult {
        FacialRecognitionResult {
            bounding_box: BoundingBox::new(0, 0, 64, 64),
            score,
            embedding: vec![0.0; 512],
        }
    }

    #[test]
    fn test_options_default_min_score() {
        let options = FacialRecognitionOptions::new("buffalo_l");
        assert_eq!(options.min_score, DEFAULT_MIN_SCORE);

        let options = options.with_min_score(0.9);
        assert_eq!(options.min_score, 0.9);
    }

    #[test]
    fn test_options_deserialize_missing_min_score() {
        let options: FacialRecognitionOptions =
            serde_json::from_str(r#"{"modelName":"buffalo_l"}"#).unwrap();
        assert_eq!(options.min_score, DEFAULT_MIN_SCORE);
    }

    #[test]
    fn test_response_wire_shape() {
        let response = FacialRecognitionResponse::new(vec![face(0.75)], 1080, 1920);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["imageHeight"], 1080);
        assert_eq!(json["imageWidth"], 1920);
        assert_eq!(json["faces"][0]["score"], 0.75);
        assert!(json["faces"][0]["boundingBox"].is_object());
    }

    #[test]
    fn test_best_face() {
        let response = FacialRecognitionResponse::new(vec![face(0.71), face(0.95), face(0.8)], 640, 480);
        assert_eq!(response.len(), 3);
        assert_eq!(response.best_face().unwrap().score, 0.95);
    }

    #[test]
    fn test_empty_response() {
        let response = FacialRecognitionResponse::default();
        assert!(response.is_empty());
        assert!(response.best_face().is_none());
    }
}
