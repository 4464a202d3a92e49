//! The discriminated request union sent to the inference service.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::facial::FacialRecognitionOptions;
use crate::search::{ClipTextualOptions, ClipVisualOptions};
use crate::types::{ModelTask, ModelType};

/// A request to the machine-learning service.
///
/// The union is closed: only three (task, type) pairings exist, one per
/// variant. Any other combination is unconstructible in Rust and rejected
/// when deserializing dynamic payloads.
///
/// On the wire this serializes flat, discriminated by `modelTask` and
/// `modelType`:
///
/// ```json
/// { "modelName": "buffalo_l", "modelTask": "facial-recognition",
///   "modelType": "pipeline", "minScore": 0.7 }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MachineLearningRequest {
    /// Image encoding for similarity search: (clip, visual).
    ClipVisual(ClipVisualOptions),
    /// Text encoding for similarity search: (clip, textual).
    ClipTextual(ClipTextualOptions),
    /// Face detection + recognition: (facial-recognition, pipeline).
    FacialRecognition(FacialRecognitionOptions),
}

impl MachineLearningRequest {
    /// The inference task this request targets.
    pub fn model_task(&self) -> ModelTask {
        match self {
            Self::ClipVisual(_) | Self::ClipTextual(_) => ModelTask::Search,
            Self::FacialRecognition(_) => ModelTask::FacialRecognition,
        }
    }

    /// The model stage/modality this request targets.
    pub fn model_type(&self) -> ModelType {
        match self {
            Self::ClipVisual(_) => ModelType::Visual,
            Self::ClipTextual(_) => ModelType::Textual,
            Self::FacialRecognition(_) => ModelType::Pipeline,
        }
    }

    /// The model name carried by this request.
    pub fn model_name(&self) -> &str {
        match self {
            Self::ClipVisual(options) => &options.model_name,
            Self::ClipTextual(options) => &options.model_name,
            Self::FacialRecognition(options) => &options.model_name,
        }
    }

    /// The minimum score threshold, present only for facial recognition.
    pub fn min_score(&self) -> Option<f32> {
        match self {
            Self::FacialRecognition(options) => Some(options.min_score),
            _ => None,
        }
    }
}

impl From<ClipVisualOptions> for MachineLearningRequest {
    fn from(options: ClipVisualOptions) -> Self {
        Self::ClipVisual(options)
    }
}

impl From<ClipTextualOptions> for MachineLearningRequest {
    fn from(options: ClipTextualOptions) -> Self {
        Self::ClipTextual(options)
    }
}

impl From<FacialRecognitionOptions> for MachineLearningRequest {
    fn from(options: FacialRecognitionOptions) -> Self {
        Self::FacialRecognition(options)
    }
}

/// Flat wire form shared by all variants.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    model_name: String,
    model_task: ModelTask,
    model_type: ModelType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_score: Option<f32>,
}

impl Serialize for MachineLearningRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = WireRequest {
            model_name: self.model_name().to_owned(),
            model_task: self.model_task(),
            model_type: self.model_type(),
            min_score: self.min_score(),
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for MachineLearningRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = WireRequest::deserialize(deserializer)?;
        match (wire.model_task, wire.model_type) {
            (ModelTask::Search, ModelType::Visual) => {
                Ok(Self::ClipVisual(ClipVisualOptions::new(wire.model_name)))
            }
            (ModelTask::Search, ModelType::Textual) => {
                Ok(Self::ClipTextual(ClipTextualOptions::new(wire.model_name)))
            }
            (ModelTask::FacialRecognition, ModelType::Pipeline) => {
                let min_score = wire.min_score.ok_or_else(|| {
                    D::Error::custom("facial-recognition request is missing minScore")
                })?;
                Ok(Self::FacialRecognition(
                    FacialRecognitionOptions::new(wire.model_name).with_min_score(min_score),
                ))
            }
            (task, kind) => Err(D::Error::custom(format!(
                "invalid model task/type pairing: ({task}, {kind})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_discriminants() {
        let request = MachineLearningRequest::from(ClipVisualOptions::new("ViT-B-32__openai"));
        assert_eq!(request.model_task(), ModelTask::Search);
        assert_eq!(request.model_type(), ModelType::Visual);
        assert_eq!(request.min_score(), None);

        let request = MachineLearningRequest::from(ClipTextualOptions::new("ViT-B-32__openai"));
        assert_eq!(request.model_task(), ModelTask::Search);
        assert_eq!(request.model_type(), ModelType::Textual);

        let request = MachineLearningRequest::from(FacialRecognitionOptions::new("buffalo_l"));
        assert_eq!(request.model_task(), ModelTask::FacialRecognition);
        assert_eq!(request.model_type(), ModelType::Pipeline);
        assert_eq!(request.min_score(), Some(crate::DEFAULT_MIN_SCORE));
    }

    #[test]
    fn test_serialize_flat_wire_shape() {
        let request = MachineLearningRequest::FacialRecognition(
            FacialRecognitionOptions::new("buffalo_l").with_min_score(0.75),
        );
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["modelName"], "buffalo_l");
        assert_eq!(json["modelTask"], "facial-recognition");
        assert_eq!(json["modelType"], "pipeline");
        assert_eq!(json["minScore"], 0.75);
    }

    #[test]
    fn test_search_requests_omit_min_score() {
        let request = MachineLearningRequest::from(ClipTextualOptions::new("ViT-B-32__openai"));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["modelTask"], "clip");
        assert_eq!(json["modelType"], "textual");
        assert!(json.get("minScore").is_none());
    }

    #[test]
    fn test_deserialize_round_trip() {
        let original = MachineLearningRequest::FacialRecognition(
            FacialRecognitionOptions::new("buffalo_l").with_min_score(0.65),
        );
        let json = serde_json::to_string(&original).unwrap();
        let decoded: MachineLearningRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_deserialize_rejects_invalid_pairing() {
        let payload = r#"{"modelName":"m","modelTask":"clip","modelType":"pipeline"}"#;
        let error = serde_json::from_str::<MachineLearningRequest>(payload).unwrap_err();
        assert!(error.to_string().contains("invalid model task/type pairing"));

        let payload = r#"{"modelName":"m","modelTask":"facial-recognition","modelType":"visual"}"#;
        assert!(serde_json::from_str::<MachineLearningRequest>(payload).is_err());
    }

    #[test]
    fn test_deserialize_rejects_missing_min_score() {
        let payload = r#"{"modelName":"m","modelTask":"facial-recognition","modelType":"pipeline"}"#;
        let error = serde_json::from_str::<MachineLearningRequest>(payload).unwrap_err();
        assert!(error.to_string().contains("minScore"));
    }
}
