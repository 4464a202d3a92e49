//! Options for similarity-search (CLIP) operations.

use serde::{Deserialize, Serialize};

/// Options naming the visual model to use for image encoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipVisualOptions {
    /// Name of the visual encoder model known to the service.
    pub model_name: String,
}

impl ClipVisualOptions {
    /// Creates new visual options for the given model.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

/// Options naming the textual model to use for text encoding.
///
/// For search results to be meaningful, the textual model should belong to
/// the same model family as the visual one so both encoders share a
/// coordinate space. That joint-embedding guarantee is a property of the
/// service, not something this contract can check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipTextualOptions {
    /// Name of the textual encoder model known to the service.
    pub model_name: String,
}

impl ClipTextualOptions {
    /// Creates new textual options for the given model.
    pub fn new(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_serialize_model_name() {
        let options = ClipVisualOptions::new("ViT-B-32__openai");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["modelName"], "ViT-B-32__openai");

        let options = ClipTextualOptions::new("ViT-B-32__openai");
        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["modelName"], "ViT-B-32__openai");
    }
}
