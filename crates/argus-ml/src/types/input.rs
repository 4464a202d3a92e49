//! Input payloads for inference requests.
//!
//! Inputs are constructed per request and discarded after the call; the
//! contract keeps no state between calls.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Reference to an image resource to run inference on.
///
/// The path must resolve to a readable image at call time; validation is
/// the transport's (or the service's) responsibility, not this type's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisionInput {
    /// Locator of the image resource.
    pub image_path: PathBuf,
}

impl VisionInput {
    /// Creates a new vision input from an image path.
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
        }
    }

    /// Returns the image path.
    pub fn image_path(&self) -> &Path {
        &self.image_path
    }
}

impl<P: Into<PathBuf>> From<P> for VisionInput {
    fn from(image_path: P) -> Self {
        Self::new(image_path)
    }
}

/// A text string to run inference on.
///
/// The string may be empty; what the service does with an empty string is
/// unspecified by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInput {
    /// The text to encode.
    pub text: String,
}

impl TextInput {
    /// Creates a new text input.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Returns the text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl From<&str> for TextInput {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for TextInput {
    fn from(text: String) -> Self {
        Self { text }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vision_input_serializes_camel_case() {
        let input = VisionInput::new("/photos/2024/beach.jpg");
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["imagePath"], "/photos/2024/beach.jpg");
    }

    #[test]
    fn test_text_input_allows_empty() {
        let input = TextInput::new("");
        assert!(input.is_empty());
        assert_eq!(input.text(), "");
    }
}
