//! Model task and type identifiers.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

/// A fixed-length vector representing the semantic content of an image or
/// text, used for similarity search. Dimensionality is decided by the model
/// and is opaque to the client.
pub type Embedding = Vec<f32>;

/// The high-level inference purpose a model serves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    IntoStaticStr,
)]
pub enum ModelTask {
    /// Face detection and recognition.
    #[serde(rename = "facial-recognition")]
    #[strum(serialize = "facial-recognition")]
    FacialRecognition,
    /// Similarity search over joint image/text embeddings.
    #[serde(rename = "clip")]
    #[strum(serialize = "clip")]
    Search,
}

/// The pipeline stage or modality a given model implements.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ModelType {
    /// Face detector stage.
    Detection,
    /// Combined detection + recognition pipeline.
    Pipeline,
    /// Face recognizer stage.
    Recognition,
    /// Text encoder.
    Textual,
    /// Image encoder.
    Visual,
}
