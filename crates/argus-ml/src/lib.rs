#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod facial;
mod request;
mod search;
mod service;
pub mod types;

// Re-export commonly used items at crate root for convenience
pub use argus_core::{Error, ErrorKind, Result};
pub use facial::{
    DEFAULT_MIN_SCORE, FacialRecognitionOptions, FacialRecognitionResponse,
    FacialRecognitionResult,
};
pub use request::MachineLearningRequest;
pub use search::{ClipTextualOptions, ClipVisualOptions};
pub use service::{MachineLearningProvider, MachineLearningService};
pub use types::{BoundingBox, Embedding, ModelTask, ModelType, TextInput, VisionInput};

/// Tracing target for inference operations.
pub const TRACING_TARGET: &str = "argus_ml";
