//! Core types shared across inference operations.
//!
//! This module provides the foundational types of the contract:
//! - [`ModelTask`] and [`ModelType`] - identify the inference pipeline and stage
//! - [`VisionInput`] and [`TextInput`] - per-request input payloads
//! - [`BoundingBox`] - pixel-space face location
//! - [`Embedding`] - opaque fixed-length vector

mod bounds;
mod input;
mod model;

pub use argus_core::{ServiceHealth, ServiceStatus};
pub use bounds::BoundingBox;
pub use input::{TextInput, VisionInput};
pub use model::{Embedding, ModelTask, ModelType};
