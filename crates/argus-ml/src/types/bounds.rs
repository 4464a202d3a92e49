//! Bounding box in image pixel coordinates.

use serde::{Deserialize, Serialize};

/// Rectangular region in image pixel coordinates locating a detected face.
///
/// Coordinates are expected to satisfy `x1 <= x2` and `y1 <= y2`, but the
/// contract does not enforce this; values are carried as the service
/// produced them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
}

impl BoundingBox {
    /// Creates a new bounding box from corner coordinates.
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Width of the box, clamped at zero for inverted coordinates.
    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).max(0) as u32
    }

    /// Height of the box, clamped at zero for inverted coordinates.
    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    /// Area of the box in pixels.
    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }
}
