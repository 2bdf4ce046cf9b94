//! Percentage-based overlap detection between bounding boxes
//!
//! Boxes only count as touching once they overlap by a fraction of the
//! smaller box on each axis, so transparent sprite padding doesn't register
//! as a hit. The axes are judged independently: deep overlap on one axis
//! never makes up for a near miss on the other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::{OVERLAP_X_THRESHOLD, OVERLAP_Y_THRESHOLD};

/// Minimum overlap ratio per axis for a hit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverlapThresholds {
    pub x: f32,
    pub y: f32,
}

impl Default for OverlapThresholds {
    fn default() -> Self {
        Self {
            x: OVERLAP_X_THRESHOLD,
            y: OVERLAP_Y_THRESHOLD,
        }
    }
}

impl OverlapThresholds {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Check two boxes against these thresholds
    #[inline]
    pub fn hit(&self, a: &Rect, b: &Rect) -> bool {
        check_overlap(a, b, self.x, self.y)
    }
}

/// Length of the intersection of two 1D spans, zero when disjoint
#[inline]
fn span_overlap(a_min: f32, a_len: f32, b_min: f32, b_len: f32) -> f32 {
    let overlap = (a_min + a_len).min(b_min + b_len) - a_min.max(b_min);
    overlap.max(0.0)
}

/// Intersection extent on each axis divided by the smaller box's extent on that axis
///
/// Both boxes must have positive width and height.
pub fn overlap_ratios(a: &Rect, b: &Rect) -> Vec2 {
    debug_assert!(a.has_area() && b.has_area(), "overlap of a degenerate box");

    let x_overlap = span_overlap(a.x, a.width, b.x, b.width);
    let y_overlap = span_overlap(a.y, a.height, b.y, b.height);

    Vec2::new(
        x_overlap / a.width.min(b.width),
        y_overlap / a.height.min(b.height),
    )
}

/// True when both axis overlap ratios meet or exceed their thresholds
pub fn check_overlap(a: &Rect, b: &Rect, x_threshold: f32, y_threshold: f32) -> bool {
    let ratios = overlap_ratios(a, b);
    ratios.x >= x_threshold && ratios.y >= y_threshold
}
