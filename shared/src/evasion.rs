//! Placement of the control that runs away from the pointer.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Distance kept from the viewport edges, in CSS pixels.
pub const EVASION_PADDING: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}

/// Where the evasive control sits, as an absolute viewport position and as a
/// translation from the viewport centre (what the shell applies).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EvasiveTarget {
    pub x: f64,
    pub y: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl EvasiveTarget {
    /// Fresh random spot inside `viewport` minus the padding. Independent of
    /// the previous spot, so the same position may come up twice.
    pub fn random<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let x = pick_axis(viewport.width, rng.gen::<f64>());
        let y = pick_axis(viewport.height, rng.gen::<f64>());
        Self {
            x,
            y,
            offset_x: x - viewport.width / 2.0,
            offset_y: y - viewport.height / 2.0,
        }
    }
}

fn pick_axis(extent: f64, roll: f64) -> f64 {
    if extent < EVASION_PADDING {
        return extent / 2.0;
    }
    let span = (extent - 2.0 * EVASION_PADDING).max(0.0);
    EVASION_PADDING / 2.0 + roll * span
}
