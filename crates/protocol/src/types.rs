use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in host viewport coordinates (y grows downward,
/// `y = 0` is the top edge of the viewport).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Height of the part of this rectangle that lies inside the vertical band
    /// `[0, viewport_height]`. Never negative.
    pub fn vertical_overlap(&self, viewport_height: f64) -> f64 {
        let visible_top = self.top().max(0.0);
        let visible_bottom = self.bottom().min(viewport_height);
        (visible_bottom - visible_top).max(0.0)
    }
}
