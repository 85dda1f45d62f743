use reel_protocol::{PlacementMode, Rect};

use crate::model::StripConfig;

/// Picks the inline anchor once it has scrolled up to (or above) where the
/// fixed overlay sits; otherwise the overlay is shown.
pub fn placement_for(anchor_controller_top: f64, fixed_controller_top: f64) -> PlacementMode {
    if anchor_controller_top <= fixed_controller_top {
        PlacementMode::Anchor
    } else {
        PlacementMode::Fixed
    }
}

/// Chooses between the fixed overlay and the inline anchor rendering of the
/// control strip. Recomputed from scratch on every sample; no hysteresis.
#[derive(Debug, Clone)]
pub struct PlacementSwitcher {
    strip: StripConfig,
    mode: PlacementMode,
}

impl PlacementSwitcher {
    pub fn new(strip: StripConfig) -> Self {
        Self {
            strip,
            mode: PlacementMode::Fixed,
        }
    }

    pub fn mode(&self) -> PlacementMode {
        self.mode
    }

    /// Top edge of the fixed overlay in viewport coordinates.
    pub fn fixed_controller_top(&self, viewport_height: f64) -> f64 {
        viewport_height - self.strip.bottom_offset - self.strip.controller_height
    }

    pub fn anchor_controller_top(&self, anchor: &Rect) -> f64 {
        anchor.top() + self.strip.anchor_padding
    }

    /// Evaluate one sample. A missing or unmeasurable anchor keeps the current
    /// mode. Returns the new mode if it changed.
    pub fn sample(&mut self, anchor: Option<&Rect>, viewport_height: f64) -> Option<PlacementMode> {
        let Some(anchor) = anchor.filter(|a| a.y.is_finite()) else {
            tracing::trace!("anchor not measured, keeping placement");
            return None;
        };
        if !viewport_height.is_finite() {
            return None;
        }
        let next = placement_for(
            self.anchor_controller_top(anchor),
            self.fixed_controller_top(viewport_height),
        );
        if next == self.mode {
            return None;
        }
        tracing::debug!(from = ?self.mode, to = ?next, "control strip placement changed");
        self.mode = next;
        Some(next)
    }
}
