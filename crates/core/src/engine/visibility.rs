use reel_protocol::{Rect, VisibilityState};

/// Derives a debounced in-view signal from container measurements.
///
/// Two thresholds give the signal hysteresis: the container must be at least
/// `enter` visible to come into view, and must drop below `exit` to leave.
/// Ratios between the two never change the state, so a container parked on a
/// boundary during slow scrolling does not flicker.
///
/// Each sample is evaluated on its own; nothing accumulates between samples.
#[derive(Debug, Clone)]
pub struct VisibilityTracker {
    enter: f64,
    exit: f64,
    state: VisibilityState,
    last_ratio: Option<f64>,
}

impl VisibilityTracker {
    /// `exit` must be below `enter`; `CarouselConfig::validate` enforces it.
    pub fn new(enter: f64, exit: f64) -> Self {
        debug_assert!(exit < enter);
        Self {
            enter,
            exit,
            state: VisibilityState::OutOfView,
            last_ratio: None,
        }
    }

    pub fn state(&self) -> VisibilityState {
        self.state
    }

    /// Ratio computed from the most recent measurable sample.
    pub fn last_ratio(&self) -> Option<f64> {
        self.last_ratio
    }

    /// Fraction of `container` inside the viewport, or `None` if the
    /// container has not been laid out yet.
    pub fn visible_ratio(container: &Rect, viewport_height: f64) -> Option<f64> {
        if !(container.h.is_finite() && container.h > 0.0)
            || !container.y.is_finite()
            || !viewport_height.is_finite()
        {
            return None;
        }
        let overlap = container.vertical_overlap(viewport_height);
        Some((overlap / container.h).clamp(0.0, 1.0))
    }

    /// Evaluate one scroll/resize sample. Returns the new state if it changed.
    pub fn sample(&mut self, container: &Rect, viewport_height: f64) -> Option<VisibilityState> {
        let Some(ratio) = Self::visible_ratio(container, viewport_height) else {
            tracing::trace!(height = container.h, "container not laid out, keeping visibility");
            return None;
        };
        self.observe_ratio(ratio)
    }

    /// Apply the hysteresis rule to an already computed ratio.
    pub fn observe_ratio(&mut self, ratio: f64) -> Option<VisibilityState> {
        self.last_ratio = Some(ratio);
        let next = match self.state {
            VisibilityState::OutOfView if ratio >= self.enter => VisibilityState::InView,
            VisibilityState::InView if ratio < self.exit => VisibilityState::OutOfView,
            _ => return None,
        };
        tracing::debug!(ratio, from = ?self.state, to = ?next, "visibility changed");
        self.state = next;
        Some(next)
    }
}
