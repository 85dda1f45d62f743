use serde::{Deserialize, Serialize};

/// Whether the carousel container counts as "in view", after hysteresis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisibilityState {
    #[default]
    OutOfView,
    InView,
}

impl VisibilityState {
    pub fn is_in_view(self) -> bool {
        matches!(self, Self::InView)
    }
}

/// Staged reveal of the control strip. Variants are declared in the order
/// they are entered, so `Ord` follows the reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum IntroPhase {
    /// Collapsed to a circle; indicators hidden.
    #[default]
    Circle,
    /// Strip grown to full width; indicators still hidden.
    Expanded,
    /// Indicators shown.
    Visible,
}

impl IntroPhase {
    /// The phase that follows this one, saturating at `Visible`.
    pub fn next(self) -> Self {
        match self {
            Self::Circle => Self::Expanded,
            Self::Expanded | Self::Visible => Self::Visible,
        }
    }
}

/// Which of the two control-strip renderings is currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlacementMode {
    /// Overlay pinned to the bottom of the viewport.
    #[default]
    Fixed,
    /// Inline rendering at the anchor below the carousel.
    Anchor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_order_follows_reveal() {
        assert!(IntroPhase::Circle < IntroPhase::Expanded);
        assert!(IntroPhase::Expanded < IntroPhase::Visible);
        assert_eq!(IntroPhase::Circle.next(), IntroPhase::Expanded);
        assert_eq!(IntroPhase::Visible.next(), IntroPhase::Visible);
    }

    #[test]
    fn defaults() {
        assert_eq!(VisibilityState::default(), VisibilityState::OutOfView);
        assert_eq!(IntroPhase::default(), IntroPhase::Circle);
        assert_eq!(PlacementMode::default(), PlacementMode::Fixed);
    }
}
