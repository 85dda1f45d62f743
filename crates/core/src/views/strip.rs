use reel_protocol::{IndicatorView, IntroPhase, PlacementMode, SlotIndex, StripView};

use crate::engine::PlaybackState;
use crate::model::StripConfig;

/// Build the control strip view.
///
/// The active indicator is wider and filled to the playback progress. While
/// the strip is in its `Circle` phase it is as wide as it is tall; afterwards
/// it wraps the indicators with half its height as padding on each side.
pub fn render_strip(
    strip: &StripConfig,
    phase: IntroPhase,
    placement: PlacementMode,
    opacity: f64,
    playback: PlaybackState,
) -> StripView {
    let indicators = SlotIndex::ALL.map(|slot| {
        let active = slot == playback.active;
        IndicatorView {
            slot,
            width: if active {
                strip.active_indicator_width
            } else {
                strip.indicator_width
            },
            fill: if active { playback.progress } else { 0.0 },
            opacity,
        }
    });

    let height = strip.controller_height;
    let width = match phase {
        IntroPhase::Circle => height,
        IntroPhase::Expanded | IntroPhase::Visible => {
            let row: f64 = indicators.iter().map(|i| i.width).sum::<f64>()
                + strip.indicator_gap * (indicators.len() - 1) as f64;
            row + height
        }
    };

    StripView {
        phase,
        placement,
        fixed_visible: placement == PlacementMode::Fixed,
        anchor_visible: placement == PlacementMode::Anchor,
        width,
        height,
        indicators,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playback(active: usize, progress: f64) -> PlaybackState {
        PlaybackState {
            active: SlotIndex::new(active).unwrap(),
            progress,
        }
    }

    #[test]
    fn active_indicator_is_wide_and_filled() {
        let view = render_strip(
            &StripConfig::default(),
            IntroPhase::Visible,
            PlacementMode::Fixed,
            1.0,
            playback(3, 0.6),
        );
        let widths: Vec<f64> = view.indicators.iter().map(|i| i.width).collect();
        assert_eq!(widths, vec![8.0, 8.0, 8.0, 32.0, 8.0]);
        let fills: Vec<f64> = view.indicators.iter().map(|i| i.fill).collect();
        assert_eq!(fills, vec![0.0, 0.0, 0.0, 0.6, 0.0]);
        // 4 * 8 + 32 + 4 * 8 gap + 48 padding
        assert_eq!(view.width, 144.0);
    }

    #[test]
    fn circle_phase_is_round() {
        let view = render_strip(
            &StripConfig::default(),
            IntroPhase::Circle,
            PlacementMode::Anchor,
            0.0,
            playback(0, 0.0),
        );
        assert_eq!(view.width, view.height);
        assert!(view.indicators.iter().all(|i| i.opacity == 0.0));
    }

    #[test]
    fn exactly_one_placement_visible() {
        for placement in [PlacementMode::Fixed, PlacementMode::Anchor] {
            let view = render_strip(
                &StripConfig::default(),
                IntroPhase::Visible,
                placement,
                1.0,
                playback(0, 0.0),
            );
            assert!(view.fixed_visible ^ view.anchor_visible);
        }
    }
}
