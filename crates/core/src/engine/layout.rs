use reel_protocol::{SLOT_COUNT, SlotIndex, SlotTransform, SpringTransition};

use crate::engine::scroll::StripGeometry;
use crate::model::CarouselConfig;

/// Delay between consecutive cards when a layout change cascades.
pub const STAGGER_UNIT_MS: u64 = 50;

pub const CARD_SPRING: SpringTransition = SpringTransition {
    stiffness: 97.0,
    damping: 16.0,
    mass: 1.1,
};

// Unscaled card geometry in logical pixels.
const CARD_WIDTH: f64 = 408.0;
const CARD_HEIGHT: f64 = 736.0;
const FRAME_WIDTH: f64 = 320.0;
const FRAME_HEIGHT: f64 = 654.0;
const MEDIA_WIDTH: f64 = 287.0;
const MEDIA_HEIGHT: f64 = 623.0;
const CARD_RADIUS: f64 = 32.0;
const MEDIA_RADIUS: f64 = 40.0;
const LABEL_FONT_SIZE: f64 = 48.0;

/// Fan-out of the bunched stack around the center line.
const BUNCH_SPREAD_X: f64 = 57.0;
const BUNCH_LIFT_Y: f64 = -12.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotPosition {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub z_index: i32,
}

/// Per-slot resting positions for one arrangement. Holds an entry for every
/// slot by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionTable([SlotPosition; SLOT_COUNT]);

impl PositionTable {
    /// Cards stacked on the center line, the top three fanned out slightly.
    pub fn bunched(center_offset: f64) -> Self {
        let c = center_offset;
        Self([
            SlotPosition { x: c, y: BUNCH_LIFT_Y, rotation: 0.0, z_index: 5 },
            SlotPosition { x: c - BUNCH_SPREAD_X, y: 0.0, rotation: -3.0, z_index: 4 },
            SlotPosition { x: c + BUNCH_SPREAD_X, y: 0.0, rotation: 4.0, z_index: 3 },
            SlotPosition { x: c, y: 0.0, rotation: 0.0, z_index: 2 },
            SlotPosition { x: c, y: 0.0, rotation: 0.0, z_index: 1 },
        ])
    }

    /// Cards in a row at a fixed pitch, slot 1 on the center line.
    pub fn spread(pitch: f64) -> Self {
        Self(SlotIndex::ALL.map(|slot| {
            let i = slot.get();
            SlotPosition {
                x: (i as f64 - 1.0) * pitch,
                y: 0.0,
                rotation: 0.0,
                z_index: (SLOT_COUNT - i) as i32,
            }
        }))
    }

    pub fn get(&self, slot: SlotIndex) -> SlotPosition {
        self.0[slot.get()]
    }
}

/// Card dimensions at a given scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub card_width: f64,
    pub card_height: f64,
    pub frame_width: f64,
    pub frame_height: f64,
    pub media_width: f64,
    pub media_height: f64,
    /// Media inset from the frame's left edge (media is centered in the frame).
    pub media_left: f64,
    pub media_top: f64,
    pub corner_radius: f64,
    pub media_corner_radius: f64,
    pub label_font_size: f64,
}

impl CardMetrics {
    pub fn at_scale(scale: f64) -> Self {
        Self {
            card_width: CARD_WIDTH * scale,
            card_height: CARD_HEIGHT * scale,
            frame_width: FRAME_WIDTH * scale,
            frame_height: FRAME_HEIGHT * scale,
            media_width: MEDIA_WIDTH * scale,
            media_height: MEDIA_HEIGHT * scale,
            media_left: (FRAME_WIDTH - MEDIA_WIDTH) / 2.0 * scale,
            media_top: (FRAME_HEIGHT - MEDIA_HEIGHT) / 2.0 * scale,
            corner_radius: CARD_RADIUS * scale,
            media_corner_radius: MEDIA_RADIUS * scale,
            label_font_size: LABEL_FONT_SIZE * scale,
        }
    }
}

/// Resolves per-slot transforms for the bunched and spread arrangements.
///
/// Stateless apart from the tables built at construction: the caller passes
/// the expanded flag on every query.
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    bunched: PositionTable,
    spread: PositionTable,
    metrics: CardMetrics,
    gap: f64,
}

impl LayoutEngine {
    pub fn new(config: &CarouselConfig) -> Self {
        let metrics = CardMetrics::at_scale(config.scale);
        let pitch = metrics.card_width + config.gap;
        Self {
            bunched: PositionTable::bunched(config.center_offset),
            spread: PositionTable::spread(pitch),
            metrics,
            gap: config.gap,
        }
    }

    pub fn table(&self, expanded: bool) -> &PositionTable {
        if expanded { &self.spread } else { &self.bunched }
    }

    /// Target transform for `slot`. Expansion cascades from the first slot to
    /// the last; collapse runs the same wave in reverse.
    pub fn compute_slot_transform(&self, slot: SlotIndex, expanded: bool) -> SlotTransform {
        let position = self.table(expanded).get(slot);
        let steps = if expanded { slot.get() } else { slot.from_last() };
        SlotTransform {
            offset_x: position.x,
            offset_y: position.y,
            rotation: position.rotation,
            z_index: position.z_index,
            delay_ms: steps as u64 * STAGGER_UNIT_MS,
            spring: CARD_SPRING,
        }
    }

    pub fn metrics(&self) -> &CardMetrics {
        &self.metrics
    }

    /// Distance between the left edges of neighbouring spread cards.
    pub fn spread_pitch(&self) -> f64 {
        self.metrics.card_width + self.gap
    }

    pub fn container_height(&self) -> f64 {
        self.metrics.card_height
    }

    /// Strip geometry assumed when the host has not measured one: cards side
    /// by side at the spread pitch, with the whole row visible.
    pub fn default_strip_geometry(&self) -> StripGeometry {
        let content_width =
            SLOT_COUNT as f64 * self.metrics.card_width + (SLOT_COUNT - 1) as f64 * self.gap;
        StripGeometry::uniform(self.metrics.card_width, self.gap, content_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(i: usize) -> SlotIndex {
        SlotIndex::new(i).unwrap()
    }

    #[test]
    fn expansion_delays_run_low_to_high() {
        let engine = LayoutEngine::new(&CarouselConfig::default());
        let delays: Vec<u64> = SlotIndex::ALL
            .iter()
            .map(|&s| engine.compute_slot_transform(s, true).delay_ms)
            .collect();
        assert_eq!(delays, vec![0, 50, 100, 150, 200]);
    }

    #[test]
    fn collapse_delays_run_high_to_low() {
        let engine = LayoutEngine::new(&CarouselConfig::default());
        let delays: Vec<u64> = SlotIndex::ALL
            .iter()
            .map(|&s| engine.compute_slot_transform(s, false).delay_ms)
            .collect();
        assert_eq!(delays, vec![200, 150, 100, 50, 0]);
    }

    #[test]
    fn spread_uses_card_pitch() {
        let config = CarouselConfig {
            gap: 24.0,
            scale: 0.5,
            ..Default::default()
        };
        let engine = LayoutEngine::new(&config);
        // 408 * 0.5 + 24
        assert_eq!(engine.spread_pitch(), 228.0);
        assert_eq!(engine.compute_slot_transform(slot(0), true).offset_x, -228.0);
        assert_eq!(engine.compute_slot_transform(slot(1), true).offset_x, 0.0);
        assert_eq!(engine.compute_slot_transform(slot(4), true).offset_x, 684.0);
    }

    #[test]
    fn bunched_follows_center_offset() {
        let config = CarouselConfig {
            center_offset: 100.0,
            ..Default::default()
        };
        let engine = LayoutEngine::new(&config);
        let first = engine.compute_slot_transform(slot(0), false);
        assert_eq!((first.offset_x, first.offset_y, first.z_index), (100.0, -12.0, 5));
        let second = engine.compute_slot_transform(slot(1), false);
        assert_eq!((second.offset_x, second.rotation), (43.0, -3.0));
        let third = engine.compute_slot_transform(slot(2), false);
        assert_eq!((third.offset_x, third.rotation), (157.0, 4.0));
    }

    #[test]
    fn stacking_order_is_highest_for_first_slot_in_both_tables() {
        let engine = LayoutEngine::new(&CarouselConfig::default());
        for expanded in [false, true] {
            let z: Vec<i32> = SlotIndex::ALL
                .iter()
                .map(|&s| engine.compute_slot_transform(s, expanded).z_index)
                .collect();
            assert_eq!(z, vec![5, 4, 3, 2, 1]);
        }
    }

    #[test]
    fn media_is_centered_in_frame() {
        let metrics = CardMetrics::at_scale(2.0);
        assert_eq!(metrics.media_left, 33.0);
        assert_eq!(metrics.media_top, 31.0);
        assert_eq!(metrics.card_height, 1472.0);
    }
}
