use serde::{Deserialize, Serialize};

use crate::media_source::MediaSource;
use crate::slot::{SLOT_COUNT, SlotIndex};
use crate::state::{IntroPhase, PlacementMode, VisibilityState};

/// Spring parameters the card view should animate a transform change with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringTransition {
    pub stiffness: f64,
    pub damping: f64,
    pub mass: f64,
}

/// Target placement of one card, relative to the carousel center line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
    /// Higher values stack on top.
    pub z_index: i32,
    /// Delay before this card starts moving toward the target.
    pub delay_ms: u64,
    pub spring: SpringTransition,
}

/// Everything a card view needs to draw one slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotView {
    pub slot: SlotIndex,
    /// 1-based label printed on the card.
    pub label: u8,
    pub transform: SlotTransform,
    /// Whether this slot is the one allowed to play.
    pub active: bool,
    pub media: MediaSource,
    pub frame_asset: Option<MediaSource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorView {
    pub slot: SlotIndex,
    pub width: f64,
    /// Fill fraction in `[0, 1]`: playback progress for the active slot, else 0.
    pub fill: f64,
    pub opacity: f64,
}

/// The control strip. Both placements are always rendered; only one of
/// `fixed_visible` / `anchor_visible` is true.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StripView {
    pub phase: IntroPhase,
    pub placement: PlacementMode,
    pub fixed_visible: bool,
    pub anchor_visible: bool,
    pub width: f64,
    pub height: f64,
    pub indicators: [IndicatorView; SLOT_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackView {
    pub active: SlotIndex,
    pub progress: f64,
}

/// A complete snapshot of the carousel for renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselFrame {
    pub visibility: VisibilityState,
    pub expanded: bool,
    pub playback: PlaybackView,
    pub container_height: f64,
    pub slots: Vec<SlotView>,
    pub strip: StripView,
}
