//! Headless controller for a five-card media carousel that reacts to how much
//! of it is visible in a scrolling viewport.
//!
//! ```text
//!   scroll/resize ─▶ VisibilityTracker ─┬─▶ LayoutEngine ──────────┐
//!                                      ├─▶ PlaybackOrchestrator ──┼─▶ CarouselFrame ─▶ renderer
//!                                      └─▶ PhaseSequencer ────────┤
//!   scroll/resize ─▶ PlacementSwitcher ───────────────────────────┘
//! ```
//!
//! The host feeds [`CarouselController`] with measurements, frames, media
//! notifications and taps, then reads back a [`reel_protocol::CarouselFrame`]
//! and drains [`reel_protocol::HostRequest`]s.

pub mod controller;
pub mod engine;
pub mod model;
pub mod views;

pub use controller::{COLLAPSE_SETTLE_MS, CarouselController, ViewportSample};
pub use engine::{PlaybackState, SlotStatus, StripGeometry};
pub use model::{CarouselConfig, ConfigError, HandleTable, MediaError, MediaHandle, StripConfig};
