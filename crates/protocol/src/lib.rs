pub mod commands;
pub mod media_source;
pub mod slot;
pub mod state;
pub mod types;
pub mod view;

pub use commands::{HostRequest, MediaCommand, ScrollReason};
pub use media_source::MediaSource;
pub use slot::{SLOT_COUNT, SlotIndex};
pub use state::{IntroPhase, PlacementMode, VisibilityState};
pub use types::Rect;
pub use view::{
    CarouselFrame, IndicatorView, PlaybackView, SlotTransform, SlotView, SpringTransition,
    StripView,
};
