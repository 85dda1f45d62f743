pub mod layout;
pub mod phase;
pub mod placement;
pub mod playback;
pub mod scroll;
pub mod timer;
pub mod visibility;

pub use layout::{CardMetrics, LayoutEngine, PositionTable, SlotPosition};
pub use phase::PhaseSequencer;
pub use placement::PlacementSwitcher;
pub use playback::{FrameSampler, PlaybackOrchestrator, PlaybackState, SlotStatus};
pub use scroll::{CardExtent, StripGeometry};
pub use timer::{TimerKind, TimerQueue};
pub use visibility::VisibilityTracker;
