use reel_protocol::{
    CarouselFrame, HostRequest, IntroPhase, PlacementMode, PlaybackView, Rect, ScrollReason,
    SlotIndex, VisibilityState,
};
use serde::{Deserialize, Serialize};

use crate::engine::{
    LayoutEngine, PhaseSequencer, PlacementSwitcher, PlaybackOrchestrator, PlaybackState,
    SlotStatus, StripGeometry, TimerKind, TimerQueue, VisibilityTracker,
};
use crate::model::{CarouselConfig, ConfigError, HandleTable, MediaHandle};
use crate::views::{render_cards, render_strip};

/// How long the layout stays spread after the carousel leaves view, so the
/// strip's scroll back to the start can finish before the cards re-bunch.
pub const COLLAPSE_SETTLE_MS: u64 = 300;

/// One scroll/resize measurement of the hosting surface, in viewport
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSample {
    /// Bounding rectangle of the carousel container.
    pub container: Rect,
    pub viewport_height: f64,
    /// Bounding rectangle of the inline control-strip anchor, if mounted.
    #[serde(default)]
    pub anchor: Option<Rect>,
}

/// The carousel controller: wires visibility, layout, playback, intro phases
/// and strip placement together.
///
/// Every entry point takes the host's monotonic clock in milliseconds. Timers
/// that are due at that instant fire before the event itself is handled, and
/// a visibility change is propagated to layout, playback and phase before the
/// entry point returns.
#[derive(Debug)]
pub struct CarouselController<M> {
    config: CarouselConfig,
    visibility: VisibilityTracker,
    layout: LayoutEngine,
    playback: PlaybackOrchestrator<M>,
    phase: PhaseSequencer,
    placement: PlacementSwitcher,
    timers: TimerQueue,
    strip_geometry: Option<StripGeometry>,
    expanded: bool,
    requests: Vec<HostRequest>,
    shut_down: bool,
}

impl<M: MediaHandle> CarouselController<M> {
    pub fn new(config: CarouselConfig, handles: HandleTable<M>) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            visibility: VisibilityTracker::new(config.enter_threshold, config.exit_threshold),
            layout: LayoutEngine::new(&config),
            playback: PlaybackOrchestrator::new(handles),
            phase: PhaseSequencer::new(),
            placement: PlacementSwitcher::new(config.strip),
            timers: TimerQueue::new(),
            strip_geometry: None,
            expanded: false,
            requests: Vec::new(),
            shut_down: false,
            config,
        })
    }

    // --- Entry points ---

    /// Scroll or resize of the hosting surface.
    pub fn on_viewport(&mut self, sample: &ViewportSample, now_ms: u64) {
        if self.shut_down {
            return;
        }
        self.fire_due(now_ms);
        if let Some(state) = self
            .visibility
            .sample(&sample.container, sample.viewport_height)
        {
            self.on_visibility_change(state, now_ms);
        }
        self.placement
            .sample(sample.anchor.as_ref(), sample.viewport_height);
    }

    /// Display frame. Returns whether the host should schedule another one.
    pub fn on_animation_frame(&mut self, now_ms: u64) -> bool {
        if self.shut_down {
            return false;
        }
        self.fire_due(now_ms);
        self.playback.sample_frame()
    }

    pub fn on_media_ended(&mut self, slot: SlotIndex, now_ms: u64) {
        if self.shut_down {
            return;
        }
        self.fire_due(now_ms);
        if let Some(next) = self.playback.on_ended(slot) {
            self.request_center(next);
        }
    }

    pub fn on_playing(&mut self, slot: SlotIndex, now_ms: u64) {
        if self.shut_down {
            return;
        }
        self.fire_due(now_ms);
        self.playback.on_playing(slot);
    }

    /// A play request for `slot` was rejected. Applies to the slot's latest
    /// request; use [`Self::on_request_rejected`] when the host can tell
    /// requests apart.
    pub fn on_play_rejected(&mut self, slot: SlotIndex, now_ms: u64) {
        if self.shut_down {
            return;
        }
        self.fire_due(now_ms);
        self.playback.on_play_rejected(slot, None);
    }

    /// Rejection of the play request issued at `generation` (see
    /// [`Self::play_generation`]). Rejections of superseded requests are
    /// ignored.
    pub fn on_request_rejected(&mut self, slot: SlotIndex, generation: u64, now_ms: u64) {
        if self.shut_down {
            return;
        }
        self.fire_due(now_ms);
        self.playback.on_play_rejected(slot, Some(generation));
    }

    pub fn on_indicator_tap(&mut self, slot: SlotIndex, now_ms: u64) {
        if self.shut_down {
            return;
        }
        self.fire_due(now_ms);
        if let Some(selected) = self.playback.select(slot) {
            self.request_center(selected);
        }
    }

    /// Tap on the carousel itself: toggles between spread and bunched.
    pub fn on_container_tap(&mut self, now_ms: u64) {
        if self.shut_down {
            return;
        }
        self.fire_due(now_ms);
        if self.expanded {
            self.collapse();
        } else {
            self.expand(now_ms);
        }
    }

    /// Timer-only wake. See [`Self::next_deadline`].
    pub fn advance(&mut self, now_ms: u64) {
        if !self.shut_down {
            self.fire_due(now_ms);
        }
    }

    pub fn set_strip_geometry(&mut self, geometry: StripGeometry) {
        self.strip_geometry = Some(geometry);
    }

    /// Release every resource: cancel timers, stop all media, drop the frame
    /// sampler and any queued requests. Later calls to entry points are
    /// ignored.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.timers.clear();
        self.playback.disengage();
        self.phase.on_collapsed(&mut self.timers);
        self.requests.clear();
        self.expanded = false;
        self.shut_down = true;
        tracing::debug!("carousel controller shut down");
    }

    // --- Outputs ---

    /// Earliest pending timer deadline; the host should call
    /// [`Self::advance`] no later than this.
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Take the host requests queued since the last drain.
    pub fn drain_requests(&mut self) -> Vec<HostRequest> {
        std::mem::take(&mut self.requests)
    }

    pub fn frame(&self) -> CarouselFrame {
        let playback = self.playback.state();
        let active = self.playback.is_engaged().then_some(playback.active);
        CarouselFrame {
            visibility: self.visibility.state(),
            expanded: self.expanded,
            playback: PlaybackView {
                active: playback.active,
                progress: playback.progress,
            },
            container_height: self.layout.container_height(),
            slots: render_cards(&self.layout, &self.config, self.expanded, active),
            strip: render_strip(
                &self.config.strip,
                self.phase.phase(),
                self.placement.mode(),
                self.phase.indicator_opacity(),
                playback,
            ),
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility.state()
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Whether the carousel has left view and its collapse is still pending.
    pub fn is_collapse_pending(&self) -> bool {
        self.timers.is_pending(TimerKind::CollapseSettle)
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn slot_status(&self, slot: SlotIndex) -> SlotStatus {
        self.playback.status(slot)
    }

    pub fn playing_slots(&self) -> Vec<SlotIndex> {
        self.playback.playing_slots().collect()
    }

    /// Generation of the current activation, bumped whenever playback moves
    /// to a slot or restarts it. Hosts tag the play request they just issued
    /// with this value.
    pub fn play_generation(&self) -> u64 {
        self.playback.generation()
    }

    /// Whether the per-frame progress sampler is running.
    pub fn wants_frames(&self) -> bool {
        self.playback.sampler().is_some()
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase.phase()
    }

    pub fn placement(&self) -> PlacementMode {
        self.placement.mode()
    }

    pub fn handles(&self) -> &HandleTable<M> {
        self.playback.handles()
    }

    pub fn handles_mut(&mut self) -> &mut HandleTable<M> {
        self.playback.handles_mut()
    }

    // --- Internals ---

    fn fire_due(&mut self, now_ms: u64) {
        while let Some(kind) = self.timers.pop_due(now_ms) {
            match kind {
                TimerKind::CollapseSettle => self.collapse(),
                TimerKind::PhaseExpand | TimerKind::PhaseReveal => {
                    self.phase.on_timer(kind);
                }
            }
        }
    }

    fn on_visibility_change(&mut self, state: VisibilityState, now_ms: u64) {
        match state {
            VisibilityState::InView => {
                if self.timers.cancel(TimerKind::CollapseSettle) {
                    tracing::debug!("back in view, pending collapse cancelled");
                }
                if !self.expanded {
                    self.expand(now_ms);
                }
            }
            VisibilityState::OutOfView => {
                if self.expanded && !self.timers.is_pending(TimerKind::CollapseSettle) {
                    self.requests.push(HostRequest::ScrollStrip {
                        offset: 0.0,
                        reason: ScrollReason::ResetToStart,
                    });
                    self.timers.schedule(
                        TimerKind::CollapseSettle,
                        now_ms.saturating_add(COLLAPSE_SETTLE_MS),
                    );
                }
            }
        }
    }

    fn expand(&mut self, now_ms: u64) {
        self.expanded = true;
        tracing::debug!(now_ms, "carousel expanded");
        if let Some(slot) = self.playback.engage() {
            self.request_center(slot);
        }
        self.phase.on_expanded(now_ms, &mut self.timers);
    }

    fn collapse(&mut self) {
        self.timers.cancel(TimerKind::CollapseSettle);
        if !self.expanded {
            return;
        }
        self.expanded = false;
        tracing::debug!("carousel collapsed");
        self.playback.disengage();
        self.phase.on_collapsed(&mut self.timers);
    }

    fn request_center(&mut self, slot: SlotIndex) {
        let offset = match &self.strip_geometry {
            Some(geometry) => geometry.centered_offset(slot),
            None => self.layout.default_strip_geometry().centered_offset(slot),
        };
        self.requests.push(HostRequest::ScrollStrip {
            offset,
            reason: ScrollReason::CenterActive(slot),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::media::fake::FakeMedia;

    const VIEWPORT: f64 = 800.0;

    fn controller() -> CarouselController<FakeMedia> {
        CarouselController::new(
            CarouselConfig::default(),
            HandleTable::from_fn(|_| FakeMedia::with_duration(8.0)),
        )
        .unwrap()
    }

    /// Sample with the container `ratio` visible from the bottom of the viewport.
    fn sample(ratio: f64) -> ViewportSample {
        let height = 600.0;
        ViewportSample {
            container: Rect::new(0.0, VIEWPORT - ratio * height, 1200.0, height),
            viewport_height: VIEWPORT,
            anchor: None,
        }
    }

    #[test]
    fn entering_view_expands_immediately() {
        let mut c = controller();
        c.on_viewport(&sample(0.9), 0);
        assert!(c.is_expanded());
        assert_eq!(c.playing_slots(), vec![SlotIndex::FIRST]);
        assert_eq!(
            c.drain_requests(),
            vec![HostRequest::ScrollStrip {
                offset: 0.0,
                reason: ScrollReason::CenterActive(SlotIndex::FIRST),
            }]
        );
    }

    #[test]
    fn leaving_view_defers_collapse() {
        let mut c = controller();
        c.on_viewport(&sample(1.0), 0);
        c.drain_requests();

        c.on_viewport(&sample(0.1), 1_000);
        assert!(c.is_expanded());
        assert!(c.is_collapse_pending());
        assert_eq!(
            c.drain_requests(),
            vec![HostRequest::ScrollStrip {
                offset: 0.0,
                reason: ScrollReason::ResetToStart,
            }]
        );
        assert_eq!(c.next_deadline(), Some(1_300));

        c.advance(1_299);
        assert!(c.is_expanded());
        c.advance(1_300);
        assert!(!c.is_expanded());
        assert!(c.playing_slots().is_empty());
    }

    #[test]
    fn reentering_before_settle_keeps_expanded() {
        let mut c = controller();
        c.on_viewport(&sample(1.0), 0);
        c.on_indicator_tap(SlotIndex::LAST, 100);
        c.on_viewport(&sample(0.1), 1_000);
        c.on_viewport(&sample(0.9), 1_200);
        c.advance(5_000);
        assert!(c.is_expanded());
        assert!(!c.is_collapse_pending());
        assert_eq!(c.playback_state().active, SlotIndex::LAST);
    }

    #[test]
    fn container_tap_toggles() {
        let mut c = controller();
        c.on_container_tap(0);
        assert!(c.is_expanded());
        c.on_container_tap(10);
        assert!(!c.is_expanded());
        assert_eq!(c.phase(), IntroPhase::Circle);
    }

    #[test]
    fn clock_at_its_limit_does_not_overflow() {
        let mut c = controller();
        c.on_container_tap(u64::MAX);
        assert!(c.is_expanded());
        assert_eq!(c.phase(), IntroPhase::Circle);
        assert_eq!(c.next_deadline(), Some(u64::MAX));

        c.on_viewport(&sample(1.0), u64::MAX - 10);
        c.on_viewport(&sample(0.1), u64::MAX - 5);
        assert!(c.is_collapse_pending());
        assert!(c.is_expanded());
    }

    #[test]
    fn frame_reflects_state() {
        let mut c = controller();
        c.on_viewport(&sample(1.0), 0);
        c.handles_mut().get_mut(SlotIndex::FIRST).time = 2.0;
        assert!(c.on_animation_frame(1_000));

        let frame = c.frame();
        assert!(frame.expanded);
        assert_eq!(frame.visibility, VisibilityState::InView);
        assert_eq!(frame.playback.progress, 0.25);
        assert_eq!(frame.strip.phase, IntroPhase::Visible);
        assert_eq!(frame.strip.indicators[0].fill, 0.25);
        assert_eq!(frame.slots.iter().filter(|s| s.active).count(), 1);
        assert_eq!(frame.container_height, 736.0);
    }

    #[test]
    fn shutdown_releases_everything() {
        let mut c = controller();
        c.on_viewport(&sample(1.0), 0);
        c.shutdown();
        assert_eq!(c.next_deadline(), None);
        assert!(!c.wants_frames());
        assert!(c.playing_slots().is_empty());
        assert!(c.drain_requests().is_empty());

        c.on_viewport(&sample(1.0), 10);
        assert!(!c.is_expanded());
        assert!(!c.on_animation_frame(20));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = CarouselConfig {
            enter_threshold: 0.2,
            exit_threshold: 0.6,
            ..Default::default()
        };
        let result = CarouselController::new(config, HandleTable::from_fn(|_| FakeMedia::default()));
        assert!(matches!(result, Err(ConfigError::ThresholdOrder { .. })));
    }
}
