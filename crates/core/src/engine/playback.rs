use reel_protocol::{SLOT_COUNT, SlotIndex};

use crate::model::{HandleTable, MediaHandle};

/// Which slot is active and how far its media has played.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub active: SlotIndex,
    /// Fraction of the active media played, in `[0, 1]`.
    pub progress: f64,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            active: SlotIndex::FIRST,
            progress: 0.0,
        }
    }
}

/// What the orchestrator last knows about one slot's media.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotStatus {
    /// Paused, or a play attempt failed.
    #[default]
    Stopped,
    /// Play was requested and not yet confirmed or rejected.
    Requested,
    /// The host confirmed playback started.
    Playing,
}

impl SlotStatus {
    pub fn is_playing(self) -> bool {
        matches!(self, Self::Requested | Self::Playing)
    }
}

/// Per-frame progress sampler bound to one activation of one slot.
///
/// A new generation is issued every time a slot is activated, so a sampler
/// never outlives the activation it was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSampler {
    pub slot: SlotIndex,
    pub generation: u64,
}

/// Owns the active index and keeps playback exclusive: at most one slot is
/// ever playing or asked to play.
#[derive(Debug)]
pub struct PlaybackOrchestrator<M> {
    handles: HandleTable<M>,
    state: PlaybackState,
    status: [SlotStatus; SLOT_COUNT],
    sampler: Option<FrameSampler>,
    generation: u64,
    /// Activation generation of each slot's latest accepted play request.
    requests: [u64; SLOT_COUNT],
    engaged: bool,
}

impl<M: MediaHandle> PlaybackOrchestrator<M> {
    pub fn new(handles: HandleTable<M>) -> Self {
        Self {
            handles,
            state: PlaybackState::default(),
            status: [SlotStatus::Stopped; SLOT_COUNT],
            sampler: None,
            generation: 0,
            requests: [0; SLOT_COUNT],
            engaged: false,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn status(&self, slot: SlotIndex) -> SlotStatus {
        self.status[slot.get()]
    }

    /// Slots currently playing or asked to play. Never more than one.
    pub fn playing_slots(&self) -> impl Iterator<Item = SlotIndex> + '_ {
        SlotIndex::ALL
            .into_iter()
            .filter(|slot| self.status(*slot).is_playing())
    }

    /// Whether playback is enabled (the carousel is expanded).
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Generation of the current activation. Bumped on every index change or
    /// restart; hosts tag play requests with it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn sampler(&self) -> Option<FrameSampler> {
        self.sampler
    }

    pub fn handles(&self) -> &HandleTable<M> {
        &self.handles
    }

    pub fn handles_mut(&mut self) -> &mut HandleTable<M> {
        &mut self.handles
    }

    /// Enable playback: the active slot starts from zero, every other slot is
    /// paused and rewound. Returns the slot that became active, or `None` if
    /// playback was already enabled.
    pub fn engage(&mut self) -> Option<SlotIndex> {
        if self.engaged {
            return None;
        }
        self.engaged = true;
        let slot = self.state.active;
        self.activate(slot);
        Some(slot)
    }

    /// Disable playback: pause and rewind everything, drop the sampler and
    /// reset to the first slot.
    pub fn disengage(&mut self) {
        for (_, handle) in self.handles.iter_mut() {
            handle.pause();
            handle.seek_to_zero();
        }
        self.status = [SlotStatus::Stopped; SLOT_COUNT];
        self.sampler = None;
        self.state = PlaybackState::default();
        if self.engaged {
            tracing::debug!("playback disengaged");
        }
        self.engaged = false;
    }

    /// Poll the active media for progress. Call once per display frame.
    /// Returns whether the sampler is still running (i.e. another frame is
    /// wanted).
    pub fn sample_frame(&mut self) -> bool {
        let Some(sampler) = self.sampler else {
            return false;
        };
        if !self.engaged
            || sampler.generation != self.generation
            || sampler.slot != self.state.active
        {
            self.sampler = None;
            return false;
        }
        let handle = self.handles.get(sampler.slot);
        let Some(duration) = handle.duration().filter(|d| d.is_finite() && *d > 0.0) else {
            return true;
        };
        let time = handle.current_time();
        if time.is_finite() {
            self.state.progress = (time / duration).clamp(0.0, 1.0);
        }
        true
    }

    /// End-of-media for `slot`. Advances to the next slot (wrapping) if `slot`
    /// is the active one; notifications for any other slot are stale.
    pub fn on_ended(&mut self, slot: SlotIndex) -> Option<SlotIndex> {
        if !self.engaged || slot != self.state.active {
            tracing::trace!(%slot, active = %self.state.active, "ignoring stale end-of-media");
            return None;
        }
        let next = slot.next();
        tracing::debug!(from = %slot, to = %next, "media ended, advancing");
        self.activate(next);
        Some(next)
    }

    /// Indicator tap. Switches playback to `slot` immediately, restarting it
    /// if it was already active. Ignored while disengaged.
    pub fn select(&mut self, slot: SlotIndex) -> Option<SlotIndex> {
        if !self.engaged {
            tracing::trace!(%slot, "ignoring indicator tap while collapsed");
            return None;
        }
        tracing::debug!(from = %self.state.active, to = %slot, "indicator selected");
        self.activate(slot);
        Some(slot)
    }

    /// The host confirmed that `slot` started playing.
    pub fn on_playing(&mut self, slot: SlotIndex) {
        if self.engaged && slot == self.state.active {
            if self.status(slot) == SlotStatus::Requested {
                self.status[slot.get()] = SlotStatus::Playing;
            }
            return;
        }
        // A play request that resolved after we moved on: stop it again.
        tracing::trace!(%slot, "late playback start, pausing");
        let handle = self.handles.get_mut(slot);
        handle.pause();
        handle.seek_to_zero();
        self.status[slot.get()] = SlotStatus::Stopped;
    }

    /// The host reported that a play request for `slot` was rejected.
    ///
    /// With a `generation` tag, a rejection of an older request than the
    /// slot's latest one is ignored. Untagged rejections apply to the latest
    /// request. A slot already confirmed playing cannot be rejected.
    pub fn on_play_rejected(&mut self, slot: SlotIndex, generation: Option<u64>) {
        if self.status(slot) != SlotStatus::Requested {
            tracing::trace!(%slot, "ignoring rejection, no request outstanding");
            return;
        }
        if generation.is_some_and(|g| g != self.requests[slot.get()]) {
            tracing::trace!(%slot, ?generation, "ignoring stale rejection");
            return;
        }
        tracing::debug!(%slot, "play request rejected");
        self.status[slot.get()] = SlotStatus::Stopped;
    }

    fn activate(&mut self, slot: SlotIndex) {
        self.state = PlaybackState {
            active: slot,
            progress: 0.0,
        };
        // Silence everything else before starting the new slot.
        for (other, handle) in self.handles.iter_mut() {
            if other != slot {
                handle.pause();
                handle.seek_to_zero();
                self.status[other.get()] = SlotStatus::Stopped;
            }
        }
        self.generation += 1;
        let handle = self.handles.get_mut(slot);
        handle.seek_to_zero();
        self.status[slot.get()] = match handle.play() {
            Ok(()) => {
                self.requests[slot.get()] = self.generation;
                SlotStatus::Requested
            }
            Err(err) => {
                tracing::debug!(%slot, error = %err, "play request failed");
                SlotStatus::Stopped
            }
        };
        self.sampler = Some(FrameSampler {
            slot,
            generation: self.generation,
        });
    }
}
