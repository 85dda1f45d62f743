use reel_protocol::{SLOT_COUNT, SlotIndex};
use thiserror::Error;

/// Why a play request was refused by the media subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("media is not ready to play")]
    NotReady,
    #[error("playback was not allowed: {0}")]
    NotAllowed(String),
    #[error("media is unavailable: {0}")]
    Unavailable(String),
}

/// Capability object for one slot's playable media.
///
/// Implemented by the host (a video element wrapper, a WASM command recorder,
/// a simulated clip). End-of-media and play-outcome notifications flow back
/// through the controller's entry points rather than through callbacks
/// registered here, so a handle never holds a reference to the controller.
pub trait MediaHandle {
    /// Ask the media to start playing. `Ok` means the request was accepted,
    /// not that playback has begun; a later rejection is reported through
    /// `CarouselController::on_play_rejected`.
    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn seek_to_zero(&mut self);

    /// Current playback position in seconds.
    fn current_time(&self) -> f64;

    /// Total length in seconds, if known.
    fn duration(&self) -> Option<f64>;
}

impl<M: MediaHandle + ?Sized> MediaHandle for Box<M> {
    fn play(&mut self) -> Result<(), MediaError> {
        (**self).play()
    }

    fn pause(&mut self) {
        (**self).pause();
    }

    fn seek_to_zero(&mut self) {
        (**self).seek_to_zero();
    }

    fn current_time(&self) -> f64 {
        (**self).current_time()
    }

    fn duration(&self) -> Option<f64> {
        (**self).duration()
    }
}

/// One media handle per slot, injected at construction.
#[derive(Debug)]
pub struct HandleTable<M> {
    handles: [M; SLOT_COUNT],
}

impl<M> HandleTable<M> {
    pub fn new(handles: [M; SLOT_COUNT]) -> Self {
        Self { handles }
    }

    pub fn from_fn(mut make: impl FnMut(SlotIndex) -> M) -> Self {
        Self {
            handles: SlotIndex::ALL.map(&mut make),
        }
    }

    pub fn get(&self, slot: SlotIndex) -> &M {
        &self.handles[slot.get()]
    }

    pub fn get_mut(&mut self, slot: SlotIndex) -> &mut M {
        &mut self.handles[slot.get()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotIndex, &M)> {
        SlotIndex::ALL.into_iter().zip(self.handles.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotIndex, &mut M)> {
        SlotIndex::ALL.into_iter().zip(self.handles.iter_mut())
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeMedia;
    use super::*;

    #[test]
    fn table_is_indexed_by_slot() {
        let mut table = HandleTable::from_fn(|slot| FakeMedia::with_duration(slot.get() as f64 + 1.0));
        let third = SlotIndex::new(2).unwrap();
        assert_eq!(table.get(third).duration(), Some(3.0));

        table.get_mut(third).time = 1.5;
        let times: Vec<f64> = table.iter().map(|(_, m)| m.current_time()).collect();
        assert_eq!(times, vec![0.0, 0.0, 1.5, 0.0, 0.0]);
    }

    #[test]
    fn boxed_handles_forward() {
        let mut boxed: Box<dyn MediaHandle> = Box::new(FakeMedia::with_duration(4.0));
        assert!(boxed.play().is_ok());
        boxed.seek_to_zero();
        assert_eq!(boxed.duration(), Some(4.0));
        assert_eq!(boxed.current_time(), 0.0);
    }
}
