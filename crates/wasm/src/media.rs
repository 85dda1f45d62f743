use std::sync::{Arc, Mutex};

use reel_core::{MediaError, MediaHandle};
use reel_protocol::{MediaCommand, SlotIndex};

/// Commands recorded by every slot of one carousel, in issue order.
pub type CommandLog = Arc<Mutex<Vec<MediaCommand>>>;

/// Media handle for a host on the other side of the WASM boundary.
///
/// Control calls are recorded for JavaScript to drain and apply to its media
/// elements; playback position is whatever JavaScript last reported.
#[derive(Debug)]
pub struct RecordedMedia {
    slot: SlotIndex,
    log: CommandLog,
    time: f64,
    duration: Option<f64>,
}

impl RecordedMedia {
    pub fn new(slot: SlotIndex, log: CommandLog) -> Self {
        Self {
            slot,
            log,
            time: 0.0,
            duration: None,
        }
    }

    /// Store the position reported by the media element. A non-finite or
    /// non-positive duration means "not known yet".
    pub fn report_time(&mut self, time: f64, duration: f64) {
        self.time = time;
        self.duration = (duration.is_finite() && duration > 0.0).then_some(duration);
    }

    fn record(&self, command: MediaCommand) -> Result<(), MediaError> {
        match self.log.lock() {
            Ok(mut log) => {
                log.push(command);
                Ok(())
            }
            Err(_) => Err(MediaError::Unavailable("command log poisoned".into())),
        }
    }
}

impl MediaHandle for RecordedMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        self.record(MediaCommand::Play(self.slot))
    }

    fn pause(&mut self) {
        let _ = self.record(MediaCommand::Pause(self.slot));
    }

    fn seek_to_zero(&mut self) {
        self.time = 0.0;
        let _ = self.record(MediaCommand::SeekToZero(self.slot));
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order() {
        let log = CommandLog::default();
        let slot = SlotIndex::new(1).unwrap();
        let mut media = RecordedMedia::new(slot, log.clone());
        media.seek_to_zero();
        media.play().unwrap();
        media.pause();
        let recorded = log.lock().unwrap().clone();
        assert_eq!(
            recorded,
            vec![
                MediaCommand::SeekToZero(slot),
                MediaCommand::Play(slot),
                MediaCommand::Pause(slot),
            ]
        );
    }

    #[test]
    fn unknown_duration_is_none() {
        let mut media = RecordedMedia::new(SlotIndex::FIRST, CommandLog::default());
        media.report_time(1.0, f64::NAN);
        assert_eq!(media.duration(), None);
        media.report_time(1.0, 4.0);
        assert_eq!(media.duration(), Some(4.0));
        assert_eq!(media.current_time(), 1.0);
    }
}
