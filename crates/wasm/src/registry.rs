use std::sync::{Mutex, MutexGuard};

use reel_core::{CarouselConfig, CarouselController, ConfigError, HandleTable};
use reel_protocol::{MediaCommand, SlotIndex};
use thiserror::Error;

use crate::media::{CommandLog, RecordedMedia};

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid carousel handle {0}")]
    Handle(usize),
    #[error("slot index {0} is out of range")]
    Slot(u8),
    #[error("carousel registry poisoned")]
    Poisoned,
}

/// One live carousel and the command log its media handles write to.
#[derive(Debug)]
pub struct Carousel {
    pub controller: CarouselController<RecordedMedia>,
    pub commands: CommandLog,
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Result<Self, BridgeError> {
        let commands = CommandLog::default();
        let handles = HandleTable::from_fn(|slot| RecordedMedia::new(slot, commands.clone()));
        Ok(Self {
            controller: CarouselController::new(config, handles)?,
            commands,
        })
    }

    pub fn drain_commands(&self) -> Result<Vec<MediaCommand>, BridgeError> {
        let mut log = self.commands.lock().map_err(|_| BridgeError::Poisoned)?;
        Ok(std::mem::take(&mut *log))
    }
}

/// Destroyed carousels leave a `None` so handles are never reused.
static CAROUSELS: Mutex<Vec<Option<Carousel>>> = Mutex::new(Vec::new());

fn registry() -> Result<MutexGuard<'static, Vec<Option<Carousel>>>, BridgeError> {
    CAROUSELS.lock().map_err(|_| BridgeError::Poisoned)
}

pub fn create(config_json: &str) -> Result<usize, BridgeError> {
    let carousel = Carousel::new(CarouselConfig::from_json(config_json)?)?;
    let mut carousels = registry()?;
    carousels.push(Some(carousel));
    Ok(carousels.len() - 1)
}

pub fn destroy(handle: usize) -> Result<(), BridgeError> {
    let mut carousels = registry()?;
    let mut carousel = carousels
        .get_mut(handle)
        .and_then(Option::take)
        .ok_or(BridgeError::Handle(handle))?;
    carousel.controller.shutdown();
    Ok(())
}

pub fn with_carousel<R>(
    handle: usize,
    f: impl FnOnce(&mut Carousel) -> Result<R, BridgeError>,
) -> Result<R, BridgeError> {
    let mut carousels = registry()?;
    let carousel = carousels
        .get_mut(handle)
        .and_then(Option::as_mut)
        .ok_or(BridgeError::Handle(handle))?;
    f(carousel)
}

pub fn slot(index: u8) -> Result<SlotIndex, BridgeError> {
    SlotIndex::try_from(index).map_err(|_| BridgeError::Slot(index))
}

/// JavaScript timestamps are `f64` milliseconds.
pub fn clock(now_ms: f64) -> u64 {
    if now_ms.is_finite() && now_ms > 0.0 {
        now_ms as u64
    } else {
        0
    }
}
