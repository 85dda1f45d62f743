//! JavaScript bindings for the carousel controller.
//!
//! Every call takes the host's `performance.now()` timestamp. Structured
//! inputs and outputs cross the boundary as JSON strings. Media control is
//! recorded per carousel and drained with [`drain_media_commands`].

mod media;
mod registry;

use reel_core::{StripGeometry, ViewportSample};
use wasm_bindgen::prelude::*;

pub use media::{CommandLog, RecordedMedia};
pub use registry::BridgeError;

use registry::{clock, slot, with_carousel};

/// Create a carousel from a JSON config. Returns a handle for later calls.
#[wasm_bindgen]
pub fn create_carousel(config_json: &str) -> Result<usize, JsError> {
    Ok(registry::create(config_json)?)
}

/// Stop all media and release the carousel.
#[wasm_bindgen]
pub fn destroy_carousel(handle: usize) -> Result<(), JsError> {
    Ok(registry::destroy(handle)?)
}

/// Feed one scroll/resize measurement (`ViewportSample` JSON).
#[wasm_bindgen]
pub fn viewport(handle: usize, sample_json: &str, now_ms: f64) -> Result<(), JsError> {
    let sample: ViewportSample =
        serde_json::from_str(sample_json).map_err(BridgeError::from)?;
    Ok(with_carousel(handle, |c| {
        c.controller.on_viewport(&sample, clock(now_ms));
        Ok(())
    })?)
}

/// Sample progress for this frame. Returns whether another frame is wanted.
#[wasm_bindgen]
pub fn animation_frame(handle: usize, now_ms: f64) -> Result<bool, JsError> {
    Ok(with_carousel(handle, |c| {
        Ok(c.controller.on_animation_frame(clock(now_ms)))
    })?)
}

/// Report a media element's `currentTime` and `duration` in seconds.
#[wasm_bindgen]
pub fn media_time(handle: usize, index: u8, time: f64, duration: f64) -> Result<(), JsError> {
    let slot = slot(index)?;
    Ok(with_carousel(handle, |c| {
        c.controller
            .handles_mut()
            .get_mut(slot)
            .report_time(time, duration);
        Ok(())
    })?)
}

#[wasm_bindgen]
pub fn media_ended(handle: usize, index: u8, now_ms: f64) -> Result<(), JsError> {
    let slot = slot(index)?;
    Ok(with_carousel(handle, |c| {
        c.controller.on_media_ended(slot, clock(now_ms));
        Ok(())
    })?)
}

#[wasm_bindgen]
pub fn media_playing(handle: usize, index: u8, now_ms: f64) -> Result<(), JsError> {
    let slot = slot(index)?;
    Ok(with_carousel(handle, |c| {
        c.controller.on_playing(slot, clock(now_ms));
        Ok(())
    })?)
}

/// The promise returned by `play()` rejected.
#[wasm_bindgen]
pub fn media_rejected(handle: usize, index: u8, now_ms: f64) -> Result<(), JsError> {
    let slot = slot(index)?;
    Ok(with_carousel(handle, |c| {
        c.controller.on_play_rejected(slot, clock(now_ms));
        Ok(())
    })?)
}

/// Rejection of the request issued when [`play_generation`] returned
/// `generation`. Rejections of superseded requests are ignored.
#[wasm_bindgen]
pub fn media_request_rejected(
    handle: usize,
    index: u8,
    generation: f64,
    now_ms: f64,
) -> Result<(), JsError> {
    let slot = slot(index)?;
    Ok(with_carousel(handle, |c| {
        c.controller
            .on_request_rejected(slot, clock(generation), clock(now_ms));
        Ok(())
    })?)
}

/// Tag for the play requests in the latest drained media commands.
#[wasm_bindgen]
pub fn play_generation(handle: usize) -> Result<f64, JsError> {
    Ok(with_carousel(handle, |c| {
        Ok(c.controller.play_generation() as f64)
    })?)
}

#[wasm_bindgen]
pub fn indicator_tap(handle: usize, index: u8, now_ms: f64) -> Result<(), JsError> {
    let slot = slot(index)?;
    Ok(with_carousel(handle, |c| {
        c.controller.on_indicator_tap(slot, clock(now_ms));
        Ok(())
    })?)
}

#[wasm_bindgen]
pub fn container_tap(handle: usize, now_ms: f64) -> Result<(), JsError> {
    Ok(with_carousel(handle, |c| {
        c.controller.on_container_tap(clock(now_ms));
        Ok(())
    })?)
}

/// Fire any timers due at `now_ms`. Call when the deadline from
/// [`next_deadline`] passes.
#[wasm_bindgen]
pub fn advance(handle: usize, now_ms: f64) -> Result<(), JsError> {
    Ok(with_carousel(handle, |c| {
        c.controller.advance(clock(now_ms));
        Ok(())
    })?)
}

/// Earliest pending timer deadline in milliseconds, if any.
#[wasm_bindgen]
pub fn next_deadline(handle: usize) -> Result<Option<f64>, JsError> {
    Ok(with_carousel(handle, |c| {
        Ok(c.controller.next_deadline().map(|ms| ms as f64))
    })?)
}

/// Replace the measured strip geometry (`StripGeometry` JSON).
#[wasm_bindgen]
pub fn set_strip_geometry(handle: usize, geometry_json: &str) -> Result<(), JsError> {
    let geometry: StripGeometry =
        serde_json::from_str(geometry_json).map_err(BridgeError::from)?;
    Ok(with_carousel(handle, |c| {
        c.controller.set_strip_geometry(geometry);
        Ok(())
    })?)
}

/// Current render description as JSON.
#[wasm_bindgen]
pub fn frame(handle: usize) -> Result<String, JsError> {
    Ok(with_carousel(handle, |c| {
        Ok(serde_json::to_string(&c.controller.frame())?)
    })?)
}

/// Pending host requests (strip scrolling) as a JSON array.
#[wasm_bindgen]
pub fn drain_requests(handle: usize) -> Result<String, JsError> {
    Ok(with_carousel(handle, |c| {
        Ok(serde_json::to_string(&c.controller.drain_requests())?)
    })?)
}

/// Media commands issued since the last drain, as a JSON array.
#[wasm_bindgen]
pub fn drain_media_commands(handle: usize) -> Result<String, JsError> {
    Ok(with_carousel(handle, |c| {
        Ok(serde_json::to_string(&c.drain_commands()?)?)
    })?)
}
