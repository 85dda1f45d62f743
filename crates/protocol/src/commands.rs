use serde::{Deserialize, Serialize};

use crate::slot::SlotIndex;

/// A fire-and-forget request from the controller to its host.
///
/// The controller queues these while handling an event; the host drains and
/// performs them. Nothing waits for completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum HostRequest {
    /// Scroll the horizontal card strip so its scroll offset becomes `offset`
    /// (logical pixels, already clamped to the scrollable range).
    ScrollStrip { offset: f64, reason: ScrollReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollReason {
    /// Bring the newly active card to the center of the strip.
    CenterActive(SlotIndex),
    /// Return to the start before the cards re-bunch.
    ResetToStart,
}

/// A media control command, as recorded by hosts that cannot call into their
/// media elements synchronously (e.g. across a WASM boundary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaCommand {
    Play(SlotIndex),
    Pause(SlotIndex),
    SeekToZero(SlotIndex),
}
