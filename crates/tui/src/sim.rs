use std::cell::Cell;
use std::rc::Rc;

use reel_core::{MediaError, MediaHandle, ViewportSample};
use reel_protocol::Rect;

/// Logical pixels per terminal row and column.
pub const PX_PER_ROW: f64 = 16.0;
pub const PX_PER_COL: f64 = 8.0;

/// Length of every simulated clip, in seconds.
pub const CLIP_SECONDS: f64 = 6.0;

const ANCHOR_GAP: f64 = 24.0;
const ANCHOR_HEIGHT: f64 = 80.0;

/// Shared switch that makes the next `play()` on any clip fail once.
#[derive(Debug, Clone, Default)]
pub struct FailSwitch(Rc<Cell<bool>>);

impl FailSwitch {
    pub fn arm(&self) {
        self.0.set(true);
    }

    pub fn is_armed(&self) -> bool {
        self.0.get()
    }

    fn take(&self) -> bool {
        self.0.take()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipEvent {
    Started,
    Ended,
}

/// A clip whose position advances with wall-clock time while playing.
#[derive(Debug)]
pub struct SimulatedMedia {
    length: f64,
    time: f64,
    playing: bool,
    starting: bool,
    fail: FailSwitch,
}

impl SimulatedMedia {
    pub fn new(length: f64, fail: FailSwitch) -> Self {
        Self {
            length,
            time: 0.0,
            playing: false,
            starting: false,
            fail,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Advance by `dt` seconds. An accepted play request starts on the tick
    /// after it was made, like a media element's `playing` event.
    pub fn tick(&mut self, dt: f64) -> Option<ClipEvent> {
        if self.starting {
            self.starting = false;
            self.playing = true;
            return Some(ClipEvent::Started);
        }
        if !self.playing {
            return None;
        }
        self.time = (self.time + dt).min(self.length);
        if self.time >= self.length {
            self.playing = false;
            return Some(ClipEvent::Ended);
        }
        None
    }
}

impl MediaHandle for SimulatedMedia {
    fn play(&mut self) -> Result<(), MediaError> {
        if self.fail.take() {
            return Err(MediaError::NotAllowed("simulated autoplay block".into()));
        }
        if !self.playing {
            self.starting = true;
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        self.starting = false;
    }

    fn seek_to_zero(&mut self) {
        self.time = 0.0;
    }

    fn current_time(&self) -> f64 {
        self.time
    }

    fn duration(&self) -> Option<f64> {
        Some(self.length)
    }
}

/// A gallery page: two screens of lead-in, one screen hosting the carousel
/// and the inline strip anchor below it, then two screens of tail.
#[derive(Debug, Clone)]
pub struct Page {
    pub viewport_width: f64,
    pub viewport_height: f64,
    container_height: f64,
    scroll: f64,
}

impl Page {
    pub fn new(viewport_width: f64, viewport_height: f64, container_height: f64) -> Self {
        Self {
            viewport_width,
            viewport_height,
            container_height,
            scroll: 0.0,
        }
    }

    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) {
        self.viewport_width = viewport_width;
        self.viewport_height = viewport_height;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn scroll(&self) -> f64 {
        self.scroll
    }

    pub fn scroll_by(&mut self, dy: f64) {
        self.scroll = (self.scroll + dy).clamp(0.0, self.max_scroll());
    }

    pub fn height(&self) -> f64 {
        let host = self
            .viewport_height
            .max(self.container_height + ANCHOR_GAP + ANCHOR_HEIGHT);
        2.0 * self.viewport_height + host + 2.0 * self.viewport_height
    }

    pub fn max_scroll(&self) -> f64 {
        (self.height() - self.viewport_height).max(0.0)
    }

    /// Container top in page coordinates, centered in the host screen.
    pub fn container_top(&self) -> f64 {
        2.0 * self.viewport_height + ((self.viewport_height - self.container_height) / 2.0).max(0.0)
    }

    pub fn container(&self) -> Rect {
        Rect::new(
            0.0,
            self.container_top() - self.scroll,
            self.viewport_width,
            self.container_height,
        )
    }

    pub fn anchor(&self) -> Rect {
        Rect::new(
            0.0,
            self.container_top() + self.container_height + ANCHOR_GAP - self.scroll,
            self.viewport_width,
            ANCHOR_HEIGHT,
        )
    }

    pub fn sample(&self) -> ViewportSample {
        ViewportSample {
            container: self.container(),
            viewport_height: self.viewport_height,
            anchor: Some(self.anchor()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_starts_then_ends() {
        let mut clip = SimulatedMedia::new(1.0, FailSwitch::default());
        clip.play().unwrap();
        assert!(!clip.is_playing());
        assert_eq!(clip.tick(0.1), Some(ClipEvent::Started));
        assert_eq!(clip.tick(0.5), None);
        assert_eq!(clip.current_time(), 0.5);
        assert_eq!(clip.tick(0.7), Some(ClipEvent::Ended));
        assert!(!clip.is_playing());
        assert_eq!(clip.current_time(), 1.0);
    }

    #[test]
    fn pause_before_start_cancels() {
        let mut clip = SimulatedMedia::new(1.0, FailSwitch::default());
        clip.play().unwrap();
        clip.pause();
        assert_eq!(clip.tick(0.1), None);
    }

    #[test]
    fn fail_switch_trips_once_across_clips() {
        let fail = FailSwitch::default();
        let mut a = SimulatedMedia::new(1.0, fail.clone());
        let mut b = SimulatedMedia::new(1.0, fail.clone());
        fail.arm();
        assert!(a.play().is_err());
        assert!(!fail.is_armed());
        assert!(b.play().is_ok());
    }

    #[test]
    fn page_moves_container_through_viewport() {
        let mut page = Page::new(800.0, 800.0, 736.0);
        assert!(page.container().top() >= page.viewport_height);

        page.scroll_by(page.container_top());
        assert_eq!(page.container().top(), 0.0);
        assert!(page.anchor().top() > page.container().bottom());

        page.scroll_by(f64::MAX);
        assert_eq!(page.scroll(), page.max_scroll());
        assert!(page.container().bottom() < 0.0);
    }
}
