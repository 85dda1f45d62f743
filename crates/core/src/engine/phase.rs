use reel_protocol::IntroPhase;

use crate::engine::timer::{TimerKind, TimerQueue};

/// Delay from expansion until the strip has grown out of its circle.
pub const PHASE_EXPAND_DELAY_MS: u64 = 600;
/// Delay from the strip growing until its indicators are shown.
pub const PHASE_REVEAL_DELAY_MS: u64 = 300;

/// Staged reveal of the control strip.
///
/// Tuned to the settle time of the strip's own spring animation, so
/// indicators do not appear before the strip has finished growing.
#[derive(Debug, Clone, Default)]
pub struct PhaseSequencer {
    phase: IntroPhase,
}

impl PhaseSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    /// Arm both phase timers relative to `now_ms`.
    pub fn on_expanded(&mut self, now_ms: u64, timers: &mut TimerQueue) {
        timers.schedule(
            TimerKind::PhaseExpand,
            now_ms.saturating_add(PHASE_EXPAND_DELAY_MS),
        );
        timers.schedule(
            TimerKind::PhaseReveal,
            now_ms.saturating_add(PHASE_EXPAND_DELAY_MS + PHASE_REVEAL_DELAY_MS),
        );
    }

    pub fn on_collapsed(&mut self, timers: &mut TimerQueue) {
        timers.cancel(TimerKind::PhaseExpand);
        timers.cancel(TimerKind::PhaseReveal);
        if self.phase != IntroPhase::Circle {
            tracing::debug!(from = ?self.phase, "intro phase reset");
        }
        self.phase = IntroPhase::Circle;
    }

    /// Apply a fired phase timer. Returns the new phase if it advanced.
    pub fn on_timer(&mut self, kind: TimerKind) -> Option<IntroPhase> {
        let target = match kind {
            TimerKind::PhaseExpand => IntroPhase::Expanded,
            TimerKind::PhaseReveal => IntroPhase::Visible,
            TimerKind::CollapseSettle => return None,
        };
        if target <= self.phase {
            return None;
        }
        // Step through each phase so none is skipped.
        while self.phase < target {
            self.phase = self.phase.next();
        }
        tracing::debug!(phase = ?self.phase, "intro phase advanced");
        Some(self.phase)
    }

    /// Opacity of the per-indicator elements.
    pub fn indicator_opacity(&self) -> f64 {
        if self.phase == IntroPhase::Visible { 1.0 } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fire_all(seq: &mut PhaseSequencer, timers: &mut TimerQueue, now_ms: u64) -> Vec<IntroPhase> {
        let mut seen = Vec::new();
        while let Some(kind) = timers.pop_due(now_ms) {
            if let Some(phase) = seq.on_timer(kind) {
                seen.push(phase);
            }
        }
        seen
    }

    #[test]
    fn advances_at_600_and_900() {
        let mut seq = PhaseSequencer::new();
        let mut timers = TimerQueue::new();
        seq.on_expanded(1_000, &mut timers);

        assert!(fire_all(&mut seq, &mut timers, 1_599).is_empty());
        assert_eq!(seq.phase(), IntroPhase::Circle);

        assert_eq!(fire_all(&mut seq, &mut timers, 1_600), vec![IntroPhase::Expanded]);
        assert_eq!(seq.indicator_opacity(), 0.0);

        assert!(fire_all(&mut seq, &mut timers, 1_899).is_empty());
        assert_eq!(fire_all(&mut seq, &mut timers, 1_900), vec![IntroPhase::Visible]);
        assert_eq!(seq.indicator_opacity(), 1.0);
    }

    #[test]
    fn late_wake_still_passes_through_expanded() {
        let mut seq = PhaseSequencer::new();
        let mut timers = TimerQueue::new();
        seq.on_expanded(0, &mut timers);
        assert_eq!(
            fire_all(&mut seq, &mut timers, 5_000),
            vec![IntroPhase::Expanded, IntroPhase::Visible]
        );
    }

    #[test]
    fn deadlines_saturate_at_clock_limit() {
        let mut seq = PhaseSequencer::new();
        let mut timers = TimerQueue::new();
        seq.on_expanded(u64::MAX - 100, &mut timers);
        assert_eq!(timers.deadline(TimerKind::PhaseExpand), Some(u64::MAX));
        assert_eq!(timers.deadline(TimerKind::PhaseReveal), Some(u64::MAX));
        assert!(fire_all(&mut seq, &mut timers, u64::MAX - 1).is_empty());
    }

    #[test]
    fn collapse_cancels_and_resets() {
        let mut seq = PhaseSequencer::new();
        let mut timers = TimerQueue::new();
        seq.on_expanded(0, &mut timers);
        fire_all(&mut seq, &mut timers, 700);
        assert_eq!(seq.phase(), IntroPhase::Expanded);

        seq.on_collapsed(&mut timers);
        assert_eq!(seq.phase(), IntroPhase::Circle);
        assert!(!timers.is_pending(TimerKind::PhaseReveal));
        assert!(fire_all(&mut seq, &mut timers, 10_000).is_empty());
    }
}
