/// The one-shot timers a controller can have pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Deferred collapse after the carousel leaves view.
    CollapseSettle,
    /// Intro phase `Circle -> Expanded`.
    PhaseExpand,
    /// Intro phase `Expanded -> Visible`.
    PhaseReveal,
}

/// Deadline queue driven by host-supplied timestamps.
///
/// At most one deadline per kind is pending. Due timers are popped one at a
/// time so that handling one timer may schedule or cancel others before the
/// next is taken.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    /// `(kind, deadline_ms, sequence)`; `sequence` breaks deadline ties in
    /// scheduling order.
    pending: Vec<(TimerKind, u64, u64)>,
    next_sequence: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `at_ms`, replacing any pending deadline of
    /// the same kind.
    pub fn schedule(&mut self, kind: TimerKind, at_ms: u64) {
        self.cancel(kind);
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.pending.push((kind, at_ms, sequence));
    }

    /// Returns whether a pending timer was removed.
    pub fn cancel(&mut self, kind: TimerKind) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(k, _, _)| *k != kind);
        self.pending.len() != before
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|(k, _, _)| *k == kind)
    }

    pub fn deadline(&self, kind: TimerKind) -> Option<u64> {
        self.pending
            .iter()
            .find(|(k, _, _)| *k == kind)
            .map(|&(_, at, _)| at)
    }

    pub fn next_deadline(&self) -> Option<u64> {
        self.pending.iter().map(|&(_, at, _)| at).min()
    }

    /// Remove and return the earliest timer due at `now_ms`, if any.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<TimerKind> {
        let position = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, at, _))| *at <= now_ms)
            .min_by_key(|(_, (_, at, seq))| (*at, *seq))
            .map(|(i, _)| i)?;
        Some(self.pending.swap_remove(position).0)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::PhaseReveal, 900);
        timers.schedule(TimerKind::PhaseExpand, 600);
        assert_eq!(timers.pop_due(500), None);
        assert_eq!(timers.next_deadline(), Some(600));
        assert_eq!(timers.pop_due(1000), Some(TimerKind::PhaseExpand));
        assert_eq!(timers.pop_due(1000), Some(TimerKind::PhaseReveal));
        assert!(timers.is_empty());
    }

    #[test]
    fn equal_deadlines_fire_in_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::PhaseReveal, 300);
        timers.schedule(TimerKind::CollapseSettle, 300);
        assert_eq!(timers.pop_due(300), Some(TimerKind::PhaseReveal));
        assert_eq!(timers.pop_due(300), Some(TimerKind::CollapseSettle));
    }

    #[test]
    fn rescheduling_replaces_deadline() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::CollapseSettle, 100);
        timers.schedule(TimerKind::CollapseSettle, 400);
        assert_eq!(timers.deadline(TimerKind::CollapseSettle), Some(400));
        assert_eq!(timers.pop_due(200), None);
    }

    #[test]
    fn cancel_reports_removal() {
        let mut timers = TimerQueue::new();
        timers.schedule(TimerKind::PhaseExpand, 10);
        assert!(timers.cancel(TimerKind::PhaseExpand));
        assert!(!timers.cancel(TimerKind::PhaseExpand));
        assert!(!timers.is_pending(TimerKind::PhaseExpand));
    }
}
