use std::collections::VecDeque;

use super::event::TelemetryEvent;
use super::metrics::{compute_snapshot, TelemetrySnapshot};

/// Events kept per pipeline before the oldest are evicted.
pub const DEFAULT_WINDOW: usize = 10_000;

/// Sliding window over the most recent telemetry events.
///
/// Snapshots describe the window only. `evicted` counts what slid out of it,
/// so a caller can tell a quiet session from a truncated one.
#[derive(Debug)]
pub struct TelemetryRecorder {
    window: VecDeque<TelemetryEvent>,
    limit: usize,
    evicted: u64,
}

impl Default for TelemetryRecorder {
    fn default() -> Self {
        Self::with_limit(DEFAULT_WINDOW)
    }
}

impl TelemetryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder keeping at most `limit` events (never fewer than one).
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            window: VecDeque::with_capacity(limit.min(DEFAULT_WINDOW)),
            limit,
            evicted: 0,
        }
    }

    pub fn record(&mut self, event: TelemetryEvent) {
        while self.window.len() >= self.limit {
            self.window.pop_front();
            self.evicted += 1;
        }
        self.window.push_back(event);
    }

    pub fn events(&self) -> impl Iterator<Item = &TelemetryEvent> {
        self.window.iter()
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Events dropped from the front since the recorder was created.
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        compute_snapshot(&self.window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::state::ConversationTask;
    use crate::kernel::telemetry::DropReason;

    fn dropped(reason: DropReason) -> TelemetryEvent {
        TelemetryEvent::TranscriptDropped { reason }
    }

    #[test]
    fn test_window_evicts_oldest_first() {
        let mut recorder = TelemetryRecorder::with_limit(3);
        recorder.record(dropped(DropReason::Busy));
        recorder.record(dropped(DropReason::Busy));
        for _ in 0..3 {
            recorder.record(dropped(DropReason::Empty));
        }

        assert_eq!(recorder.len(), 3);
        assert_eq!(recorder.evicted(), 2);
        let snap = recorder.snapshot();
        assert_eq!(snap.drop_stats.busy, 0);
        assert_eq!(snap.drop_stats.empty, 3);
    }

    #[test]
    fn test_zero_limit_keeps_latest_event() {
        let mut recorder = TelemetryRecorder::with_limit(0);
        assert_eq!(recorder.limit(), 1);
        recorder.record(dropped(DropReason::SessionInactive));
        recorder.record(TelemetryEvent::Cancelled {
            deferred: true,
            from: ConversationTask::BookingFlow,
        });
        assert_eq!(recorder.len(), 1);
        assert_eq!(recorder.snapshot().cancel_stats.deferred, 1);
    }

    #[test]
    fn test_default_window_is_bounded() {
        let mut recorder = TelemetryRecorder::new();
        for _ in 0..DEFAULT_WINDOW + 5 {
            recorder.record(dropped(DropReason::Empty));
        }
        assert_eq!(recorder.len(), DEFAULT_WINDOW);
        assert_eq!(recorder.evicted(), 5);
    }
}
