use std::time::Instant;

use crate::core::timing::record::{Phase, TimingRecord, WorkerTimings};

/// Captures the latest start/end of each phase for one worker.
///
/// Timestamps are milliseconds since an epoch shared by the whole pool so
/// records from different workers can be compared. Each mark overwrites the
/// previous value for that phase.
#[derive(Debug, Clone)]
pub struct TimingRecorder {
    epoch: Instant,
    timings: WorkerTimings,
}

impl TimingRecorder {
    #[must_use]
    pub fn new(epoch: Instant) -> Self {
        Self {
            epoch,
            timings: WorkerTimings::default(),
        }
    }

    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    pub fn mark_start(&mut self, phase: Phase) {
        let now = self.now_ms();
        let record = self.timings.get_mut(phase);
        record.start = now;
        record.end = now;
    }

    pub fn mark_end(&mut self, phase: Phase) {
        let now = self.now_ms();
        let record = self.timings.get_mut(phase);
        // end >= start even if the clock reads backwards or start was never marked
        record.end = now.max(record.start);
    }

    #[must_use]
    pub fn record(&self, phase: Phase) -> TimingRecord {
        self.timings.get(phase)
    }

    #[must_use]
    pub fn snapshot(&self) -> WorkerTimings {
        self.timings
    }
}
