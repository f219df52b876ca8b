use crate::core::data::worker_id::WorkerId;
use crate::core::timing::record::{Phase, TimingRecord};
use crate::protocol::report::CompletionReport;

/// Per-worker durations of one phase, plus the span the whole pool took.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderTimings {
    pub phase: Option<Phase>,
    pub per_worker: Vec<(WorkerId, TimingRecord)>,
    pub earliest_start: f64,
    pub latest_end: f64,
}

impl RenderTimings {
    #[must_use]
    pub fn from_reports(phase: Phase, reports: &[CompletionReport]) -> Self {
        Self::from_records(
            phase,
            reports
                .iter()
                .map(|report| (report.worker_id, report.times.get(phase)))
                .collect(),
        )
    }

    /// Aggregates records already picked per worker, for frames where workers
    /// painted their bands in different phases.
    #[must_use]
    pub fn from_records(phase: Phase, per_worker: Vec<(WorkerId, TimingRecord)>) -> Self {
        let earliest_start = per_worker
            .iter()
            .map(|(_, record)| record.start)
            .reduce(f64::min)
            .unwrap_or_default();
        let latest_end = per_worker
            .iter()
            .map(|(_, record)| record.end)
            .reduce(f64::max)
            .unwrap_or_default();

        Self {
            phase: Some(phase),
            per_worker,
            earliest_start,
            latest_end,
        }
    }

    /// Milliseconds from the first worker starting to the last one finishing.
    #[must_use]
    pub fn wall_ms(&self) -> f64 {
        self.latest_end - self.earliest_start
    }

    #[must_use]
    pub fn slowest(&self) -> Option<(WorkerId, f64)> {
        self.per_worker
            .iter()
            .map(|(worker_id, record)| (*worker_id, record.duration_ms()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    pub fn log_summary(&self) {
        let phase = self.phase.map_or("none", Phase::name);

        for (worker_id, record) in &self.per_worker {
            tracing::debug!(
                worker = %worker_id,
                phase,
                start_ms = record.start,
                end_ms = record.end,
                duration_ms = record.duration_ms(),
                "worker timing"
            );
        }

        if let Some((worker_id, duration_ms)) = self.slowest() {
            tracing::info!(
                phase,
                workers = self.per_worker.len(),
                wall_ms = self.wall_ms(),
                slowest = %worker_id,
                slowest_ms = duration_ms,
                "render timings"
            );
        }
    }
}
