use serde::{Deserialize, Serialize};
use std::fmt;

/// Named phases a worker times.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    Init,
    Exec,
}

impl Phase {
    pub const ALL: &'static [Self] = &[Self::Init, Self::Exec];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Exec => "exec",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).name())
    }
}

/// Start and end of one phase, in milliseconds since the pool epoch.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TimingRecord {
    pub start: f64,
    pub end: f64,
}

impl TimingRecord {
    #[must_use]
    pub fn duration_ms(&self) -> f64 {
        self.end - self.start
    }
}

/// The latest record of each phase, as carried in a completion report.
#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkerTimings {
    pub init: TimingRecord,
    pub exec: TimingRecord,
}

impl WorkerTimings {
    #[must_use]
    pub fn get(&self, phase: Phase) -> TimingRecord {
        match phase {
            Phase::Init => self.init,
            Phase::Exec => self.exec,
        }
    }

    pub(crate) fn get_mut(&mut self, phase: Phase) -> &mut TimingRecord {
        match phase {
            Phase::Init => &mut self.init,
            Phase::Exec => &mut self.exec,
        }
    }
}
