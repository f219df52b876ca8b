use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// `Uninitialized -> Initializing -> Idle <-> Computing`, and `Terminated`
/// from anywhere once the worker fails or shuts down.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WorkerState {
    Uninitialized,
    Initializing,
    Idle,
    Computing,
    Terminated,
}

impl WorkerState {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Uninitialized => "uninitialized",
            Self::Initializing => "initializing",
            Self::Idle => "idle",
            Self::Computing => "computing",
            Self::Terminated => "terminated",
        }
    }

    const fn to_u8(self) -> u8 {
        match self {
            Self::Uninitialized => 0,
            Self::Initializing => 1,
            Self::Idle => 2,
            Self::Computing => 3,
            Self::Terminated => 4,
        }
    }

    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Uninitialized,
            1 => Self::Initializing,
            2 => Self::Idle,
            3 => Self::Computing,
            _ => Self::Terminated,
        }
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).name())
    }
}

/// Worker state readable from other threads while the worker runs.
#[derive(Debug)]
pub struct StateCell(AtomicU8);

impl StateCell {
    #[must_use]
    pub fn new(state: WorkerState) -> Self {
        Self(AtomicU8::new(state.to_u8()))
    }

    #[must_use]
    pub fn load(&self) -> WorkerState {
        WorkerState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub fn store(&self, state: WorkerState) {
        self.0.store(state.to_u8(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_cell_round_trips_every_state() {
        let cell = StateCell::new(WorkerState::Uninitialized);

        for state in [
            WorkerState::Uninitialized,
            WorkerState::Initializing,
            WorkerState::Idle,
            WorkerState::Computing,
            WorkerState::Terminated,
        ] {
            cell.store(state);
            assert_eq!(cell.load(), state);
        }
    }
}
