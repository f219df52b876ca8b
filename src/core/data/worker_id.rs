use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a worker within its pool. Assigned once at pool creation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(u32);

impl WorkerId {
    /// The worker that regenerates the palette during `Init`.
    pub const PALETTE_OWNER: Self = Self(0);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn is_palette_owner(self) -> bool {
        self == Self::PALETTE_OWNER
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
