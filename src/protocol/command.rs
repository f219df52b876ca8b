use std::fmt;

use crate::core::compute::host::HostCapabilities;
use crate::core::data::region_descriptor::RegionDescriptor;
use crate::core::data::worker_id::WorkerId;

/// A command sent from the coordinator to one worker. Delivered FIFO.
#[derive(Debug, Clone)]
pub enum Command {
    /// Instantiate the compute module and draw the first region. Sent exactly
    /// once, before anything else.
    Init {
        worker_id: WorkerId,
        host: HostCapabilities,
        region: RegionDescriptor,
        max_iters: u32,
    },
    /// Regenerate this worker's palette. Produces no report.
    RefreshPalette { max_iters: u32 },
    /// Plot a region and report back.
    Exec {
        region: RegionDescriptor,
        max_iters: u32,
    },
}

impl Command {
    #[must_use]
    pub fn kind(&self) -> CommandKind {
        match self {
            Self::Init { .. } => CommandKind::Init,
            Self::RefreshPalette { .. } => CommandKind::RefreshPalette,
            Self::Exec { .. } => CommandKind::Exec,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Init,
    RefreshPalette,
    Exec,
}

impl CommandKind {
    /// The `action` tag used on the wire.
    #[must_use]
    pub const fn action(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::RefreshPalette => "refresh_colour_palette",
            Self::Exec => "exec",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).action())
    }
}
