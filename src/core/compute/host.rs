use std::fmt;
use std::sync::Arc;

use crate::core::surface::output_surface::OutputSurface;

pub type HostLogFn = Arc<dyn Fn(&str) + Send + Sync>;

/// Functions and resources the host hands a compute module at instantiation.
///
/// Workers pass this through untouched; only the module looks inside.
#[derive(Clone, Default)]
pub struct HostCapabilities {
    log: Option<HostLogFn>,
    surface: Option<OutputSurface>,
}

impl HostCapabilities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_log(mut self, log: HostLogFn) -> Self {
        self.log = Some(log);
        self
    }

    #[must_use]
    pub fn with_surface(mut self, surface: OutputSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    #[must_use]
    pub fn surface(&self) -> Option<&OutputSurface> {
        self.surface.as_ref()
    }

    pub fn log(&self, message: &str) {
        if let Some(log) = &self.log {
            log(message);
        }
    }
}

impl fmt::Debug for HostCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCapabilities")
            .field("log", &self.log.is_some())
            .field("surface", &self.surface)
            .finish()
    }
}
