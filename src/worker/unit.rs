use std::sync::Arc;
use std::time::Instant;

use crate::core::compute::host::HostCapabilities;
use crate::core::compute::ports::compute_module::{ComputeModule, ComputeModuleLoader};
use crate::core::data::region_descriptor::{MANDELBROT_NAME, RegionDescriptor, RegionError};
use crate::core::data::worker_id::WorkerId;
use crate::core::timing::record::Phase;
use crate::core::timing::recorder::TimingRecorder;
use crate::protocol::command::{Command, CommandKind};
use crate::protocol::report::CompletionReport;
use crate::worker::errors::WorkerError;
use crate::worker::state::{StateCell, WorkerState};

/// Everything a command handler needs once `Init` has succeeded.
struct WorkerContext<M> {
    worker_id: WorkerId,
    module: M,
}

/// The per-worker state machine.
///
/// Commands are handled one at a time through `&mut self`, so the module is
/// never entered concurrently. Any error terminates the unit: later commands
/// are rejected as protocol violations.
pub struct WorkerUnit<L: ComputeModuleLoader> {
    worker_id: WorkerId,
    loader: L,
    state: Arc<StateCell>,
    context: Option<WorkerContext<L::Module>>,
    timings: TimingRecorder,
}

impl<L: ComputeModuleLoader> WorkerUnit<L> {
    #[must_use]
    pub fn new(worker_id: WorkerId, loader: L, epoch: Instant) -> Self {
        Self {
            worker_id,
            loader,
            state: Arc::new(StateCell::new(WorkerState::Uninitialized)),
            context: None,
            timings: TimingRecorder::new(epoch),
        }
    }

    #[must_use]
    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    #[must_use]
    pub fn state(&self) -> WorkerState {
        self.state.load()
    }

    pub(crate) fn state_cell(&self) -> Arc<StateCell> {
        Arc::clone(&self.state)
    }

    /// Handles one command. Returns the report to send back, if the command
    /// produces one.
    pub fn handle(&mut self, command: Command) -> Result<Option<CompletionReport>, WorkerError> {
        let kind = command.kind();

        let result = match (self.state(), command) {
            (
                WorkerState::Uninitialized,
                Command::Init {
                    worker_id,
                    host,
                    region,
                    max_iters,
                },
            ) => self.init(worker_id, &host, region, max_iters).map(Some),
            (WorkerState::Idle, Command::RefreshPalette { max_iters }) => {
                self.refresh_palette(max_iters).map(|()| None)
            }
            (WorkerState::Idle, Command::Exec { region, max_iters }) => {
                self.exec(region, max_iters).map(Some)
            }
            (state, _) => Err(WorkerError::ProtocolViolation {
                command: kind,
                state,
            }),
        };

        if result.is_err() {
            self.terminate();
        }

        result
    }

    /// Drops the compute module and moves to `Terminated`.
    pub fn terminate(&mut self) {
        self.context = None;
        self.state.store(WorkerState::Terminated);
    }

    fn init(
        &mut self,
        worker_id: WorkerId,
        host: &HostCapabilities,
        region: RegionDescriptor,
        max_iters: u32,
    ) -> Result<CompletionReport, WorkerError> {
        if worker_id != self.worker_id {
            return Err(WorkerError::WorkerIdMismatch {
                assigned: self.worker_id,
                received: worker_id,
            });
        }

        let region = checked_region(region, max_iters)?;

        self.state.store(WorkerState::Initializing);

        let mut module = self
            .loader
            .instantiate(host)
            .map_err(WorkerError::InstantiationFailed)?;

        if worker_id.is_palette_owner() {
            module.generate_palette(max_iters);
        }

        // The init slot times the initial plot only.
        self.timings.mark_start(Phase::Init);
        module.plot(&region).map_err(WorkerError::OutOfBoundsWrite)?;
        self.timings.mark_end(Phase::Init);

        self.context = Some(WorkerContext { worker_id, module });
        self.state.store(WorkerState::Idle);

        tracing::debug!(worker = %worker_id, max_iters, "worker initialised");

        Ok(CompletionReport {
            worker_id,
            fractal: MANDELBROT_NAME.to_string(),
            times: self.timings.snapshot(),
        })
    }

    fn refresh_palette(&mut self, max_iters: u32) -> Result<(), WorkerError> {
        if max_iters == 0 {
            return Err(WorkerError::InvalidParameters(
                RegionError::ZeroMaxIterations,
            ));
        }

        let context = self.context.as_mut().ok_or(WorkerError::ProtocolViolation {
            command: CommandKind::RefreshPalette,
            state: WorkerState::Uninitialized,
        })?;

        context.module.generate_palette(max_iters);
        tracing::debug!(worker = %context.worker_id, max_iters, "palette refreshed");

        Ok(())
    }

    fn exec(
        &mut self,
        region: RegionDescriptor,
        max_iters: u32,
    ) -> Result<CompletionReport, WorkerError> {
        let region = checked_region(region, max_iters)?;
        let context = self.context.as_mut().ok_or(WorkerError::ProtocolViolation {
            command: CommandKind::Exec,
            state: WorkerState::Uninitialized,
        })?;

        self.state.store(WorkerState::Computing);
        self.timings.mark_start(Phase::Exec);
        context
            .module
            .plot(&region)
            .map_err(WorkerError::OutOfBoundsWrite)?;
        self.timings.mark_end(Phase::Exec);
        self.state.store(WorkerState::Idle);

        Ok(CompletionReport {
            worker_id: context.worker_id,
            fractal: region.name,
            times: self.timings.snapshot(),
        })
    }
}

/// The command's `max_iters` wins over whatever the region carried.
fn checked_region(
    region: RegionDescriptor,
    max_iters: u32,
) -> Result<RegionDescriptor, WorkerError> {
    let region = region.with_max_iters(max_iters);
    region.validate().map_err(WorkerError::InvalidParameters)?;

    Ok(region)
}
