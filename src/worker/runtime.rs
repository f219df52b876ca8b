use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crate::core::compute::ports::compute_module::ComputeModuleLoader;
use crate::core::data::worker_id::WorkerId;
use crate::protocol::command::Command;
use crate::protocol::report::{WorkerEvent, WorkerFailure};
use crate::worker::errors::WorkerError;
use crate::worker::state::{StateCell, WorkerState};
use crate::worker::unit::WorkerUnit;

/// Owner's handle on a worker thread.
///
/// Commands go in through a per-worker FIFO channel; reports and failures come
/// out on the event channel shared by the whole pool. Dropping the handle
/// closes the command channel and joins the thread.
pub struct WorkerHandle {
    worker_id: WorkerId,
    commands: Option<Sender<Command>>,
    state: Arc<StateCell>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerHandle {
    pub fn spawn<L: ComputeModuleLoader>(
        worker_id: WorkerId,
        loader: L,
        epoch: Instant,
        events: Sender<WorkerEvent>,
    ) -> std::io::Result<Self> {
        let unit = WorkerUnit::new(worker_id, loader, epoch);
        let state = unit.state_cell();
        let (commands, inbox) = mpsc::channel();

        let thread = thread::Builder::new()
            .name(format!("render-worker-{}", worker_id))
            .spawn(move || run(unit, inbox, events))?;

        Ok(Self {
            worker_id,
            commands: Some(commands),
            state,
            thread: Some(thread),
        })
    }

    #[must_use]
    pub fn worker_id(&self) -> WorkerId {
        self.worker_id
    }

    #[must_use]
    pub fn state(&self) -> WorkerState {
        self.state.load()
    }

    /// Queues a command. Fails once the worker has stopped.
    pub fn send(&self, command: Command) -> Result<(), WorkerError> {
        self.commands
            .as_ref()
            .ok_or(WorkerError::Disconnected(self.worker_id))?
            .send(command)
            .map_err(|_| WorkerError::Disconnected(self.worker_id))
    }

    /// Closes the command channel and waits for queued commands to drain.
    pub fn shutdown(&mut self) {
        self.commands.take();

        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                tracing::error!(worker = %self.worker_id, "worker thread panicked");
                self.state.store(WorkerState::Terminated);
            }
        }
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run<L: ComputeModuleLoader>(
    mut unit: WorkerUnit<L>,
    inbox: Receiver<Command>,
    events: Sender<WorkerEvent>,
) {
    let worker_id = unit.worker_id();

    for command in inbox {
        let kind = command.kind();
        tracing::debug!(worker = %worker_id, command = %kind, "handling command");

        match unit.handle(command) {
            Ok(Some(report)) => {
                if events.send(WorkerEvent::ExecComplete(report)).is_err() {
                    tracing::debug!(worker = %worker_id, "report channel closed");
                    break;
                }
            }
            Ok(None) => {}
            Err(error) => {
                tracing::error!(worker = %worker_id, command = %kind, %error, "worker failed");
                let _ = events.send(WorkerEvent::Failed(WorkerFailure { worker_id, error }));
                break;
            }
        }
    }

    unit.terminate();
    tracing::debug!(worker = %worker_id, "worker stopped");
}
