use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::controllers::coordinator::config::{PoolConfig, RenderSettings, View};
use crate::controllers::coordinator::errors::{ConfigError, CoordinatorError};
use crate::controllers::coordinator::layout::{check_layout, regions_for_view};
use crate::controllers::coordinator::timings::RenderTimings;
use crate::core::compute::host::{HostCapabilities, HostLogFn};
use crate::core::compute::ports::compute_module::ComputeModuleLoader;
use crate::core::data::region_descriptor::RegionDescriptor;
use crate::core::data::worker_id::WorkerId;
use crate::core::surface::output_surface::OutputSurface;
use crate::core::timing::record::Phase;
use crate::core::util::row_bands::{RowBand, calculate_bands, row_bands};
use crate::protocol::command::Command;
use crate::protocol::report::{CompletionReport, WorkerEvent};
use crate::worker::runtime::WorkerHandle;
use crate::worker::state::WorkerState;

/// The reports and timings of one completed pass over the whole image.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub generation: u64,
    pub reports: Vec<CompletionReport>,
    pub timings: RenderTimings,
}

/// Owns a pool of workers rendering disjoint bands of one shared surface.
///
/// Every worker gets its own FIFO command channel; all reports come back on
/// a single event channel and are matched to requests by counting, per
/// worker, how many report-producing commands are still outstanding.
pub struct RenderCoordinator {
    workers: Vec<WorkerHandle>,
    events: Receiver<WorkerEvent>,
    outstanding: HashMap<WorkerId, usize>,
    surface: OutputSurface,
    bands: Vec<RowBand>,
    max_iters: u32,
    view: View,
    report_timeout: Duration,
    generation: u64,
}

impl RenderCoordinator {
    /// Spawns the pool, initialises every worker and waits for the first
    /// complete frame.
    ///
    /// Only worker 0 builds a palette on init, so on a pool of more than one
    /// worker the other workers are then sent the palette and render their
    /// bands again. The frame carries the report that painted each band.
    pub fn start<L>(
        config: PoolConfig,
        settings: RenderSettings,
        loader: L,
    ) -> Result<(Self, RenderFrame), CoordinatorError>
    where
        L: ComputeModuleLoader + Clone,
    {
        config.validate()?;
        settings.validate()?;

        let surface = OutputSurface::new(config.width, config.height)?;
        let band_count = calculate_bands(config.worker_count, config.height);

        if band_count < config.worker_count.get() {
            tracing::warn!(
                requested = config.worker_count.get(),
                workers = band_count,
                height = config.height,
                "fewer image rows than workers, reducing pool size"
            );
        }

        let bands = row_bands(band_count, config.height);
        let epoch = Instant::now();
        let (event_sender, events) = mpsc::channel();

        let workers = (0..band_count)
            .map(|index| {
                WorkerHandle::spawn(
                    WorkerId::new(index),
                    loader.clone(),
                    epoch,
                    event_sender.clone(),
                )
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(CoordinatorError::Spawn)?;

        drop(event_sender);

        tracing::info!(
            workers = workers.len(),
            width = config.width,
            height = config.height,
            max_iters = settings.max_iters,
            "starting render pool"
        );

        let mut coordinator = Self {
            workers,
            events,
            outstanding: HashMap::new(),
            surface,
            bands,
            max_iters: settings.max_iters,
            view: settings.view,
            report_timeout: config.report_timeout,
            generation: 0,
        };

        let frame = coordinator.initialise()?;

        Ok((coordinator, frame))
    }

    fn initialise(&mut self) -> Result<RenderFrame, CoordinatorError> {
        let regions = self.regions(&self.view)?;
        let base_host = HostCapabilities::new().with_surface(self.surface.clone());

        for (worker_id, region) in self.worker_ids().into_iter().zip(regions.iter().cloned()) {
            let command = Command::Init {
                worker_id,
                host: base_host.clone().with_log(module_log(worker_id)),
                region,
                max_iters: self.max_iters,
            };
            self.dispatch(worker_id, command)?;
        }

        let init_reports = self.collect(&self.worker_ids())?;

        let repaint: Vec<WorkerId> = self
            .worker_ids()
            .into_iter()
            .filter(|worker_id| !worker_id.is_palette_owner())
            .collect();

        if repaint.is_empty() {
            let timings = RenderTimings::from_reports(Phase::Init, &init_reports);
            timings.log_summary();
            self.generation += 1;

            return Ok(RenderFrame {
                generation: self.generation,
                reports: init_reports,
                timings,
            });
        }

        tracing::debug!(
            workers = repaint.len(),
            "sharing palette and repainting bands"
        );
        self.send_palette(&repaint, self.max_iters)?;

        for &worker_id in &repaint {
            let region = regions[worker_id.get() as usize].clone();
            self.dispatch(
                worker_id,
                Command::Exec {
                    region,
                    max_iters: self.max_iters,
                },
            )?;
        }

        // The owner's init plot and everyone else's repaint make up the image.
        let mut reports: Vec<CompletionReport> = init_reports
            .into_iter()
            .filter(|report| report.worker_id.is_palette_owner())
            .chain(self.collect(&repaint)?)
            .collect();
        reports.sort_by_key(|report| report.worker_id);

        let timings = RenderTimings::from_records(
            Phase::Init,
            reports
                .iter()
                .map(|report| {
                    let phase = if report.worker_id.is_palette_owner() {
                        Phase::Init
                    } else {
                        Phase::Exec
                    };
                    (report.worker_id, report.times.get(phase))
                })
                .collect(),
        );

        timings.log_summary();
        self.generation += 1;

        Ok(RenderFrame {
            generation: self.generation,
            reports,
            timings,
        })
    }

    /// Changes the iteration limit for every later render. Every worker
    /// rebuilds its palette; no reports are expected back.
    pub fn set_max_iters(&mut self, max_iters: u32) -> Result<(), CoordinatorError> {
        if max_iters == 0 {
            return Err(ConfigError::ZeroMaxIterations.into());
        }

        self.send_palette(&self.worker_ids(), max_iters)?;
        self.max_iters = max_iters;

        Ok(())
    }

    /// Renders `view` across the pool and waits for every band to report.
    pub fn render(&mut self, view: View) -> Result<RenderFrame, CoordinatorError> {
        view.validate()?;
        let regions = self.regions(&view)?;

        for (worker_id, region) in self.worker_ids().into_iter().zip(regions) {
            self.dispatch(
                worker_id,
                Command::Exec {
                    region,
                    max_iters: self.max_iters,
                },
            )?;
        }

        let reports = self.collect(&self.worker_ids())?;
        let timings = RenderTimings::from_reports(Phase::Exec, &reports);
        timings.log_summary();

        self.view = view;
        self.generation += 1;

        Ok(RenderFrame {
            generation: self.generation,
            reports,
            timings,
        })
    }

    #[must_use]
    pub fn surface(&self) -> &OutputSurface {
        &self.surface
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    #[must_use]
    pub fn worker_states(&self) -> Vec<(WorkerId, WorkerState)> {
        self.workers
            .iter()
            .map(|worker| (worker.worker_id(), worker.state()))
            .collect()
    }

    #[must_use]
    pub fn max_iters(&self) -> u32 {
        self.max_iters
    }

    #[must_use]
    pub fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn bands(&self) -> &[RowBand] {
        &self.bands
    }

    /// Stops every worker once its queued commands have drained.
    pub fn shutdown(&mut self) {
        for worker in &mut self.workers {
            worker.shutdown();
        }
    }

    fn worker_ids(&self) -> Vec<WorkerId> {
        self.workers.iter().map(WorkerHandle::worker_id).collect()
    }

    fn regions(&self, view: &View) -> Result<Vec<RegionDescriptor>, CoordinatorError> {
        let regions = regions_for_view(
            self.surface.width(),
            self.surface.height(),
            &self.bands,
            view,
            self.max_iters,
        );
        check_layout(&regions, self.surface.len())?;

        Ok(regions)
    }

    fn send_palette(
        &mut self,
        workers: &[WorkerId],
        max_iters: u32,
    ) -> Result<(), CoordinatorError> {
        for &worker_id in workers {
            self.dispatch(worker_id, Command::RefreshPalette { max_iters })?;
        }

        Ok(())
    }

    fn dispatch(&mut self, worker_id: WorkerId, command: Command) -> Result<(), CoordinatorError> {
        let reports = matches!(command, Command::Init { .. } | Command::Exec { .. });
        let worker = self
            .workers
            .get(worker_id.get() as usize)
            .ok_or(CoordinatorError::Disconnected)?;

        worker.send(command)?;

        if reports {
            *self.outstanding.entry(worker_id).or_insert(0) += 1;
        }

        Ok(())
    }

    /// Waits for the latest report from each of `expected`. Reports answering
    /// an older request to the same worker are discarded.
    fn collect(&mut self, expected: &[WorkerId]) -> Result<Vec<CompletionReport>, CoordinatorError> {
        let deadline = Instant::now() + self.report_timeout;
        let mut waiting: BTreeSet<WorkerId> = expected.iter().copied().collect();
        let mut reports = Vec::with_capacity(waiting.len());

        while !waiting.is_empty() {
            let remaining = deadline.saturating_duration_since(Instant::now());

            match self.events.recv_timeout(remaining) {
                Ok(WorkerEvent::ExecComplete(report)) => {
                    let worker_id = report.worker_id;
                    let outstanding = self.outstanding.entry(worker_id).or_insert(0);

                    if *outstanding == 0 {
                        tracing::warn!(worker = %worker_id, "unsolicited report discarded");
                        continue;
                    }

                    *outstanding -= 1;

                    if *outstanding > 0 || !waiting.contains(&worker_id) {
                        tracing::debug!(worker = %worker_id, "stale report discarded");
                        continue;
                    }

                    waiting.remove(&worker_id);
                    reports.push(report);
                }
                Ok(WorkerEvent::Failed(failure)) => {
                    tracing::error!(
                        worker = %failure.worker_id,
                        error = %failure.error,
                        "worker failed"
                    );
                    return Err(CoordinatorError::WorkerFailed(failure));
                }
                Err(RecvTimeoutError::Timeout) => {
                    return Err(CoordinatorError::Timeout {
                        missing: waiting.into_iter().collect(),
                    });
                }
                Err(RecvTimeoutError::Disconnected) => return Err(CoordinatorError::Disconnected),
            }
        }

        reports.sort_by_key(|report| report.worker_id);

        Ok(reports)
    }
}

impl Drop for RenderCoordinator {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn module_log(worker_id: WorkerId) -> HostLogFn {
    Arc::new(move |message: &str| {
        tracing::info!(target: "compute_module", worker = %worker_id, "{}", message);
    })
}
