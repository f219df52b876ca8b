use std::num::NonZeroU32;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use fractal_worker_pool::core::util::row_bands::available_workers;
use fractal_worker_pool::{
    CliRenderController, Complex, FractalKind, PoolConfig, PpmFilePresenter, RenderSettings, View,
};

#[derive(Parser)]
#[command(name = "fractal_worker_pool", about = "Renders a fractal across a pool of worker threads")]
struct Cli {
    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Number of workers (default: available parallelism)
    #[arg(long)]
    workers: Option<NonZeroU32>,

    #[arg(long, default_value_t = 256)]
    max_iters: u32,

    /// Pixels per unit of the fractal plane
    #[arg(long, default_value_t = 200.0)]
    zoom: f64,

    #[arg(long, default_value_t = -0.75, allow_hyphen_values = true)]
    centre_x: f64,

    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    centre_y: f64,

    /// Render the Julia set for the constant X + Yi instead of the Mandelbrot set
    #[arg(long, num_args = 2, value_names = ["X", "Y"], allow_hyphen_values = true)]
    julia: Option<Vec<f64>>,

    /// Seconds to wait for every worker to report
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    #[arg(long, default_value = "output/fractal.ppm")]
    output: PathBuf,
}

impl Cli {
    fn view(&self) -> View {
        let defaults = View::default();
        let (fractal, julia_constant) = match self.julia.as_deref() {
            Some(&[x, y]) => (FractalKind::Julia, Complex::new(x, y)),
            _ => (FractalKind::Mandelbrot, defaults.julia_constant),
        };

        View {
            fractal,
            centre: Complex::new(self.centre_x, self.centre_y),
            zoom: self.zoom,
            julia_constant,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let config = PoolConfig {
        worker_count: cli.workers.unwrap_or_else(available_workers),
        width: cli.width,
        height: cli.height,
        report_timeout: Duration::from_secs(cli.timeout),
    };
    let settings = RenderSettings {
        view: cli.view(),
        max_iters: cli.max_iters,
    };

    let mut controller = CliRenderController::new(PpmFilePresenter::new(), config, settings);
    let frame = controller.generate()?;
    controller.write(&cli.output)?;

    info!(
        path = %cli.output.display(),
        fractal = settings.view.fractal.name(),
        wall_ms = frame.timings.wall_ms(),
        "image written"
    );

    Ok(())
}
