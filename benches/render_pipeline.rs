use std::hint::black_box;
use std::num::NonZeroU32;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use fractal_worker_pool::{
    ComputeModule, ComputeModuleLoader, HostCapabilities, NativeModuleLoader, OutputSurface,
    PoolConfig, RegionDescriptor, RenderCoordinator, RenderSettings, View,
};

const WIDTH: u32 = 400;
const HEIGHT: u32 = 300;
const MAX_ITERS: u32 = 256;

fn bench_native_plot(c: &mut Criterion) {
    let surface = OutputSurface::new(WIDTH, HEIGHT).unwrap();
    let mut module = NativeModuleLoader
        .instantiate(&HostCapabilities::new().with_surface(surface))
        .unwrap();
    module.generate_palette(MAX_ITERS);

    let region = RegionDescriptor {
        name: "mandel".to_string(),
        width: WIDTH,
        height: HEIGHT,
        origin_x: -2.5,
        origin_y: 1.0,
        center_x: 0.0,
        center_y: 0.0,
        zoom: 120.0,
        max_iters: MAX_ITERS,
        is_mandelbrot: true,
        image_offset: 0,
    };

    let mut group = c.benchmark_group("native_plot");
    group.throughput(Throughput::Elements(u64::from(WIDTH * HEIGHT)));
    group.bench_function("mandelbrot_400x300", |b| {
        b.iter(|| module.plot(black_box(&region)).unwrap())
    });
    group.finish();
}

fn bench_pool_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_render");
    group.throughput(Throughput::Elements(u64::from(WIDTH * HEIGHT)));

    for workers in [1, 2, 4, 8] {
        let config = PoolConfig {
            worker_count: NonZeroU32::new(workers).unwrap(),
            width: WIDTH,
            height: HEIGHT,
            report_timeout: Duration::from_secs(30),
        };
        let settings = RenderSettings {
            view: View {
                zoom: 120.0,
                ..View::default()
            },
            max_iters: MAX_ITERS,
        };
        let (mut coordinator, _) =
            RenderCoordinator::start(config, settings, NativeModuleLoader).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(workers), &settings.view, |b, view| {
            b.iter(|| coordinator.render(black_box(*view)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_native_plot, bench_pool_render);
criterion_main!(benches);
