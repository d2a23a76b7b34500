use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tuner_engine::{PitchDetector, PitchEngine};

fn generate_sine(sample_rate: f64, frequency: f64, sample_count: usize) -> Vec<f32> {
    (0..sample_count)
        .map(|i| (2.0 * std::f64::consts::PI * frequency * (i as f64) / sample_rate).sin() as f32)
        .collect()
}

fn run_detector_benchmark(id: &str, c: &mut Criterion, window_size: usize) {
    let sample_rate = 44100.0;
    let window = generate_sine(sample_rate, 110.0, window_size);
    let mut detector = PitchDetector::new(sample_rate, window_size);
    c.bench_function(id, |b| {
        b.iter(|| detector.detect(black_box(&window)))
    });
}

fn detector_benchmarks(c: &mut Criterion) {
    run_detector_benchmark("Detect window 512", c, 512);
    run_detector_benchmark("Detect window 1024", c, 1024);
    run_detector_benchmark("Detect window 2048", c, 2048);
    run_detector_benchmark("Detect window 4096", c, 4096);
}

fn engine_benchmarks(c: &mut Criterion) {
    let sample_rate = 44100.0;

    // Steady tone: most passes resolve in the fast tier.
    let mut engine = PitchEngine::new(4096, sample_rate);
    let block = generate_sine(sample_rate, 440.0, 256);
    c.bench_function("Engine push 256, 440 Hz tone", |b| {
        b.iter(|| engine.push_audio(black_box(&block)))
    });

    // Low tone: every pass falls through to the deeper tiers.
    let mut engine = PitchEngine::new(4096, sample_rate);
    let block = generate_sine(sample_rate, 41.2, 256);
    c.bench_function("Engine push 256, 41 Hz tone", |b| {
        b.iter(|| engine.push_audio(black_box(&block)))
    });
}

criterion_group!(benches, detector_benchmarks, engine_benchmarks);
criterion_main!(benches);
