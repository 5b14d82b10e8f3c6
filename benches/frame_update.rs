//! Cost of one animation frame and of generating a city.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use neonsprawl::input::InputAccumulator;
use neonsprawl::simulation::animation::advance_frame;
use neonsprawl::world::{CityConfig, CityWorld};

fn bench_advance_frame(c: &mut Criterion) {
    let config = CityConfig::default();
    let mut world = CityWorld::generate(&config, &mut StdRng::seed_from_u64(42));
    let input = InputAccumulator::default();
    let mut t = 0.0_f64;

    c.bench_function("advance_frame", |b| {
        b.iter(|| {
            t += 1.0 / 60.0;
            advance_frame(black_box(&mut world), black_box(t), &input);
        })
    });
}

fn bench_generate(c: &mut Criterion) {
    let config = CityConfig::default();

    c.bench_function("generate_city", |b| {
        b.iter(|| {
            let mut rng = StdRng::seed_from_u64(7);
            black_box(CityWorld::generate(&config, &mut rng))
        })
    });
}

criterion_group!(benches, bench_advance_frame, bench_generate);
criterion_main!(benches);
