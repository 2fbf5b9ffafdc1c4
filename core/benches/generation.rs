use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use labyrinth_core::*;
use std::hint::black_box;

fn bench_maze(c: &mut Criterion) {
    let mut group = c.benchmark_group("maze");
    for size in [16, 32, 64] {
        let config = MazeConfig::new(size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(MazeCarver::new(seed).generate(config))
            });
        });
    }
    group.finish();
}

fn bench_minefield(c: &mut Criterion) {
    let mut group = c.benchmark_group("minefield");
    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
        let config = difficulty.config();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", difficulty)),
            &config,
            |b, &config| {
                let mut seed = 0;
                b.iter(|| {
                    seed += 1;
                    black_box(MinefieldPlacer::new(seed).generate(config))
                });
            },
        );
    }
    group.finish();
}

fn bench_chaos(c: &mut Criterion) {
    let mut group = c.benchmark_group("chaos");
    for (cells, mines) in [(30, 5), (200, 30), (1000, 150)] {
        let config = ChaosConfig::new(cells, mines).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(cells), &config, |b, &config| {
            let mut seed = 0;
            b.iter(|| {
                seed += 1;
                black_box(ChaosGrower::new(seed).generate(config))
            });
        });
    }
    group.finish();
}

fn bench_session_start(c: &mut Criterion) {
    c.bench_function("classic_session_start", |b| {
        let mut seed = 0;
        b.iter(|| {
            seed += 1;
            black_box(GameSession::new(SessionConfig::classic(Difficulty::Hard), seed))
        });
    });
}

criterion_group!(
    benches,
    bench_maze,
    bench_minefield,
    bench_chaos,
    bench_session_start
);
criterion_main!(benches);
