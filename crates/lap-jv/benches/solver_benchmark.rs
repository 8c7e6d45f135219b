use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lap_jv::{solve_pairs, solve_pairs_batch, CostMatrix, SolveOptions};

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> CostMatrix<f64> {
    let data = (0..rows * cols).map(|_| rng.random::<f64>()).collect();
    CostMatrix::from_vec(data, rows, cols).unwrap()
}

fn bench_single(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let cost = random_matrix(&mut rng, 128, 128);

    c.bench_function("solve_pairs 128x128 f32", |b| {
        let opts = SolveOptions::new();
        b.iter(|| solve_pairs(black_box(&cost), &opts).unwrap())
    });
    c.bench_function("solve_pairs 128x128 f64", |b| {
        let opts = SolveOptions::new().prefer_f32(false);
        b.iter(|| solve_pairs(black_box(&cost), &opts).unwrap())
    });

    let rect = random_matrix(&mut rng, 96, 160);
    c.bench_function("solve_pairs 96x160 extended", |b| {
        let opts = SolveOptions::new().extend(true);
        b.iter(|| solve_pairs(black_box(&rect), &opts).unwrap())
    });
    c.bench_function("solve_pairs 96x160 cost_limit", |b| {
        let opts = SolveOptions::new().cost_limit(0.5);
        b.iter(|| solve_pairs(black_box(&rect), &opts).unwrap())
    });
}

fn bench_batch(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(43);
    let batch: Vec<_> = (0..32).map(|_| random_matrix(&mut rng, 48, 64)).collect();
    let opts = SolveOptions::new().extend(true);

    c.bench_function("solve_pairs_batch 32x(48x64) sequential", |b| {
        b.iter(|| solve_pairs_batch(black_box(&batch), &opts, 1).unwrap())
    });
    c.bench_function("solve_pairs_batch 32x(48x64) default workers", |b| {
        b.iter(|| solve_pairs_batch(black_box(&batch), &opts, 0).unwrap())
    });
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
