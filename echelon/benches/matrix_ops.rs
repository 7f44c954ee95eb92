use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use echelon::{Matrix, Rref};
use rand::{rngs::SmallRng, SeedableRng};
use std::hint::black_box;

const SIZES: [usize; 3] = [8, 32, 128];

fn random_matrices(size: usize) -> (Matrix, Matrix) {
    let mut rng = SmallRng::seed_from_u64(1);
    (
        Matrix::random(&mut rng, size, size),
        Matrix::random(&mut rng, size, size),
    )
}

fn multiply(c: &mut Criterion) {
    let mut g = c.benchmark_group("multiply");
    for size in SIZES {
        let (a, m) = random_matrices(size);
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&a) * black_box(&m))
        });
    }
    g.finish();
}

fn transpose(c: &mut Criterion) {
    let mut g = c.benchmark_group("transpose");
    for size in SIZES {
        let (a, _) = random_matrices(size);
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&a).transposed())
        });
    }
    g.finish();
}

fn rref(c: &mut Criterion) {
    let mut g = c.benchmark_group("rref");
    for size in SIZES {
        let (a, _) = random_matrices(size);
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| Rref::new(black_box(&a)).rank())
        });
    }
    g.finish();
}

fn determinant(c: &mut Criterion) {
    let mut g = c.benchmark_group("determinant");
    for size in SIZES {
        let (a, _) = random_matrices(size);
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&a).determinant())
        });
    }
    g.finish();
}

fn inverse(c: &mut Criterion) {
    let mut g = c.benchmark_group("inverse");
    for size in SIZES {
        let (a, _) = random_matrices(size);
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&a).inverse())
        });
    }
    g.finish();
}

criterion_group!(benches, multiply, transpose, rref, determinant, inverse);
criterion_main!(benches);
