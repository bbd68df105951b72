use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stepwise::{
    algo::{GradientDescent, Newton},
    linear::{lstsq, unit_norm_least_squares, UnitNormOptions},
    nalgebra as na,
    testing::*,
    Iterations,
};

const MAX_STEPS: usize = 100_000;

fn sphere(c: &mut Criterion) {
    let f = Sphere::new(10);
    let x = &f.initials()[0];

    c.bench_function("gradient descent sphere", |b| {
        b.iter(|| {
            let mut iterations = Iterations::builder(&f, x.clone())
                .with_algo(GradientDescent::new)
                .build();
            assert!(f.is_optimum(iterations.run(MAX_STEPS).unwrap().x(), 1e-6))
        })
    });

    c.bench_function("Newton sphere", |b| {
        b.iter(|| {
            let mut iterations = Iterations::builder(&f, x.clone())
                .with_algo(Newton::new)
                .build();
            assert!(f.is_optimum(iterations.run(MAX_STEPS).unwrap().x(), 1e-6))
        })
    });
}

fn rosenbrock(c: &mut Criterion) {
    let f = Rosenbrock::default();
    let x = &f.initials()[0];

    c.bench_function("Newton rosenbrock", |b| {
        b.iter(|| {
            let mut iterations = Iterations::builder(&f, x.clone())
                .with_algo(Newton::new)
                .build();
            assert!(f.is_optimum(iterations.run(MAX_STEPS).unwrap().x(), 1e-6))
        })
    });
}

fn linear(c: &mut Criterion) {
    let (m, n) = (50, 20);
    let a = na::DMatrix::from_fn(m, n, |i, j| ((i * n + j) as f64).sin());
    let b = na::DVector::from_fn(m, |i, _| ((i + 1) as f64).cos());
    let options = UnitNormOptions::default();

    c.bench_function("lstsq 50x20", |bench| {
        bench.iter(|| lstsq(black_box(&a), black_box(&b)).unwrap())
    });

    c.bench_function("unit-norm least squares 50x20", |bench| {
        bench.iter(|| unit_norm_least_squares(black_box(&a), black_box(&b), &options).unwrap())
    });
}

criterion_group!(benches, sphere, rosenbrock, linear);
criterion_main!(benches);
