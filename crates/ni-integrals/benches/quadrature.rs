//! Benchmarks for quadrature evaluation and node/weight generation.
//!
//! Includes:
//! - Composite Newton-Cotes rules over increasing subdivision counts
//! - Node/weight table generation per family (uncached)
//! - Composite Gaussian evaluation through the shared table cache
//! - Order estimation

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ni_integrals::{
    estimate_orders, GaussianQuadrature, GaussianRule, Integration, PolynomialFamily, Rule,
};

fn integrand(x: f64) -> f64 {
    x.sin() * x.powi(4) - 4.0 * x + (x + 1.0).ln()
}

fn bench_composite(c: &mut Criterion) {
    let mut group = c.benchmark_group("composite");

    for n in [10, 100, 1000] {
        for rule in [Rule::Midpoint, Rule::Trapezoidal, Rule::Simpson] {
            let q = Integration::new(0.0, 1.0, n, rule, integrand).unwrap();
            group.bench_with_input(BenchmarkId::new(rule.to_string(), n), &n, |b, _| {
                b.iter(|| black_box(q.compute_integral().unwrap()))
            });
        }
    }

    group.finish();
}

fn bench_node_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_generation");

    for n in [8, 32, 128] {
        for family in PolynomialFamily::ALL {
            group.bench_with_input(BenchmarkId::new(family.name(), n), &n, |b, &n| {
                b.iter(|| black_box(GaussianQuadrature::new(family, n, 1.0, 1.0).unwrap()))
            });
        }
    }

    group.finish();
}

fn bench_gaussian(c: &mut Criterion) {
    let mut group = c.benchmark_group("gaussian");

    for nodes in [4, 16, 64] {
        let rule = GaussianRule::legendre(nodes).unwrap();
        let q = Integration::gaussian(0.0, 1.0, 10, rule, integrand).unwrap();
        group.bench_with_input(BenchmarkId::new("legendre_x10", nodes), &nodes, |b, _| {
            b.iter(|| black_box(q.compute_integral().unwrap()))
        });
    }

    group.finish();
}

fn bench_orders(c: &mut Criterion) {
    let q = Integration::new(0.0, 1.0, 1, Rule::gauss_legendre(3).unwrap(), integrand).unwrap();
    c.bench_function("estimate_orders/gauss3", |b| {
        b.iter(|| black_box(estimate_orders(&q).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_composite,
    bench_node_generation,
    bench_gaussian,
    bench_orders
);
criterion_main!(benches);
