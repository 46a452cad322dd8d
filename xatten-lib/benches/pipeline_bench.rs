use criterion::{Criterion, black_box, criterion_group, criterion_main};
use xatten::{
    AttenuationRequest, CachedLookup, Component, EnergyGrid, FractionType, MuLookup, Result,
    SampleSpec, compute, normalize_weight_fractions,
};

struct PowerLaw;

impl MuLookup for PowerLaw {
    fn linear_mu(&self, material: &str, energies: &[f64], density: f64) -> Result<Vec<f64>> {
        let k = material.len() as f64 * 1.0e4;
        Ok(energies
            .iter()
            .map(|e| density * k * (1000.0 / e).powi(3))
            .collect())
    }
}

fn request(points: usize) -> AttenuationRequest {
    let sample = SampleSpec::new(
        vec![
            Component::new("SiO2", 60.0, 60.08),
            Component::new("Al2O3", 25.0, 101.96),
            Component::new("Fe2O3", 10.0, 159.69),
            Component::new("CaO", 5.0, 56.08),
        ],
        FractionType::Mole,
        2.9,
        100.0,
    )
    .unwrap();
    let grid = EnergyGrid::linspace(5000.0, 30000.0, points).unwrap();
    AttenuationRequest::new(sample, grid, 12000.0).unwrap()
}

fn bench_normalize(c: &mut Criterion) {
    let req = request(201);
    c.bench_function("normalize_four_components", |b| {
        b.iter(|| {
            black_box(
                normalize_weight_fractions(
                    black_box(req.sample.components()),
                    black_box(FractionType::Mole),
                )
                .unwrap(),
            );
        });
    });
}

fn bench_compute(c: &mut Criterion) {
    for points in [201, 2001] {
        let req = request(points);
        c.bench_function(&format!("compute_{points}_points"), |b| {
            b.iter(|| black_box(compute(black_box(&req), &PowerLaw).unwrap()));
        });
    }

    let req = request(201);
    let cached = CachedLookup::new(PowerLaw);
    c.bench_function("compute_201_points_cached", |b| {
        b.iter(|| black_box(compute(black_box(&req), &cached).unwrap()));
    });
}

criterion_group!(benches, bench_normalize, bench_compute);
criterion_main!(benches);
