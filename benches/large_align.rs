//! Benchmark: quadratic vs. linear-space global alignment on random DNA.
//!
//! Run with:
//! `cargo bench --bench large_align`
//! (add `--features parallel` to time the rayon variant of the engine)

use align_dp::{align_global, align_linear_space, ScoringBuilder};
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_dna(rng: &mut StdRng, len: usize) -> Vec<u8> {
    const ALPHABET: &[u8] = b"ACGT";
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())])
        .collect()
}

fn bench_global(c: &mut Criterion) {
    let scoring = ScoringBuilder::new().linear().unwrap();
    let mut group = c.benchmark_group("global_alignment");
    group.sample_size(10);

    for &len in &[500usize, 1_000, 2_000] {
        let setup = || {
            let mut rng = StdRng::seed_from_u64(42);
            (random_dna(&mut rng, len), random_dna(&mut rng, len))
        };

        group.bench_function(format!("quadratic_{len}"), |b| {
            b.iter_batched(
                setup,
                |(s, t)| criterion::black_box(align_global(&s, &t, &scoring).unwrap().score),
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("linear_space_{len}"), |b| {
            b.iter_batched(
                setup,
                |(s, t)| {
                    criterion::black_box(align_linear_space(&s, &t, &scoring).unwrap().score)
                },
                BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_linear_space_large(c: &mut Criterion) {
    let scoring = ScoringBuilder::new().linear().unwrap();
    let mut group = c.benchmark_group("linear_space_large");
    group.sample_size(10);

    // Sizes where the quadratic tables would no longer be practical.
    for &len in &[5_000usize, 10_000] {
        group.bench_function(format!("len_{len}"), |b| {
            b.iter_batched(
                || {
                    let mut rng = StdRng::seed_from_u64(7);
                    (random_dna(&mut rng, len), random_dna(&mut rng, len))
                },
                |(s, t)| {
                    criterion::black_box(align_linear_space(&s, &t, &scoring).unwrap().score)
                },
                BatchSize::PerIteration,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_global, bench_linear_space_large);
criterion_main!(benches);
