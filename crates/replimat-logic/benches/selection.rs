use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use replimat_logic::catalog::Catalog;
use replimat_logic::eligibility::{eligible, ConsumerPolicy};
use replimat_logic::selection::{select, SelectionMode};
use replimat_logic::settings::ReplicatorSettings;

fn bench_pick_meal(c: &mut Criterion) {
    let catalog = Catalog::vanilla();
    let settings = ReplicatorSettings::default();
    let policy = ConsumerPolicy::unrestricted(&catalog);
    let mut rng = StdRng::seed_from_u64(42);

    c.bench_function("eligible_vanilla", |b| {
        b.iter(|| eligible(black_box(&policy), &catalog, &settings).len())
    });

    let candidates = eligible(&policy, &catalog, &settings);
    for mode in [SelectionMode::QualityFirst, SelectionMode::Balanced] {
        c.bench_function(&format!("select_{:?}", mode), |b| {
            b.iter(|| select(black_box(&candidates), mode, &mut rng).map(|item| item.mass))
        });
    }
}

criterion_group!(benches, bench_pick_meal);
criterion_main!(benches);
