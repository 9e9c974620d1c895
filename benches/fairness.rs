use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fair_dice::core::rng::random_secret;
use fair_dice::game::{probability_matrix, DiceSet};
use fair_dice::proof::{commitment, mac};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn dice_set(count: usize) -> DiceSet {
    let configs: Vec<String> = (0..count as i64)
        .map(|i| {
            (0..6)
                .map(|face| ((i * 7 + face * 3) % 11).to_string())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    DiceSet::parse(&configs).expect("valid dice")
}

fn matrix(c: &mut Criterion) {
    let mut group = c.benchmark_group("probability_matrix");
    for count in [3usize, 10, 50] {
        let dice = dice_set(count);
        group.bench_function(BenchmarkId::from_parameter(count), |b| {
            b.iter(|| black_box(probability_matrix(black_box(&dice))))
        });
    }
    group.finish();
}

fn commit_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_verify");
    let mut rng = StdRng::seed_from_u64(7);

    group.bench_function("commit_mac", |b| {
        b.iter(|| black_box(mac::commit_mac_with(&mut rng, 0, 5).expect("range")))
    });
    group.bench_function("commit_hash", |b| {
        b.iter(|| black_box(commitment::commit_with(&mut rng, 0, 5).expect("range")))
    });

    let key = random_secret(&mut rng);
    let sealed = mac::MacCommitment::seal(3, key);
    group.bench_function("verify_mac", |b| {
        b.iter(|| black_box(mac::verify_mac(black_box(3), &key, &sealed.tag)))
    });

    let nonce = random_secret(&mut rng);
    let sealed = commitment::HashCommitment::seal(3, nonce, key);
    group.bench_function("verify_hash", |b| {
        b.iter(|| black_box(commitment::verify(black_box(3), &nonce, &key, &sealed.digest)))
    });
    group.finish();
}

criterion_group!(benches, matrix, commit_verify);
criterion_main!(benches);
