use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use seqevolve::evolve::{self, EvolveOpt, Kimura, KimuraParams};
use seqevolve::SeqMap;

fn make_seq(len: usize, seed: u32) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = seed;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

fn bench_evolve_base(c: &mut Criterion) {
    let model = Kimura::new(KimuraParams::new(0.2, 2.0, 1.0).unwrap()).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    c.bench_function("evolve_base", |b| {
        b.iter(|| {
            black_box(model.evolve_base(black_box(b'G'), &mut rng).unwrap());
        })
    });
}

fn bench_evolve_seq(c: &mut Criterion) {
    let seq = make_seq(10_000, 42);
    let params = KimuraParams::new(0.2, 2.0, 1.0).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    c.bench_function("evolve_seq_10k", |b| {
        b.iter(|| {
            black_box(evolve::evolve_seq(black_box(&seq), &params, &mut rng).unwrap());
        })
    });
}

fn bench_evolve_map(c: &mut Criterion) {
    let mut map = SeqMap::new();
    for i in 0..64 {
        map.add(format!("seq{}", i), make_seq(2_000, i), false);
    }
    let opt = EvolveOpt { params: KimuraParams::with_time(0.1).unwrap(), seed: 7 };

    c.bench_function("evolve_map_64x2k", |b| {
        b.iter(|| {
            black_box(evolve::evolve_map(black_box(&map), &opt).unwrap());
        })
    });
}

fn bench_order_names(c: &mut Criterion) {
    let mut map = SeqMap::new();
    for i in 0..5_000 {
        map.add(format!("seq{}", i), b"ACGT".to_vec(), false);
    }
    let reference: Vec<String> = map.names().iter().rev().cloned().collect();

    c.bench_function("order_names_5k", |b| {
        b.iter(|| {
            let mut m = map.clone();
            m.order_names(black_box(&reference)).unwrap();
            black_box(m);
        })
    });
}

criterion_group!(benches, bench_evolve_base, bench_evolve_seq, bench_evolve_map, bench_order_names);
criterion_main!(benches);
