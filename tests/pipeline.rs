//! Load -> evolve -> store round trips through the public API.

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::io::Cursor;

use seqevolve::evolve::{self, EvolveOpt, Kimura, KimuraParams};
use seqevolve::io::fasta::{read_seq_map, FastaWriter};
use seqevolve::util::dna;
use seqevolve::{SeqError, SeqMap};

fn random_seq(len: usize, rng: &mut Xoshiro256PlusPlus) -> Vec<u8> {
    use rand::Rng;
    (0..len).map(|_| dna::BASES[rng.random_range(0..4usize)]).collect()
}

#[test]
fn evolved_alignment_stays_aligned() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
    let root = random_seq(500, &mut rng);
    let mut aln = SeqMap::new();
    for name in ["d", "c", "b", "a"] {
        aln.add(name, root.clone(), false);
    }

    let opt = EvolveOpt { params: KimuraParams::new(0.1, 3.0, 1.0).unwrap(), seed: 17 };
    let evolved = evolve::evolve_map(&aln, &opt).unwrap();
    assert!(evolved.is_aligned());
    assert_eq!(evolved.alignment_len().unwrap(), 500);
    assert_eq!(evolved.keys().collect::<Vec<_>>(), ["d", "c", "b", "a"]);

    // about 36% of sites change at t=0.1, alpha=3, beta=1
    for (_, seq) in &evolved {
        let diffs = seq.iter().zip(&root).filter(|(a, b)| a != b).count();
        assert!(diffs > 100 && diffs < 260, "diffs = {}", diffs);
    }
}

#[test]
fn transitions_dominate_when_alpha_is_large() {
    let model = Kimura::new(KimuraParams::new(0.05, 10.0, 0.5).unwrap()).unwrap();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(8);
    let seq = vec![b'C'; 20_000];
    let out = model.evolve_seq(&seq, &mut rng).unwrap();
    let to_t = out.iter().filter(|&&b| b == b'T').count();
    let to_ag = out.iter().filter(|&&b| b == b'A' || b == b'G').count();
    assert!(to_t > 2 * to_ag, "C->T {} vs C->A/G {}", to_t, to_ag);
}

#[test]
fn fasta_evolve_reorder_subset() {
    let data = b">r3\nACGTACGT\n>r1\nACGTACGA\n>r2\nACGAACGA\n";
    let seqs = read_seq_map(Cursor::new(&data[..])).unwrap();

    let mut evolved = evolve::evolve_map(
        &seqs,
        &EvolveOpt { params: KimuraParams::with_time(0.1).unwrap(), seed: 1 },
    )
    .unwrap();
    evolved.order_names(["r1", "r2", "r3"]).unwrap();
    assert_eq!(evolved.keys().collect::<Vec<_>>(), ["r1", "r2", "r3"]);

    let sub = evolved.subset(["r3", "r1"]);
    assert_eq!(sub.keys().collect::<Vec<_>>(), ["r1", "r3"]);

    let mut w = FastaWriter::new(Vec::new());
    w.write_map(&sub).unwrap();
    let back = read_seq_map(Cursor::new(w.into_inner())).unwrap();
    assert_eq!(back, sub);
}

#[test]
fn invalid_symbol_stops_evolution() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
    let p = KimuraParams::with_time(1.0).unwrap();
    assert_eq!(
        evolve::evolve_base(b'-', &p, &mut rng),
        Err(SeqError::InvalidBase { base: b'-', pos: 0 })
    );
}
