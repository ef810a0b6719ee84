use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::kimura::{Kimura, KimuraParams};
use crate::error::Result;
use crate::seqs::SeqMap;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolveOpt {
    pub params: KimuraParams,
    pub seed: u64,
}

/// 对 map 中每条序列独立演化，结果保持原有顺序。
///
/// 每条序列使用一个独立的 Xoshiro256++ 流，其种子由主 RNG 按顺序生成，
/// 因此结果只取决于 seed 和序列顺序，与线程数无关。
pub fn evolve_map(map: &SeqMap, opt: &EvolveOpt) -> Result<SeqMap> {
    let model = Kimura::new(opt.params)?;
    let mut master = Xoshiro256PlusPlus::seed_from_u64(opt.seed);
    let seeds: Vec<u64> = (0..map.len()).map(|_| master.random()).collect();

    tracing::debug!(
        seqs = map.len(),
        time = opt.params.time,
        alpha = opt.params.alpha,
        beta = opt.params.beta,
        seed = opt.seed,
        "evolving sequences"
    );

    let pairs: Vec<(&str, &[u8])> = map.iter().collect();
    let evolved = pairs
        .par_iter()
        .zip(seeds.par_iter())
        .map(|(&(_, seq), &seed)| {
            let mut local_rng = Xoshiro256PlusPlus::seed_from_u64(seed);
            model.evolve_seq(seq, &mut local_rng)
        })
        .collect::<Result<Vec<Vec<u8>>>>()?;

    let mut out = SeqMap::with_capacity(map.len());
    for ((name, _), seq) in pairs.into_iter().zip(evolved) {
        out.insert(name, seq);
    }
    Ok(out)
}

/// Sequential variant that draws every position from the caller's RNG.
pub fn evolve_map_with<R: Rng + ?Sized>(map: &SeqMap, params: &KimuraParams, rng: &mut R) -> Result<SeqMap> {
    let model = Kimura::new(*params)?;
    let mut out = SeqMap::with_capacity(map.len());
    for (name, seq) in map {
        out.insert(name, model.evolve_seq(seq, rng)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SeqError;

    fn input() -> SeqMap {
        let mut m = SeqMap::new();
        for i in 0..16usize {
            let seq: Vec<u8> = (0..200).map(|j| b"ACGT"[(i * 7 + j) % 4]).collect();
            m.add(format!("seq{:02}", 15 - i), seq, false);
        }
        m
    }

    fn opt(time: f64, seed: u64) -> EvolveOpt {
        EvolveOpt { params: KimuraParams::new(time, 2.0, 1.0).unwrap(), seed }
    }

    fn run_with_threads(n: usize, m: &SeqMap, o: &EvolveOpt) -> SeqMap {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(n).build().unwrap();
        pool.install(|| evolve_map(m, o)).unwrap()
    }

    #[test]
    fn keeps_order_and_lengths() {
        let m = input();
        let out = evolve_map(&m, &opt(0.4, 1)).unwrap();
        assert_eq!(out.names(), m.names());
        for ((_, a), (_, b)) in m.iter().zip(out.iter()) {
            assert_eq!(a.len(), b.len());
        }
        assert_ne!(out, m);
    }

    #[test]
    fn independent_of_thread_count() {
        let m = input();
        let o = opt(0.4, 7);
        let one = run_with_threads(1, &m, &o);
        let four = run_with_threads(4, &m, &o);
        assert_eq!(one, four);
    }

    #[test]
    fn different_seeds_differ() {
        let m = input();
        let a = evolve_map(&m, &opt(0.4, 1)).unwrap();
        let b = evolve_map(&m, &opt(0.4, 2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn zero_time_is_identity() {
        let m = input();
        assert_eq!(evolve_map(&m, &opt(0.0, 3)).unwrap(), m);
    }

    #[test]
    fn invalid_entry_aborts_whole_map() {
        let mut m = input();
        m.add("bad", b"ACGN".to_vec(), false);
        let err = evolve_map(&m, &opt(0.1, 1)).unwrap_err();
        assert_eq!(err, SeqError::InvalidBase { base: b'N', pos: 3 });
    }

    #[test]
    fn sequential_variant_matches_shape() {
        let m = input();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(9);
        let out = evolve_map_with(&m, &KimuraParams::with_time(0.2).unwrap(), &mut rng).unwrap();
        assert_eq!(out.names(), m.names());
        assert_eq!(out.total_len(), m.total_len());
    }
}
