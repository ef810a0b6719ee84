//! 演示如何在 library 模式下使用 seqevolve 演化一组序列。
//!
//! 运行方式：
//! ```bash
//! cargo run --example simple_evolve
//! ```

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use seqevolve::evolve::{self, EvolveOpt, Kimura, KimuraParams};
use seqevolve::io::fasta::FastaWriter;
use seqevolve::SeqMap;

fn main() -> anyhow::Result<()> {
    // 1. 构建有序序列字典
    let root = b"ACGTACGTAGCTGATCGTAGCTAGCTAGCTGATCGTAGCTAGCTAGCTGAT";
    let mut seqs = SeqMap::new();
    for name in ["outgroup", "human", "chimp", "gorilla"] {
        seqs.add(name, root.to_vec(), false);
    }
    println!("序列数: {}, 比对长度: {} bp", seqs.len(), seqs.alignment_len()?);

    // 2. 单个碱基
    let params = KimuraParams::new(0.5, 2.0, 1.0)?;
    let model = Kimura::new(params)?;
    println!("A -> 概率 [A, C, G, T] = {:?}", model.probs().row(0));
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
    println!("A 演化为 {}", model.evolve_base(b'A', &mut rng)? as char);

    // 3. 并行演化整个字典
    let evolved = evolve::evolve_map(&seqs, &EvolveOpt { params, seed: 2024 })?;
    for ((name, before), (_, after)) in seqs.iter().zip(evolved.iter()) {
        let diffs = before.iter().zip(after).filter(|(a, b)| a != b).count();
        println!("{}: {} 处替换", name, diffs);
    }

    // 4. 输出 FASTA
    let mut w = FastaWriter::with_width(std::io::stdout(), 30);
    w.write_map(&evolved)?;
    w.flush()?;
    Ok(())
}
