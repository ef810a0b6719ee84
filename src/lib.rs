//! # seqevolve
//!
//! 有序序列字典与 Kimura 双参数（K2P）核苷酸替换模拟器。
//!
//! 本 crate 提供：
//!
//! - **有序序列容器**：[`SeqMap`] 按首次插入顺序保存 name -> sequence，
//!   重复名字按“保留较长序列”合并
//! - **K2P 替换模拟**：给定演化时间 `t`、转换速率 `alpha`、颠换速率 `beta`，
//!   对单个碱基或整条序列进行逆 CDF 抽样
//! - **并行演化**：每条序列独立的 RNG 流，结果与线程数无关
//! - **I/O**：FASTA 读写与 bincode 快照
//!
//! ## 快速示例
//!
//! ```rust
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//! use seqevolve::evolve::{evolve_seq, KimuraParams};
//! use seqevolve::SeqMap;
//!
//! let mut seqs = SeqMap::new();
//! seqs.add("human", b"ACGTACGTAGCTGATCGTAG".to_vec(), false);
//! seqs.add("chimp", b"ACGTACGTAGCTGATCGTAC".to_vec(), false);
//!
//! let params = KimuraParams::new(0.1, 2.0, 1.0).unwrap();
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);
//! let mut evolved = SeqMap::new();
//! for (name, seq) in &seqs {
//!     evolved.add(name, evolve_seq(seq, &params, &mut rng).unwrap(), false);
//! }
//! assert_eq!(evolved.names(), seqs.names());
//! ```
//!
//! ## 模块说明
//!
//! - [`seqs`] — 有序序列字典
//! - [`evolve`] — K2P 替换模型与并行演化
//! - [`io`] — FASTA 读写、快照
//! - [`util`] — 核苷酸字母表与替换类别矩阵
//! - [`error`] — 错误类型

pub mod error;
pub mod evolve;
pub mod io;
pub mod seqs;
pub mod util;

pub use error::SeqError;
pub use seqs::SeqMap;
