//! K2P 核苷酸替换模拟

pub mod kimura;
pub mod parallel;

pub use kimura::{evolve_base, evolve_seq, Kimura, KimuraParams, KimuraProbs};
pub use parallel::{evolve_map, evolve_map_with, EvolveOpt};
