use serde::{Deserialize, Serialize};

/// Number of symbols in the substitution alphabet {A, C, G, T}.
pub const SIGMA: usize = 4;

/// Index -> base, A=0, C=1, G=2, T=3.
pub const BASES: [u8; SIGMA] = [b'A', b'C', b'G', b'T'];

/// Rate class of a (from, to) pair under the Kimura two-parameter model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubstClass {
    /// no change
    Same,
    /// purine <-> purine or pyrimidine <-> pyrimidine
    Transition,
    /// purine <-> pyrimidine
    Transversion,
}

use SubstClass::{Same as R, Transition as U, Transversion as S};

/// KIMURA_CLASSES[from][to]，行列顺序均为 A, C, G, T
pub const KIMURA_CLASSES: [[SubstClass; SIGMA]; SIGMA] = [
    [R, S, U, S],
    [S, R, S, U],
    [U, S, R, S],
    [S, U, S, R],
];

#[inline]
pub fn base_to_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

#[inline]
pub fn index_to_base(i: usize) -> u8 {
    BASES[i]
}

/// Position of the first byte outside {A,C,G,T} (either case).
pub fn first_invalid(seq: &[u8]) -> Option<usize> {
    seq.iter().position(|&b| base_to_index(b).is_none())
}

#[inline]
pub fn is_purine(b: u8) -> bool {
    matches!(b.to_ascii_uppercase(), b'A' | b'G')
}
