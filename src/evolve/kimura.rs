//! Kimura two-parameter (K2P) nucleotide substitution.
//!
//! Given an elapsed time `t`, a transition rate `alpha` and a transversion
//! rate `beta`, each base is replaced by a draw from the K2P transition
//! probabilities:
//!
//! - `s = 0.25 * (1 - e^(-4βt))` for each transversion target
//! - `u = 0.25 * (1 + e^(-4βt) - 2e^(-2(α+β)t))` for the transition target
//! - `r = 1 - 2s - u` for staying the same
//!
//! Positions are independent; the random source is passed in by the caller.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqError};
use crate::util::dna::{self, SubstClass, KIMURA_CLASSES, SIGMA};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KimuraParams {
    pub time: f64,
    /// transition rate
    pub alpha: f64,
    /// transversion rate
    pub beta: f64,
}

impl Default for KimuraParams {
    fn default() -> Self {
        Self { time: 0.0, alpha: 1.0, beta: 1.0 }
    }
}

impl KimuraParams {
    pub fn new(time: f64, alpha: f64, beta: f64) -> Result<Self> {
        let p = Self { time, alpha, beta };
        p.validate()?;
        Ok(p)
    }

    /// `alpha = beta = 1`
    pub fn with_time(time: f64) -> Result<Self> {
        Self::new(time, 1.0, 1.0)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.time.is_finite() || self.time < 0.0 {
            return Err(SeqError::InvalidParameter { name: "time", value: self.time });
        }
        if !self.alpha.is_finite() || self.alpha <= 0.0 {
            return Err(SeqError::InvalidParameter { name: "alpha", value: self.alpha });
        }
        if !self.beta.is_finite() || self.beta <= 0.0 {
            return Err(SeqError::InvalidParameter { name: "beta", value: self.beta });
        }
        // rate * time must stay finite for the exponentials to be meaningful
        if self.time > 0.0 {
            let scaled = [4.0 * self.beta * self.time, 2.0 * (self.alpha + self.beta) * self.time];
            if scaled.iter().any(|x| !x.is_finite()) {
                return Err(SeqError::InvalidParameter { name: "time", value: self.time });
            }
        }
        Ok(())
    }
}

/// Per-class probabilities for one (t, α, β).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KimuraProbs {
    same: f64,
    transition: f64,
    transversion: f64,
}

impl KimuraProbs {
    pub fn new(p: &KimuraParams) -> Self {
        if p.time == 0.0 {
            return Self { same: 1.0, transition: 0.0, transversion: 0.0 };
        }
        let e4b = (-4.0 * p.beta * p.time).exp();
        let e2ab = (-2.0 * (p.alpha + p.beta) * p.time).exp();
        let transversion = 0.25 * (1.0 - e4b);
        let transition = 0.25 * (1.0 + e4b - 2.0 * e2ab);
        // rounding can leave a tiny negative remainder
        let same = (1.0 - 2.0 * transversion - transition).max(0.0);
        Self { same, transition, transversion }
    }

    #[inline]
    pub fn prob(&self, class: SubstClass) -> f64 {
        match class {
            SubstClass::Same => self.same,
            SubstClass::Transition => self.transition,
            SubstClass::Transversion => self.transversion,
        }
    }

    /// Probabilities of moving from `from` to A, C, G, T.
    pub fn row(&self, from: usize) -> [f64; SIGMA] {
        KIMURA_CLASSES[from].map(|c| self.prob(c))
    }

    /// Inverse-CDF walk over row `from` for a uniform `pick` in [0, 1).
    pub fn sample_index(&self, from: usize, pick: f64) -> Result<usize> {
        let mut cdf = 0.0;
        for (to, &class) in KIMURA_CLASSES[from].iter().enumerate() {
            cdf += self.prob(class);
            if cdf >= pick {
                return Ok(to);
            }
        }
        Err(SeqError::ProbabilityShortfall { cdf, pick })
    }
}

/// K2P model with its probabilities computed once, for reuse across many bases.
#[derive(Debug, Clone, Copy)]
pub struct Kimura {
    params: KimuraParams,
    probs: KimuraProbs,
}

impl Kimura {
    pub fn new(params: KimuraParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params, probs: KimuraProbs::new(&params) })
    }

    pub fn params(&self) -> &KimuraParams {
        &self.params
    }

    pub fn probs(&self) -> &KimuraProbs {
        &self.probs
    }

    #[inline]
    fn evolve_at<R: Rng + ?Sized>(&self, base: u8, pos: usize, rng: &mut R) -> Result<u8> {
        let from = dna::base_to_index(base).ok_or(SeqError::InvalidBase { base, pos })?;
        let pick: f64 = rng.random();
        let to = self.probs.sample_index(from, pick)?;
        Ok(dna::index_to_base(to))
    }

    pub fn evolve_base<R: Rng + ?Sized>(&self, base: u8, rng: &mut R) -> Result<u8> {
        self.evolve_at(base, 0, rng)
    }

    /// Evolve every position independently. The whole input is checked
    /// before the first draw, and any failure discards the output.
    pub fn evolve_seq<R: Rng + ?Sized>(&self, seq: &[u8], rng: &mut R) -> Result<Vec<u8>> {
        if let Some(pos) = dna::first_invalid(seq) {
            return Err(SeqError::InvalidBase { base: seq[pos], pos });
        }
        let out = seq
            .iter()
            .enumerate()
            .map(|(pos, &b)| self.evolve_at(b, pos, rng))
            .collect::<Result<Vec<u8>>>()?;
        if out.len() != seq.len() {
            return Err(SeqError::LengthMismatch { expected: seq.len(), got: out.len() });
        }
        Ok(out)
    }
}

/// Evolve a single base over `params.time`.
pub fn evolve_base<R: Rng + ?Sized>(base: u8, params: &KimuraParams, rng: &mut R) -> Result<u8> {
    Kimura::new(*params)?.evolve_base(base, rng)
}

/// Evolve a whole sequence over `params.time`; output has the input's length.
pub fn evolve_seq<R: Rng + ?Sized>(seq: &[u8], params: &KimuraParams, rng: &mut R) -> Result<Vec<u8>> {
    Kimura::new(*params)?.evolve_seq(seq, rng)
}
