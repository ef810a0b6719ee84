use thiserror::Error;

/// 序列容器与替换模拟的错误类型
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SeqError {
    #[error("invalid nucleotide '{}' (byte {base}) at position {pos}", *.base as char)]
    InvalidBase { base: u8, pos: usize },

    #[error("name '{0}' not found in reference ordering")]
    MissingName(String),

    #[error("sequence map is empty")]
    EmptyMap,

    /// Cumulative probability over a row never reached the random draw.
    #[error("probabilities do not add to one (cdf = {cdf}, pick = {pick})")]
    ProbabilityShortfall { cdf: f64, pick: f64 },

    #[error("evolved sequence length {got} differs from input length {expected}")]
    LengthMismatch { expected: usize, got: usize },

    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

pub type Result<T> = std::result::Result<T, SeqError>;
