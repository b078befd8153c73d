use thiserror::Error;

/// Precondition violations detected when an aligner or engine is constructed.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AlignError {
    #[error("gap {which} penalty must be finite, got {value}")]
    InvalidGapPenalty { which: &'static str, value: f32 },

    #[error("{strategy} strategy uses {direction} as initial {border} direction")]
    InvalidBorderDirection {
        strategy: &'static str,
        border: &'static str,
        direction: &'static str,
    },
}

/// Errors from parsing sequences and substitution matrices.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown residue {symbol:?} at position {position}")]
    UnknownResidue { symbol: char, position: usize },

    #[error("matrix line {line}: {message}")]
    MatrixFormat { line: usize, message: String },

    #[error("matrix is not symmetric: score({a}, {b}) = {ab} but score({b}, {a}) = {ba}")]
    AsymmetricMatrix { a: char, b: char, ab: f32, ba: f32 },
}

impl ParseError {
    pub fn matrix_format<S: Into<String>>(line: usize, message: S) -> Self {
        Self::MatrixFormat {
            line,
            message: message.into(),
        }
    }
}
