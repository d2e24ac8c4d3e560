use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    #[error("paired series length mismatch: lhs={lhs}, rhs={rhs}")]
    LengthMismatch { lhs: usize, rhs: usize },
    #[error(
        "matrix shape mismatch: lhs={lhs_rows}x{lhs_cols}, rhs={rhs_rows}x{rhs_cols}"
    )]
    ShapeMismatch {
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },
    #[error("matrix row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("output buffer length {actual} does not match input length {expected}")]
    OutputLengthMismatch { expected: usize, actual: usize },
    #[error("invalid parameter `{param}`: {value}")]
    InvalidParam { param: &'static str, value: usize },
}
