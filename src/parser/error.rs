use thiserror::Error;

/// Why a pattern could not be parsed. `offset` is a byte offset into the
/// pattern, `expected` lists what would have been accepted there.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("no alternative matched at offset {offset}, expected one of: {}", .expected.join(", "))]
    NoAlternative { offset: usize, expected: Vec<String> },
    #[error("unconsumed input at offset {offset}, expected one of: {}", .expected.join(", "))]
    TrailingInput { offset: usize, expected: Vec<String> },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::NoAlternative { offset, .. } | ParseError::TrailingInput { offset, .. } => {
                *offset
            }
        }
    }

    pub fn expected(&self) -> &[String] {
        match self {
            ParseError::NoAlternative { expected, .. }
            | ParseError::TrailingInput { expected, .. } => expected,
        }
    }
}
