// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use thiserror::Error;

/// Compile or evaluation failure of a formula.
///
/// Positions are byte offsets into the formula text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    #[error("Empty formula")]
    EmptyFormula,
    #[error("Unexpected character '{ch}' at {position}")]
    UnexpectedChar { ch: char, position: usize },
    #[error("Unexpected end of input")]
    UnexpectedEnd,
    #[error("Unexpected token '{token}' at {position}")]
    UnexpectedToken { token: String, position: usize },
    #[error("Unknown identifier '{name}' at {position}, only 'base' and 'value' are allowed")]
    UnknownIdentifier { name: String, position: usize },
    #[error("Invalid number '{text}'")]
    InvalidNumber { text: String },
    #[error("Unbalanced parenthesis at {position}")]
    UnbalancedParenthesis { position: usize },
    #[error("Formula nests deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
    #[error("Formula has more than {limit} terms and operators")]
    TooComplex { limit: usize },
    #[error("Result is not a finite number: {result}")]
    NonFinite { result: f64 },
}
