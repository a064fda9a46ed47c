// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::ExprError;
use crate::lexer::Lexer;
use crate::parser::{Expr, Parser};
use std::fmt;
use tracing::warn;

/// The values a formula can see.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FormulaInputs {
    /// Current value of the source variable.
    pub base: f64,
    /// The derived variable's own value before the update.
    pub value: f64,
}

impl FormulaInputs {
    pub fn new(base: f64, value: f64) -> Self {
        Self { base, value }
    }
}

/// A successfully compiled formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    /// Parse `source` into an expression tree.
    ///
    /// # Errors
    /// Returns the first lexing or parsing error encountered.
    pub fn compile(source: &str) -> Result<Self, ExprError> {
        let tokens = Lexer::new(source).tokenize()?;
        let expr = Parser::new(tokens).parse()?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    /// Evaluate against `inputs`.
    ///
    /// # Errors
    /// Returns [`ExprError::NonFinite`] when the result is infinite or NaN
    /// (for example a division by zero).
    pub fn eval(&self, inputs: FormulaInputs) -> Result<f64, ExprError> {
        let result = self.expr.eval(inputs.base, inputs.value);
        if result.is_finite() {
            Ok(result)
        } else {
            Err(ExprError::NonFinite { result })
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// A formula that never fails at evaluation time.
///
/// Compiled once; if compilation failed, the error is kept and every evaluation
/// logs a warning and yields `0.0`. Evaluation errors are handled the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct LenientFormula {
    source: String,
    compiled: Result<Formula, ExprError>,
}

impl LenientFormula {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Formula::compile(&source);
        Self { source, compiled }
    }

    /// Evaluate, substituting `0.0` (with a warning) on any error.
    pub fn eval(&self, inputs: FormulaInputs) -> f64 {
        let result = match &self.compiled {
            Ok(formula) => formula.eval(inputs),
            Err(error) => Err(error.clone()),
        };
        recover(&self.source, result)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_valid(&self) -> bool {
        self.compiled.is_ok()
    }

    /// The compile error, if the formula is malformed.
    pub fn error(&self) -> Option<&ExprError> {
        self.compiled.as_ref().err()
    }
}

/// Compile and evaluate `formula` in one step.
///
/// Never fails: a malformed formula or a non-finite result is reported with a single
/// warning and evaluates to `0.0`.
pub fn evaluate(formula: &str, inputs: FormulaInputs) -> f64 {
    recover(formula, Formula::compile(formula).and_then(|f| f.eval(inputs)))
}

fn recover(formula: &str, result: Result<f64, ExprError>) -> f64 {
    result.unwrap_or_else(|error| {
        warn!(formula, %error, "formula evaluation failed, using 0");
        0.0
    })
}
