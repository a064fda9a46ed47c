// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Arithmetic formulas over the two inputs of a derived variable.
//!
//! A formula may reference exactly two identifiers, `base` (the source variable's
//! current value) and `value` (the derived variable's own value before the update),
//! combined with numeric literals, `+ - * /`, unary signs and parentheses. Formulas
//! are parsed into an [`Expr`] tree and evaluated by walking it; nothing outside the
//! two inputs is reachable from a formula.
//!
//! ```
//! use avionix_expr::{evaluate, FormulaInputs};
//!
//! let percent = evaluate("(base/3)*100", FormulaInputs::new(1.5, 0.0));
//! assert_eq!(percent, 50.0);
//!
//! // Malformed formulas log a warning and evaluate to zero.
//! assert_eq!(evaluate("base +", FormulaInputs::new(5.0, 0.0)), 0.0);
//! ```

pub mod error;
pub mod formula;
pub mod lexer;
pub mod parser;

pub use self::error::ExprError;
pub use self::formula::{evaluate, Formula, FormulaInputs, LenientFormula};
pub use self::parser::{BinaryOp, Expr, Input, UnaryOp};
