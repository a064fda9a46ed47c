// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Recursive descent parser producing an [`Expr`] tree.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | 'base' | 'value' | '(' expr ')'
//! ```

use crate::error::ExprError;
use crate::lexer::{Token, TokenKind};

/// Maximum nesting of parentheses and unary signs.
pub const MAX_DEPTH: usize = 64;

/// Maximum number of nodes in one expression tree.
pub const MAX_NODES: usize = 512;

/// The two inputs a formula may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Current value of the source variable.
    Base,
    /// The derived variable's own value before the update.
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Input(Input),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree against the two inputs.
    ///
    /// IEEE semantics apply: division by zero yields an infinity or NaN, which the
    /// caller is expected to reject.
    pub fn eval(&self, base: f64, value: f64) -> f64 {
        match self {
            Self::Number(n) => *n,
            Self::Input(Input::Base) => base,
            Self::Input(Input::Value) => value,
            Self::Unary { op, operand } => {
                let v = operand.eval(base, value);
                match op {
                    UnaryOp::Plus => v,
                    UnaryOp::Neg => -v,
                }
            }
            Self::Binary { op, lhs, rhs } => {
                let l = lhs.eval(base, value);
                let r = rhs.eval(base, value);
                match op {
                    BinaryOp::Add => l + r,
                    BinaryOp::Sub => l - r,
                    BinaryOp::Mul => l * r,
                    BinaryOp::Div => l / r,
                }
            }
        }
    }
}

pub struct Parser {
    tokens: Vec<Token>,
    cursor: usize,
    depth: usize,
    nodes: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            cursor: 0,
            depth: 0,
            nodes: 0,
        }
    }

    /// Parse the complete token sequence into a single expression.
    pub fn parse(mut self) -> Result<Expr, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::EmptyFormula);
        }

        let expr = self.parse_expression()?;
        match self.peek() {
            None => Ok(expr),
            Some(Token {
                kind: TokenKind::RParen,
                position,
            }) => Err(ExprError::UnbalancedParenthesis {
                position: *position,
            }),
            Some(token) => Err(unexpected(token)),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.cursor)
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.cursor).cloned();
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn parse_expression(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_term()?;
            self.grow()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => BinaryOp::Mul,
                Some(TokenKind::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.bump();
            let rhs = self.parse_unary()?;
            self.grow()?;
            lhs = binary(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        let op = match self.peek_kind() {
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::Minus) => UnaryOp::Neg,
            _ => return self.parse_primary(),
        };
        self.bump();

        self.grow()?;
        self.descend()?;
        let operand = self.parse_unary();
        self.depth -= 1;

        Ok(Expr::Unary {
            op,
            operand: Box::new(operand?),
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let token = self.bump().ok_or(ExprError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(n) => {
                self.grow()?;
                Ok(Expr::Number(n))
            }
            TokenKind::Ident(name) => {
                let input = match name.as_str() {
                    "base" => Input::Base,
                    "value" => Input::Value,
                    _ => {
                        return Err(ExprError::UnknownIdentifier {
                            name,
                            position: token.position,
                        })
                    }
                };
                self.grow()?;
                Ok(Expr::Input(input))
            }
            TokenKind::LParen => {
                self.descend()?;
                let inner = self.parse_expression();
                self.depth -= 1;
                let inner = inner?;

                match self.bump() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(inner),
                    Some(other) => Err(unexpected(&other)),
                    None => Err(ExprError::UnbalancedParenthesis {
                        position: token.position,
                    }),
                }
            }
            _ => Err(unexpected(&token)),
        }
    }

    fn descend(&mut self) -> Result<(), ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::NestingTooDeep { limit: MAX_DEPTH });
        }
        self.depth += 1;
        Ok(())
    }

    fn grow(&mut self) -> Result<(), ExprError> {
        if self.nodes >= MAX_NODES {
            return Err(ExprError::TooComplex { limit: MAX_NODES });
        }
        self.nodes += 1;
        Ok(())
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn unexpected(token: &Token) -> ExprError {
    ExprError::UnexpectedToken {
        token: token.kind.to_string(),
        position: token.position,
    }
}
