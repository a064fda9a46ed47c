// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::ExprError;
use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Ident(name) => f.write_str(name),
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
            Self::Star => f.write_str("*"),
            Self::Slash => f.write_str("/"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character of the token.
    pub position: usize,
}

/// Splits formula text into tokens.
pub struct Lexer<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.char_indices().peekable(),
        }
    }

    /// Tokenize the whole input.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ExprError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Option<Token>, ExprError> {
        self.eat_whitespace();

        let Some(&(position, c)) = self.chars.peek() else {
            return Ok(None);
        };

        let kind = match c {
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '/' => self.single(TokenKind::Slash),
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            c if c.is_ascii_digit() || c == '.' => self.number(position)?,
            c if c.is_ascii_alphabetic() || c == '_' => self.ident(position),
            ch => return Err(ExprError::UnexpectedChar { ch, position }),
        };

        Ok(Some(Token { kind, position }))
    }

    fn eat_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.chars.next();
        kind
    }

    fn number(&mut self, start: usize) -> Result<TokenKind, ExprError> {
        let mut end = start;
        let mut seen_dot = false;

        while let Some(&(i, c)) = self.chars.peek() {
            if c.is_ascii_digit() || (c == '.' && !seen_dot) {
                seen_dot |= c == '.';
                end = i + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }

        // optional exponent, only consumed when digits follow
        if let Some(&(i, 'e' | 'E')) = self.chars.peek() {
            let rest = &self.text[i + 1..];
            let sign_len = usize::from(rest.starts_with(['+', '-']));
            let digits = rest[sign_len..]
                .chars()
                .take_while(char::is_ascii_digit)
                .count();
            if digits > 0 {
                let exponent_end = i + 1 + sign_len + digits;
                while self.chars.next_if(|&(j, _)| j < exponent_end).is_some() {}
                end = exponent_end;
            }
        }

        let text = &self.text[start..end];
        text.parse::<f64>()
            .map(TokenKind::Number)
            .map_err(|_| ExprError::InvalidNumber {
                text: text.to_string(),
            })
    }

    fn ident(&mut self, start: usize) -> TokenKind {
        let mut end = start;
        while let Some((i, c)) = self
            .chars
            .next_if(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        {
            end = i + c.len_utf8();
        }
        TokenKind::Ident(self.text[start..end].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        Lexer::new(text)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_operators_and_parentheses() {
        assert_eq!(
            kinds("( + - * / )"),
            vec![
                TokenKind::LParen,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(kinds("3"), vec![TokenKind::Number(3.0)]);
        assert_eq!(kinds("0.25"), vec![TokenKind::Number(0.25)]);
        assert_eq!(kinds(".5"), vec![TokenKind::Number(0.5)]);
        assert_eq!(kinds("1e3"), vec![TokenKind::Number(1000.0)]);
        assert_eq!(kinds("2.5E-1"), vec![TokenKind::Number(0.25)]);
    }

    #[test]
    fn test_exponent_without_digits_is_identifier() {
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Number(2.0), TokenKind::Ident("e".into())]
        );
    }

    #[test]
    fn test_lone_dot_is_invalid_number() {
        assert_eq!(
            Lexer::new(".").tokenize(),
            Err(ExprError::InvalidNumber { text: ".".into() })
        );
    }

    #[test]
    fn test_identifier_positions() {
        let tokens = Lexer::new("base * value").tokenize().unwrap();
        assert_eq!(tokens[0].position, 0);
        assert_eq!(tokens[1].position, 5);
        assert_eq!(tokens[2].position, 7);
        assert_eq!(tokens[2].kind, TokenKind::Ident("value".into()));
    }

    #[test]
    fn test_rejects_foreign_characters() {
        assert_eq!(
            Lexer::new("base; 1").tokenize(),
            Err(ExprError::UnexpectedChar {
                ch: ';',
                position: 4
            })
        );
    }
}
