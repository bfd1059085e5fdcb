//! Lexical analysis: turns the raw input string into a vector of tokens.
//!
//! The tokenizer is intentionally tiny – it recognises the handful of
//! punctuators, keywords, identifiers and integer literals the grammar
//! needs and nothing more. Keywords are carved out of identifier runs
//! after the run is consumed, so `return` is a keyword while `returned`
//! stays an identifier without any pattern-ordering tricks.

use crate::error::{CompileError, CompileResult};
use std::fmt;

/// Kinds of tokens recognised by the front-end. The payload-bearing
/// categories hold their typed value directly, so a numeric token without
/// a value cannot be constructed in the first place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
  OpenBrace,
  CloseBrace,
  OpenParen,
  CloseParen,
  Semicolon,
  KwInt,
  KwReturn,
  Ident(String),
  Num(i64),
  Eof,
}

impl fmt::Display for TokenKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::OpenBrace => write!(f, "{{"),
      Self::CloseBrace => write!(f, "}}"),
      Self::OpenParen => write!(f, "("),
      Self::CloseParen => write!(f, ")"),
      Self::Semicolon => write!(f, ";"),
      Self::KwInt => write!(f, "int"),
      Self::KwReturn => write!(f, "return"),
      Self::Ident(name) => write!(f, "{name}"),
      Self::Num(value) => write!(f, "{value}"),
      Self::Eof => write!(f, "EOF"),
    }
  }
}

/// One classified unit of source text plus the span that produced it.
/// Tokens are immutable once built; later stages only read them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub loc: usize,
  pub len: usize,
}

impl Token {
  /// Convenience constructor to keep the `tokenize` loop readable.
  pub fn new(kind: TokenKind, loc: usize, len: usize) -> Self {
    Self { kind, loc, len }
  }
}

fn is_ident_start(c: u8) -> bool {
  c.is_ascii_alphabetic() || c == b'_'
}

fn is_ident_cont(c: u8) -> bool {
  is_ident_start(c) || c.is_ascii_digit()
}

/// Lex the input into a flat vector of tokens terminated by an `Eof` marker.
///
/// Any byte no category matches is a hard lex error pointing at that byte;
/// nothing is silently dropped.
pub fn tokenize(input: &str) -> CompileResult<Vec<Token>> {
  let mut tokens = Vec::new();
  let bytes = input.as_bytes();
  let mut i = 0;

  while i < bytes.len() {
    let c = bytes[i];
    if c.is_ascii_whitespace() {
      i += 1;
      continue;
    }

    if c.is_ascii_digit() {
      let start = i;
      i += 1;
      while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
      }
      let text = &input[start..i];
      let value = text
        .parse::<i64>()
        .map_err(|err| CompileError::lex_at(input, start, format!("invalid number: {err}")))?;
      tokens.push(Token::new(TokenKind::Num(value), start, i - start));
      continue;
    }

    if is_ident_start(c) {
      let start = i;
      i += 1;
      while i < bytes.len() && is_ident_cont(bytes[i]) {
        i += 1;
      }
      let text = &input[start..i];
      // Keywords win over the identifier category by spelling, not order.
      let kind = match text {
        "int" => TokenKind::KwInt,
        "return" => TokenKind::KwReturn,
        _ => TokenKind::Ident(text.to_string()),
      };
      tokens.push(Token::new(kind, start, i - start));
      continue;
    }

    let kind = match c {
      b'{' => Some(TokenKind::OpenBrace),
      b'}' => Some(TokenKind::CloseBrace),
      b'(' => Some(TokenKind::OpenParen),
      b')' => Some(TokenKind::CloseParen),
      b';' => Some(TokenKind::Semicolon),
      _ => None,
    };
    if let Some(kind) = kind {
      tokens.push(Token::new(kind, i, 1));
      i += 1;
      continue;
    }

    let invalid_char = input[i..].chars().next().unwrap_or('\0');
    return Err(CompileError::lex_at(
      input,
      i,
      format!("invalid token: '{invalid_char}'"),
    ));
  }

  tokens.push(Token::new(TokenKind::Eof, input.len(), 0));
  Ok(tokens)
}
