//! Shared error utilities used across the compilation pipeline.
//!
//! Diagnostics are kept lightweight on purpose – each error carries the
//! offending source line and a caret marker pointing at the byte where the
//! stage gave up. Only two kinds exist: lexing can reject a byte no token
//! category matches, and parsing can reject a token a grammar rule did not
//! expect. Code generation never fails on a well-formed tree, so it has no
//! variant here.

use snafu::Snafu;

pub type CompileResult<T> = Result<T, CompileError>;

#[derive(Debug, Snafu)]
pub enum CompileError {
  #[snafu(display("{expr_line}\n{marker} lex error: {message}"))]
  Lex {
    expr_line: String,
    marker: String,
    message: String,
  },
  #[snafu(display("{expr_line}\n{marker} parse error: {message}"))]
  Parse {
    expr_line: String,
    marker: String,
    message: String,
  },
}

impl CompileError {
  /// Construct a lex error anchored at a specific byte offset in the source.
  pub fn lex_at(source: &str, loc: usize, message: impl Into<String>) -> Self {
    let (expr_line, marker) = point_at(source, loc);
    Self::Lex {
      expr_line,
      marker,
      message: message.into(),
    }
  }

  /// Construct a parse error anchored at a specific byte offset in the source.
  pub fn parse_at(source: &str, loc: usize, message: impl Into<String>) -> Self {
    let (expr_line, marker) = point_at(source, loc);
    Self::Parse {
      expr_line,
      marker,
      message: message.into(),
    }
  }
}

fn point_at(source: &str, loc: usize) -> (String, String) {
  let expr_line = format!("'{source}'");
  let safe_loc = loc.min(source.len());
  let char_offset = source[..safe_loc].chars().count() + 1; // account for opening quote
  let marker = format!("{}^", " ".repeat(char_offset));
  (expr_line, marker)
}
