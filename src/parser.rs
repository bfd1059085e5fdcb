//! Recursive-descent parser producing the program AST.
//!
//! One function per grammar rule, composed by fail-fast `?` propagation:
//! each rule consumes tokens strictly left to right and the first mismatch
//! aborts the whole parse. There is no rollback machinery – the grammar has
//! no ambiguous productions, so a failed rule never needs to rewind. The
//! node constructors are the only way to build nodes, which keeps every
//! tree that exists well-formed by construction.
//!
//! Grammar:
//!
//! ```text
//! Program    := Function
//! Function   := "int" IDENTIFIER "(" ")" "{" Statement "}"
//! Statement  := "return" Expression ";"
//! Expression := INTEGER_LITERAL
//! ```

use crate::error::{CompileError, CompileResult};
use crate::tokenizer::{Token, TokenKind};

/// An integer literal. The value is known at parse time, so code
/// generation can fold it directly into the emitted instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
  pub value: i64,
}

/// A return statement owning its operand expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stmt {
  pub expr: Expr,
}

/// A function definition: its name and the single statement in its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
  pub name: String,
  pub body: Stmt,
}

/// The root of the tree. A program is exactly one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
  pub function: Function,
}

/// Parse a token stream into a program.
///
/// The stream must reduce to exactly one function: trailing tokens after
/// the closing brace are rejected rather than silently accepted.
pub fn parse(tokens: Vec<Token>, source: &str) -> CompileResult<Program> {
  let mut stream = TokenStream::new(tokens, source);

  if stream.is_eof() {
    return Err(CompileError::parse_at(source, 0, "program is empty"));
  }

  let function = parse_function(&mut stream)?;

  if !stream.is_eof() {
    let (loc, got) = stream.here();
    return Err(CompileError::parse_at(
      source,
      loc,
      format!("unexpected token \"{got}\" after function"),
    ));
  }

  Ok(Program { function })
}

fn parse_function(stream: &mut TokenStream) -> CompileResult<Function> {
  stream.expect(&TokenKind::KwInt)?;
  let name = stream.take_ident()?;
  stream.expect(&TokenKind::OpenParen)?;
  stream.expect(&TokenKind::CloseParen)?;
  stream.expect(&TokenKind::OpenBrace)?;
  let body = parse_stmt(stream)?;
  stream.expect(&TokenKind::CloseBrace)?;
  Ok(Function { name, body })
}

fn parse_stmt(stream: &mut TokenStream) -> CompileResult<Stmt> {
  stream.expect(&TokenKind::KwReturn)?;
  let expr = parse_expr(stream)?;
  stream.expect(&TokenKind::Semicolon)?;
  Ok(Stmt { expr })
}

fn parse_expr(stream: &mut TokenStream) -> CompileResult<Expr> {
  let value = stream.take_number()?;
  Ok(Expr { value })
}

/// Lightweight cursor over the token vector. Exhaustion surfaces through
/// the same expectation failures as a mismatched token, so callers never
/// need a separate end-of-input error path. `peek` leaves room to add
/// lookahead without changing the consuming rules.
struct TokenStream<'a> {
  tokens: Vec<Token>,
  source: &'a str,
  pos: usize,
}

impl<'a> TokenStream<'a> {
  /// Take ownership of the token vector; the parser advances `pos` as it
  /// consumes input.
  fn new(tokens: Vec<Token>, source: &'a str) -> Self {
    Self {
      tokens,
      source,
      pos: 0,
    }
  }

  fn peek(&self) -> Option<&Token> {
    self.tokens.get(self.pos)
  }

  /// Location and description of the current token, for diagnostics.
  fn here(&self) -> (usize, String) {
    match self.peek() {
      Some(token) => (token.loc, token.kind.to_string()),
      None => (self.source.len(), "EOF".to_string()),
    }
  }

  /// Consume the current token if its kind matches exactly. Only useful
  /// for the payload-free kinds; payload-bearing tokens go through
  /// `take_ident`/`take_number`.
  fn eat(&mut self, kind: &TokenKind) -> bool {
    if let Some(token) = self.peek()
      && token.kind == *kind
    {
      self.pos += 1;
      return true;
    }
    false
  }

  fn expect(&mut self, kind: &TokenKind) -> CompileResult<()> {
    if self.eat(kind) {
      Ok(())
    } else {
      let (loc, got) = self.here();
      Err(CompileError::parse_at(
        self.source,
        loc,
        format!("expected \"{kind}\", but got \"{got}\""),
      ))
    }
  }

  /// Consume the current token as an identifier, returning its text.
  fn take_ident(&mut self) -> CompileResult<String> {
    if let Some(token) = self.peek()
      && let TokenKind::Ident(name) = &token.kind
    {
      let name = name.clone();
      self.pos += 1;
      return Ok(name);
    }

    let (loc, got) = self.here();
    Err(CompileError::parse_at(
      self.source,
      loc,
      format!("expected an identifier, but got \"{got}\""),
    ))
  }

  /// Consume the current token as an integer literal, returning its value.
  fn take_number(&mut self) -> CompileResult<i64> {
    if let Some(token) = self.peek()
      && let TokenKind::Num(value) = token.kind
    {
      self.pos += 1;
      return Ok(value);
    }

    let (loc, got) = self.here();
    Err(CompileError::parse_at(
      self.source,
      loc,
      format!("expected a number, but got \"{got}\""),
    ))
  }

  fn is_eof(&self) -> bool {
    matches!(
      self.peek().map(|token| &token.kind),
      Some(TokenKind::Eof) | None
    )
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::tokenizer::tokenize;

  fn parse_str(source: &str) -> CompileResult<Program> {
    parse(tokenize(source).expect("tokenize error"), source)
  }

  #[test]
  fn parse_return_2() {
    let program = parse_str("int main(){return 2;}").expect("parse error");
    assert_eq!(
      program,
      Program {
        function: Function {
          name: "main".to_string(),
          body: Stmt {
            expr: Expr { value: 2 }
          },
        },
      }
    );
  }

  #[test]
  fn function_name_is_preserved() {
    let program = parse_str("int answer ( ) { return 41 ; }").expect("parse error");
    assert_eq!(program.function.name, "answer");
    assert_eq!(program.function.body.expr.value, 41);
  }

  #[test]
  fn missing_semicolon_fails() {
    let err = parse_str("int main(){return 2}").expect_err("expected parse error");
    assert!(err.to_string().contains("expected \";\""));
  }

  #[test]
  fn wrong_bracket_fails_in_function_rule() {
    let err = parse_str("int main()(return 2;}").expect_err("expected parse error");
    assert!(err.to_string().contains("expected \"{\""));
  }

  #[test]
  fn missing_closing_brace_fails() {
    assert!(parse_str("int main(){return 2;").is_err());
  }

  #[test]
  fn wrong_keyword_fails() {
    assert!(parse_str("int main(){break 2;}").is_err());
  }

  #[test]
  fn missing_return_operand_fails() {
    let err = parse_str("int main(){return;}").expect_err("expected parse error");
    assert!(err.to_string().contains("expected a number"));
  }

  #[test]
  fn empty_input_fails() {
    let err = parse_str("").expect_err("expected parse error");
    assert!(err.to_string().contains("program is empty"));
  }

  #[test]
  fn trailing_tokens_are_rejected() {
    let err = parse_str("int main(){return 2;} garbage").expect_err("expected parse error");
    assert!(err.to_string().contains("after function"));
  }

  #[test]
  fn keyword_in_place_of_name_fails() {
    let err = parse_str("int return(){return 2;}").expect_err("expected parse error");
    assert!(err.to_string().contains("expected an identifier"));
  }
}
