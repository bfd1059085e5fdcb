//! Crate root: wires together the compilation pipeline.
//!
//! The stages are intentionally small and composable so they can be evolved
//! independently:
//! - `tokenizer` performs lexical analysis and produces a flat token stream.
//! - `parser` owns all syntactic knowledge and returns the program AST.
//! - `codegen` lowers the AST into assembly for a selectable target.
//! - `error` centralises reporting utilities shared by the other modules.
//!
//! Data flows one direction only, text to tokens to AST to assembly; no
//! stage mutates its predecessor's output, and the whole pipeline is a pure
//! function of the source text.

pub mod error;
pub mod parser;
pub mod tokenizer;

mod codegen;

pub use codegen::Target;
pub use error::{CompileError, CompileResult};

/// Compile a source string into assembly for the build host's target.
pub fn generate_assembly(source: &str) -> CompileResult<String> {
  generate_assembly_for(source, Target::host())
}

/// Compile a source string into assembly for an explicit target.
pub fn generate_assembly_for(source: &str, target: Target) -> CompileResult<String> {
  let tokens = tokenizer::tokenize(source)?;
  log::debug!("lexed {} tokens", tokens.len());
  let program = parser::parse(tokens, source)?;
  log::debug!("parsed function \"{}\"", program.function.name);
  Ok(codegen::generate(&program, target))
}
