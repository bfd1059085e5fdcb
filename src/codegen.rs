//! Code generation: lower the parsed AST into assembly text.
//!
//! Emission is a bottom-up composition over the tree: the expression
//! contributes its compile-time value, the statement wraps it in the
//! target's return sequence, the function adds a linkage directive and
//! label, and the program delegates to its function. Given a well-formed
//! tree this stage cannot fail, so nothing here returns a `Result`.

use crate::parser::{Expr, Function, Program, Stmt};

/// Assembly conventions the emitter must not hard-code: how labels are
/// mangled and which instruction sequence returns a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
  /// AT&T-syntax x86-64 with System V linkage; labels are used as-is.
  LinuxX86_64,
  /// AArch64 with Mach-O linkage; labels carry a leading underscore.
  DarwinArm64,
}

impl Target {
  /// Pick the convention matching the build host.
  pub fn host() -> Self {
    if cfg!(all(target_os = "macos", target_arch = "aarch64")) {
      Self::DarwinArm64
    } else {
      Self::LinuxX86_64
    }
  }

  /// Apply the target's label mangling to a function name.
  pub fn label(self, name: &str) -> String {
    match self {
      Self::LinuxX86_64 => name.to_string(),
      Self::DarwinArm64 => format!("_{name}"),
    }
  }
}

/// Emit assembly for a whole program.
pub fn generate(program: &Program, target: Target) -> String {
  let mut asm = String::new();
  emit_function(&program.function, target, &mut asm);
  asm
}

fn emit_function(func: &Function, target: Target, asm: &mut String) {
  let label = target.label(&func.name);
  asm.push_str(&format!(".global {label}\n"));
  asm.push_str(&format!("{label}:\n"));
  emit_stmt(&func.body, target, asm);
}

/// A return statement: move the operand's value into the target's
/// return-value register, then return to the caller.
fn emit_stmt(stmt: &Stmt, target: Target, asm: &mut String) {
  let value = emit_expr(&stmt.expr);
  match target {
    Target::LinuxX86_64 => asm.push_str(&format!("    mov ${value}, %rax\n")),
    Target::DarwinArm64 => asm.push_str(&format!("    mov w0, #{value}\n")),
  }
  asm.push_str("    ret\n");
}

/// An integer literal has no runtime component; its value is already
/// known here and folds straight into the emitted instruction.
fn emit_expr(expr: &Expr) -> i64 {
  expr.value
}
