//! End-to-end pipeline tests over the public API.

use nanocc::{Target, generate_assembly_for};
use std::fs;

#[test]
fn return_2_compiles_to_the_expected_routine() {
  let asm = generate_assembly_for("int main(){return 2;}", Target::LinuxX86_64)
    .expect("compile error");
  assert!(asm.contains(".global main\n"));
  assert!(asm.contains("main:\n"));
  assert!(asm.contains("mov $2, %rax"));
  assert!(asm.contains("ret"));
}

#[test]
fn darwin_target_mangles_the_entry_label() {
  let asm = generate_assembly_for("int main(){return 2;}", Target::DarwinArm64)
    .expect("compile error");
  assert!(asm.contains(".global _main\n"));
  assert!(asm.contains("_main:\n"));
  assert!(asm.contains("mov w0, #2"));
}

#[test]
fn literal_values_survive_the_whole_pipeline() {
  for value in [0, 1, 7, 42, 255, 4096] {
    let source = format!("int main(){{return {value};}}");
    let asm = generate_assembly_for(&source, Target::LinuxX86_64).expect("compile error");
    assert!(
      asm.contains(&format!("mov ${value}, %rax")),
      "missing literal {value} in:\n{asm}"
    );
  }
}

#[test]
fn recompiling_the_same_source_is_byte_identical() {
  let source = "int main(){return 9;}";
  let first = generate_assembly_for(source, Target::LinuxX86_64).expect("compile error");
  let second = generate_assembly_for(source, Target::LinuxX86_64).expect("compile error");
  assert_eq!(first, second);
}

#[test]
fn malformed_programs_are_rejected() {
  let rejected = [
    "int main(){return 2}",          // missing semicolon
    "int main()(return 2;}",         // wrong bracket
    "",                              // empty input
    "int main(){return 2;} garbage", // trailing tokens
    "int main(){return two;}",       // operand is not a literal
    "main(){return 2;}",             // missing return type keyword
  ];
  for source in rejected {
    assert!(
      generate_assembly_for(source, Target::LinuxX86_64).is_err(),
      "expected rejection of {source:?}"
    );
  }
}

#[test]
fn compiles_from_a_file_on_disk() {
  let dir = tempfile::tempdir().expect("tempdir");
  let source_path = dir.path().join("return_2.c");
  fs::write(&source_path, "int main(){return 2;}").expect("write source");

  let source = fs::read_to_string(&source_path).expect("read source");
  let asm = generate_assembly_for(&source, Target::LinuxX86_64).expect("compile error");

  let asm_path = source_path.with_extension("s");
  fs::write(&asm_path, &asm).expect("write assembly");
  assert_eq!(fs::read_to_string(&asm_path).expect("read assembly"), asm);
}
