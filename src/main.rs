//! Driver binary: file in, executable out.
//!
//! Everything here is plumbing around the pure pipeline in the library –
//! read the `.c` source, compile it, write the assembly next to the input,
//! then hand the assembly to the system C compiler to assemble and link.
//! A nonzero exit from that external tool is propagated unmodified.

use std::env;
use std::fs;
use std::path::Path;
use std::process::{self, Command};

use nanocc::generate_assembly;

fn main() {
  env_logger::init();

  let args: Vec<String> = env::args().collect();
  if args.len() != 2 {
    let program = args.first().map(String::as_str).unwrap_or("nanocc");
    eprintln!("usage: {program} <file.c>");
    process::exit(1);
  }

  let source_path = Path::new(&args[1]);
  let source = match fs::read_to_string(source_path) {
    Ok(source) => source,
    Err(err) => {
      eprintln!("{}: {err}", source_path.display());
      process::exit(1);
    }
  };

  let asm = match generate_assembly(&source) {
    Ok(asm) => asm,
    Err(err) => {
      eprintln!("{err}");
      process::exit(1);
    }
  };
  log::debug!("emitted {} bytes of assembly", asm.len());

  let asm_path = source_path.with_extension("s");
  if let Err(err) = fs::write(&asm_path, &asm) {
    eprintln!("{}: {err}", asm_path.display());
    process::exit(1);
  }

  let exe_path = source_path.with_extension("");
  let status = match Command::new("cc")
    .arg(&asm_path)
    .arg("-o")
    .arg(&exe_path)
    .status()
  {
    Ok(status) => status,
    Err(err) => {
      eprintln!("cc: {err}");
      process::exit(1);
    }
  };

  if !status.success() {
    process::exit(status.code().unwrap_or(1));
  }
}
