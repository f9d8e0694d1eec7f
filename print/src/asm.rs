use common::{IgnoreResult, IndentPrinter};
use codegen::AsmTemplate;
use std::fmt::Write;

// one instruction per line; labels stand alone at column zero
pub fn program(asm: &[AsmTemplate], p: &mut IndentPrinter) {
  for t in asm {
    match t {
      AsmTemplate::Label(_) => write!(p, "{:?}", t).ignore(),
      _ => p.indent(|p| write!(p, "{:?}", t).ignore()),
    }
  }
}
