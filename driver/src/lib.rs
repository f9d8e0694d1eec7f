pub mod test_util;

pub use test_util::*;

use common::{Errors, IndentPrinter};
use syntax::ASTAlloc;

#[derive(Eq, PartialEq, Copy, Clone)]
pub enum Stage { Parse, Chk, Tac, TacOpt, Asm }

#[derive(Copy, Clone)]
pub struct CompileCfg {
  pub stage: Stage,
}

#[derive(Default)]
pub struct Alloc<'a> {
  ast: ASTAlloc<'a>,
}

pub struct Output<'a> {
  pub code: String,
  // diagnostics that don't fail the compilation ride along with its result
  pub warning: Errors<'a>,
}

// run the pipeline up to `cfg.stage` and render that stage's result; any
// error-severity diagnostic stops the pipeline at its stage boundary and comes
// back as Err. it is also the most convenient entry for debugging the
// compiler: `code` can be a hard-coded literal
pub fn compile<'a>(code: &'a str, alloc: &'a Alloc<'a>, cfg: CompileCfg) -> Result<Output<'a>, Errors<'a>> {
  let mut p = IndentPrinter::default();
  let pr = syntax::parser::work(code, &alloc.ast)?;
  if cfg.stage == Stage::Parse {
    print::ast::program(pr, &mut p);
    return Ok(Output { code: p.finish(), warning: Errors::default() });
  }
  let warning = typeck::work(pr);
  if warning.has_errors() {
    return Err(warning);
  }
  if cfg.stage == Stage::Chk {
    print::scope::program(pr, &mut p);
    return Ok(Output { code: p.finish(), warning });
  }
  let mut tp = tacgen::work(pr);
  if cfg.stage == Stage::Tac {
    print::tac::program(&tp, &mut p);
    return Ok(Output { code: p.finish(), warning });
  }
  tacopt::work(&mut tp);
  if cfg.stage == Stage::TacOpt {
    print::tac::program(&tp, &mut p);
    return Ok(Output { code: p.finish(), warning });
  }
  match codegen::work(&tp) {
    Ok(asm) => {
      print::asm::program(&asm, &mut p);
      Ok(Output { code: p.finish(), warning })
    }
    // not a user diagnostic: the mapping table rejected optimizer output,
    // which can only mean an earlier stage is broken
    Err(e) => panic!("internal compiler error: {:?}", e),
  }
}
