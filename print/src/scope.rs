use common::{IgnoreResult, IndentPrinter};
use syntax::ast::*;
use std::fmt::Write;

fn show_scope(s: &Scope, p: &mut IndentPrinter) {
  let mut sym = s.values().copied().collect::<Vec<_>>();
  sym.sort_unstable_by_key(|v| v.loc);
  if sym.is_empty() { write!(p, "<empty>").ignore(); }
  for v in sym {
    write!(p, "{:?} -> variable {} : {:?} (depth {}, slot {})", v.loc, v.name, v.ty, v.depth.get(), v.slot.get()).ignore();
  }
}

pub fn program(pr: &Program, p: &mut IndentPrinter) {
  write!(p, "GLOBAL SCOPE:").ignore();
  p.indent(|p| {
    show_scope(&pr.body.scope.borrow(), p);
    nested(&pr.body, p);
  });
}

fn block(b: &Block, p: &mut IndentPrinter) {
  write!(p, "LOCAL SCOPE:").ignore();
  p.indent(|p| {
    show_scope(&b.scope.borrow(), p);
    nested(b, p);
  });
}

fn nested(b: &Block, p: &mut IndentPrinter) {
  for s in &b.stmt {
    match &s.kind {
      StmtKind::If(i) => {
        block(&i.on_true, p);
        if let Some(of) = &i.on_false { block(of, p); }
      }
      StmtKind::While(w) => block(&w.body, p),
      StmtKind::Block(b) => block(b, p),
      _ => {}
    }
  }
}
