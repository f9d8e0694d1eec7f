use common::{IgnoreResult, IndentPrinter, Ty};
use syntax::ast::*;
use std::fmt::Write;

pub fn program(pr: &Program, p: &mut IndentPrinter) {
  write!(p, "Program").ignore();
  p.indent(|p| pr.body.stmt.as_slice().print(p));
}

trait Printable {
  fn print(&self, p: &mut IndentPrinter);
}

// one impl block per Display-like type
macro_rules! print_basic {
  ($($t: ty)*) => {$(
    impl Printable for $t {
      fn print(&self, p: &mut IndentPrinter) { write!(p, "{}", self).ignore() }
    }
  )*};
}

print_basic!(i64 bool str);

impl Printable for f64 {
  fn print(&self, p: &mut IndentPrinter) { write!(p, "{:?}", self).ignore() }
}

impl Printable for Ty {
  fn print(&self, p: &mut IndentPrinter) { write!(p, "{:?}", self).ignore() }
}

impl<T: Printable> Printable for [T] {
  fn print(&self, p: &mut IndentPrinter) {
    if self.is_empty() { write!(p, "<empty>").ignore(); } else { for x in self { x.print(p); } }
  }
}

impl<T: Printable> Printable for Option<T> {
  fn print(&self, p: &mut IndentPrinter) {
    if let Some(x) = self { x.print(p); } else { write!(p, "<none>").ignore(); }
  }
}

impl<T: Printable> Printable for Box<T> {
  fn print(&self, p: &mut IndentPrinter) { self.as_ref().print(p); }
}

impl<T: Printable + ?Sized> Printable for &T {
  fn print(&self, p: &mut IndentPrinter) { (*self).print(p); }
}

impl Printable for Block<'_> {
  fn print(&self, p: &mut IndentPrinter) {
    write!(p, "Block @ {:?}", self.loc).ignore();
    p.indent(|p| self.stmt.as_slice().print(p));
  }
}

impl Printable for Stmt<'_> {
  fn print(&self, p: &mut IndentPrinter) {
    use StmtKind::*;
    match &self.kind {
      VarDef(v) => {
        write!(p, "VarDef @ {:?}", self.loc).ignore();
        p.indent(|p| {
          v.name.print(p);
          v.ty.print(p);
        });
      }
      Assign(a) => {
        write!(p, "Assign @ {:?}", self.loc).ignore();
        p.indent(|p| {
          a.name.print(p);
          a.src.print(p);
        });
      }
      If(i) => {
        write!(p, "If @ {:?}", self.loc).ignore();
        p.indent(|p| {
          i.cond.print(p);
          i.on_true.print(p);
          i.on_false.print(p);
        });
      }
      While(w) => {
        write!(p, "While @ {:?}", self.loc).ignore();
        p.indent(|p| {
          w.cond.print(p);
          w.body.print(p);
        });
      }
      Print(e) => {
        write!(p, "Print @ {:?}", self.loc).ignore();
        p.indent(|p| e.print(p));
      }
      Block(b) => b.print(p),
    }
  }
}

impl Printable for Expr<'_> {
  fn print(&self, p: &mut IndentPrinter) {
    use ExprKind::*;
    match &self.kind {
      VarRef(v) => v.name.print(p),
      IntLit(i) => i.print(p),
      FloatLit(v) => v.print(p),
      BoolLit(b) => b.print(p),
      Unary(u) => {
        write!(p, "Unary @ {:?}", self.loc).ignore();
        p.indent(|p| {
          u.op.to_word_str().print(p);
          u.r.print(p);
        });
      }
      Binary(b) => {
        write!(p, "Binary @ {:?}", self.loc).ignore();
        p.indent(|p| {
          b.op.to_word_str().print(p);
          b.l.print(p);
          b.r.print(p);
        });
      }
    }
  }
}
