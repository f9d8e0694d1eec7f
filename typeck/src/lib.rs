mod scope_stack;

use crate::scope_stack::ScopeStack;
use common::{BinOp, ErrorKind::*, Errors, Loc, Ty, UnOp};
use syntax::ast::*;
use std::ops::{Deref, DerefMut};

// one walk over the tree: declarations populate the scope stack (and receive
// their depth and program-wide storage slot), references resolve against it,
// every expression gets its inferred type. an offending node is annotated with
// the error type and the walk continues, so independent mistakes are all
// reported; the caller checks `has_errors` before lowering anything.
// the returned diagnostics include warnings and are already position-sorted
pub fn work<'a>(p: &'a Program<'a>) -> Errors<'a> {
  let mut s = SemanticPass { errors: Errors::default(), scopes: ScopeStack::new(), slot_num: 0 };
  s.block(&p.body);
  p.var_num.set(s.slot_num);
  s.errors.sorted()
}

struct SemanticPass<'a> {
  errors: Errors<'a>,
  scopes: ScopeStack<'a>,
  slot_num: u32,
}

impl<'a> Deref for SemanticPass<'a> {
  type Target = Errors<'a>;
  fn deref(&self) -> &Self::Target { &self.errors }
}

impl<'a> DerefMut for SemanticPass<'a> {
  fn deref_mut(&mut self) -> &mut Self::Target { &mut self.errors }
}

impl<'a> SemanticPass<'a> {
  fn block(&mut self, b: &'a Block<'a>) {
    self.scopes.open(b);
    for s in &b.stmt { self.stmt(s); }
    self.scopes.close();
    // a variable nobody read is reported when its scope dies
    for (_, v) in b.scope.borrow().iter() {
      if !v.used.get() {
        self.errors.issue::<()>(v.loc, UnusedVar(v.name));
      }
    }
  }

  fn stmt(&mut self, s: &'a Stmt<'a>) {
    match &s.kind {
      StmtKind::VarDef(v) => {
        if let Some(prev) = self.scopes.lookup_current(v.name) {
          self.issue(v.loc, ConflictDeclaration { prev: prev.loc, name: v.name })
        } else {
          v.depth.set(self.scopes.depth());
          v.slot.set(self.slot_num);
          self.slot_num += 1;
          self.scopes.declare(v);
        }
      }
      StmtKind::Assign(a) => {
        let r = self.expr(&a.src);
        match self.scopes.lookup(a.name) {
          Some(v) => {
            a.var.set(Some(v));
            if r != Ty::Error && r != v.ty {
              self.issue(s.loc, IncompatibleBinary { l: v.ty, op: "=", r })
            }
          }
          None => self.issue(s.loc, UndeclaredVar(a.name)),
        }
      }
      StmtKind::If(i) => {
        self.check_bool(&i.cond);
        self.block(&i.on_true);
        if let Some(of) = &i.on_false { self.block(of); }
      }
      StmtKind::While(w) => {
        self.check_bool(&w.cond);
        self.block(&w.body);
      }
      StmtKind::Print(e) => { self.expr(e); }
      StmtKind::Block(b) => self.block(b),
    }
  }

  fn expr(&mut self, e: &'a Expr<'a>) -> Ty {
    use ExprKind::*;
    let ty = match &e.kind {
      VarRef(v) => match self.scopes.lookup(v.name) {
        Some(var) => {
          v.var.set(Some(var));
          var.used.set(true);
          var.ty
        }
        None => self.issue(e.loc, UndeclaredVar(v.name)),
      },
      IntLit(_) => Ty::Int,
      FloatLit(_) => Ty::Float,
      BoolLit(_) => Ty::Bool,
      Unary(u) => self.unary(u, e.loc),
      Binary(b) => self.binary(b, e.loc),
    };
    e.ty.set(ty);
    ty
  }

  fn binary(&mut self, b: &'a Binary<'a>, loc: Loc) -> Ty {
    use BinOp::*;
    let (l, r) = (self.expr(&b.l), self.expr(&b.r));
    if l == Ty::Error || r == Ty::Error {
      // an operand already carries a diagnostic, don't pile a second one on;
      // give the node the type the operator would have produced
      return match b.op {
        Add | Sub | Mul | Div => if l.is_numeric() { l } else { r },
        _ => Ty::Bool,
      };
    }
    let (ret, ok) = match b.op {
      Add | Sub | Mul | Div => (l, l.is_numeric() && l == r),
      Lt | Le | Gt | Ge => (Ty::Bool, l.is_numeric() && l == r),
      Eq | Ne => (Ty::Bool, l == r),
      And | Or => (Ty::Bool, l == Ty::Bool && r == Ty::Bool),
    };
    if ok { ret } else { self.issue(loc, IncompatibleBinary { l, op: b.op.to_op_str(), r }) }
  }

  fn unary(&mut self, u: &'a Unary<'a>, loc: Loc) -> Ty {
    let r = self.expr(&u.r);
    match u.op {
      UnOp::Neg => if r.is_numeric() || r == Ty::Error { r } else { self.issue(loc, IncompatibleUnary { op: "-", r }) },
      UnOp::Not => if r == Ty::Bool || r == Ty::Error { Ty::Bool } else { self.issue(loc, IncompatibleUnary { op: "!", r }) },
    }
  }

  fn check_bool(&mut self, e: &'a Expr<'a>) {
    let ty = self.expr(e);
    if ty != Ty::Bool && ty != Ty::Error {
      self.issue(e.loc, TestNotBool)
    }
  }
}

#[cfg(test)]
mod tests {
  use syntax::ASTAlloc;

  // (failed, rendered diagnostics); rendering to owned strings lets the arena stay inside
  fn check(code: &str) -> (bool, Vec<String>) {
    let alloc = ASTAlloc::default();
    let p = syntax::parser::work(code, &alloc).unwrap();
    let e = crate::work(p);
    (e.has_errors(), e.0.iter().map(|e| format!("{:?}", e)).collect())
  }

  #[test]
  fn undeclared_is_exactly_one_error() {
    let (failed, e) = check("z = 1;");
    assert!(failed);
    assert_eq!(e, vec!["error: undeclared variable 'z' at line 1, column 1".to_owned()]);
  }

  #[test]
  fn same_scope_redeclaration() {
    let (_, e) = check("var x: int; var x: float; x = 1;");
    assert_eq!(e.len(), 1);
    assert!(e[0].contains("declaration of 'x' conflicts with earlier declaration at line 1, column 5"));
  }

  #[test]
  fn shadowing_in_nested_scope_is_fine() {
    let (failed, e) = check("var x: int; x = 1; { var x: bool; x = true; if (x) { print(1); } } print(x);");
    assert!(!failed);
    assert!(e.is_empty(), "unexpected: {:?}", e);
  }

  #[test]
  fn assignment_type_mismatch() {
    let (_, e) = check("var x: int; x = 1.5; print(x);");
    assert_eq!(e.len(), 1);
    assert!(e[0].contains("incompatible operands: int = float"));
  }

  #[test]
  fn condition_must_be_bool() {
    let (_, e) = check("var x: int; x = 1; while (x) { print(x); }");
    assert_eq!(e.len(), 1);
    assert!(e[0].contains("test expression must have bool type"));
  }

  #[test]
  fn one_bad_operand_reports_once() {
    // `true + 1` is the mistake; the enclosing `* 2` must not add an error
    let (_, e) = check("var x: int; x = (true + 1) * 2; print(x);");
    assert_eq!(e.len(), 1);
    assert!(e[0].contains("incompatible operands: bool + int"));
  }

  #[test]
  fn unused_variable_is_a_warning() {
    let (failed, e) = check("var x: int; x = 1;");
    assert!(!failed);
    assert_eq!(e, vec!["warning: variable 'x' is never used at line 1, column 5".to_owned()]);
  }

  #[test]
  fn errors_come_out_sorted() {
    let (_, e) = check("a = 1;\nb = 2;");
    assert_eq!(e.len(), 2);
    assert!(e[0].contains("'a'") && e[0].contains("line 1"));
    assert!(e[1].contains("'b'") && e[1].contains("line 2"));
  }

  #[test]
  fn slots_are_assigned_in_declaration_order() {
    let alloc = ASTAlloc::default();
    let p = syntax::parser::work("var a: int; { var b: int; b = 1; print(b); } a = 2; print(a);", &alloc).unwrap();
    assert!(!crate::work(p).has_errors());
    assert_eq!(p.var_num.get(), 2);
  }
}
