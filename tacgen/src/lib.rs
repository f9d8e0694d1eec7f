use common::{HashSet, Ty, Value};
use syntax::ast::*;
use tac::{Operand::*, Tac, TacProgram};

#[derive(Default)]
struct TacGen {
  // `reg_num` starts past the variable slots, so every temporary id is fresh
  reg_num: u32,
  label_num: u32,
  ins: Vec<Tac>,
}

// assumes a semantically valid tree: every reference resolved, every type set
pub fn work<'a>(p: &'a Program<'a>) -> TacProgram {
  let var_num = p.var_num.get();
  let mut g = TacGen { reg_num: var_num, ..TacGen::default() };
  g.block(&p.body);
  let mut var_name = vec![String::new(); var_num as usize];
  name_vars(&p.body, &mut var_name, &mut HashSet::default());
  TacProgram { var_num, reg_num: g.reg_num, label_num: g.label_num, var_name, ins: g.ins }
}

// slots are program-unique but names may shadow; later duplicates get their
// slot as a suffix so the listing stays unambiguous
fn name_vars<'a>(b: &Block<'a>, name: &mut Vec<String>, taken: &mut HashSet<&'a str>) {
  for s in &b.stmt {
    match &s.kind {
      StmtKind::VarDef(v) => {
        let slot = v.slot.get() as usize;
        name[slot] = if taken.insert(v.name) { v.name.to_owned() } else { format!("{}.{}", v.name, slot) };
      }
      StmtKind::If(i) => {
        name_vars(&i.on_true, name, taken);
        if let Some(of) = &i.on_false { name_vars(of, name, taken); }
      }
      StmtKind::While(w) => name_vars(&w.body, name, taken),
      StmtKind::Block(b) => name_vars(b, name, taken),
      _ => {}
    }
  }
}

impl TacGen {
  fn reg(&mut self) -> u32 { (self.reg_num, self.reg_num += 1).0 }

  fn label(&mut self) -> u32 { (self.label_num, self.label_num += 1).0 }

  fn push(&mut self, t: Tac) { self.ins.push(t); }

  fn block<'a>(&mut self, b: &'a Block<'a>) {
    for s in &b.stmt { self.stmt(s); }
  }

  fn stmt<'a>(&mut self, s: &'a Stmt<'a>) {
    match &s.kind {
      StmtKind::VarDef(v) => {
        // a declaration establishes its slot with the zero value of the type,
        // so every later read of the slot has a producing write before it
        let zero = match v.ty {
          Ty::Float => Value::Float(0.0),
          Ty::Bool => Value::Bool(false),
          _ => Value::Int(0),
        };
        self.push(Tac::Assign { dst: v.slot.get(), src: [Const(zero)] });
      }
      StmtKind::Assign(a) => {
        let src = self.expr(&a.src);
        self.push(Tac::Assign { dst: a.var.get().unwrap().slot.get(), src: [src] });
      }
      StmtKind::If(i) => {
        let before_else = self.label();
        let cond = self.expr(&i.cond);
        self.push(Tac::Jif { label: before_else, z: true, cond: [cond] });
        self.block(&i.on_true);
        if let Some(of) = &i.on_false {
          let after_else = self.label();
          self.push(Tac::Jmp { label: after_else });
          self.push(Tac::Label { label: before_else });
          self.block(of);
          self.push(Tac::Label { label: after_else });
        } else {
          self.push(Tac::Label { label: before_else });
        }
      }
      StmtKind::While(w) => {
        // before_cond:
        //   if !cond jump after_body
        //   body
        //   jump before_cond
        // after_body:
        let (before_cond, after_body) = (self.label(), self.label());
        self.push(Tac::Label { label: before_cond });
        let cond = self.expr(&w.cond);
        self.push(Tac::Jif { label: after_body, z: true, cond: [cond] });
        self.block(&w.body);
        self.push(Tac::Jmp { label: before_cond });
        self.push(Tac::Label { label: after_body });
      }
      StmtKind::Print(e) => {
        let src = self.expr(e);
        self.push(Tac::Print { src: [src] });
      }
      StmtKind::Block(b) => self.block(b),
    }
  }

  // post-order: operands are lowered before the instruction that combines them;
  // the returned operand holds the expression's value
  fn expr<'a>(&mut self, e: &'a Expr<'a>) -> tac::Operand {
    match &e.kind {
      ExprKind::VarRef(v) => Reg(v.var.get().unwrap().slot.get()),
      ExprKind::IntLit(i) => Const(Value::Int(*i)),
      ExprKind::FloatLit(v) => Const(Value::Float(*v)),
      ExprKind::BoolLit(b) => Const(Value::Bool(*b)),
      ExprKind::Unary(u) => {
        let (r, dst) = (self.expr(&u.r), self.reg());
        self.push(Tac::Un { op: u.op, dst, r: [r] });
        Reg(dst)
      }
      ExprKind::Binary(b) => {
        let (l, r) = (self.expr(&b.l), self.expr(&b.r));
        let dst = self.reg();
        self.push(Tac::Bin { op: b.op, dst, lr: [l, r] });
        Reg(dst)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use syntax::ASTAlloc;
  use tac::Tac;

  fn lower(code: &str) -> TacProgram {
    let alloc = ASTAlloc::default();
    let p = syntax::parser::work(code, &alloc).unwrap();
    assert!(!typeck::work(p).has_errors());
    work(p)
  }

  #[test]
  fn while_shape() {
    // head label, exit test, body, back jump, exit label
    let p = lower("var i: int; while (i < 3) { i = i + 1; } print(i);");
    let shape = p.ins.iter().map(|t| match t {
      Tac::Label { label } => format!("L{}", label),
      Tac::Jif { label, z: true, .. } => format!("jz L{}", label),
      Tac::Jmp { label } => format!("jmp L{}", label),
      Tac::Bin { .. } => "bin".to_owned(),
      Tac::Assign { .. } => "assign".to_owned(),
      Tac::Print { .. } => "print".to_owned(),
      _ => "other".to_owned(),
    }).collect::<Vec<_>>();
    assert_eq!(shape, vec!["assign", "L0", "bin", "jz L1", "bin", "assign", "jmp L0", "L1", "print"]);
  }

  #[test]
  fn if_without_else_jumps_over_branch() {
    let p = lower("var y: int; if (1 > 0) { y = 1; } print(y);");
    let jif = p.ins.iter().find_map(|t| match t { Tac::Jif { label, z, .. } => Some((*label, *z)), _ => None }).unwrap();
    assert_eq!(jif, (0, true));
    assert!(p.ins.iter().any(|t| match t { Tac::Label { label: 0 } => true, _ => false }));
  }

  #[test]
  fn temporaries_are_single_assignment() {
    let p = lower("var x: int; x = (1 + 2) * (3 - 4); print(x);");
    let mut seen = std::collections::HashSet::new();
    for t in &p.ins {
      if let (_, Some(dst)) = t.rw() {
        if p.is_tmp(dst) { assert!(seen.insert(dst), "temporary %{} written twice", dst); }
      }
    }
    assert_eq!(p.reg_num - p.var_num, 3);
  }

  #[test]
  fn shadowed_names_are_disambiguated() {
    let p = lower("var x: int; x = 1; { var x: int; x = 2; print(x); } print(x);");
    assert_eq!(p.var_name, vec!["x".to_owned(), "x.1".to_owned()]);
  }
}
