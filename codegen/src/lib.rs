pub mod asm;

pub use asm::*;

use common::{IndexMap, IndexSet};
use tac::{Operand, Tac, TacProgram};
use std::fmt;

// scratch registers of the fixed mapping: operands load into R0/R1, results
// build in R2, every result is stored back to its cell immediately
const LHS: Reg = Reg(0);
const RHS: Reg = Reg(1);
const DST: Reg = Reg(2);

// an upstream stage broke the instruction contract; this is a defect in the
// compiler, not a flaw in the input program, so it is kept apart from the
// user-facing diagnostics
#[derive(Eq, PartialEq)]
pub enum InternalError {
  UndefinedLabel { label: u32 },
  ReadBeforeProduce { reg: u32 },
}

impl fmt::Debug for InternalError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      InternalError::UndefinedLabel { label } => write!(f, "jump to a label (id {}) that no instruction defines", label),
      InternalError::ReadBeforeProduce { reg } => write!(f, "storage slot %{} is read before anything produced it", reg),
    }
  }
}

// expands each instruction through the static table; performs no validation of
// the program's meaning, only the two consistency checks above can fail
pub fn work(p: &TacProgram) -> Result<Vec<AsmTemplate>, InternalError> {
  AsmGen { p, asm: Vec::new(), label: IndexMap::default(), produced: IndexSet::default() }.program()
}

struct AsmGen<'p> {
  p: &'p TacProgram,
  asm: Vec<AsmTemplate>,
  // tac label id -> target label name, named in order of appearance
  label: IndexMap<u32, String>,
  // registers some earlier instruction stored; insertion order is the order
  // their memory cells come into existence
  produced: IndexSet<u32>,
}

impl AsmGen<'_> {
  fn program(mut self) -> Result<Vec<AsmTemplate>, InternalError> {
    // jumps can target labels that appear later, collect all of them first
    for t in &self.p.ins {
      if let Tac::Label { label } = t {
        let name = format!("L{}", self.label.len());
        self.label.insert(*label, name);
      }
    }
    for t in &self.p.ins {
      self.ins(*t)?;
    }
    Ok(self.asm)
  }

  fn ins(&mut self, t: Tac) -> Result<(), InternalError> {
    match t {
      Tac::Assign { dst, src: [src] } => {
        self.load(LHS, src)?;
        self.store(LHS, dst);
      }
      Tac::Bin { op, dst, lr: [l, r] } => {
        self.load(LHS, l)?;
        self.load(RHS, r)?;
        if op.is_cmp() {
          self.asm.push(AsmTemplate::Cmp(LHS, RHS));
          self.asm.push(AsmTemplate::Set(op, DST));
        } else {
          self.asm.push(AsmTemplate::Bin(op, DST, LHS, RHS));
        }
        self.store(DST, dst);
      }
      Tac::Un { op, dst, r: [r] } => {
        self.load(LHS, r)?;
        self.asm.push(AsmTemplate::Un(op, RHS, LHS));
        self.store(RHS, dst);
      }
      Tac::Print { src: [src] } => {
        self.load(LHS, src)?;
        self.asm.push(AsmTemplate::Prt(LHS));
      }
      Tac::Jmp { label } => {
        let l = self.label_name(label)?;
        self.asm.push(AsmTemplate::J(l));
      }
      Tac::Jif { label, z, cond: [cond] } => {
        self.load(LHS, cond)?;
        let l = self.label_name(label)?;
        self.asm.push(if z { AsmTemplate::Jz(LHS, l) } else { AsmTemplate::Jnz(LHS, l) });
      }
      Tac::Label { label } => {
        let l = self.label_name(label)?;
        self.asm.push(AsmTemplate::Label(l));
      }
    }
    Ok(())
  }

  fn load(&mut self, to: Reg, src: Operand) -> Result<(), InternalError> {
    match src {
      Operand::Const(v) => self.asm.push(AsmTemplate::Li(to, Imm(v))),
      Operand::Reg(r) => {
        if !self.produced.contains(&r) {
          return Err(InternalError::ReadBeforeProduce { reg: r });
        }
        let cell = self.cell(r);
        self.asm.push(AsmTemplate::Ld(to, cell));
      }
    }
    Ok(())
  }

  fn store(&mut self, from: Reg, dst: u32) {
    self.produced.insert(dst);
    let cell = self.cell(dst);
    self.asm.push(AsmTemplate::St(from, cell));
  }

  fn cell(&self, r: u32) -> String {
    if self.p.is_tmp(r) { format!("t{}", r - self.p.var_num) } else { self.p.var_name[r as usize].clone() }
  }

  fn label_name(&self, label: u32) -> Result<String, InternalError> {
    self.label.get(&label).cloned().ok_or(InternalError::UndefinedLabel { label })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use common::{BinOp, Value};
  // explicit, not a glob: `Operand::Reg` must not collide with `asm::Reg` from super
  use tac::Operand::{Const, Reg};

  fn program(var_num: u32, reg_num: u32, ins: Vec<Tac>) -> TacProgram {
    let var_name = (0..var_num).map(|i| format!("v{}", i)).collect();
    TacProgram { var_num, reg_num, label_num: 0, var_name, ins }
  }

  fn listing(asm: &[AsmTemplate]) -> Vec<String> {
    asm.iter().map(|t| format!("{:?}", t)).collect()
  }

  #[test]
  fn assign_expands_to_load_store() {
    let p = program(1, 1, vec![Tac::Assign { dst: 0, src: [Const(Value::Int(14))] }]);
    assert_eq!(listing(&work(&p).unwrap()), vec!["LOAD R0, #14", "STORE R0, v0"]);
  }

  #[test]
  fn comparison_goes_through_cmp_set() {
    let p = program(1, 2, vec![
      Tac::Assign { dst: 0, src: [Const(Value::Int(1))] },
      Tac::Bin { op: BinOp::Lt, dst: 1, lr: [Reg(0), Const(Value::Int(3))] },
    ]);
    assert_eq!(listing(&work(&p).unwrap()), vec![
      "LOAD R0, #1", "STORE R0, v0",
      "LOAD R0, v0", "LOAD R1, #3", "CMP R0, R1", "SETLT R2", "STORE R2, t0",
    ]);
  }

  #[test]
  fn labels_are_renumbered_in_order_of_appearance() {
    let p = program(0, 0, vec![
      Tac::Jmp { label: 7 },
      Tac::Label { label: 7 },
      Tac::Label { label: 3 },
      Tac::Jmp { label: 3 },
    ]);
    assert_eq!(listing(&work(&p).unwrap()), vec!["JMP L0", "L0:", "L1:", "JMP L1"]);
  }

  #[test]
  fn bool_immediates_degrade_to_ints() {
    let p = program(0, 1, vec![
      Tac::Assign { dst: 0, src: [Const(Value::Bool(true))] },
      Tac::Jif { label: 0, z: true, cond: [Reg(0)] },
      Tac::Label { label: 0 },
    ]);
    assert_eq!(listing(&work(&p).unwrap()), vec!["LOAD R0, #1", "STORE R0, t0", "LOAD R0, t0", "JZ R0, L0", "L0:"]);
  }

  #[test]
  fn undefined_label_is_an_internal_error() {
    let p = program(0, 0, vec![Tac::Jmp { label: 2 }]);
    assert_eq!(work(&p).unwrap_err(), InternalError::UndefinedLabel { label: 2 });
  }

  #[test]
  fn read_before_produce_is_an_internal_error() {
    let p = program(1, 1, vec![Tac::Print { src: [Reg(0)] }]);
    assert_eq!(work(&p).unwrap_err(), InternalError::ReadBeforeProduce { reg: 0 });
  }
}
