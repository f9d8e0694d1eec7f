use common::{BinOp, UnOp, Value};
use std::fmt;

// the hypothetical target machine: eight general purpose registers R0..R7
// (the fixed mapping in lib.rs only ever touches three of them), named memory
// cells, and immediate operands written #v
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Reg(pub u32);

#[derive(Copy, Clone, PartialEq)]
pub struct Imm(pub Value);

pub enum AsmTemplate {
  Ld(Reg, String),
  Li(Reg, Imm),
  St(Reg, String),
  Bin(BinOp, Reg, Reg, Reg),
  // comparisons go through CMP + SETcc instead of a three-register form
  Cmp(Reg, Reg),
  Set(BinOp, Reg),
  Un(UnOp, Reg, Reg),
  J(String),
  Jz(Reg, String),
  Jnz(Reg, String),
  Prt(Reg),
  Label(String),
}

impl fmt::Debug for Reg {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "R{}", self.0)
  }
}

impl fmt::Debug for Imm {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    // the machine has no boolean registers, immediates degrade to 0/1
    match self.0 {
      Value::Bool(b) => write!(f, "#{}", b as i32),
      v => write!(f, "#{:?}", v),
    }
  }
}

impl fmt::Debug for AsmTemplate {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    use AsmTemplate::*;
    match self {
      Ld(d, m) => write!(f, "LOAD {:?}, {}", d, m),
      Li(d, i) => write!(f, "LOAD {:?}, {:?}", d, i),
      St(s, m) => write!(f, "STORE {:?}, {}", s, m),
      Bin(op, d, l, r) => write!(f, "{} {:?}, {:?}, {:?}", bin_str(*op), d, l, r),
      Cmp(l, r) => write!(f, "CMP {:?}, {:?}", l, r),
      Set(op, d) => write!(f, "{} {:?}", bin_str(*op), d),
      Un(op, d, r) => write!(f, "{} {:?}, {:?}", un_str(*op), d, r),
      J(l) => write!(f, "JMP {}", l),
      Jz(r, l) => write!(f, "JZ {:?}, {}", r, l),
      Jnz(r, l) => write!(f, "JNZ {:?}, {}", r, l),
      Prt(r) => write!(f, "PRINT {:?}", r),
      Label(l) => write!(f, "{}:", l),
    }
  }
}

// one table covers every opcode: arithmetic and logic keep their three-register
// mnemonic, comparisons name the SETcc that consumes the preceding CMP
pub fn bin_str(op: BinOp) -> &'static str {
  use BinOp::*;
  match op {
    Add => "ADD", Sub => "SUB", Mul => "MUL", Div => "DIV", And => "AND", Or => "OR",
    Eq => "SETEQ", Ne => "SETNE", Lt => "SETLT", Le => "SETLE", Gt => "SETGT", Ge => "SETGE",
  }
}

pub fn un_str(op: UnOp) -> &'static str {
  match op { UnOp::Neg => "NEG", UnOp::Not => "NOT" }
}
