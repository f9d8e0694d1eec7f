use common::{IgnoreResult, IndentPrinter};
use tac::{Operand, Tac, TacProgram};
use std::fmt::{self, Write};

// renders an operand with its surface name: variables by name, temporaries as
// %tN, constants as themselves
struct Op<'p>(&'p TacProgram, Operand);

impl fmt::Debug for Op<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self.1 {
      Operand::Const(v) => write!(f, "{:?}", v),
      Operand::Reg(r) => if self.0.is_tmp(r) {
        write!(f, "%t{}", r - self.0.var_num)
      } else {
        write!(f, "{}", self.0.var_name[r as usize])
      }
    }
  }
}

pub fn program(pr: &TacProgram, p: &mut IndentPrinter) {
  for t in &pr.ins { write_tac(*t, pr, p); }
}

pub fn write_tac(t: Tac, pr: &TacProgram, p: &mut IndentPrinter) {
  use Tac::*;
  let reg = |r| Op(pr, Operand::Reg(r));
  match t {
    Bin { op, dst, lr } => write!(p, "{:?} = ({:?} {} {:?})", reg(dst), Op(pr, lr[0]), op.to_op_str(), Op(pr, lr[1])),
    Un { op, dst, r } => write!(p, "{:?} = {} {:?}", reg(dst), op.to_op_str(), Op(pr, r[0])),
    Assign { dst, src } => write!(p, "{:?} = {:?}", reg(dst), Op(pr, src[0])),
    Print { src } => write!(p, "print {:?}", Op(pr, src[0])),
    Jmp { label } => write!(p, "branch L{}", label),
    Jif { label, z, cond } => write!(p, "if ({:?} {} 0) branch L{}", Op(pr, cond[0]), if z { "==" } else { "!=" }, label),
    Label { label } => write!(p, "L{}:", label),
  }.ignore();
}
