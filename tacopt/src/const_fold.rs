use common::Value;
use tac::{Operand, Tac, TacProgram};

// a temporary is written exactly once, so the moment it is seen holding a
// constant that binding is valid everywhere and no flow analysis is needed.
// variables can be re-assigned (and re-entered through loop back edges), they
// are never treated as known. folding one instruction can make its consumer
// foldable, hence the outer fixpoint loop
pub fn work(p: &mut TacProgram) {
  let var_num = p.var_num;
  let mut known = vec![None::<Value>; p.reg_num as usize];
  loop {
    let mut changed = false;
    for t in &mut p.ins {
      // substitute known temporaries into the operands
      for r in t.rw_mut().0 {
        if let Operand::Reg(r1) = *r {
          if let Some(v) = known[r1 as usize] {
            *r = Operand::Const(v);
            changed = true;
          }
        }
      }
      // an instruction whose operands are all compile-time constants becomes a
      // single load of the computed constant
      let folded = match *t {
        Tac::Bin { op, dst, lr: [Operand::Const(l), Operand::Const(r)] } => op.try_eval(l, r).map(|v| (dst, v)),
        Tac::Un { op, dst, r: [Operand::Const(r)] } => op.try_eval(r).map(|v| (dst, v)),
        _ => None,
      };
      if let Some((dst, v)) = folded {
        *t = Tac::Assign { dst, src: [Operand::Const(v)] };
        changed = true;
      }
      if let Tac::Assign { dst, src: [Operand::Const(v)] } = *t {
        if dst >= var_num { known[dst as usize] = Some(v); }
      }
    }
    if !changed { break; }
  }
}
