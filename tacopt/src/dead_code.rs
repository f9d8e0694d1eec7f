use tac::{Operand, TacProgram};

// the observable-use set is every register some remaining instruction reads,
// jump conditions and printed values included. position is deliberately not
// part of the rule: a loop's back edge makes an earlier read observe a later
// write, so "read anywhere" is what keeps loop-carried updates alive.
// removing an instruction can strand its producers, hence the fixpoint loop
pub fn work(p: &mut TacProgram) {
  loop {
    let used = used_set(p);
    let before = p.ins.len();
    // only value-producing instructions are candidates; jumps, labels,
    // conditional jumps and prints are never removed
    p.ins.retain(|t| match t.rw() {
      (_, Some(dst)) => used[dst as usize],
      (_, None) => true,
    });
    if p.ins.len() == before { break; }
  }
}

pub fn used_set(p: &TacProgram) -> Vec<bool> {
  let mut used = vec![false; p.reg_num as usize];
  for t in &p.ins {
    for r in t.rw().0 {
      if let Operand::Reg(r) = r { used[*r as usize] = true; }
    }
  }
  used
}
