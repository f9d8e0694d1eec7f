pub mod const_fold;
pub mod dead_code;

use tac::TacProgram;

// the two passes in their fixed order; each already iterates to its own
// fixpoint, and both are total: they rewrite or drop instructions but never fail
pub fn work(p: &mut TacProgram) {
  const_fold::work(p);
  dead_code::work(p);
}
