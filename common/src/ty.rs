use std::fmt;

// the language's types; `Error` marks a node that already produced a diagnostic,
// it is compatible with everything so one mistake is reported exactly once
// (like the operators below, this lives here because typeck, tac and codegen all need it)
#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Ty { Int, Float, Bool, Error }

impl Default for Ty {
  fn default() -> Self { Ty::Error }
}

impl Ty {
  pub fn is_numeric(self) -> bool {
    match self { Ty::Int | Ty::Float => true, _ => false }
  }
}

impl fmt::Debug for Ty {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Ty::Int => write!(f, "int"),
      Ty::Float => write!(f, "float"),
      Ty::Bool => write!(f, "bool"),
      Ty::Error => write!(f, "error"),
    }
  }
}
