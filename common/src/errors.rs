use crate::{loc::Loc, ty::Ty};
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq)]
pub enum Severity { Warning, Error }

// which stage a diagnostic originated from; the final report is ordered by
// source position, not by stage
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Stage { Lexical, Syntax, Semantic }

pub struct Error<'a>(pub Loc, pub ErrorKind<'a>);

// Errors implements Debug, it prints diagnostics line by line
pub struct Errors<'a>(pub Vec<Error<'a>>);

impl Default for Errors<'_> {
  fn default() -> Self { Self(vec![]) }
}

impl<'a> Errors<'a> {
  // issuing a diagnostic usually coincides with returning some default value
  // (the error type, false, None), letting that value be deduced saves typing at every call site
  pub fn issue<T: Default>(&mut self, loc: Loc, e: ErrorKind<'a>) -> T {
    self.0.push(Error(loc, e));
    Default::default()
  }

  pub fn sorted(mut self) -> Self {
    self.0.sort_unstable_by_key(|e| e.0);
    self
  }

  // warnings alone don't fail a compilation
  pub fn has_errors(&self) -> bool {
    self.0.iter().any(|e| e.1.severity() == Severity::Error)
  }
}

pub enum ErrorKind<'a> {
  UnrecognizedChar(char),
  IntTooLarge(&'a str),
  BadFloatLit(&'a str),
  UnexpectedToken { expected: &'static str, found: &'a str },
  ConflictDeclaration { prev: Loc, name: &'a str },
  UndeclaredVar(&'a str),
  IncompatibleBinary { l: Ty, op: &'static str, r: Ty },
  IncompatibleUnary { op: &'static str, r: Ty },
  TestNotBool,
  UnusedVar(&'a str),
}

impl ErrorKind<'_> {
  pub fn severity(&self) -> Severity {
    match self { ErrorKind::UnusedVar(_) => Severity::Warning, _ => Severity::Error }
  }

  pub fn stage(&self) -> Stage {
    use ErrorKind::*;
    match self {
      UnrecognizedChar(_) | IntTooLarge(_) | BadFloatLit(_) => Stage::Lexical,
      UnexpectedToken { .. } => Stage::Syntax,
      _ => Stage::Semantic,
    }
  }
}

impl fmt::Debug for Severity {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self { Severity::Warning => write!(f, "warning"), Severity::Error => write!(f, "error") }
  }
}

impl fmt::Debug for ErrorKind<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    use ErrorKind::*;
    match self {
      UnrecognizedChar(ch) => write!(f, "unrecognized character '{}'", ch),
      IntTooLarge(s) => write!(f, "integer literal {} is too large", s),
      BadFloatLit(s) => write!(f, "invalid float literal {}", s),
      UnexpectedToken { expected, found } => if found.is_empty() {
        write!(f, "expected {}, found end of input", expected)
      } else {
        write!(f, "expected {}, found '{}'", expected, found)
      }
      ConflictDeclaration { prev, name } => write!(f, "declaration of '{}' conflicts with earlier declaration at line {}, column {}", name, prev.0, prev.1),
      UndeclaredVar(name) => write!(f, "undeclared variable '{}'", name),
      IncompatibleBinary { l, op, r } => write!(f, "incompatible operands: {:?} {} {:?}", l, op, r),
      IncompatibleUnary { op, r } => write!(f, "incompatible operand: {} {:?}", op, r),
      TestNotBool => write!(f, "test expression must have bool type"),
      UnusedVar(name) => write!(f, "variable '{}' is never used", name),
    }
  }
}

impl fmt::Debug for Error<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:?}: {:?} at line {}, column {}", self.1.severity(), self.1, (self.0).0, (self.0).1)
  }
}

impl fmt::Debug for Errors<'_> {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for e in &self.0 { writeln!(f, "{:?}", e)? }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn report_format() {
    let mut e = Errors::default();
    e.issue::<()>(Loc(3, 14), ErrorKind::UndeclaredVar("z"));
    assert_eq!(format!("{:?}", e), "error: undeclared variable 'z' at line 3, column 14\n");
    assert!(e.has_errors());
  }

  #[test]
  fn warnings_do_not_fail() {
    let mut e = Errors::default();
    e.issue::<()>(Loc(1, 5), ErrorKind::UnusedVar("x"));
    assert!(!e.has_errors());
    assert_eq!(e.0[0].1.severity(), Severity::Warning);
    assert_eq!(e.0[0].1.stage(), Stage::Semantic);
    assert_eq!(format!("{:?}", e.0[0]), "warning: variable 'x' is never used at line 1, column 5");
  }

  #[test]
  fn sorted_by_position() {
    let mut e = Errors::default();
    e.issue::<()>(Loc(2, 9), ErrorKind::UndeclaredVar("b"));
    e.issue::<()>(Loc(1, 1), ErrorKind::UndeclaredVar("a"));
    let e = e.sorted();
    assert_eq!((e.0[0].0, e.0[1].0), (Loc(1, 1), Loc(2, 9)));
  }
}
