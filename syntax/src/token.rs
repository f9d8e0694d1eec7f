use common::Loc;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TokenKind {
  // keywords
  Var, Int, Float, Bool, If, Else, While, Print, True, False,
  // operators
  Add, Sub, Mul, Div, Assign, Eq, Ne, Lt, Le, Gt, Ge, And, Or, Not,
  // delimiters
  LPar, RPar, LBrc, RBrc, Semi, Colon,
  Id, IntLit, FloatLit,
  // exactly one Eof terminates every token sequence
  Eof,
}

// `piece` borrows the source text; the Eof token's piece is the empty string
#[derive(Copy, Clone)]
pub struct Token<'a> {
  pub kind: TokenKind,
  pub piece: &'a str,
  pub loc: Loc,
}
