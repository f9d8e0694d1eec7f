pub mod ast;
pub mod token;
pub mod lexer;
pub mod parser;

pub use ast::*;
pub use token::*;

// below are some helper functions for the parser

use common::{Errors, ErrorKind, Loc};

// save a little typing than writing "Default::default()"
pub(crate) fn dft<T: Default>() -> T { T::default() }

pub(crate) fn mk_stmt(loc: Loc, kind: StmtKind) -> Stmt { Stmt { loc, kind } }

pub(crate) fn mk_expr(loc: Loc, kind: ExprKind) -> Expr { Expr { loc, ty: dft(), kind } }

pub(crate) fn mk_int_lit<'a>(loc: Loc, s: &'a str, error: &mut Errors<'a>) -> Expr<'a> {
  let val: i64 = s.parse().unwrap_or_else(|_| error.issue(loc, ErrorKind::IntTooLarge(s)));
  mk_expr(loc, val.into())
}

// the lexer only admits digits with at most one '.', which `f64::from_str` always
// accepts, but going through the same issue-and-default path costs nothing
pub(crate) fn mk_float_lit<'a>(loc: Loc, s: &'a str, error: &mut Errors<'a>) -> Expr<'a> {
  let val: f64 = s.parse().unwrap_or_else(|_| error.issue(loc, ErrorKind::BadFloatLit(s)));
  mk_expr(loc, val.into())
}
