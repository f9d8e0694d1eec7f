use common::{BinOp, Loc, Ty, UnOp};
use typed_arena::Arena;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

// a scope maps a name to its declaration; nesting lives in the scope stack, not here.
// this map is stored in arena-allocated AST nodes and borrowed for the arena's own
// lifetime, so its element type carries that self-referential lifetime; std's HashMap
// has the dropck eyepatch (may_dangle) that makes such a borrow check, which hashbrown's
// does not. iteration order never reaches output (scopes and diagnostics are loc-sorted
// before printing), so the backing map is an implementation detail here.
pub type Scope<'a> = HashMap<&'a str, &'a VarDef<'a>>;

#[derive(Default)]
pub struct ASTAlloc<'a> {
  pub(crate) program: Arena<Program<'a>>,
  pub(crate) var: Arena<VarDef<'a>>,
}

// all Cell fields in the tree are initialized by the semantic pass:
// scopes and the fields of VarDef when a declaration is processed,
// `var` on references when a name resolves, `ty` on every expression

pub struct Program<'a> {
  // the top level is an implicit block, its scope is the global scope
  pub body: Block<'a>,
  // total number of storage slots handed out to variables;
  // the ir generator numbers temporaries above it
  pub var_num: Cell<u32>,
}

pub struct VarDef<'a> {
  pub loc: Loc,
  pub name: &'a str,
  pub ty: Ty,
  pub depth: Cell<u32>,
  pub slot: Cell<u32>,
  pub used: Cell<bool>,
}

pub struct Stmt<'a> {
  pub loc: Loc,
  pub kind: StmtKind<'a>,
}

#[derive(derive_more::From)]
pub enum StmtKind<'a> {
  VarDef(&'a VarDef<'a>),
  Assign(Assign<'a>),
  If(Box<If<'a>>),
  While(While<'a>),
  Print(Expr<'a>),
  Block(Block<'a>),
}

pub struct Assign<'a> {
  pub name: &'a str,
  pub var: Cell<Option<&'a VarDef<'a>>>,
  pub src: Expr<'a>,
}

pub struct If<'a> {
  pub cond: Expr<'a>,
  pub on_true: Block<'a>,
  pub on_false: Option<Block<'a>>,
}

pub struct While<'a> {
  pub cond: Expr<'a>,
  pub body: Block<'a>,
}

pub struct Block<'a> {
  pub loc: Loc,
  pub stmt: Vec<Stmt<'a>>,
  pub scope: RefCell<Scope<'a>>,
}

pub struct Expr<'a> {
  pub loc: Loc,
  pub ty: Cell<Ty>,
  pub kind: ExprKind<'a>,
}

#[derive(derive_more::From)]
pub enum ExprKind<'a> {
  VarRef(VarRef<'a>),
  IntLit(i64),
  FloatLit(f64),
  BoolLit(bool),
  Unary(Unary<'a>),
  Binary(Binary<'a>),
}

pub struct VarRef<'a> {
  pub name: &'a str,
  pub var: Cell<Option<&'a VarDef<'a>>>,
}

pub struct Unary<'a> {
  pub op: UnOp,
  pub r: Box<Expr<'a>>,
}

pub struct Binary<'a> {
  pub op: BinOp,
  pub l: Box<Expr<'a>>,
  pub r: Box<Expr<'a>>,
}
