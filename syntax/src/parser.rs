use crate::{ast::*, dft, lexer::Lexer, mk_expr, mk_float_lit, mk_int_lit, mk_stmt, token::*};
use common::{BinOp, ErrorKind, Errors, Loc, Ty, UnOp};

// lexes and parses `code`; Ok only when neither stage recorded a diagnostic
pub fn work<'a>(code: &'a str, alloc: &'a ASTAlloc<'a>) -> Result<&'a Program<'a>, Errors<'a>> {
  let mut error = Errors::default();
  let tokens = Lexer::new(code).tokenize(&mut error);
  let mut parser = Parser { tokens, pos: 0, alloc, error };
  let program = parser.program();
  if parser.error.0.is_empty() { Ok(parser.alloc.program.alloc(program)) } else { Err(parser.error.sorted()) }
}

// predictive descent: every rule commits to a production by looking at one
// unconsumed token. a failed match returns None instead of unwinding; the
// statement loop turns that into panic-mode resynchronization, so several
// independent syntax errors surface in one run
pub struct Parser<'a> {
  tokens: Vec<Token<'a>>,
  pos: usize,
  alloc: &'a ASTAlloc<'a>,
  error: Errors<'a>,
}

impl<'a> Parser<'a> {
  fn peek(&self) -> Token<'a> { self.tokens[self.pos] }

  fn bump(&mut self) -> Token<'a> {
    let t = self.tokens[self.pos];
    if t.kind != TokenKind::Eof { self.pos += 1; }
    t
  }

  fn eat(&mut self, kind: TokenKind) -> Option<Token<'a>> {
    if self.peek().kind == kind { Some(self.bump()) } else { None }
  }

  fn expect(&mut self, kind: TokenKind, expected: &'static str) -> Option<Token<'a>> {
    match self.eat(kind) {
      Some(t) => Some(t),
      None => {
        let t = self.peek();
        self.error.issue(t.loc, ErrorKind::UnexpectedToken { expected, found: t.piece })
      }
    }
  }

  // drop tokens until just past a ';', or stop in front of a '}' / end of input
  fn synchronize(&mut self) {
    loop {
      match self.peek().kind {
        TokenKind::Semi => {
          self.bump();
          break;
        }
        TokenKind::RBrc | TokenKind::Eof => break,
        _ => { self.bump(); }
      }
    }
  }

  fn program(&mut self) -> Program<'a> {
    let loc = self.peek().loc;
    let stmt = self.stmt_list(TokenKind::Eof);
    Program { body: Block { loc, stmt, scope: dft() }, var_num: dft() }
  }

  fn stmt_list(&mut self, end: TokenKind) -> Vec<Stmt<'a>> {
    let mut stmt = Vec::new();
    while self.peek().kind != end && self.peek().kind != TokenKind::Eof {
      match self.stmt() {
        Some(s) => stmt.push(s),
        None => self.synchronize(),
      }
    }
    stmt
  }

  fn stmt(&mut self) -> Option<Stmt<'a>> {
    use TokenKind::*;
    let t = self.peek();
    match t.kind {
      Var => self.var_def(),
      Id => self.assign(),
      If => self.if_stmt(),
      While => self.while_stmt(),
      Print => self.print_stmt(),
      LBrc => Some(mk_stmt(t.loc, self.block()?.into())),
      _ => {
        // consume the offender, otherwise resynchronization could stop right
        // back on it and report the same token forever
        self.bump();
        self.error.issue(t.loc, ErrorKind::UnexpectedToken { expected: "a statement", found: t.piece })
      }
    }
  }

  fn var_def(&mut self) -> Option<Stmt<'a>> {
    let loc = self.bump().loc; // 'var'
    let name = self.expect(TokenKind::Id, "an identifier")?;
    self.expect(TokenKind::Colon, "':'")?;
    let ty = self.ty()?;
    self.expect(TokenKind::Semi, "';'")?;
    let v = &*self.alloc.var.alloc(VarDef { loc: name.loc, name: name.piece, ty, depth: dft(), slot: dft(), used: dft() });
    Some(mk_stmt(loc, v.into()))
  }

  fn ty(&mut self) -> Option<Ty> {
    let t = self.peek();
    match t.kind {
      TokenKind::Int => (self.bump(), Some(Ty::Int)).1,
      TokenKind::Float => (self.bump(), Some(Ty::Float)).1,
      TokenKind::Bool => (self.bump(), Some(Ty::Bool)).1,
      _ => self.error.issue(t.loc, ErrorKind::UnexpectedToken { expected: "a type", found: t.piece }),
    }
  }

  fn assign(&mut self) -> Option<Stmt<'a>> {
    let name = self.bump(); // Id
    self.expect(TokenKind::Assign, "'='")?;
    let src = self.expr()?;
    self.expect(TokenKind::Semi, "';'")?;
    Some(mk_stmt(name.loc, Assign { name: name.piece, var: dft(), src }.into()))
  }

  fn if_stmt(&mut self) -> Option<Stmt<'a>> {
    let loc = self.bump().loc; // 'if'
    self.expect(TokenKind::LPar, "'('")?;
    let cond = self.expr()?;
    self.expect(TokenKind::RPar, "')'")?;
    let on_true = self.block()?;
    let on_false = if self.eat(TokenKind::Else).is_some() {
      // `else if` is an else block holding the single nested if
      if self.peek().kind == TokenKind::If {
        let s = self.if_stmt()?;
        Some(Block { loc: s.loc, stmt: vec![s], scope: dft() })
      } else {
        Some(self.block()?)
      }
    } else { None };
    Some(mk_stmt(loc, Box::new(If { cond, on_true, on_false }).into()))
  }

  fn while_stmt(&mut self) -> Option<Stmt<'a>> {
    let loc = self.bump().loc; // 'while'
    self.expect(TokenKind::LPar, "'('")?;
    let cond = self.expr()?;
    self.expect(TokenKind::RPar, "')'")?;
    let body = self.block()?;
    Some(mk_stmt(loc, While { cond, body }.into()))
  }

  fn print_stmt(&mut self) -> Option<Stmt<'a>> {
    let loc = self.bump().loc; // 'print'
    self.expect(TokenKind::LPar, "'('")?;
    let e = self.expr()?;
    self.expect(TokenKind::RPar, "')'")?;
    self.expect(TokenKind::Semi, "';'")?;
    Some(mk_stmt(loc, StmtKind::Print(e)))
  }

  fn block(&mut self) -> Option<Block<'a>> {
    let loc = self.expect(TokenKind::LBrc, "'{'")?.loc;
    let stmt = self.stmt_list(TokenKind::RBrc);
    self.expect(TokenKind::RBrc, "'}'")?;
    Some(Block { loc, stmt, scope: dft() })
  }

  // precedence is the grammar's layering: every layer is left-associative
  // over the operators it owns and calls the next tighter layer for operands
  fn expr(&mut self) -> Option<Expr<'a>> { self.or_expr() }

  fn or_expr(&mut self) -> Option<Expr<'a>> {
    let mut l = self.and_expr()?;
    while let Some(t) = self.eat(TokenKind::Or) {
      l = mk_bin(BinOp::Or, l, self.and_expr()?, t.loc);
    }
    Some(l)
  }

  fn and_expr(&mut self) -> Option<Expr<'a>> {
    let mut l = self.cmp_expr()?;
    while let Some(t) = self.eat(TokenKind::And) {
      l = mk_bin(BinOp::And, l, self.cmp_expr()?, t.loc);
    }
    Some(l)
  }

  fn cmp_expr(&mut self) -> Option<Expr<'a>> {
    use TokenKind::*;
    let mut l = self.add_expr()?;
    loop {
      let t = self.peek();
      let op = match t.kind {
        Eq => BinOp::Eq, Ne => BinOp::Ne, Lt => BinOp::Lt, Le => BinOp::Le, Gt => BinOp::Gt, Ge => BinOp::Ge,
        _ => break Some(l),
      };
      self.bump();
      l = mk_bin(op, l, self.add_expr()?, t.loc);
    }
  }

  fn add_expr(&mut self) -> Option<Expr<'a>> {
    let mut l = self.mul_expr()?;
    loop {
      let t = self.peek();
      let op = match t.kind { TokenKind::Add => BinOp::Add, TokenKind::Sub => BinOp::Sub, _ => break Some(l) };
      self.bump();
      l = mk_bin(op, l, self.mul_expr()?, t.loc);
    }
  }

  fn mul_expr(&mut self) -> Option<Expr<'a>> {
    let mut l = self.unary_expr()?;
    loop {
      let t = self.peek();
      let op = match t.kind { TokenKind::Mul => BinOp::Mul, TokenKind::Div => BinOp::Div, _ => break Some(l) };
      self.bump();
      l = mk_bin(op, l, self.unary_expr()?, t.loc);
    }
  }

  fn unary_expr(&mut self) -> Option<Expr<'a>> {
    let t = self.peek();
    let op = match t.kind {
      TokenKind::Sub => UnOp::Neg,
      TokenKind::Not => UnOp::Not,
      _ => return self.primary(),
    };
    self.bump();
    let r = self.unary_expr()?;
    Some(mk_expr(t.loc, Unary { op, r: Box::new(r) }.into()))
  }

  fn primary(&mut self) -> Option<Expr<'a>> {
    use TokenKind::*;
    let t = self.peek();
    match t.kind {
      IntLit => {
        self.bump();
        Some(mk_int_lit(t.loc, t.piece, &mut self.error))
      }
      FloatLit => {
        self.bump();
        Some(mk_float_lit(t.loc, t.piece, &mut self.error))
      }
      True => (self.bump(), Some(mk_expr(t.loc, true.into()))).1,
      False => (self.bump(), Some(mk_expr(t.loc, false.into()))).1,
      Id => {
        self.bump();
        Some(mk_expr(t.loc, VarRef { name: t.piece, var: dft() }.into()))
      }
      LPar => {
        self.bump();
        let e = self.expr()?;
        self.expect(RPar, "')'")?;
        Some(e)
      }
      _ => self.error.issue(t.loc, ErrorKind::UnexpectedToken { expected: "an expression", found: t.piece }),
    }
  }
}

fn mk_bin<'a>(op: BinOp, l: Expr<'a>, r: Expr<'a>, loc: Loc) -> Expr<'a> {
  mk_expr(loc, Binary { op, l: Box::new(l), r: Box::new(r) }.into())
}
