use syntax::{Block, VarDef};

pub(crate) struct ScopeStack<'a> {
  stack: Vec<&'a Block<'a>>,
}

impl<'a> ScopeStack<'a> {
  pub fn new() -> Self {
    Self { stack: vec![] }
  }

  // innermost scope first, so nested declarations shadow outer ones
  pub fn lookup(&self, name: &str) -> Option<&'a VarDef<'a>> {
    self.stack.iter().rev().filter_map(|b| b.scope.borrow().get(name).copied()).next()
  }

  // only consults the innermost scope, for detecting same-scope redeclaration
  pub fn lookup_current(&self, name: &str) -> Option<&'a VarDef<'a>> {
    self.stack.last().and_then(|b| b.scope.borrow().get(name).copied())
  }

  // the pass opens the program body before touching any statement, so the
  // stack is never empty here
  pub fn declare(&mut self, v: &'a VarDef<'a>) {
    self.stack.last().unwrap().scope.borrow_mut().insert(v.name, v);
  }

  pub fn open(&mut self, b: &'a Block<'a>) { self.stack.push(b); }

  pub fn close(&mut self) { self.stack.pop().unwrap(); }

  // the global scope is depth 0
  pub fn depth(&self) -> u32 { self.stack.len() as u32 - 1 }
}
