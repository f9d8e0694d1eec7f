use crate::token::{Token, TokenKind};
use common::{ErrorKind, Errors, Loc};

pub struct Lexer<'a> {
  src: &'a str,
  pos: usize,
  loc: Loc,
}

impl<'a> Lexer<'a> {
  pub fn new(src: &'a str) -> Lexer<'a> {
    Lexer { src, pos: 0, loc: Loc(1, 1) }
  }

  // whitespace and `#` comments produce no tokens; an unrecognized character is
  // reported and skipped, so one pass can surface every lexical problem
  pub fn tokenize(mut self, error: &mut Errors<'a>) -> Vec<Token<'a>> {
    let mut tokens = Vec::new();
    loop {
      self.skip_ignored();
      let loc = self.loc;
      let ch = match self.peek() {
        Some(ch) => ch,
        None => {
          tokens.push(Token { kind: TokenKind::Eof, piece: "", loc });
          break tokens;
        }
      };
      if ch.is_ascii_alphabetic() || ch == '_' {
        tokens.push(self.ident(loc));
      } else if ch.is_ascii_digit() {
        if let Some(t) = self.number(loc, error) { tokens.push(t); }
      } else if let Some(t) = self.operator(loc) {
        tokens.push(t);
      } else {
        error.issue::<()>(loc, ErrorKind::UnrecognizedChar(ch));
        self.advance();
      }
    }
  }

  fn peek(&self) -> Option<char> { self.src[self.pos..].chars().next() }

  fn advance(&mut self) {
    if let Some(ch) = self.peek() {
      self.pos += ch.len_utf8();
      if ch == '\n' { self.loc.next_line(); } else { self.loc.next_col(); }
    }
  }

  fn skip_ignored(&mut self) {
    loop {
      match self.peek() {
        Some(ch) if ch.is_whitespace() => self.advance(),
        Some('#') => while let Some(ch) = self.peek() {
          self.advance();
          if ch == '\n' { break; }
        }
        _ => break,
      }
    }
  }

  // reserved words are checked before falling back to identifier
  fn ident(&mut self, loc: Loc) -> Token<'a> {
    let start = self.pos;
    while let Some(ch) = self.peek() {
      if ch.is_ascii_alphanumeric() || ch == '_' { self.advance(); } else { break; }
    }
    let piece = &self.src[start..self.pos];
    Token { kind: keyword(piece).unwrap_or(TokenKind::Id), piece, loc }
  }

  fn number(&mut self, loc: Loc, error: &mut Errors<'a>) -> Option<Token<'a>> {
    let start = self.pos;
    let mut dots = 0;
    while let Some(ch) = self.peek() {
      if ch.is_ascii_digit() { self.advance(); } else if ch == '.' {
        dots += 1;
        self.advance();
      } else { break; }
    }
    let piece = &self.src[start..self.pos];
    if dots > 1 {
      return error.issue(loc, ErrorKind::BadFloatLit(piece));
    }
    Some(Token { kind: if dots == 1 { TokenKind::FloatLit } else { TokenKind::IntLit }, piece, loc })
  }

  fn operator(&mut self, loc: Loc) -> Option<Token<'a>> {
    use TokenKind::*;
    let rest = &self.src[self.pos..];
    // two-character operators before their one-character prefixes (longest match)
    for &(s, kind) in &[("==", Eq), ("!=", Ne), ("<=", Le), (">=", Ge), ("&&", And), ("||", Or)] {
      if rest.starts_with(s) {
        self.advance();
        self.advance();
        return Some(Token { kind, piece: &rest[..2], loc });
      }
    }
    let kind = match rest.as_bytes()[0] {
      b'+' => Add, b'-' => Sub, b'*' => Mul, b'/' => Div,
      b'=' => Assign, b'<' => Lt, b'>' => Gt, b'!' => Not,
      b'(' => LPar, b')' => RPar, b'{' => LBrc, b'}' => RBrc, b';' => Semi, b':' => Colon,
      _ => return None,
    };
    self.advance();
    Some(Token { kind, piece: &rest[..1], loc })
  }
}

fn keyword(s: &str) -> Option<TokenKind> {
  use TokenKind::*;
  Some(match s {
    "var" => Var, "int" => Int, "float" => Float, "bool" => Bool,
    "if" => If, "else" => Else, "while" => While, "print" => Print,
    "true" => True, "false" => False,
    _ => return None,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use common::Errors;

  fn kinds(src: &str) -> Vec<TokenKind> {
    let mut error = Errors::default();
    let tokens = Lexer::new(src).tokenize(&mut error);
    assert!(error.0.is_empty(), "unexpected lexical errors: {:?}", error);
    tokens.iter().map(|t| t.kind).collect()
  }

  #[test]
  fn keywords_before_identifiers() {
    use TokenKind::*;
    assert_eq!(kinds("var x whilex while"), vec![Var, Id, Id, While, Eof]);
  }

  #[test]
  fn longest_match_operators() {
    use TokenKind::*;
    assert_eq!(kinds(">= > ="), vec![Ge, Gt, Assign, Eof]);
    assert_eq!(kinds("==="), vec![Eq, Assign, Eof]);
    assert_eq!(kinds("!!="), vec![Not, Ne, Eof]);
  }

  #[test]
  fn numbers() {
    use TokenKind::*;
    assert_eq!(kinds("12 3.5 0"), vec![IntLit, FloatLit, IntLit, Eof]);
  }

  #[test]
  fn comments_and_positions() {
    let mut error = Errors::default();
    let tokens = Lexer::new("x # rest is ignored\n  y").tokenize(&mut error);
    assert!(error.0.is_empty());
    assert_eq!(tokens[0].loc, Loc(1, 1));
    assert_eq!(tokens[1].loc, Loc(2, 3));
    assert_eq!((tokens[0].piece, tokens[1].piece), ("x", "y"));
  }

  #[test]
  fn bad_char_is_skipped_and_reported() {
    let mut error = Errors::default();
    let tokens = Lexer::new("a $ b").tokenize(&mut error);
    assert_eq!(tokens.len(), 3); // a, b, Eof
    assert_eq!(error.0.len(), 1);
    assert_eq!(format!("{:?}", error.0[0]), "error: unrecognized character '$' at line 1, column 3");
  }

  #[test]
  fn float_with_two_dots_is_reported() {
    let mut error = Errors::default();
    let tokens = Lexer::new("1.2.3;").tokenize(&mut error);
    assert_eq!(error.0.len(), 1);
    // the malformed literal itself is dropped, lexing continues behind it
    assert_eq!(tokens.iter().map(|t| t.kind).collect::<Vec<_>>(), vec![TokenKind::Semi, TokenKind::Eof]);
  }

  #[test]
  fn exactly_one_eof() {
    let mut error = Errors::default();
    let tokens = Lexer::new("").tokenize(&mut error);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
  }
}
