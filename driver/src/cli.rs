use driver::{Alloc, CompileCfg, Stage};
use clap::{App, Arg};
use std::{fs, io, process};

fn main() -> io::Result<()> {
  let matches = App::new("minic")
    .arg(Arg::with_name("input").required(true))
    .arg(Arg::with_name("output").long("output").short("o").takes_value(true))
    .arg(Arg::with_name("stage").long("stage").short("s").takes_value(true).default_value("asm"))
    .get_matches();
  let stage = match matches.value_of("stage").unwrap() {
    s if s.eq_ignore_ascii_case("parse") => Stage::Parse,
    s if s.eq_ignore_ascii_case("chk") => Stage::Chk,
    s if s.eq_ignore_ascii_case("tac") => Stage::Tac,
    s if s.eq_ignore_ascii_case("tacopt") => Stage::TacOpt,
    s if s.eq_ignore_ascii_case("asm") => Stage::Asm,
    s => {
      eprintln!("invalid stage: `{}`", s);
      process::exit(1);
    }
  };
  let input = matches.value_of("input").unwrap();
  let code = fs::read_to_string(input)?;
  let alloc = Alloc::default();
  match driver::compile(&code, &alloc, CompileCfg { stage }) {
    Ok(out) => {
      eprint!("{:?}", out.warning);
      if let Some(output) = matches.value_of("output") {
        fs::write(output, &out.code)
      } else {
        print!("{}", out.code);
        Ok(())
      }
    }
    Err(e) => {
      eprint!("{:?}", e);
      process::exit(1);
    }
  }
}
