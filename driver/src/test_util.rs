use std::{fmt, fs, io, path::{Path, PathBuf}};
use colored::*;
use crate::{Alloc, CompileCfg, Stage};

// run every `.mini` file under `path` at `stage` and compare the result
// against the `.result` file sitting next to it. a compilation that fails with
// diagnostics contributes its diagnostic report as the result, so error cases
// are data-driven too
pub fn test_all(path: impl AsRef<Path>, stage: Stage) -> io::Result<Vec<TestResult>> {
  let path = path.as_ref();
  let mut files = fs::read_dir(path)?.filter_map(|f| {
    let path = f.ok()?.path();
    let name = path.file_name()?.to_str()?; // in normal case none of the above ? will fail
    if path.is_file() && name.ends_with(".mini") { Some(path) } else { None }
  }).collect::<Vec<_>>();
  files.sort_unstable(); // the order of fs::read_dir may be strange, sort them for better debugging
  Ok(files.iter().map(|f| test_one(f, f.with_extension("result"), stage)).collect())
}

pub fn test_one(i: impl AsRef<Path>, ans: impl AsRef<Path>, stage: Stage) -> TestResult {
  let kind = run(&i, stage).and_then(|out| Ok((out, fs::read_to_string(&ans)?)))
    .map_or_else(ResultKind::IOError, |(out, ans)| ResultKind::new(&out, &ans));
  TestResult { file: i.as_ref().into(), ans: ans.as_ref().into(), kind }
}

pub fn run(i: impl AsRef<Path>, stage: Stage) -> io::Result<String> {
  let code = fs::read_to_string(i)?;
  let alloc = Alloc::default();
  Ok(match crate::compile(&code, &alloc, CompileCfg { stage }) {
    Ok(out) => out.code,
    Err(e) => format!("{:?}", e),
  })
}

pub struct TestResult {
  pub file: PathBuf,
  pub ans: PathBuf,
  pub kind: ResultKind,
}

pub enum ResultKind {
  Pass,
  Fail { first_diff: usize, out: String, ans: String },
  IOError(io::Error),
}

impl ResultKind {
  pub fn new(out: &str, ans: &str) -> ResultKind {
    let (mut out_lines, mut ans_lines) = (out.lines(), ans.lines());
    let mut first_diff = 1;
    // no builtin iter adapter implements "zip and pad the shorter one", do it by hand
    loop {
      match (out_lines.next(), ans_lines.next()) {
        (None, None) => break ResultKind::Pass,
        (out, ans) => {
          let (out, ans) = (out.unwrap_or(""), ans.unwrap_or(""));
          if out != ans {
            break ResultKind::Fail { first_diff, out: out.to_owned(), ans: ans.to_owned() };
          }
        }
      }
      first_diff += 1;
    }
  }
}

impl fmt::Debug for TestResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: ", self.file.display())?;
    match &self.kind {
      ResultKind::Pass => write!(f, "{}", "Pass".green()),
      ResultKind::Fail { first_diff, out, ans } => {
        writeln!(f, "{}: {}", "Fail".red(), format!("first different line on {}", first_diff).yellow())?;
        writeln!(f, "{}", format!("your line: \"{}\"", out).yellow())?;
        write!(f, "{}", format!("ans  line: \"{}\" ({}:{})", ans, self.ans.display(), first_diff).yellow())
      }
      ResultKind::IOError(e) => write!(f, "{}: {}", "IOError".red(), e.to_string().yellow()),
    }
  }
}
