use driver::{compile, test_all, Alloc, CompileCfg, ResultKind, Stage};

fn run(code: &str, stage: Stage) -> Result<String, String> {
  let alloc = Alloc::default();
  match compile(code, &alloc, CompileCfg { stage }) {
    Ok(out) => Ok(out.code),
    Err(e) => Err(format!("{:?}", e)),
  }
}

#[test]
fn pipeline_is_deterministic() {
  let ok = "var x: int; x = 1 + 2; print(x);";
  let bad = "print(z);\nw = $;";
  for _ in 0..2 {
    assert_eq!(run(ok, Stage::Asm), run(ok, Stage::Asm));
    assert_eq!(run(bad, Stage::Asm), run(bad, Stage::Asm));
  }
}

#[test]
fn all_constant_program_optimizes_to_loads() {
  let out = run("var x: int; x = 1 + 2; print(x);", Stage::TacOpt).unwrap();
  assert_eq!(out, "x = 0\nx = 3\nprint x\n");
}

#[test]
fn unused_computation_vanishes() {
  let out = run("var x: int;\nx = 2 + 3 * 4;", Stage::Asm).unwrap();
  assert_eq!(out, "");
}

#[test]
fn warnings_ride_along_with_success() {
  let alloc = Alloc::default();
  let out = compile("var x: int; x = 1;", &alloc, CompileCfg { stage: Stage::Asm }).unwrap();
  assert_eq!(out.warning.0.len(), 1);
  assert_eq!(format!("{:?}", out.warning.0[0]), "warning: variable 'x' is never used at line 1, column 5");
}

#[test]
fn semantic_error_suppresses_lowering() {
  // one error, naming the variable and its position; no ir, no code
  let err = run("print(z);", Stage::Tac).unwrap_err();
  assert_eq!(err, "error: undeclared variable 'z' at line 1, column 7\n");
}

#[test]
fn constant_condition_keeps_both_branches() {
  let out = run("var y: int; if (1 > 0) { y = 1; } else { y = 2; } print(y);", Stage::Asm).unwrap();
  assert!(out.contains("JZ R0, L0"));
  assert!(out.contains("LOAD R0, #1"));
  assert!(out.contains("LOAD R0, #2"));
}

#[test]
fn lexical_and_syntax_errors_report_together() {
  let err = run("x = $ 1;\ny = ;", Stage::Asm).unwrap_err();
  let lines = err.lines().collect::<Vec<_>>();
  assert_eq!(lines.len(), 2);
  assert!(lines[0].starts_with("error: unrecognized character '$' at line 1"));
  assert!(lines[1].starts_with("error: expected an expression, found ';' at line 2"));
}

#[test]
fn early_stages_render_their_result() {
  assert!(run("var x: int; x = 1; print(x);", Stage::Parse).unwrap().starts_with("Program"));
  assert!(run("var x: int; x = 1; print(x);", Stage::Chk).unwrap().starts_with("GLOBAL SCOPE:"));
  // before optimization the addition is still a real instruction on a temporary
  assert!(run("var x: int; x = 1 + 2; print(x);", Stage::Tac).unwrap().contains("%t0 = (1 + 2)"));
}

#[test]
fn float_arithmetic_folds_too() {
  let out = run("var r: float; r = 1.5 * 2.0; print(r);", Stage::TacOpt).unwrap();
  assert_eq!(out, "r = 0.0\nr = 3.0\nprint r\n");
}

#[test]
fn data_driven() {
  let results = test_all(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata"), Stage::Asm).unwrap();
  assert_eq!(results.len(), 4);
  for r in &results {
    if let ResultKind::Pass = r.kind {} else { panic!("{:?}", r); }
  }
}
