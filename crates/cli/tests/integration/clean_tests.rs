use predicates::prelude::*;
use serial_test::serial;

use super::common::TestEnv;

#[test]
#[serial]
fn clean_removes_previous_output() {
  let env = TestEnv::with_toolchain(0);
  let out = env.output_path("x64");
  std::fs::create_dir_all(&out).unwrap();
  std::fs::write(out.join("stale.dll"), b"old").unwrap();

  env.pubwin_cmd().arg("--clean").assert().success();

  assert!(!out.join("stale.dll").exists());
  let calls = env.calls();
  assert_eq!(calls.len(), 2);
  assert!(calls[0].starts_with("clean "), "{}", calls[0]);
  assert!(calls[0].ends_with("-c Release"), "{}", calls[0]);
  assert!(calls[1].starts_with("publish "), "{}", calls[1]);
}

#[test]
#[serial]
fn clean_without_previous_output_succeeds() {
  let env = TestEnv::with_toolchain(0);

  env
    .pubwin_cmd()
    .args(["--clean", "-c", "Debug"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Publish complete!"));

  assert!(env.calls()[0].ends_with("-c Debug"));
}

#[test]
#[serial]
fn failed_clean_stops_before_publish() {
  let env = TestEnv::with_toolchain(5);

  env
    .pubwin_cmd()
    .arg("--clean")
    .assert()
    .code(5)
    .stderr(predicate::str::contains("clean failed (exit code 5)"));

  assert_eq!(env.calls().len(), 1);
}

#[test]
#[serial]
fn dry_run_clean_keeps_previous_output() {
  let env = TestEnv::with_toolchain(0);
  let out = env.output_path("x64");
  std::fs::create_dir_all(&out).unwrap();

  env.pubwin_cmd().args(["--clean", "--dry-run"]).assert().success();

  assert!(out.exists());
}
