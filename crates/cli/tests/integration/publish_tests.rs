use predicates::prelude::*;
use serial_test::serial;

use pubwin_lib::testutil::BUILD_LOG_LINE;

use super::common::TestEnv;

#[test]
#[serial]
fn publish_reports_output_and_artifact_size() {
  let env = TestEnv::with_artifact("App.exe", 2_621_440);

  env
    .pubwin_cmd()
    .args(["-a", "arm64", "--self-contained"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Publish complete!"))
    .stdout(predicate::str::contains("win-arm64"))
    .stdout(predicate::str::contains("2.50 MiB"));

  let calls = env.calls();
  assert_eq!(calls.len(), 1);
  let expected_out = env.output_path("arm64");
  assert!(calls[0].contains(&format!("-o {}", expected_out.display())), "{}", calls[0]);
  assert!(calls[0].ends_with("--self-contained true"), "{}", calls[0]);
}

#[test]
#[serial]
fn missing_artifact_omits_size_line() {
  let env = TestEnv::with_toolchain(0);

  env
    .pubwin_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains("Publish complete!"))
    .stdout(predicate::str::contains("Size").not());
}

#[test]
#[serial]
fn custom_artifact_name_is_probed() {
  let env = TestEnv::with_artifact("Tool.exe", 1_048_576);

  env
    .pubwin_cmd()
    .args(["--artifact", "Tool.exe"])
    .assert()
    .success()
    .stdout(predicate::str::contains("1.00 MiB"));
}

#[test]
#[serial]
fn toolchain_failure_exit_code_is_preserved() {
  let env = TestEnv::with_toolchain(42);

  env
    .pubwin_cmd()
    .assert()
    .code(42)
    .stdout(predicate::str::contains("Publish complete").not())
    .stderr(predicate::str::contains("publish failed (exit code 42)"));
}

#[test]
#[serial]
fn missing_toolchain_fails() {
  let env = TestEnv::without_toolchain();

  env
    .pubwin_cmd()
    .assert()
    .code(1)
    .stderr(predicate::str::contains("toolchain not found"));
}

#[test]
#[serial]
fn single_file_and_trim_flags_are_forwarded() {
  let env = TestEnv::with_toolchain(0);

  env
    .pubwin_cmd()
    .args(["--self-contained", "--single-file", "--trimmed", "-c", "Debug", "-a", "x86"])
    .assert()
    .success();

  let calls = env.calls();
  assert_eq!(calls.len(), 1);
  assert!(calls[0].contains("-c Debug -r win-x86"), "{}", calls[0]);
  assert!(
    calls[0].ends_with(
      "--self-contained true -p:PublishSingleFile=true -p:IncludeNativeLibrariesForSelfExtract=true -p:PublishTrimmed=true"
    ),
    "{}",
    calls[0]
  );
}

#[test]
#[serial]
fn trimmed_alone_warns_and_promotes() {
  let env = TestEnv::with_toolchain(0);

  env
    .pubwin_cmd()
    .arg("--trimmed")
    .assert()
    .success()
    .stderr(predicate::str::contains("enabling --self-contained"));

  let calls = env.calls();
  assert!(calls[0].ends_with("--self-contained true -p:PublishTrimmed=true"), "{}", calls[0]);
}

#[test]
#[serial]
fn explicit_output_dir_is_used() {
  let env = TestEnv::with_artifact("App.exe", 10);
  let out = env.temp.path().join("custom-out");

  env.pubwin_cmd().arg("-o").arg(&out).assert().success();

  assert!(out.join("App.exe").exists());
  assert!(env.calls()[0].contains(&format!("-o {}", out.display())));
}

#[test]
#[serial]
fn json_output_contains_report() {
  let env = TestEnv::with_artifact("App.exe", 1_572_864);

  let assert = env
    .pubwin_cmd()
    .args(["--format", "json"])
    .assert()
    .success()
    .stdout(predicate::str::contains(BUILD_LOG_LINE).not())
    .stderr(predicate::str::contains(BUILD_LOG_LINE));

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
  assert_eq!(report["runtime_identifier"], "win-x64");
  assert_eq!(report["configuration"], "Release");
  assert_eq!(report["artifact"]["bytes"], 1_572_864);
  assert_eq!(report["artifact"]["size_mib"], 1.5);
}

#[test]
#[serial]
fn dry_run_prints_commands_without_running() {
  let env = TestEnv::with_toolchain(0);

  env
    .pubwin_cmd()
    .args(["--dry-run", "--clean"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Dry run"))
    .stdout(predicate::str::contains(" clean "))
    .stdout(predicate::str::contains(" publish "));

  assert!(env.calls().is_empty());
}

#[test]
#[serial]
fn text_output_shows_toolchain_log() {
  let env = TestEnv::with_toolchain(0);

  env
    .pubwin_cmd()
    .assert()
    .success()
    .stdout(predicate::str::contains(BUILD_LOG_LINE));
}

#[test]
#[serial]
fn unreadable_artifact_does_not_fail_publish() {
  let env = TestEnv::with_artifact("App.exe", 10);

  env
    .pubwin_cmd()
    .args(["--artifact", "App.exe/inner"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Publish complete!"))
    .stdout(predicate::str::contains("Size").not());

  assert_eq!(env.calls().len(), 1);
}
