use super::*;
use crate::process::{ProcessOutput, ScriptedRunner};

fn toolchain(runner: &ScriptedRunner) -> (tempfile::TempDir, ZephyrToolchain) {
    let dir = tempfile::tempdir().unwrap();
    let tc = ZephyrToolchain::new(dir.path(), Arc::new(runner.clone()));
    (dir, tc)
}

#[tokio::test]
async fn test_clone_builds_recursive_command() {
    let runner = ScriptedRunner::new();
    let (_dir, tc) = toolchain(&runner);

    tc.clone_repo("https://example.com/repo.git").await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].program, "git");
    assert_eq!(calls[0].args[..3], ["clone", "--recursive", "https://example.com/repo.git"]);
    assert_eq!(
        calls[0].args[3],
        tc.project_path().to_string_lossy().to_string()
    );
}

#[tokio::test]
async fn test_clone_network_failure_is_classified() {
    let runner = ScriptedRunner::new();
    runner.push(Ok(ProcessOutput::failure(
        128,
        "fatal: unable to access 'https://example.com/repo.git/': Could not resolve host: example.com",
    )));
    let (_dir, tc) = toolchain(&runner);

    let err = tc.clone_repo("https://example.com/repo.git").await.unwrap_err();
    assert_eq!(failure_category(&err), Some(FailureCategory::NetworkIssue));
}

#[tokio::test]
async fn test_clone_rejects_unsafe_url() {
    let runner = ScriptedRunner::new();
    let (_dir, tc) = toolchain(&runner);

    let err = tc.clone_repo("file:///etc; rm -rf /").await.unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn test_switch_pr_runs_fetch_checkout_update() {
    let runner = ScriptedRunner::new();
    let (_dir, tc) = toolchain(&runner);

    tc.switch_pr(42).await.unwrap();

    let calls = runner.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].args, vec!["fetch", "origin", "pull/42/head:pr-42"]);
    assert_eq!(calls[1].args, vec!["checkout", "pr-42"]);
    assert_eq!(calls[2].program, "west");
    assert!(calls.iter().all(|c| c.cwd.as_deref() == Some(tc.project_path())));
}

#[tokio::test]
async fn test_switch_pr_invalid_reference_stops_early() {
    let runner = ScriptedRunner::new();
    runner.push(Ok(ProcessOutput::failure(128, "fatal: invalid refspec 'pull/9999/head'")));
    let (_dir, tc) = toolchain(&runner);

    let err = tc.switch_pr(9999).await.unwrap_err();
    assert_eq!(failure_category(&err), Some(FailureCategory::InvalidReference));
    assert_eq!(runner.calls().len(), 1);
}

#[tokio::test]
async fn test_compile_missing_west() {
    let runner = ScriptedRunner::new();
    runner.push(Err(Error::NotFound("west".to_string())));
    let (_dir, tc) = toolchain(&runner);

    let err = tc.compile("nrf52840dk_nrf52840").await.unwrap_err();
    assert_eq!(failure_category(&err), Some(FailureCategory::MissingPrerequisite));
}

#[tokio::test]
async fn test_compile_passes_board() {
    let runner = ScriptedRunner::new();
    let (_dir, tc) = toolchain(&runner);

    tc.compile("qemu_x86").await.unwrap();
    assert_eq!(runner.calls()[0].args, vec!["build", "-b", "qemu_x86", "."]);
}

#[tokio::test]
async fn test_run_tests_splits_args() {
    let runner = ScriptedRunner::new();
    runner.push(Ok(ProcessOutput::success("2 of 2 test configurations passed")));
    let (_dir, tc) = toolchain(&runner);

    let out = tc.run_tests(Some("-T tests/kernel  -p qemu_x86")).await.unwrap();

    assert!(out.contains("passed"));
    assert_eq!(
        runner.calls()[0].args,
        vec!["twister", "-T", "tests/kernel", "-p", "qemu_x86"]
    );
}

#[tokio::test]
async fn test_run_tests_no_tests_found() {
    let runner = ScriptedRunner::new();
    runner.push(Ok(ProcessOutput::failure(1, "ERROR - No tests found")));
    let (_dir, tc) = toolchain(&runner);

    let err = tc.run_tests(None).await.unwrap_err();
    assert_eq!(failure_category(&err), Some(FailureCategory::NoTestsFound));
}

#[tokio::test]
async fn test_check_environment_reports_missing() {
    let runner = ScriptedRunner::new();
    // cmake ok, ninja missing, rest ok
    runner.push(Ok(ProcessOutput::success("cmake 3.28")));
    runner.push(Err(Error::NotFound("ninja".to_string())));
    let (_dir, tc) = toolchain(&runner);

    let report = tc.check_environment().await;
    assert_eq!(report.missing, vec!["ninja".to_string()]);
    assert!(!report.is_ready());
    // five tools + one python package
    assert_eq!(runner.calls().len(), 6);
}

#[tokio::test]
async fn test_setup_environment_installs_when_missing() {
    let runner = ScriptedRunner::new();
    runner.push(Ok(ProcessOutput::success("")));
    runner.push(Ok(ProcessOutput::success("")));
    runner.push(Ok(ProcessOutput::success("")));
    runner.push(Ok(ProcessOutput::failure(1, "")));
    let (_dir, tc) = toolchain(&runner);

    let report = tc.setup_environment().await.unwrap();
    assert!(report.installed);
    assert_eq!(report.missing, vec!["west".to_string()]);

    let calls = runner.calls();
    assert_eq!(calls[6].args, vec!["install", "west"]);
    assert_eq!(calls[7].args, vec!["update"]);
}

#[tokio::test]
async fn test_setup_environment_ready_skips_install() {
    let runner = ScriptedRunner::new();
    let (_dir, tc) = toolchain(&runner);

    let report = tc.setup_environment().await.unwrap();
    assert!(report.is_ready());
    assert!(!report.installed);
    assert_eq!(runner.calls().len(), 6);
}

#[test]
fn test_board_validation() {
    assert!(is_valid_board_name("nrf52840dk_nrf52840"));
    assert!(is_valid_board_name("native_posix/native/64"));
    assert!(!is_valid_board_name("-b"));
    assert!(!is_valid_board_name("x; rm"));
    assert!(!is_valid_board_name(""));
}

#[test]
fn test_set_project_path_absolutizes() {
    let runner = ScriptedRunner::new();
    let mut tc = ZephyrToolchain::new(".", Arc::new(runner));
    tc.set_project_path("zephyrproject");
    assert!(tc.project_path().is_absolute());
    assert!(tc.project_path().ends_with("zephyrproject"));
}
