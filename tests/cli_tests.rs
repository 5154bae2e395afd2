use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

mod common;

fn runner(config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("solution-runner").unwrap();
    cmd.env("NO_COLOR", "1").arg("--lang").arg("en").arg("--config").arg(config);
    cmd
}

/// Runs a shipped solution against the shipped test data and expects a clean
/// pass with the run header and the summary.
///
/// 使用内置测试数据运行内置解答，期望全部通过并输出运行头和摘要。
#[test]
fn test_successful_run() {
    let temp_dir = common::setup_workspace();
    let config = common::write_config(&temp_dir, &common::repo_solutions_dir(), "");

    runner(&config)
        .arg("test")
        .arg("min_stack")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution: min_stack"))
        .stdout(predicate::str::contains("Type: class"))
        .stdout(predicate::str::contains("Tests passed: 2/2"));
}

/// A failing case makes the process exit non-zero after the summary.
///
/// 失败的用例会使进程在输出摘要后以非零状态退出。
#[test]
fn test_failing_case_exits_non_zero() {
    let temp_dir = common::setup_workspace();
    let root = temp_dir.path().join("solutions");
    common::write_solution(&root, "reverse_list", &[("tests.txt", "[1,2,3]\n[1,2,3]\n")]);
    let config = common::write_config(&temp_dir, &root, "");

    runner(&config)
        .arg("test")
        .arg("reverse_list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Expected:"))
        .stdout(predicate::str::contains("Tests passed: 0/1"));
}

/// Malformed test data aborts the run with a data format error.
///
/// 格式错误的测试数据会以数据格式错误终止运行。
#[test]
fn test_malformed_data_is_fatal() {
    let temp_dir = common::setup_workspace();
    let root = temp_dir.path().join("solutions");
    common::write_solution(&root, "reverse_list", &[("tests.txt", "[1,2,3\n[3,2,1]\n")]);
    let config = common::write_config(&temp_dir, &root, "");

    runner(&config)
        .arg("test")
        .arg("reverse_list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Tests passed").not())
        .stderr(predicate::str::contains("Error:"))
        .stderr(predicate::str::contains("data format error"));
}

#[test]
fn test_unknown_solution() {
    let temp_dir = common::setup_workspace();
    let config = common::write_config(&temp_dir, &temp_dir.path().join("solutions"), "");

    runner(&config)
        .arg("test")
        .arg("no_such_solution")
        .assert()
        .failure()
        .stderr(predicate::str::contains("'no_such_solution' is not registered"));
}

#[test]
fn test_solution_by_problem_id_with_time() {
    let temp_dir = common::setup_workspace();
    let config = common::write_config(&temp_dir, &common::repo_solutions_dir(), "");

    runner(&config)
        .arg("test")
        .arg("206")
        .arg("--time")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution: reverse_list"))
        .stdout(predicate::str::contains("(Time: "));
}

#[test]
fn test_default_solution_is_used() {
    let temp_dir = common::setup_workspace();
    let root = temp_dir.path().join("solutions");
    common::write_solution(&root, "a_plus_b", &[("tests.txt", "1 1\n\n2\n")]);
    let config = common::write_config(
        &temp_dir,
        &root,
        "default_solution = \"a_plus_b\"\nlaunch_last_modified = false",
    );

    runner(&config)
        .arg("test")
        .assert()
        .success()
        .stdout(predicate::str::contains("Solution: a_plus_b"))
        .stdout(predicate::str::contains("Type: stream"));
}

#[test]
fn test_debug_prints_calls() {
    let temp_dir = common::setup_workspace();
    let root = temp_dir.path().join("solutions");
    common::write_solution(&root, "invert_tree", &[("tests.txt", "[2,1,3]\n[2,3,1]\n")]);
    let config = common::write_config(&temp_dir, &root, "");

    runner(&config)
        .arg("test")
        .arg("invert_tree")
        .arg("-d")
        .assert()
        .success()
        .stdout(predicate::str::contains("invertTree([2,1,3]): [2,3,1]"));
}

#[test]
fn test_list_shows_detected_testers() {
    let temp_dir = common::setup_workspace();
    let config = common::write_config(&temp_dir, &common::repo_solutions_dir(), "");

    runner(&config)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("two_sum"))
        .stdout(predicate::str::contains("method"))
        .stdout(predicate::str::contains("stream"));
}

#[test]
fn test_chinese_output() {
    let temp_dir = common::setup_workspace();
    let config = common::write_config(&temp_dir, &common::repo_solutions_dir(), "");

    let mut cmd = Command::cargo_bin("solution-runner").unwrap();
    cmd.env("NO_COLOR", "1")
        .arg("--lang")
        .arg("zh-CN")
        .arg("--config")
        .arg(&config)
        .arg("test")
        .arg("max_depth")
        .assert()
        .success()
        .stdout(predicate::str::contains("解答：max_depth"))
        .stdout(predicate::str::contains("通过测试：3/3"));
}
