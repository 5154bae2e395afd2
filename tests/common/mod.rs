// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

use solution_runner::core::execution::{RunOptions, TestSources, test_solution};
use solution_runner::core::results::RunStatistics;
use solution_runner::core::solution::SolutionModule;
use solution_runner::core::HarnessResult;
use solution_runner::reporting::MemorySink;

/// The solutions directory shipped with the crate.
pub fn repo_solutions_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("solutions")
}

/// Creates a scratch workspace with an empty solutions directory.
pub fn setup_workspace() -> TempDir {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    fs::create_dir_all(temp_dir.path().join("solutions")).expect("Failed to create solutions directory");
    temp_dir
}

/// Writes a runner configuration pointing at `solutions_dir`.
pub fn write_config(temp_dir: &TempDir, solutions_dir: &Path, extra: &str) -> PathBuf {
    let config_path = temp_dir.path().join("Runner.toml");
    let content = format!(
        "language = \"en\"\nsolutions_dir = {:?}\n{extra}\n",
        solutions_dir.display().to_string()
    );
    fs::write(&config_path, content).expect("Failed to write Runner.toml");
    config_path
}

/// Writes the data files of one solution directory.
pub fn write_solution(root: &Path, name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("Failed to create solution directory");
    for (file, content) in files {
        fs::write(dir.join(file), content).expect("Failed to write solution file");
    }
    dir
}

/// Runs `module` on `tests_text` with default options, collecting the reports.
pub fn run_module(module: &SolutionModule, tests_text: &str) -> (HarnessResult<RunStatistics>, MemorySink) {
    run_module_with(module, tests_text, &RunOptions::default())
}

pub fn run_module_with(
    module: &SolutionModule,
    tests_text: &str,
    options: &RunOptions,
) -> (HarnessResult<RunStatistics>, MemorySink) {
    let mut sink = MemorySink::new();
    let sources = TestSources {
        tests_text: Some(tests_text.to_string()),
        settings_file: None,
    };
    let result = test_solution(module, sources, options, &mut sink);
    (result, sink)
}
