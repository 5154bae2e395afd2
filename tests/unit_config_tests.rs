//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Loading of the runner configuration and of per-solution settings files,
//! and how the two settings layers merge.
//!
//! 运行器配置和单个解答设置文件的加载，以及两层设置的合并方式。

mod common;

use serde_json::json;
use solution_runner::core::config::{InlineTest, RunnerConfig, Settings, SettingsFile};
use solution_runner::core::resolver::Mode;
use solution_runner::core::HarnessError;
use std::fs;

#[cfg(test)]
mod runner_config_tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = common::setup_workspace();
        let config = RunnerConfig::load(&temp_dir.path().join("absent.toml")).unwrap();

        assert_eq!(config.header_width, 40);
        assert_eq!(config.solution_class_name, "Solution");
        assert_eq!(config.main_function_name, "main");
        assert_eq!(config.tests_file_name, "tests.txt");
        assert!(config.launch_last_modified);
    }

    #[test]
    fn test_values_override_defaults() {
        let temp_dir = common::setup_workspace();
        let path = common::write_config(
            &temp_dir,
            &temp_dir.path().join("solutions"),
            "header_width = 60\ndefault_solution = \"two_sum\"",
        );
        let config = RunnerConfig::load(&path).unwrap();

        assert_eq!(config.header_width, 60);
        assert_eq!(config.default_solution, "two_sum");
        assert_eq!(config.solutions_dir().unwrap(), temp_dir.path().join("solutions"));
    }

    #[test]
    fn test_invalid_toml_is_settings_error() {
        let temp_dir = common::setup_workspace();
        let path = temp_dir.path().join("Runner.toml");
        fs::write(&path, "header_width = [40\n").unwrap();

        assert!(matches!(RunnerConfig::load(&path), Err(HarnessError::Settings(_))));
    }
}

#[cfg(test)]
mod settings_file_tests {
    use super::*;

    #[test]
    fn test_settings_file_is_optional() {
        let temp_dir = common::setup_workspace();
        assert!(SettingsFile::load(&temp_dir.path().join("settings.toml")).unwrap().is_none());
    }

    #[test]
    fn test_file_values_win_and_file_tests_come_first() {
        let temp_dir = common::setup_workspace();
        let dir = common::write_solution(
            temp_dir.path(),
            "demo",
            &[(
                "settings.toml",
                "target = \"Other.solve\"\ntester = \"method\"\n\n[[tests]]\nargs = [[1, 2]]\nexpected = 3\n",
            )],
        );
        let file = SettingsFile::load(&dir.join("settings.toml")).unwrap().unwrap();

        let mut settings = Settings::new()
            .target("solve")
            .tester(Mode::Function)
            .case(vec![json!([4])], None);
        settings.merge_file(file).unwrap();

        assert_eq!(settings.target.as_deref(), Some("Other.solve"));
        assert_eq!(settings.tester, Some(Mode::Method));
        match &settings.tests[..] {
            [InlineTest::Case { args, expected }, InlineTest::Case { .. }] => {
                assert_eq!(args, &vec![json!([1, 2])]);
                assert_eq!(expected, &Some(json!(3)));
            }
            other => panic!("unexpected tests: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_tester_is_settings_error() {
        let file = SettingsFile {
            target: None,
            tester: Some("fuzz".to_string()),
            tests: Vec::new(),
        };
        let err = Settings::new().merge_file(file).unwrap_err();
        assert!(matches!(err, HarnessError::Settings(message) if message.contains("fuzz")));
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let temp_dir = common::setup_workspace();
        let dir = common::write_solution(temp_dir.path(), "demo", &[("settings.toml", "timeout = 3\n")]);
        assert!(matches!(
            SettingsFile::load(&dir.join("settings.toml")),
            Err(HarnessError::Settings(_))
        ));
    }
}
