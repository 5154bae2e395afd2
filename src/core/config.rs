//! # Configuration Module / 配置模块
//!
//! Two layers of configuration:
//!
//! - `RunnerConfig` - tool-wide settings loaded from `Runner.toml`
//! - `Settings` - per-solution settings declared in code, optionally
//!   overridden by a `settings.toml` file next to the solution's test data
//!
//! 两层配置：
//!
//! - `RunnerConfig` - 从 `Runner.toml` 加载的全局设置
//! - `Settings` - 在代码中声明的单个解答设置，可被解答测试数据旁的
//!   `settings.toml` 文件覆盖

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::error::{HarnessError, HarnessResult};
use crate::core::resolver::{Mode, Target};
use crate::core::solution::TargetError;

/// Tool-wide configuration, loaded from a TOML file.
/// 从 TOML 文件加载的全局配置。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RunnerConfig {
    /// The language for output messages (e.g., "en", "zh-CN"). Empty means
    /// the system locale.
    ///
    /// 输出消息的语言（例如 "en", "zh-CN"）。为空时使用系统语言。
    #[serde(default)]
    pub language: String,

    /// Width of the `[ TEST n ]` header lines.
    #[serde(default = "default_header_width")]
    pub header_width: usize,

    /// Reserved class name for method-mode targets.
    /// 方法模式目标的保留类名。
    #[serde(default = "default_solution_class_name")]
    pub solution_class_name: String,

    /// Reserved function name for the stream entry point.
    /// 流模式入口函数的保留名称。
    #[serde(default = "default_main_function_name")]
    pub main_function_name: String,

    /// Directory holding one sub-directory of test data per solution.
    /// `~` and `$VAR` are expanded.
    #[serde(default = "default_solutions_dir")]
    pub solutions_dir: String,

    #[serde(default = "default_tests_file_name")]
    pub tests_file_name: String,

    #[serde(default = "default_settings_file_name")]
    pub settings_file_name: String,

    #[serde(default = "default_data_file_name")]
    pub data_file_name: String,

    /// Solution used when none is given and no directory qualifies.
    #[serde(default = "default_solution")]
    pub default_solution: String,

    /// If `true`, the most recently modified solution directory is tested
    /// when no solution is named.
    ///
    /// 如果为 `true`，在未指定解答时测试最近修改的解答目录。
    #[serde(default = "default_launch_last_modified")]
    pub launch_last_modified: bool,
}

fn default_header_width() -> usize {
    40
}

fn default_solution_class_name() -> String {
    "Solution".to_string()
}

fn default_main_function_name() -> String {
    "main".to_string()
}

fn default_solutions_dir() -> String {
    "solutions".to_string()
}

fn default_tests_file_name() -> String {
    "tests.txt".to_string()
}

fn default_settings_file_name() -> String {
    "settings.toml".to_string()
}

fn default_data_file_name() -> String {
    "data.json".to_string()
}

fn default_solution() -> String {
    "main".to_string()
}

fn default_launch_last_modified() -> bool {
    true
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            language: String::new(),
            header_width: default_header_width(),
            solution_class_name: default_solution_class_name(),
            main_function_name: default_main_function_name(),
            solutions_dir: default_solutions_dir(),
            tests_file_name: default_tests_file_name(),
            settings_file_name: default_settings_file_name(),
            data_file_name: default_data_file_name(),
            default_solution: default_solution(),
            launch_last_modified: default_launch_last_modified(),
        }
    }
}

impl RunnerConfig {
    /// Loads the configuration from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns `HarnessError::Settings` if the file exists but is not valid TOML
    /// for this structure, and `HarnessError::Io` if it cannot be read.
    pub fn load(path: &Path) -> HarnessResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| HarnessError::Settings(format!("{}: {e}", path.display())))
    }

    /// The solutions directory with `~` and environment variables expanded.
    pub fn solutions_dir(&self) -> HarnessResult<PathBuf> {
        shellexpand::full(&self.solutions_dir)
            .map(|expanded| PathBuf::from(expanded.as_ref()))
            .map_err(|e| HarnessError::Settings(format!("solutions_dir: {e}")))
    }
}

/// Custom comparison: `(args_before, args_after, expected, actual) -> passed`.
pub type Validator = Rc<dyn Fn(&[Value], &[Value], Option<&Value>, &Value) -> bool>;

/// Produces one fresh `(args, expected)` pair per call.
pub type Generator = Rc<dyn Fn() -> (Vec<Value>, Option<Value>)>;

/// Replaces the default invocation of the resolved target.
pub type Runner = Rc<dyn Fn(&Target, &mut [Value]) -> Result<Value, TargetError>>;

/// One inline test definition.
/// 一条内联测试定义。
#[derive(Clone)]
pub enum InlineTest {
    Case {
        args: Vec<Value>,
        expected: Option<Value>,
    },
    /// `None` as generator is skipped. `count` defaults to 1.
    Generator {
        generator: Option<Generator>,
        count: Option<usize>,
    },
}

impl fmt::Debug for InlineTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InlineTest::Case { args, expected } => f
                .debug_struct("Case")
                .field("args", args)
                .field("expected", expected)
                .finish(),
            InlineTest::Generator { generator, count } => f
                .debug_struct("Generator")
                .field("generator", &generator.as_ref().map(|_| "<fn>"))
                .field("count", count)
                .finish(),
        }
    }
}

/// Per-solution settings declared in code.
/// 在代码中声明的单个解答设置。
#[derive(Clone, Default)]
pub struct Settings {
    pub target: Option<String>,
    pub tester: Option<Mode>,
    pub validator: Option<Validator>,
    pub runner: Option<Runner>,
    pub tests: Vec<InlineTest>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn tester(mut self, mode: Mode) -> Self {
        self.tester = Some(mode);
        self
    }

    pub fn validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&[Value], &[Value], Option<&Value>, &Value) -> bool + 'static,
    {
        self.validator = Some(Rc::new(validator));
        self
    }

    pub fn runner<F>(mut self, runner: F) -> Self
    where
        F: Fn(&Target, &mut [Value]) -> Result<Value, TargetError> + 'static,
    {
        self.runner = Some(Rc::new(runner));
        self
    }

    pub fn case(mut self, args: Vec<Value>, expected: Option<Value>) -> Self {
        self.tests.push(InlineTest::Case { args, expected });
        self
    }

    pub fn generator<F>(mut self, generator: F, count: Option<usize>) -> Self
    where
        F: Fn() -> (Vec<Value>, Option<Value>) + 'static,
    {
        self.tests.push(InlineTest::Generator {
            generator: Some(Rc::new(generator)),
            count,
        });
        self
    }

    /// Applies a settings file on top of these settings. File values win for
    /// `target` and `tester`; file tests run before the code-level ones.
    ///
    /// # Errors
    /// Returns `HarnessError::Settings` if the file names an unknown tester.
    pub fn merge_file(&mut self, file: SettingsFile) -> HarnessResult<()> {
        if let Some(target) = file.target {
            self.target = Some(target);
        }
        if let Some(tester) = file.tester {
            self.tester = Some(tester.parse::<Mode>().map_err(HarnessError::Settings)?);
        }
        let mut tests: Vec<InlineTest> = file
            .tests
            .into_iter()
            .map(|test| InlineTest::Case {
                args: test.args,
                expected: test.expected,
            })
            .collect();
        tests.append(&mut self.tests);
        self.tests = tests;
        Ok(())
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("target", &self.target)
            .field("tester", &self.tester)
            .field("validator", &self.validator.is_some())
            .field("runner", &self.runner.is_some())
            .field("tests", &self.tests)
            .finish()
    }
}

/// The `settings.toml` file of one solution.
/// 单个解答的 `settings.toml` 文件。
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsFile {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub tester: Option<String>,
    #[serde(default)]
    pub tests: Vec<FileTest>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileTest {
    pub args: Vec<Value>,
    #[serde(default)]
    pub expected: Option<Value>,
}

impl SettingsFile {
    /// Reads `path` if it exists.
    pub fn load(path: &Path) -> HarnessResult<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| HarnessError::Settings(format!("{}: {e}", path.display())))
    }
}
