//! # Test Execution Module / 测试执行模块
//!
//! The orchestrator of one solution run. It merges the settings, selects the
//! testing strategy, resolves the target once, and then feeds it every test
//! case in order: the tests file first, then the inline cases and generators
//! from the settings. Each case is split, validated, run and judged; the
//! summary is emitted after the last one.
//!
//! 单个解答运行的编排器。它合并设置、选择测试策略、只解析一次目标，
//! 然后按顺序执行所有测试用例：先是测试文件，然后是设置中的内联用例和生成器。
//! 每个用例依次经过拆分、验证、运行和判定；最后一个用例之后输出摘要。

use std::path::Path;

use crate::core::config::{InlineTest, RunnerConfig, Settings, SettingsFile};
use crate::core::error::{HarnessError, HarnessResult};
use crate::core::resolver::Conventions;
use crate::core::results::{ReportOptions, RunStatistics};
use crate::core::solution::SolutionModule;
use crate::core::testers::{self, TestCase, Tester};
use crate::infra::{fs, t};
use crate::reporting::{Level, ReportSink};

/// Switches of one run.
/// 单次运行的开关。
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub show_time: bool,
    pub debug: bool,
    pub header_width: usize,
    pub conventions: Conventions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            show_time: false,
            debug: false,
            header_width: ReportOptions::default().header_width,
            conventions: Conventions::default(),
        }
    }
}

impl RunOptions {
    pub fn from_config(config: &RunnerConfig, show_time: bool, debug: bool) -> Self {
        Self {
            show_time,
            debug,
            header_width: config.header_width,
            conventions: Conventions::from(config),
        }
    }

    fn report_options(&self) -> ReportOptions {
        ReportOptions {
            show_time: self.show_time,
            header_width: self.header_width,
        }
    }
}

/// The file-backed test sources of a solution.
/// 解答基于文件的测试来源。
#[derive(Debug, Default)]
pub struct TestSources {
    /// Content of the tests file.
    pub tests_text: Option<String>,
    pub settings_file: Option<SettingsFile>,
}

impl TestSources {
    /// Reads the tests file and the settings file from `dir`. Both are optional.
    ///
    /// # Errors
    /// Returns `HarnessError::Io` if a file exists but cannot be read, and
    /// `HarnessError::Settings` if the settings file is malformed.
    pub fn load(dir: &Path, config: &RunnerConfig) -> HarnessResult<Self> {
        Ok(Self {
            tests_text: fs::read_optional(&dir.join(&config.tests_file_name))?,
            settings_file: SettingsFile::load(&dir.join(&config.settings_file_name))?,
        })
    }
}

/// Runs every test of `module` and returns the statistics of the run.
///
/// # Errors
/// Any `HarnessError` aborts the run: no further case is executed and no
/// summary is emitted.
///
/// 运行 `module` 的全部测试并返回本次运行的统计。
pub fn test_solution(
    module: &SolutionModule,
    sources: TestSources,
    options: &RunOptions,
    sink: &mut dyn ReportSink,
) -> HarnessResult<RunStatistics> {
    let mut settings = module.settings.clone();
    if let Some(file) = sources.settings_file {
        settings.merge_file(file)?;
    }

    let mode = match settings.tester {
        Some(mode) => mode,
        None => testers::detect(module, &options.conventions).ok_or_else(|| HarnessError::Resolution {
            mode: "any".to_string(),
            module: module.name.clone(),
            reason: "no tester accepts the solution".to_string(),
        })?,
    };
    let tester = testers::build(mode, module, settings.target.as_deref(), &options.conventions)?;

    sink.message(Level::Message, &t!("run_solution", name = module.name));
    sink.message(Level::Message, &t!("run_mode", mode = mode));

    let mut run = CaseRunner {
        tester: tester.as_ref(),
        settings: &settings,
        options,
        stats: RunStatistics::new(),
    };

    if let Some(text) = sources.tests_text {
        for tuple in run.tester.parse_test_data(&text)? {
            let case = run.tester.split(tuple)?;
            run.execute(case, sink)?;
        }
    }

    for test in &settings.tests {
        match test {
            InlineTest::Case { args, expected } => {
                run.execute(TestCase::new(args.clone(), expected.clone()), sink)?;
            }
            InlineTest::Generator {
                generator: Some(generator),
                count,
            } => {
                for _ in 0..count.filter(|&count| count > 0).unwrap_or(1) {
                    let (args, expected) = generator();
                    run.execute(TestCase::new(args, expected), sink)?;
                }
            }
            InlineTest::Generator { generator: None, .. } => {}
        }
    }

    run.stats.report(sink, options.report_options());
    Ok(run.stats)
}

struct CaseRunner<'a> {
    tester: &'a dyn Tester,
    settings: &'a Settings,
    options: &'a RunOptions,
    stats: RunStatistics,
}

impl CaseRunner<'_> {
    /// Runs one case. Data and signature errors name the case's tuple.
    fn execute(&mut self, case: TestCase, sink: &mut dyn ReportSink) -> HarnessResult<()> {
        self.judge(&case, sink).map_err(|e| e.in_test(&case.to_tuple()))
    }

    fn judge(&mut self, case: &TestCase, sink: &mut dyn ReportSink) -> HarnessResult<()> {
        self.tester.validate(case)?;
        let result = self
            .tester
            .run(&case.args, self.settings.runner.as_ref(), self.options.debug)?;

        for line in &result.trace {
            sink.message(Level::Debug, line);
        }
        result.validate(
            case.expected.as_ref(),
            self.settings.validator.as_ref(),
            &mut self.stats,
            sink,
            self.options.report_options(),
        );
        Ok(())
    }
}
