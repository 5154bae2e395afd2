//! # Tester Strategies Module / 测试策略模块
//!
//! The four testing strategies share one contract: split a raw test tuple
//! into arguments and an expected value, validate the arguments against the
//! resolved target, and run the target to produce a `TestResult`.
//!
//! 四种测试策略共享同一契约：将原始测试元组拆分为参数和期望值，
//! 根据解析出的目标验证参数，然后运行目标生成 `TestResult`。
//!
//! ## Registry / 注册表
//!
//! Strategies are listed in a static registry, in automatic detection order:
//! `function`, `method`, `class`, `stream`.
//!
//! 策略登记在静态注册表中，顺序即自动检测顺序。

pub mod class;
pub mod function;
pub mod marshal;
pub mod method;
pub mod stream;

use once_cell::sync::Lazy;
use serde_json::Value;
use std::time::Instant;

use crate::core::config::Runner;
use crate::core::error::{HarnessError, HarnessResult};
use crate::core::literal::parse_lines;
use crate::core::resolver::{self, Conventions, Mode, Target};
use crate::core::results::{ResultKind, TestResult};
use crate::core::solution::{Arg, Param, Shape, SolutionModule, TargetError, TargetResult};
use crate::infra::panic::invoke_guarded;

pub use class::ClassTester;
pub use function::FunctionTester;
pub use method::MethodTester;
pub use stream::StreamTester;

/// One test case: argument literals and an optional expected value.
/// 一个测试用例：参数字面量和可选的期望值。
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub args: Vec<Value>,
    pub expected: Option<Value>,
}

impl TestCase {
    /// A `null` expected value counts as absent.
    pub fn new(args: Vec<Value>, expected: Option<Value>) -> Self {
        Self {
            args,
            expected: expected.filter(|v| !v.is_null()),
        }
    }

    /// The case as one tuple: the arguments followed by the expected value.
    pub fn to_tuple(&self) -> Value {
        Value::Array(self.args.iter().chain(&self.expected).cloned().collect())
    }
}

/// The contract every testing strategy implements.
/// 每种测试策略实现的契约。
pub trait Tester {
    fn mode(&self) -> Mode;

    fn target(&self) -> &Target;

    /// Parses the text of a tests file into raw tuples.
    fn parse_test_data(&self, text: &str) -> HarnessResult<Vec<Vec<Value>>> {
        parse_lines(text)
    }

    /// Splits a raw tuple into arguments and the expected value.
    fn split(&self, tuple: Vec<Value>) -> HarnessResult<TestCase>;

    /// Checks the case against the target's declarations.
    fn validate(&self, case: &TestCase) -> HarnessResult<()>;

    /// Runs the target once, or `runner` in its place.
    fn run(&self, args: &[Value], runner: Option<&Runner>, debug: bool) -> HarnessResult<TestResult>;
}

/// A registered strategy.
pub struct TesterEntry {
    pub mode: Mode,
    /// Whether a solution has the shape this strategy expects.
    pub verify: fn(&SolutionModule, &Conventions) -> bool,
    pub build: fn(Target) -> Option<Box<dyn Tester>>,
}

static REGISTRY: Lazy<Vec<TesterEntry>> = Lazy::new(|| {
    vec![
        TesterEntry {
            mode: Mode::Function,
            verify: |module, conventions| resolver::verify(Mode::Function, module, conventions),
            build: |target| FunctionTester::from_target(target).map(|t| Box::new(t) as Box<dyn Tester>),
        },
        TesterEntry {
            mode: Mode::Method,
            verify: |module, conventions| resolver::verify(Mode::Method, module, conventions),
            build: |target| MethodTester::from_target(target).map(|t| Box::new(t) as Box<dyn Tester>),
        },
        TesterEntry {
            mode: Mode::Class,
            verify: |module, conventions| resolver::verify(Mode::Class, module, conventions),
            build: |target| ClassTester::from_target(target).map(|t| Box::new(t) as Box<dyn Tester>),
        },
        TesterEntry {
            mode: Mode::Stream,
            verify: |module, conventions| resolver::verify(Mode::Stream, module, conventions),
            build: |target| StreamTester::from_target(target).map(|t| Box::new(t) as Box<dyn Tester>),
        },
    ]
});

pub fn registry() -> &'static [TesterEntry] {
    &REGISTRY
}

pub fn by_mode(mode: Mode) -> Option<&'static TesterEntry> {
    registry().iter().find(|entry| entry.mode == mode)
}

/// The first strategy, in registry order, whose `verify` accepts `module`.
pub fn detect(module: &SolutionModule, conventions: &Conventions) -> Option<Mode> {
    registry()
        .iter()
        .find(|entry| (entry.verify)(module, conventions))
        .map(|entry| entry.mode)
}

/// Resolves the target for `mode` and builds its strategy.
///
/// # Errors
/// Returns `HarnessError::Resolution` when no target fits.
pub fn build(
    mode: Mode,
    module: &SolutionModule,
    target: Option<&str>,
    conventions: &Conventions,
) -> HarnessResult<Box<dyn Tester>> {
    let fail = |reason: &str| HarnessError::Resolution {
        mode: mode.to_string(),
        module: module.name.clone(),
        reason: reason.to_string(),
    };

    let entry = by_mode(mode).ok_or_else(|| fail("no strategy is registered for this mode"))?;
    let resolved = resolver::resolve(mode, module, target, conventions)?;
    (entry.build)(resolved).ok_or_else(|| fail("the resolved target does not fit the strategy"))
}

pub(crate) fn runtime_error(target: &Target, source: TargetError) -> HarnessError {
    HarnessError::TargetRuntime {
        target: target.name(),
        source,
    }
}

/// Splits a tuple for a target with `required` parameters: the element after
/// them, if any, is the expected value.
pub(crate) fn split_by_arity(signature: &str, required: usize, mut tuple: Vec<Value>) -> HarnessResult<TestCase> {
    let len = tuple.len();
    if len > required + 1 {
        return Err(HarnessError::signature(format!(
            "{signature} takes {required} arguments, but the test has {len} elements: {}",
            Value::Array(tuple)
        )));
    }

    let expected = if tuple.len() > required { tuple.pop() } else { None };
    Ok(TestCase::new(tuple, expected))
}

/// Calls a custom runner with a copy of the raw arguments.
pub(crate) fn run_with_runner(
    target: &Target,
    runner: &Runner,
    args: &[Value],
    kind: ResultKind,
) -> HarnessResult<TestResult> {
    let mut after = args.to_vec();
    let start = Instant::now();
    let value = invoke_guarded(|| runner(target, &mut after)).map_err(|e| runtime_error(target, e))?;
    let elapsed = start.elapsed();

    Ok(TestResult {
        value,
        elapsed,
        args_before: args.to_vec(),
        args_after: after,
        kind,
        trace: Vec::new(),
    })
}

/// The call of a function or method target.
pub(crate) struct ClassicCall<'a> {
    pub target: &'a Target,
    pub name: &'a str,
    pub params: &'a [Param],
    pub returns: Shape,
}

impl ClassicCall<'_> {
    pub fn run(
        &self,
        args: &[Value],
        debug: bool,
        call: impl FnOnce(&mut [Arg]) -> TargetResult,
    ) -> HarnessResult<TestResult> {
        let invocation = marshal::invoke(self.target, self.params, self.returns, args, call)?;
        let trace = if debug {
            vec![marshal::trace_line(self.name, args, &invocation.value)]
        } else {
            Vec::new()
        };

        Ok(TestResult {
            value: invocation.value,
            elapsed: invocation.elapsed,
            args_before: args.to_vec(),
            args_after: invocation.args_after,
            kind: ResultKind::Classic,
            trace,
        })
    }
}
