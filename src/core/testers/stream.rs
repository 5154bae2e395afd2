use serde_json::Value;
use std::time::Instant;

use super::{TestCase, Tester, run_with_runner, runtime_error};
use crate::core::config::Runner;
use crate::core::error::{HarnessError, HarnessResult};
use crate::core::literal::{parse_stream, to_literal_string};
use crate::core::resolver::{self, Mode, Target};
use crate::core::results::{ResultKind, TestResult};
use crate::core::solution::FunctionDecl;
use crate::infra::panic::invoke_guarded;

/// Feeds input text to the entry point and captures what it writes.
/// 向入口函数输入文本并捕获其输出。
pub struct StreamTester {
    target: Target,
    function: FunctionDecl,
}

impl StreamTester {
    pub fn from_target(target: Target) -> Option<Self> {
        let Target::Stream(function) = &target else {
            return None;
        };
        let function = function.clone();
        Some(Self { target, function })
    }
}

impl Tester for StreamTester {
    fn mode(&self) -> Mode {
        Mode::Stream
    }

    fn target(&self) -> &Target {
        &self.target
    }

    /// Blocks are read in input/output pairs. An empty output block means the
    /// case has no expected output.
    fn parse_test_data(&self, text: &str) -> HarnessResult<Vec<Vec<Value>>> {
        Ok(parse_stream(text)
            .into_iter()
            .map(|(input, output)| {
                let expected = if output.is_empty() {
                    Value::Null
                } else {
                    Value::String(output)
                };
                vec![Value::String(input), expected]
            })
            .collect())
    }

    fn split(&self, mut tuple: Vec<Value>) -> HarnessResult<TestCase> {
        if !(1..=2).contains(&tuple.len()) {
            return Err(HarnessError::data(format!(
                "a stream test has an input and an optional output, got {} elements: {}",
                tuple.len(),
                Value::Array(tuple)
            )));
        }
        let expected = if tuple.len() == 2 { tuple.pop() } else { None };
        Ok(TestCase::new(tuple, expected))
    }

    fn validate(&self, case: &TestCase) -> HarnessResult<()> {
        let texts = case.args.iter().chain(case.expected.as_ref());
        for value in texts {
            if !value.is_string() {
                return Err(HarnessError::data(format!(
                    "stream input and output must be text, got {}",
                    to_literal_string(value)
                )));
            }
        }
        Ok(())
    }

    fn run(&self, args: &[Value], runner: Option<&Runner>, _debug: bool) -> HarnessResult<TestResult> {
        if let Some(runner) = runner {
            return run_with_runner(&self.target, runner, args, ResultKind::Stream);
        }

        let input = args.first().and_then(Value::as_str).unwrap_or_default().trim();

        let start = Instant::now();
        let output = invoke_guarded(|| resolver::run_stream(&self.function, input))
            .map_err(|e| runtime_error(&self.target, e))?;
        let elapsed = start.elapsed();

        Ok(TestResult {
            value: Value::String(output),
            elapsed,
            args_before: args.to_vec(),
            args_after: args.to_vec(),
            kind: ResultKind::Stream,
            trace: Vec::new(),
        })
    }
}
