use serde_json::Value;
use std::time::Instant;

use super::marshal::{invoke, marshal_args, trace_line, validate_signature};
use super::{TestCase, Tester, run_with_runner, runtime_error};
use crate::core::config::Runner;
use crate::core::error::{HarnessError, HarnessResult};
use crate::core::literal::to_literal_string;
use crate::core::resolver::{Mode, Target};
use crate::core::results::{ResultKind, TestResult};
use crate::core::solution::{ClassDecl, MethodDecl, render_params};
use crate::infra::panic::invoke_guarded;

/// Drives a class through a command sequence:
/// `[commands, argsList, expected?]`.
///
/// `commands[0]` stands for construction and `argsList[0]` holds the
/// constructor arguments. Every later command names a method.
///
/// 通过命令序列驱动一个类。
pub struct ClassTester {
    target: Target,
    class: ClassDecl,
}

impl ClassTester {
    pub fn from_target(target: Target) -> Option<Self> {
        let Target::Class(class) = &target else {
            return None;
        };
        let class = class.clone();
        Some(Self { target, class })
    }

    fn constructor_signature(&self) -> String {
        format!("{}({})", self.class.name, render_params(&self.class.constructor))
    }

    fn method(&self, name: &str) -> HarnessResult<&MethodDecl> {
        self.class.method(name).ok_or_else(|| {
            HarnessError::signature(format!("class {} has no method {name}", self.class.name))
        })
    }
}

/// The two sequences of a command-sequence case.
fn sequences(args: &[Value]) -> HarnessResult<(&[Value], &[Value])> {
    match args {
        [Value::Array(commands), Value::Array(args_list)] => Ok((commands, args_list)),
        _ => Err(HarnessError::data(format!(
            "a command sequence needs a list of commands and a list of arguments, got {}",
            to_literal_string(&Value::Array(args.to_vec()))
        ))),
    }
}

fn call_arguments(entry: &Value, index: usize) -> HarnessResult<&[Value]> {
    entry.as_array().map(Vec::as_slice).ok_or_else(|| {
        HarnessError::data(format!(
            "arguments of command {index} must be a list, got {}",
            to_literal_string(entry)
        ))
    })
}

impl Tester for ClassTester {
    fn mode(&self) -> Mode {
        Mode::Class
    }

    fn target(&self) -> &Target {
        &self.target
    }

    fn split(&self, mut tuple: Vec<Value>) -> HarnessResult<TestCase> {
        if !(2..=3).contains(&tuple.len()) {
            return Err(HarnessError::data(format!(
                "a command sequence test has 2 or 3 elements, got {}: {}",
                tuple.len(),
                Value::Array(tuple)
            )));
        }
        let expected = if tuple.len() == 3 { tuple.pop() } else { None };
        Ok(TestCase::new(tuple, expected))
    }

    fn validate(&self, case: &TestCase) -> HarnessResult<()> {
        let (commands, args_list) = sequences(&case.args)?;

        let expected_len = match &case.expected {
            None => None,
            Some(Value::Array(expected)) => Some(expected.len()),
            Some(other) => {
                return Err(HarnessError::data(format!(
                    "expected results of a command sequence must be a list, got {}",
                    to_literal_string(other)
                )));
            }
        };

        if commands.len() != args_list.len() || expected_len.is_some_and(|len| len != commands.len()) {
            return Err(HarnessError::data(format!(
                "commands ({}), arguments ({}) and expected results ({}) must have the same length",
                commands.len(),
                args_list.len(),
                expected_len.map_or_else(|| "none".to_string(), |len| len.to_string())
            )));
        }
        if commands.is_empty() {
            return Err(HarnessError::data(
                "a command sequence needs at least the construction command",
            ));
        }

        let constructor_args = call_arguments(&args_list[0], 0)?;
        validate_signature(
            &self.constructor_signature(),
            &self.class.constructor,
            constructor_args,
        )?;

        for (index, (command, entry)) in commands.iter().zip(args_list).enumerate().skip(1) {
            let name = command.as_str().ok_or_else(|| {
                HarnessError::data(format!(
                    "command {index} must be a method name, got {}",
                    to_literal_string(command)
                ))
            })?;
            let method = self.method(name)?;
            let call_args = call_arguments(entry, index)?;
            validate_signature(&self.class.signature(method), &method.params, call_args)?;
        }
        Ok(())
    }

    fn run(&self, args: &[Value], runner: Option<&Runner>, debug: bool) -> HarnessResult<TestResult> {
        if let Some(runner) = runner {
            return run_with_runner(&self.target, runner, args, ResultKind::Classic);
        }

        let (commands, args_list) = sequences(args)?;
        let Some(constructor_args) = args_list.first() else {
            return Err(HarnessError::data("a command sequence needs at least the construction command"));
        };

        let mut results = vec![Value::Null];
        let mut updated_args = vec![constructor_args.clone()];
        let mut trace = Vec::new();

        let start = Instant::now();

        let before = call_arguments(constructor_args, 0)?;
        let mut marshalled = marshal_args(&self.class.constructor, before)?;
        let mut instance = invoke_guarded(|| self.class.instantiate(&mut marshalled))
            .map_err(|e| runtime_error(&self.target, e))?;

        for (index, (command, entry)) in commands.iter().zip(args_list).enumerate().skip(1) {
            let name = command.as_str().unwrap_or_default();
            let method = self.method(name)?;
            let before = call_arguments(entry, index)?;

            let invocation = invoke(&self.target, &method.params, method.returns, before, |marshalled| {
                (method.body)(instance.as_mut(), marshalled)
            })?;

            if debug {
                trace.push(trace_line(&method.name, before, &invocation.value));
            }
            updated_args.push(Value::Array(invocation.args_after));
            results.push(invocation.value);
        }

        let elapsed = start.elapsed();

        Ok(TestResult {
            value: Value::Array(results),
            elapsed,
            args_before: args.to_vec(),
            args_after: vec![Value::Array(commands.to_vec()), Value::Array(updated_args)],
            kind: ResultKind::Classic,
            trace,
        })
    }
}
