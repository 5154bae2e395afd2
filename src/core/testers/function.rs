use serde_json::Value;

use super::marshal::validate_signature;
use super::{ClassicCall, TestCase, Tester, run_with_runner, split_by_arity};
use crate::core::config::Runner;
use crate::core::error::{HarnessError, HarnessResult};
use crate::core::resolver::{Mode, Target};
use crate::core::results::{ResultKind, TestResult};
use crate::core::solution::{Body, FunctionDecl, TargetError};

/// Tests one free function.
/// 测试一个自由函数。
pub struct FunctionTester {
    target: Target,
    function: FunctionDecl,
}

impl FunctionTester {
    pub fn from_target(target: Target) -> Option<Self> {
        let Target::Function(function) = &target else {
            return None;
        };
        let function = function.clone();
        Some(Self { target, function })
    }
}

impl Tester for FunctionTester {
    fn mode(&self) -> Mode {
        Mode::Function
    }

    fn target(&self) -> &Target {
        &self.target
    }

    fn split(&self, tuple: Vec<Value>) -> HarnessResult<TestCase> {
        split_by_arity(
            &self.function.signature(),
            self.function.required_params(),
            tuple,
        )
    }

    fn validate(&self, case: &TestCase) -> HarnessResult<()> {
        validate_signature(&self.function.signature(), &self.function.params, &case.args)
    }

    fn run(&self, args: &[Value], runner: Option<&Runner>, debug: bool) -> HarnessResult<TestResult> {
        if let Some(runner) = runner {
            return run_with_runner(&self.target, runner, args, ResultKind::Classic);
        }

        let Body::Args(body) = &self.function.body else {
            return Err(HarnessError::TargetRuntime {
                target: self.function.name.clone(),
                source: TargetError::failed("a stream entry point cannot take arguments"),
            });
        };

        ClassicCall {
            target: &self.target,
            name: &self.function.name,
            params: &self.function.params,
            returns: self.function.returns,
        }
        .run(args, debug, |marshalled| body(marshalled))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::nodes::ListNode;
    use crate::core::solution::{Arg, Param, Shape};
    use serde_json::json;

    fn tester(function: FunctionDecl) -> FunctionTester {
        FunctionTester::from_target(Target::Function(function)).unwrap()
    }

    #[test]
    fn test_in_place_mutation_is_reported() {
        let sort = tester(FunctionDecl::new(
            "sortInPlace",
            vec![Param::new("nums")],
            Shape::Plain,
            |args| {
                let mut nums: Vec<i64> = args[0].decode()?;
                nums.sort();
                args[0].set(&nums)?;
                Ok(Arg::null())
            },
        ));

        let result = sort.run(&[json!([3, 1, 2])], None, false).unwrap();
        assert_eq!(result.args_before, vec![json!([3, 1, 2])]);
        assert_eq!(result.args_after, vec![json!([1, 2, 3])]);
        assert_eq!(result.value, Value::Null);
    }

    #[test]
    fn test_list_arguments_and_return_are_marshalled() {
        let reverse = tester(FunctionDecl::new(
            "reverseList",
            vec![Param::list("head")],
            Shape::Node(crate::core::nodes::NodeKind::List),
            |args| {
                let mut head = args[0].list()?;
                let mut reversed: Option<Box<ListNode>> = None;
                while let Some(mut node) = head {
                    head = node.next.take();
                    node.next = reversed;
                    reversed = Some(node);
                }
                Ok(Arg::from(reversed))
            },
        ));

        let result = reverse.run(&[json!([1, 2, 3])], None, true).unwrap();
        assert_eq!(result.value, json!([3, 2, 1]));
        assert_eq!(result.trace, vec!["reverseList([1,2,3]): [3,2,1]".to_string()]);
    }

    #[test]
    fn test_panic_becomes_runtime_error() {
        let failing = tester(FunctionDecl::new("boom", vec![], Shape::Plain, |_| {
            panic!("division by zero")
        }));

        match failing.run(&[], None, false) {
            Err(HarnessError::TargetRuntime { target, source: TargetError::Panicked { message, .. } }) => {
                assert_eq!(target, "boom");
                assert_eq!(message, "division by zero");
            }
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn test_runner_replaces_the_call() {
        let identity = tester(FunctionDecl::new(
            "identity",
            vec![Param::new("x")],
            Shape::Plain,
            |args| Ok(args[0].clone()),
        ));
        let runner: Runner = std::rc::Rc::new(|target: &Target, args: &mut [Value]| {
            let once = target.call(args)?;
            Ok(json!(once.as_i64().unwrap_or_default() * 2))
        });

        let result = identity.run(&[json!(21)], Some(&runner), false).unwrap();
        assert_eq!(result.value, json!(42));
    }
}
