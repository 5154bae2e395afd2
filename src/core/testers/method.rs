use serde_json::Value;

use super::marshal::validate_signature;
use super::{ClassicCall, TestCase, Tester, run_with_runner, split_by_arity};
use crate::core::config::Runner;
use crate::core::error::HarnessResult;
use crate::core::resolver::{Mode, Target};
use crate::core::results::{ResultKind, TestResult};
use crate::core::solution::{ClassDecl, MethodDecl};

/// Tests one method of the solution class, on a fresh instance per test.
/// 测试解答类的一个方法，每个测试使用新的实例。
pub struct MethodTester {
    target: Target,
    class: ClassDecl,
    method: MethodDecl,
}

impl MethodTester {
    pub fn from_target(target: Target) -> Option<Self> {
        let Target::Method { class, method } = &target else {
            return None;
        };
        let (class, method) = (class.clone(), method.clone());
        Some(Self {
            target,
            class,
            method,
        })
    }

    fn signature(&self) -> String {
        self.class.signature(&self.method)
    }
}

impl Tester for MethodTester {
    fn mode(&self) -> Mode {
        Mode::Method
    }

    fn target(&self) -> &Target {
        &self.target
    }

    fn split(&self, tuple: Vec<Value>) -> HarnessResult<TestCase> {
        split_by_arity(&self.signature(), self.method.required_params(), tuple)
    }

    fn validate(&self, case: &TestCase) -> HarnessResult<()> {
        validate_signature(&self.signature(), &self.method.params, &case.args)
    }

    fn run(&self, args: &[Value], runner: Option<&Runner>, debug: bool) -> HarnessResult<TestResult> {
        if let Some(runner) = runner {
            return run_with_runner(&self.target, runner, args, ResultKind::Classic);
        }

        ClassicCall {
            target: &self.target,
            name: &self.method.name,
            params: &self.method.params,
            returns: self.method.returns,
        }
        .run(args, debug, |marshalled| {
            let mut instance = self.class.instantiate(&mut [])?;
            (self.method.body)(instance.as_mut(), marshalled)
        })
    }
}
