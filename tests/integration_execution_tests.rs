//! # Execution Integration Tests / 执行集成测试
//!
//! Whole runs through the orchestrator: every strategy, the merged test
//! sources, the reports and the fatal error paths.
//!
//! 通过编排器进行完整运行：覆盖每种策略、合并后的测试来源、报告以及致命错误路径。

mod common;

use common::{run_module, run_module_with};
use serde_json::{Value, json};
use solution_runner::core::config::Settings;
use solution_runner::core::execution::RunOptions;
use solution_runner::core::resolver::Mode;
use solution_runner::core::solution::{
    Arg, ClassDecl, FunctionDecl, LiteralType, Param, Shape, SolutionModule, TargetError,
};
use solution_runner::core::HarnessError;
use solution_runner::reporting::Level;
use std::cell::RefCell;
use std::io::{Read, Write};
use std::rc::Rc;

fn two_sum_indices(nums: &[i64], target: i64) -> Option<[usize; 2]> {
    (0..nums.len())
        .flat_map(|i| (i + 1..nums.len()).map(move |j| (i, j)))
        .find(|&(i, j)| nums[i] + nums[j] == target)
        .map(|(i, j)| [i, j])
}

fn two_sum(mutates: bool) -> SolutionModule {
    SolutionModule::new("two_sum").function(FunctionDecl::new(
        "twoSum",
        vec![
            Param::new("nums").literal(LiteralType::Array),
            Param::new("target").literal(LiteralType::Integer),
        ],
        Shape::Plain,
        move |args| {
            let mut nums: Vec<i64> = args[0].decode()?;
            let answer = two_sum_indices(&nums, args[1].decode()?);
            if mutates {
                nums.sort_unstable_by(|a, b| b.cmp(a));
                args[0].set(&nums)?;
            }
            Arg::encode(&answer)
        },
    ))
}

const TWO_SUM_TESTS: &str = "[2,7,11,15]\n18\n[1,2]";

#[cfg(test)]
mod function_tests {
    use super::*;

    #[test]
    fn test_two_sum_passes() {
        let (result, sink) = run_module(&two_sum(false), TWO_SUM_TESTS);
        let stats = result.unwrap();

        assert_eq!((stats.runs, stats.passed), (1, 1));
        let text = sink.text();
        assert!(text.contains("Solution: two_sum"));
        assert!(text.contains("Type: function"));
        assert!(text.contains("[2,7,11,15]\n18\nResult: [1,2]"));
        assert!(!text.contains("Arguments after:"));
        assert!(text.contains("Tests passed: 1/1"));
    }

    #[test]
    fn test_mutated_arguments_are_reported() {
        let (result, sink) = run_module(&two_sum(true), TWO_SUM_TESTS);
        assert!(result.unwrap().all_passed());

        let text = sink.text();
        assert!(text.contains("Arguments after:\n[15,11,7,2]\n18\nResult: [1,2]"));
    }

    #[test]
    fn test_failure_shows_expected() {
        let (result, sink) = run_module(&two_sum(false), "[2,7,11,15]\n9\n[1,2]");
        let stats = result.unwrap();

        assert_eq!(stats.failed(), 1);
        let failed = sink.at_level(Level::Error).next().unwrap().plain_text();
        assert!(failed.contains("Result:   [0,1]"));
        assert!(failed.contains("Expected: [1,2]"));
        assert_eq!(sink.reports.last().unwrap().level, Level::Warning);
    }

    #[test]
    fn test_missing_expected_values_are_listed() {
        let (result, sink) = run_module(&two_sum(false), "[1,2]\n3\n\n[1,2]\n3\n[0,1]\n\n[3,3]\n6\nnull");
        let stats = result.unwrap();

        assert_eq!(stats.passed, 3);
        assert_eq!(stats.without_expected, vec![1, 3]);
        assert!(sink.text().contains("[WARNING] 2 tests do not have expected results: [1, 3]"));
    }

    #[test]
    fn test_too_many_elements_is_signature_error() {
        let (result, _) = run_module(&two_sum(false), "[1,2]\n3\n[0,1]\n4");
        assert!(matches!(result, Err(HarnessError::Signature(_))));
    }

    #[test]
    fn test_mistyped_argument_is_signature_error() {
        let (result, _) = run_module(&two_sum(false), "[1,2]\n\"3\"\n[0,1]");
        assert!(matches!(result, Err(HarnessError::Signature(message)) if message.contains("([1,2], \"3\")")));
    }

    #[test]
    fn test_undecodable_node_names_the_test() {
        let module = SolutionModule::new("size").function(FunctionDecl::new(
            "size",
            vec![Param::tree("root")],
            Shape::Plain,
            |args| Arg::encode(&args[0].tree()?.is_some()),
        ));

        let (result, _) = run_module(&module, "[1]\ntrue\n\n[1,null,null,2]\ntrue");
        match result {
            Err(HarnessError::DataFormat(message)) => {
                assert!(message.contains("in test: [[1,null,null,2],true]"), "{message}");
            }
            other => panic!("expected a data format error, got {other:?}"),
        }
    }

    #[test]
    fn test_panic_aborts_the_run() {
        let module = SolutionModule::new("divide").function(FunctionDecl::new(
            "divide",
            vec![Param::new("a"), Param::new("b")],
            Shape::Plain,
            |args| {
                let (a, b): (i64, i64) = (args[0].decode()?, args[1].decode()?);
                Arg::encode(&(a / b))
            },
        ));

        let (result, sink) = run_module(&module, "6\n3\n2\n\n1\n0\n0\n\n4\n2\n2");
        match result {
            Err(HarnessError::TargetRuntime {
                target,
                source: TargetError::Panicked { location, .. },
            }) => {
                assert_eq!(target, "divide");
                assert!(location.unwrap().contains("integration_execution_tests.rs"));
            }
            other => panic!("expected a runtime error, got {other:?}"),
        }
        assert_eq!(sink.at_level(Level::Info).count(), 1);
    }

    #[test]
    fn test_validator_sees_arguments_before_and_after() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&seen);
        let module = two_sum(true).settings(Settings::new().validator(move |before, after, expected, actual| {
            record.borrow_mut().push((before.to_vec(), after.to_vec()));
            expected == Some(actual)
        }));

        let (result, _) = run_module(&module, TWO_SUM_TESTS);
        assert!(result.unwrap().all_passed());

        let seen = seen.borrow();
        assert_eq!(seen[0].0[0], json!([2, 7, 11, 15]));
        assert_eq!(seen[0].1[0], json!([15, 11, 7, 2]));
    }

    #[test]
    fn test_debug_and_time_output() {
        let options = RunOptions {
            show_time: true,
            debug: true,
            ..RunOptions::default()
        };
        let (result, sink) = run_module_with(&two_sum(false), TWO_SUM_TESTS, &options);
        result.unwrap();

        let trace: Vec<String> = sink.at_level(Level::Debug).map(|r| r.plain_text()).collect();
        assert_eq!(trace, vec!["twoSum([2,7,11,15], 18): [1,2]".to_string()]);
        assert!(sink.text().contains("(Time: "));
        assert!(sink.text().contains("Time: "));
    }
}

#[cfg(test)]
mod method_tests {
    use super::*;

    #[derive(Default)]
    struct Solution {
        calls: usize,
    }

    fn counting_solution() -> SolutionModule {
        let class = ClassDecl::builder::<Solution>("Solution")
            .default_constructor()
            .method("callsSoFar", vec![], Shape::Plain, |this, _| {
                this.calls += 1;
                Arg::encode(&this.calls)
            })
            .hidden_method("helper", vec![], Shape::Plain, |_, _| Ok(Arg::null()))
            .build();
        SolutionModule::new("calls").class(class)
    }

    #[test]
    fn test_each_test_gets_a_fresh_instance() {
        let (result, sink) = run_module(&counting_solution(), "1\n\n1\n\n1");
        let stats = result.unwrap();

        assert_eq!((stats.runs, stats.passed), (3, 3));
        assert!(sink.text().contains("Type: method"));
    }

    #[test]
    fn test_nested_target_path_is_rejected() {
        let module = counting_solution().settings(Settings::new().target("Solution.Inner.callsSoFar"));
        let (result, _) = run_module(&module, "1");
        assert!(matches!(result, Err(HarnessError::Resolution { .. })));
    }

    struct Unbuildable;

    fn panicking_constructor() -> SolutionModule {
        let class = ClassDecl::builder::<Unbuildable>("Solution")
            .constructor(vec![], |_| -> Result<Unbuildable, TargetError> {
                panic!("constructor failed")
            })
            .method("answer", vec![], Shape::Plain, |_, _| Arg::encode(&42))
            .build();
        SolutionModule::new("unbuildable").class(class)
    }

    fn assert_constructor_panic(result: Result<solution_runner::core::RunStatistics, HarnessError>) {
        match result {
            Err(HarnessError::TargetRuntime {
                target,
                source: TargetError::Panicked { message, location },
            }) => {
                assert_eq!(target, "Solution.answer");
                assert_eq!(message, "constructor failed");
                assert!(location.unwrap().contains("integration_execution_tests.rs"));
            }
            other => panic!("expected a runtime error, got {other:?}"),
        }
    }

    #[test]
    fn test_panicking_constructor_is_a_runtime_error() {
        let (result, sink) = run_module(&panicking_constructor(), "42");
        assert_constructor_panic(result);
        assert_eq!(sink.at_level(Level::Info).count(), 0);
    }

    #[test]
    fn test_panicking_constructor_through_runner() {
        let module = panicking_constructor().settings(Settings::new().runner(|target, args| target.call(args)));
        let (result, _) = run_module(&module, "42");
        assert_constructor_panic(result);
    }

    #[test]
    fn test_bare_method_target_uses_solution_class() {
        let module = counting_solution().settings(Settings::new().target("helper"));
        let (result, sink) = run_module(&module, "null");
        assert!(result.unwrap().all_passed());
        assert!(sink.text().contains("Result: null"));
    }
}

#[cfg(test)]
mod class_tests {
    use super::*;

    #[derive(Default)]
    struct Counter {
        total: i64,
    }

    fn counter() -> SolutionModule {
        let class = ClassDecl::builder::<Counter>("Counter")
            .constructor(vec![Param::new("start").optional()], |args| {
                Ok(Counter {
                    total: match args.first() {
                        Some(arg) => arg.decode()?,
                        None => 0,
                    },
                })
            })
            .method("add", vec![Param::new("n")], Shape::Plain, |this, args| {
                this.total += args[0].decode::<i64>()?;
                Arg::encode(&this.total)
            })
            .method("reset", vec![], Shape::Plain, |this, _| {
                this.total = 0;
                Ok(Arg::null())
            })
            .build();
        SolutionModule::new("counter").class(class)
    }

    #[test]
    fn test_command_sequence_run() {
        let tests = "[\"Counter\",\"add\",\"add\",\"reset\",\"add\"]\n[[10],[1],[2],[],[5]]\n[null,11,13,null,5]";
        let (result, sink) = run_module(&counter(), tests);

        assert!(result.unwrap().all_passed());
        assert!(sink.text().contains("Type: class"));
        assert!(sink.text().contains("Result: [null,11,13,null,5]"));
    }

    #[test]
    fn test_length_mismatch_aborts() {
        let tests = "[\"Counter\",\"add\",\"add\"]\n[[],[1]]";
        let (result, _) = run_module(&counter(), tests);
        assert!(matches!(result, Err(HarnessError::DataFormat(_))));
    }

    #[test]
    fn test_length_mismatch_names_the_sequence() {
        let tests = "[\"Counter\",\"add\",\"add\"]\n[[],[1]]";
        let (result, _) = run_module(&counter(), tests);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("[[\"Counter\",\"add\",\"add\"],[[],[1]]]"), "{message}");
    }

    #[test]
    fn test_expected_length_mismatch_aborts() {
        let tests = "[\"Counter\",\"add\"]\n[[],[1]]\n[null]";
        let (result, _) = run_module(&counter(), tests);
        assert!(matches!(result, Err(HarnessError::DataFormat(_))));
    }

    #[test]
    fn test_inline_cases_run_after_file_cases() {
        let module = counter().settings(Settings::new().case(
            vec![json!(["Counter", "add"]), json!([[], [3]])],
            Some(json!([null, 3])),
        ));
        let (result, _) = run_module(&module, "[\"Counter\",\"add\"]\n[[1],[1]]\n[null,2]");
        assert_eq!(result.unwrap().runs, 2);
    }
}

#[cfg(test)]
mod stream_tests {
    use super::*;

    fn echo() -> SolutionModule {
        SolutionModule::new("echo").function(FunctionDecl::stream("main", |input, output| {
            let mut text = String::new();
            input
                .read_to_string(&mut text)
                .map_err(|e| TargetError::failed(e.to_string()))?;
            writeln!(output, "{text}").map_err(|e| TargetError::failed(e.to_string()))
        }))
    }

    #[test]
    fn test_whitespace_layout_is_ignored() {
        let (result, sink) = run_module(&echo(), "1 2 3\n\n1   2  3\n\n1 2 3\n\n1 2 4");
        let stats = result.unwrap();

        assert_eq!((stats.runs, stats.passed), (2, 1));
        assert!(sink.text().contains("Type: stream"));
        let failed = sink.at_level(Level::Error).next().unwrap().plain_text();
        assert!(failed.contains("Input:\n1 2 3\nOutput:\n1 2 3\nExpected:\n1 2 4"));
    }

    #[test]
    fn test_configured_tester_overrides_detection() {
        let module = echo().settings(Settings::new().tester(Mode::Function));
        let (result, _) = run_module(&module, "1\n\n1");
        assert!(matches!(result, Err(HarnessError::Resolution { .. })));
    }

    #[test]
    fn test_runner_receives_the_input() {
        let module = echo().settings(Settings::new().runner(|target, args| {
            let output = target.call(args)?;
            Ok(Value::String(output.as_str().unwrap_or_default().to_uppercase()))
        }));
        let (result, _) = run_module(&module, "abc\n\nABC");
        assert!(result.unwrap().all_passed());
    }
}
