//! A + B: one sum per input line, read from injected handles.

use std::io::{BufRead, Write};

use crate::core::solution::{FunctionDecl, SolutionModule, TargetError};

pub fn solve(input: &mut dyn BufRead, output: &mut dyn Write) -> Result<(), TargetError> {
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let sum = line
            .split_whitespace()
            .map(|token| {
                token
                    .parse::<i64>()
                    .map_err(|e| TargetError::Argument(format!("{token:?}: {e}")))
            })
            .sum::<Result<i64, _>>()?;
        writeln!(output, "{sum}")?;
    }
    Ok(())
}

pub fn module() -> SolutionModule {
    SolutionModule::new("a_plus_b").function(FunctionDecl::stream("main", solve))
}
