//! Reverse Words, written against the process streams through the stdio shim.

use std::io;

use crate::core::solution::{Arg, FunctionDecl, Shape, SolutionModule};
use crate::infra::stdio;
use crate::outln;

pub fn main() -> io::Result<()> {
    while let Some(line) = stdio::read_line()? {
        let words: Vec<&str> = line.split_whitespace().rev().collect();
        outln!("{}", words.join(" "));
    }
    Ok(())
}

pub fn module() -> SolutionModule {
    SolutionModule::new("reverse_words").function(FunctionDecl::new("main", vec![], Shape::Plain, |_| {
        main()?;
        Ok(Arg::null())
    }))
}
