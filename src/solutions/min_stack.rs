//! Min Stack, driven by command sequences.

use crate::core::config::Settings;
use crate::core::resolver::Mode;
use crate::core::solution::{Arg, ClassDecl, LiteralType, Param, Shape, SolutionModule, TargetError};

#[derive(Default)]
pub struct MinStack {
    stack: Vec<(i64, i64)>,
}

impl MinStack {
    pub fn push(&mut self, val: i64) {
        let min = self.stack.last().map_or(val, |&(_, min)| min.min(val));
        self.stack.push((val, min));
    }

    pub fn pop(&mut self) {
        self.stack.pop();
    }

    pub fn top(&self) -> Option<i64> {
        self.stack.last().map(|&(val, _)| val)
    }

    pub fn get_min(&self) -> Option<i64> {
        self.stack.last().map(|&(_, min)| min)
    }
}

fn empty() -> TargetError {
    TargetError::failed("the stack is empty")
}

pub fn module() -> SolutionModule {
    let min_stack = ClassDecl::builder::<MinStack>("MinStack")
        .default_constructor()
        .method(
            "push",
            vec![Param::new("val").literal(LiteralType::Integer)],
            Shape::Plain,
            |this, args| {
                this.push(args[0].decode()?);
                Ok(Arg::null())
            },
        )
        .method("pop", vec![], Shape::Plain, |this, _| {
            this.pop();
            Ok(Arg::null())
        })
        .method("top", vec![], Shape::Plain, |this, _| {
            Arg::encode(&this.top().ok_or_else(empty)?)
        })
        .method("getMin", vec![], Shape::Plain, |this, _| {
            Arg::encode(&this.get_min().ok_or_else(empty)?)
        })
        .build();

    SolutionModule::new("min_stack")
        .class(min_stack)
        .settings(Settings::new().tester(Mode::Class))
}
