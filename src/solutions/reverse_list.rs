//! Reverse Linked List.

use crate::core::nodes::{ListNode, NodeKind};
use crate::core::solution::{Arg, FunctionDecl, Param, Shape, SolutionModule};

pub fn reverse_list(mut head: Option<Box<ListNode>>) -> Option<Box<ListNode>> {
    let mut reversed = None;
    while let Some(mut node) = head {
        head = node.next.take();
        node.next = reversed;
        reversed = Some(node);
    }
    reversed
}

pub fn module() -> SolutionModule {
    SolutionModule::new("reverse_list").function(FunctionDecl::new(
        "reverseList",
        vec![Param::list("head")],
        Shape::Node(NodeKind::List),
        |args| Ok(Arg::from(reverse_list(args[0].list()?))),
    ))
}
