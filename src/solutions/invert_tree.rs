//! Invert Binary Tree.

use crate::core::nodes::{NodeKind, TreeNode};
use crate::core::solution::{Arg, FunctionDecl, Param, Shape, SolutionModule};

pub fn invert_tree(mut root: Option<Box<TreeNode>>) -> Option<Box<TreeNode>> {
    if let Some(node) = root.as_mut() {
        let left = invert_tree(node.left.take());
        node.left = invert_tree(node.right.take());
        node.right = left;
    }
    root
}

pub fn module() -> SolutionModule {
    SolutionModule::new("invert_tree").function(FunctionDecl::new(
        "invertTree",
        vec![Param::tree("root")],
        Shape::Node(NodeKind::Tree),
        |args| Ok(Arg::from(invert_tree(args[0].tree()?))),
    ))
}
