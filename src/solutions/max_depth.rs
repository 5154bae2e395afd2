//! Maximum Depth of N-ary Tree.

use crate::core::nodes::NTreeNode;
use crate::core::solution::{Arg, FunctionDecl, Param, Shape, SolutionModule};

pub fn max_depth(root: Option<&NTreeNode>) -> usize {
    let Some(root) = root else {
        return 0;
    };

    let mut depth = 0;
    let mut level = vec![root];
    while !level.is_empty() {
        depth += 1;
        level = level.into_iter().flat_map(|node| &node.children).collect();
    }
    depth
}

pub fn module() -> SolutionModule {
    SolutionModule::new("max_depth").function(FunctionDecl::new(
        "maxDepth",
        vec![Param::ntree("root")],
        Shape::Plain,
        |args| Arg::encode(&max_depth(args[0].ntree()?.as_deref())),
    ))
}
