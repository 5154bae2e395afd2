use serde_json::Value;
use std::collections::VecDeque;

use super::{NodeError, NodeKind, trim_trailing_nulls};

/// N-ary tree node in the LeetCode layout.
#[derive(Debug, Clone, PartialEq)]
pub struct NTreeNode {
    pub val: Value,
    pub children: Vec<NTreeNode>,
}

impl NTreeNode {
    pub fn new(val: impl Into<Value>) -> Self {
        Self {
            val: val.into(),
            children: Vec::new(),
        }
    }
}

struct Slot {
    val: Value,
    children: Vec<usize>,
}

/// Level-grouped decoding: after the root, each `null` closes the current
/// children group and moves on to the next pending parent; every other value
/// becomes a child of the current parent and is itself queued as a parent.
pub fn from_list(values: &[Value]) -> Result<Option<Box<NTreeNode>>, NodeError> {
    let Some(root) = values.first() else {
        return Ok(None);
    };
    if root.is_null() {
        return Ok(None);
    }

    let mut arena = vec![Slot {
        val: root.clone(),
        children: Vec::new(),
    }];
    let mut pending: VecDeque<usize> = VecDeque::from([0]);
    let mut parent: Option<usize> = None;

    for (position, value) in values.iter().enumerate().skip(1) {
        if value.is_null() {
            parent = pending.pop_front();
            if parent.is_none() {
                return Err(NodeError::NoPendingParent {
                    kind: NodeKind::NTree,
                    position,
                });
            }
            continue;
        }

        let Some(current) = parent else {
            return Err(NodeError::NoPendingParent {
                kind: NodeKind::NTree,
                position,
            });
        };
        let index = arena.len();
        arena.push(Slot {
            val: value.clone(),
            children: Vec::new(),
        });
        arena[current].children.push(index);
        pending.push_back(index);
    }

    let mut built: Vec<Option<NTreeNode>> = (0..arena.len()).map(|_| None).collect();
    for index in (0..arena.len()).rev() {
        let slot = &arena[index];
        let children = slot
            .children
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = Some(NTreeNode {
            val: slot.val.clone(),
            children,
        });
    }

    Ok(built[0].take().map(Box::new))
}

/// Emits the root and a `null`, then for each node in breadth-first order its
/// children's values followed by a closing `null`.
pub fn to_list(root: Option<&NTreeNode>) -> Vec<Value> {
    let Some(root) = root else {
        return Vec::new();
    };

    let mut values = vec![root.val.clone(), Value::Null];
    let mut queue: VecDeque<&NTreeNode> = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        for child in &node.children {
            values.push(child.val.clone());
            queue.push_back(child);
        }
        values.push(Value::Null);
    }

    trim_trailing_nulls(&mut values);
    values
}
