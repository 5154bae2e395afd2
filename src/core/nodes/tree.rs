use serde_json::Value;
use std::collections::VecDeque;

use super::{NodeError, NodeKind, trim_trailing_nulls};

/// Binary tree node in the LeetCode layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub val: Value,
    pub left: Option<Box<TreeNode>>,
    pub right: Option<Box<TreeNode>>,
}

impl TreeNode {
    pub fn new(val: impl Into<Value>) -> Self {
        Self {
            val: val.into(),
            left: None,
            right: None,
        }
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

struct Slot {
    val: Value,
    left: Option<usize>,
    right: Option<usize>,
}

/// Element 0 is the root; every following pair of elements fills the left and
/// right slots of the next pending node, `null` leaving the slot empty.
pub fn from_list(values: &[Value]) -> Result<Option<Box<TreeNode>>, NodeError> {
    let Some(root) = values.first() else {
        return Ok(None);
    };
    if root.is_null() {
        return Ok(None);
    }

    let mut arena = vec![Slot {
        val: root.clone(),
        left: None,
        right: None,
    }];
    let mut pending: VecDeque<(usize, Side)> = VecDeque::from([(0, Side::Left), (0, Side::Right)]);

    for (position, value) in values.iter().enumerate().skip(1) {
        let Some((parent, side)) = pending.pop_front() else {
            return Err(NodeError::NoPendingParent {
                kind: NodeKind::Tree,
                position,
            });
        };
        if value.is_null() {
            continue;
        }

        let index = arena.len();
        arena.push(Slot {
            val: value.clone(),
            left: None,
            right: None,
        });
        match side {
            Side::Left => arena[parent].left = Some(index),
            Side::Right => arena[parent].right = Some(index),
        }
        pending.push_back((index, Side::Left));
        pending.push_back((index, Side::Right));
    }

    // Children always sit after their parent, so building back to front
    // finds every child already boxed.
    let mut built: Vec<Option<Box<TreeNode>>> = (0..arena.len()).map(|_| None).collect();
    for index in (0..arena.len()).rev() {
        let slot = &arena[index];
        let left = slot.left.and_then(|i| built[i].take());
        let right = slot.right.and_then(|i| built[i].take());
        built[index] = Some(Box::new(TreeNode {
            val: slot.val.clone(),
            left,
            right,
        }));
    }

    Ok(built[0].take())
}

pub fn to_list(root: Option<&TreeNode>) -> Vec<Value> {
    let mut values = Vec::new();
    let mut queue: VecDeque<Option<&TreeNode>> = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        match node {
            Some(node) => {
                values.push(node.val.clone());
                queue.push_back(node.left.as_deref());
                queue.push_back(node.right.as_deref());
            }
            None => values.push(Value::Null),
        }
    }

    trim_trailing_nulls(&mut values);
    values
}
