//! # Node Codec Module / 节点编解码模块
//!
//! Converts flat list literals into the recursive structures used by
//! LeetCode-style problems and back. All three encodings are level-order
//! (breadth-first) with `null` as the placeholder for an absent child or the
//! end of a group of children.
//!
//! 在扁平的列表字面量与 LeetCode 风格题目使用的递归结构之间相互转换。
//! 三种编码都是层序（广度优先）的，`null` 表示缺失的子节点或一组子节点的结束。
//!
//! ## Kinds / 类型
//!
//! - `list` - singly linked list / 单链表
//! - `tree` - binary tree / 二叉树
//! - `ntree` - n-ary tree / N 叉树

pub mod list;
pub mod ntree;
pub mod tree;

use serde_json::Value;
use std::fmt;
use thiserror::Error;

pub use list::ListNode;
pub use ntree::NTreeNode;
pub use tree::TreeNode;

/// Error raised when a flat list has a structural marker that cannot be placed.
/// 当扁平列表中的结构标记无法放置时产生的错误。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NodeError {
    #[error("{kind} literal must be an array or null, got {found}")]
    NotAnArray { kind: NodeKind, found: String },
    #[error("{kind} literal has a value at position {position} with no pending parent")]
    NoPendingParent { kind: NodeKind, position: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    List,
    Tree,
    NTree,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::List => "ListNode",
            NodeKind::Tree => "TreeNode",
            NodeKind::NTree => "Node",
        };
        write!(f, "{name}")
    }
}

/// A decoded structure of one of the three kinds. `None` is the empty structure.
/// 三种类型之一的已解码结构。`None` 表示空结构。
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    List(Option<Box<ListNode>>),
    Tree(Option<Box<TreeNode>>),
    NTree(Option<Box<NTreeNode>>),
}

impl NodeValue {
    /// Decodes a literal (`null` or an array) into a structure of `kind`.
    ///
    /// # Errors
    /// Returns a `NodeError` if the literal is neither an array nor `null`, or
    /// if it carries a value that has no pending parent slot.
    pub fn from_literal(kind: NodeKind, literal: &Value) -> Result<Self, NodeError> {
        let values: &[Value] = match literal {
            Value::Null => &[],
            Value::Array(values) => values,
            other => {
                return Err(NodeError::NotAnArray {
                    kind,
                    found: other.to_string(),
                });
            }
        };

        Ok(match kind {
            NodeKind::List => NodeValue::List(list::from_list(values)),
            NodeKind::Tree => NodeValue::Tree(tree::from_list(values)?),
            NodeKind::NTree => NodeValue::NTree(ntree::from_list(values)?),
        })
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            NodeValue::List(_) => NodeKind::List,
            NodeValue::Tree(_) => NodeKind::Tree,
            NodeValue::NTree(_) => NodeKind::NTree,
        }
    }

    /// Flattens the structure back into its level-order list.
    pub fn to_list(&self) -> Vec<Value> {
        match self {
            NodeValue::List(head) => list::to_list(head.as_deref()),
            NodeValue::Tree(root) => tree::to_list(root.as_deref()),
            NodeValue::NTree(root) => ntree::to_list(root.as_deref()),
        }
    }

    pub fn to_literal(&self) -> Value {
        Value::Array(self.to_list())
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_literal())
    }
}

/// Drops trailing `null` placeholders.
pub(crate) fn trim_trailing_nulls(values: &mut Vec<Value>) {
    while values.last().is_some_and(Value::is_null) {
        values.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(kind: NodeKind, literal: Value) -> Value {
        NodeValue::from_literal(kind, &literal).unwrap().to_literal()
    }

    #[test]
    fn test_round_trip_every_kind() {
        assert_eq!(round_trip(NodeKind::List, json!([1, 2, 3])), json!([1, 2, 3]));
        assert_eq!(
            round_trip(NodeKind::Tree, json!([1, null, 2, 3])),
            json!([1, null, 2, 3])
        );
        assert_eq!(
            round_trip(NodeKind::NTree, json!([1, null, 3, 2, 4, null, 5, 6])),
            json!([1, null, 3, 2, 4, null, 5, 6])
        );
    }

    #[test]
    fn test_trailing_placeholders_are_trimmed() {
        assert_eq!(
            round_trip(NodeKind::Tree, json!([1, 2, null, null, null])),
            json!([1, 2])
        );
        assert_eq!(
            round_trip(NodeKind::NTree, json!([1, null, 2, null, null])),
            json!([1, null, 2])
        );
    }

    #[test]
    fn test_null_and_empty_decode_to_empty_structure() {
        for kind in [NodeKind::List, NodeKind::Tree, NodeKind::NTree] {
            assert_eq!(round_trip(kind, Value::Null), json!([]));
            assert_eq!(round_trip(kind, json!([])), json!([]));
        }
    }

    #[test]
    fn test_scalar_literal_is_rejected() {
        let err = NodeValue::from_literal(NodeKind::List, &json!(5)).unwrap_err();
        assert!(matches!(err, NodeError::NotAnArray { .. }));
    }
}
