use serde_json::Value;

/// Singly linked list node in the LeetCode layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ListNode {
    pub val: Value,
    pub next: Option<Box<ListNode>>,
}

impl ListNode {
    pub fn new(val: impl Into<Value>) -> Self {
        Self {
            val: val.into(),
            next: None,
        }
    }
}

impl Drop for ListNode {
    // Unlink iteratively so long chains do not overflow the stack on drop.
    fn drop(&mut self) {
        let mut next = self.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

pub fn from_list(values: &[Value]) -> Option<Box<ListNode>> {
    values.iter().rev().fold(None, |next, val| {
        Some(Box::new(ListNode {
            val: val.clone(),
            next,
        }))
    })
}

pub fn to_list(head: Option<&ListNode>) -> Vec<Value> {
    let mut values = Vec::new();
    let mut node = head;

    while let Some(current) = node {
        values.push(current.val.clone());
        node = current.next.as_deref();
    }

    values
}
