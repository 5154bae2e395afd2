//! # Literal Parser Module / 字面量解析模块
//!
//! Splits raw test text into blocks separated by blank lines and decodes each
//! line of a block as a JSON literal. Stream tests re-pair the blocks as
//! (input, output).
//!
//! 将原始测试文本按空行拆分为测试块，并将块中的每一行解析为 JSON 字面量。
//! 流式测试会将测试块重新配对为（输入，输出）。

use serde_json::Value;

use crate::core::error::{HarnessError, HarnessResult};

/// Splits text into blocks. Any run of blank lines is a single separator, so
/// no empty block is ever produced between two blocks.
///
/// 将文本拆分为测试块。任意数量的连续空行都只算作一个分隔符。
pub fn split_blocks(text: &str) -> Vec<String> {
    let lines: Vec<&str> = text.trim().lines().map(str::trim).collect();
    if lines.is_empty() {
        return Vec::new();
    }

    let kept: Vec<&str> = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| *i == 0 || !line.is_empty() || !lines[i - 1].is_empty())
        .map(|(_, line)| *line)
        .collect();

    kept.join("\n").split("\n\n").map(str::to_string).collect()
}

/// Parses every block as a list of literals, one literal per line.
///
/// # Errors
/// Returns `HarnessError::DataFormat` naming the block and the line when a
/// line is not valid literal syntax.
pub fn parse_lines(text: &str) -> HarnessResult<Vec<Vec<Value>>> {
    split_blocks(text)
        .iter()
        .enumerate()
        .map(|(block_index, block)| {
            block
                .lines()
                .map(|line| {
                    serde_json::from_str::<Value>(line).map_err(|e| {
                        HarnessError::data(format!(
                            "line {line:?} of block {} is not a valid literal: {e}",
                            block_index + 1
                        ))
                    })
                })
                .collect()
        })
        .collect()
}

/// Pairs blocks as (input, output). An odd block count gets an empty output
/// block appended.
///
/// 将测试块配对为（输入，输出）。块数为奇数时补一个空的输出块。
pub fn parse_stream(text: &str) -> Vec<(String, String)> {
    let mut blocks = split_blocks(text);
    if blocks.len() % 2 != 0 {
        blocks.push(String::new());
    }

    blocks
        .chunks(2)
        .map(|pair| (pair[0].clone(), pair[1].clone()))
        .collect()
}

/// Structural equality that treats `1` and `1.0` as the same number.
pub fn deep_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if a.is_f64() || b.is_f64() {
                a.as_f64() == b.as_f64()
            } else {
                a == b
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| deep_eq(x, y)))
        }
        _ => left == right,
    }
}

/// Renders a literal on one line.
pub fn to_literal_string(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}
