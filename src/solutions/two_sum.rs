//! Two Sum: indices of the two numbers adding up to a target.

use rand::Rng;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::core::config::Settings;
use crate::core::solution::{Arg, ClassDecl, LiteralType, Param, Shape, SolutionModule};

#[derive(Default)]
pub struct Solution;

impl Solution {
    pub fn two_sum(&self, nums: &[i64], target: i64) -> Option<[usize; 2]> {
        let mut seen = HashMap::with_capacity(nums.len());
        for (j, &num) in nums.iter().enumerate() {
            if let Some(&i) = seen.get(&(target - num)) {
                return Some([i, j]);
            }
            seen.insert(num, j);
        }
        None
    }
}

/// Any pair of distinct indices summing to the target is accepted.
fn is_valid_pair(args: &[Value], actual: &Value) -> bool {
    let (Some(nums), Some(target)) = (args[0].as_array(), args[1].as_i64()) else {
        return false;
    };
    let Some([i, j]) = actual
        .as_array()
        .and_then(|pair| Some([pair.first()?.as_u64()?, pair.get(1)?.as_u64()?]))
    else {
        return false;
    };

    let value = |index: u64| nums.get(index as usize).and_then(Value::as_i64);
    match (value(i), value(j)) {
        (Some(a), Some(b)) => i != j && a + b == target,
        _ => false,
    }
}

/// A random case with a guaranteed answer.
fn generate(max_len: usize, max_abs: i64) -> (Vec<Value>, Option<Value>) {
    let mut rng = rand::rng();
    let len = rng.random_range(2..=max_len);
    let nums: Vec<i64> = (0..len).map(|_| rng.random_range(-max_abs..=max_abs)).collect();

    let i = rng.random_range(0..len - 1);
    let j = rng.random_range(i + 1..len);
    let target = nums[i] + nums[j];
    (vec![json!(nums), json!(target)], Some(json!([i, j])))
}

pub fn module() -> SolutionModule {
    let solution = ClassDecl::builder::<Solution>("Solution")
        .default_constructor()
        .method(
            "twoSum",
            vec![
                Param::new("nums").literal(LiteralType::Array),
                Param::new("target").literal(LiteralType::Integer),
            ],
            Shape::Plain,
            |this, args| {
                let nums: Vec<i64> = args[0].decode()?;
                Arg::encode(&this.two_sum(&nums, args[1].decode()?))
            },
        )
        .build();

    SolutionModule::new("two_sum").class(solution).settings(
        Settings::new()
            .validator(|args, _, _, actual| is_valid_pair(args, actual))
            .case(vec![json!([2, 7, 11, 15]), json!(18)], Some(json!([1, 2])))
            .generator(|| generate(100, 1_000), Some(100))
            .generator(|| generate(10_000, 1_000_000_000), None),
    )
}
