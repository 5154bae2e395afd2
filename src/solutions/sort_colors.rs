//! Sort Colors, in place. The runner reports the sorted array as the result.

use serde_json::Value;

use crate::core::config::Settings;
use crate::core::resolver::Target;
use crate::core::solution::{Arg, FunctionDecl, LiteralType, Param, Shape, SolutionModule, TargetError};

/// Dutch national flag partition.
pub fn sort_colors(nums: &mut [i64]) {
    let (mut low, mut mid, mut high) = (0, 0, nums.len());
    while mid < high {
        match nums[mid] {
            0 => {
                nums.swap(low, mid);
                low += 1;
                mid += 1;
            }
            1 => mid += 1,
            _ => {
                high -= 1;
                nums.swap(mid, high);
            }
        }
    }
}

fn sorted_argument(target: &Target, args: &mut [Value]) -> Result<Value, TargetError> {
    target.call(args)?;
    args.first()
        .cloned()
        .ok_or_else(|| TargetError::Argument("sortColors takes the array to sort".to_string()))
}

pub fn module() -> SolutionModule {
    SolutionModule::new("sort_colors")
        .function(FunctionDecl::new(
            "sortColors",
            vec![Param::new("nums").literal(LiteralType::Array)],
            Shape::Plain,
            |args| {
                let mut nums: Vec<i64> = args[0].decode()?;
                sort_colors(&mut nums);
                args[0].set(&nums)?;
                Ok(Arg::null())
            },
        ))
        .settings(Settings::new().runner(sorted_argument))
}
