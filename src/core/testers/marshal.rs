//! Conversion between raw literals and the arguments solution code receives,
//! plus the signature check shared by every classic strategy.

use serde_json::Value;
use std::time::{Duration, Instant};

use super::runtime_error;
use crate::core::error::{HarnessError, HarnessResult};
use crate::core::literal::to_literal_string;
use crate::core::nodes::NodeValue;
use crate::core::resolver::Target;
use crate::core::solution::{Arg, Param, Shape, TargetResult, required_count};
use crate::infra::panic::invoke_guarded;

/// Outcome of one call made with literal arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub value: Value,
    pub args_after: Vec<Value>,
    pub elapsed: Duration,
}

/// Marshals `args` by `params`, runs `call` under the panic guard and
/// flattens what it returns. Everything `call` does is timed and guarded,
/// so instance construction belongs inside it.
///
/// # Errors
/// `HarnessError::DataFormat` if an argument cannot be marshalled, and
/// `HarnessError::TargetRuntime` if `call` fails or panics.
pub fn invoke(
    target: &Target,
    params: &[Param],
    returns: Shape,
    args: &[Value],
    call: impl FnOnce(&mut [Arg]) -> TargetResult,
) -> HarnessResult<Invocation> {
    let mut marshalled = marshal_args(params, args)?;
    let baseline: Vec<Value> = marshalled.iter().map(Arg::to_literal).collect();

    let start = Instant::now();
    let returned = invoke_guarded(|| call(&mut marshalled)).map_err(|e| runtime_error(target, e))?;
    let elapsed = start.elapsed();

    Ok(Invocation {
        value: unmarshal(returned, returns),
        args_after: args_after(args, &baseline, &marshalled),
        elapsed,
    })
}

/// Marshals `values` by the shapes of `params`. Values past the declared
/// parameters stay plain.
pub fn marshal_args(params: &[Param], values: &[Value]) -> HarnessResult<Vec<Arg>> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let shape = params.get(i).map(|p| p.shape).unwrap_or_default();
            marshal(shape, value)
        })
        .collect()
}

fn marshal(shape: Shape, value: &Value) -> HarnessResult<Arg> {
    Ok(match shape {
        Shape::Plain => Arg::Value(value.clone()),
        Shape::Node(kind) => Arg::Node(NodeValue::from_literal(kind, value)?),
        Shape::NodeArray(kind) => {
            let items = value.as_array().ok_or_else(|| {
                HarnessError::data(format!(
                    "expected a list of {kind} literals, got {}",
                    to_literal_string(value)
                ))
            })?;
            Arg::Nodes(
                items
                    .iter()
                    .map(|item| NodeValue::from_literal(kind, item))
                    .collect::<Result<_, _>>()?,
            )
        }
    })
}

/// Flattens a returned argument. A `null` returned where a structure was
/// declared is the empty structure.
pub fn unmarshal(returned: Arg, returns: Shape) -> Value {
    match returned {
        Arg::Value(Value::Null) if returns != Shape::Plain => Value::Array(Vec::new()),
        other => other.to_literal(),
    }
}

/// Literal form of the arguments after a call. Arguments the call left
/// untouched keep their original literal, so that normalisation by the codec
/// (trimmed placeholders, `null` read as empty) is not reported as mutation.
pub fn args_after(before: &[Value], baseline: &[Value], args: &[Arg]) -> Vec<Value> {
    before
        .iter()
        .zip(baseline)
        .zip(args)
        .map(|((before, baseline), arg)| {
            let after = arg.to_literal();
            if &after == baseline {
                before.clone()
            } else {
                after
            }
        })
        .collect()
}

/// Renders a call for debug traces: `name(arg, ...): result`.
pub fn trace_line(name: &str, args: &[Value], result: &Value) -> String {
    let args = args
        .iter()
        .map(to_literal_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("{name}({args}): {}", to_literal_string(result))
}

/// Checks argument count, shapes and literal types against `params`.
///
/// # Errors
/// Returns `HarnessError::Signature` quoting the arguments and `signature`.
pub fn validate_signature(signature: &str, params: &[Param], args: &[Value]) -> HarnessResult<()> {
    let fits = args.len() >= required_count(params)
        && args.len() <= params.len()
        && params.iter().zip(args).all(|(param, value)| param.accepts(value));

    if fits {
        Ok(())
    } else {
        let args = args
            .iter()
            .map(to_literal_string)
            .collect::<Vec<_>>()
            .join(", ");
        Err(HarnessError::signature(format!(
            "arguments ({args}) are not suitable for the signature of {signature}"
        )))
    }
}
