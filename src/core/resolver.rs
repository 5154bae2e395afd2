//! # Target Resolver Module / 目标解析模块
//!
//! Decides whether a solution fits a testing mode and picks the one target
//! that mode will invoke.
//!
//! 判断解答是否适用于某种测试模式，并选出该模式要调用的唯一目标。
//!
//! ## Modes / 模式
//!
//! - `function` - a free function, no `Solution` class and no entry point
//! - `method` - a public method of the `Solution` class
//! - `class` - a single non-reserved class driven by command sequences
//! - `stream` - the `main` entry point, fed through input/output streams

use serde_json::Value;
use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use crate::core::config::RunnerConfig;
use crate::core::error::{HarnessError, HarnessResult};
use crate::core::solution::{
    Arg, Body, ClassDecl, FunctionDecl, MethodDecl, Param, Shape, SolutionModule, TargetError,
    TargetResult,
};
use crate::core::testers::marshal;
use crate::infra::panic::invoke_guarded;
use crate::infra::stdio;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Function,
    Method,
    Class,
    Stream,
}

impl Mode {
    /// Every mode, in automatic detection order.
    pub const ALL: [Mode; 4] = [Mode::Function, Mode::Method, Mode::Class, Mode::Stream];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Function => "function",
            Mode::Method => "method",
            Mode::Class => "class",
            Mode::Stream => "stream",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| {
                format!("tester \"{s}\" not found, expected one of: function, method, class, stream")
            })
    }
}

/// Reserved names that steer resolution.
/// 影响目标解析的保留名称。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    pub solution_class: String,
    pub entry_function: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self::from(&RunnerConfig::default())
    }
}

impl From<&RunnerConfig> for Conventions {
    fn from(config: &RunnerConfig) -> Self {
        Self {
            solution_class: config.solution_class_name.clone(),
            entry_function: config.main_function_name.clone(),
        }
    }
}

/// The resolved invocable entity.
/// 解析得到的可调用目标。
#[derive(Debug, Clone)]
pub enum Target {
    Function(FunctionDecl),
    Method { class: ClassDecl, method: MethodDecl },
    Class(ClassDecl),
    Stream(FunctionDecl),
}

impl Target {
    pub fn mode(&self) -> Mode {
        match self {
            Target::Function(_) => Mode::Function,
            Target::Method { .. } => Mode::Method,
            Target::Class(_) => Mode::Class,
            Target::Stream(_) => Mode::Stream,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Target::Function(function) | Target::Stream(function) => function.name.clone(),
            Target::Method { class, method } => format!("{}.{}", class.name, method.name),
            Target::Class(class) => class.name.clone(),
        }
    }

    /// Calls the target once with raw literal arguments, the way the default
    /// strategies do: structures are marshalled by the declared shapes, the
    /// return value is flattened, and arguments mutated in place are written
    /// back into `args`. Custom runners use this to delegate to the target.
    ///
    /// A method is called on a fresh instance. A stream entry point reads the
    /// first argument as its input text and returns its output text. A class
    /// target is driven by command sequences and cannot be called this way.
    pub fn call(&self, args: &mut [Value]) -> Result<Value, TargetError> {
        match self {
            Target::Function(function) => match &function.body {
                Body::Args(body) => self.call_marshalled(&function.params, function.returns, args, |a| body(a)),
                Body::Stream(_) => Err(TargetError::failed(format!(
                    "{} is a stream entry point",
                    function.name
                ))),
            },
            Target::Method { class, method } => {
                self.call_marshalled(&method.params, method.returns, args, |a| {
                    let mut instance = class.instantiate(&mut [])?;
                    (method.body)(instance.as_mut(), a)
                })
            }
            Target::Class(class) => Err(TargetError::failed(format!(
                "class {} is driven by command sequences",
                class.name
            ))),
            Target::Stream(function) => {
                let input = args.first().and_then(Value::as_str).unwrap_or_default().trim();
                invoke_guarded(|| run_stream(function, input)).map(Value::String)
            }
        }
    }

    fn call_marshalled(
        &self,
        params: &[Param],
        returns: Shape,
        args: &mut [Value],
        call: impl FnOnce(&mut [Arg]) -> TargetResult,
    ) -> Result<Value, TargetError> {
        let invocation = marshal::invoke(self, params, returns, args, call).map_err(|e| match e {
            HarnessError::TargetRuntime { source, .. } => source,
            other => TargetError::Argument(other.to_string()),
        })?;
        args.clone_from_slice(&invocation.args_after);
        Ok(invocation.value)
    }
}

/// Runs a stream entry point on `input` and returns what it wrote.
///
/// Entry points taking handles get an in-memory reader and writer; the others
/// run inside a stdio redirect that is undone on every exit path.
pub(crate) fn run_stream(function: &FunctionDecl, input: &str) -> Result<String, TargetError> {
    match &function.body {
        Body::Stream(body) => {
            let mut reader = Cursor::new(input.as_bytes());
            let mut output = Vec::new();
            body(&mut reader, &mut output)?;
            Ok(String::from_utf8_lossy(&output).into_owned())
        }
        Body::Args(body) => {
            let guard = stdio::redirect(input);
            body(&mut [])?;
            Ok(guard.finish())
        }
    }
}

fn has_entry(module: &SolutionModule, conventions: &Conventions) -> bool {
    module.find_function(&conventions.entry_function).is_some()
}

fn command_classes<'a>(module: &'a SolutionModule, conventions: &Conventions) -> Vec<&'a ClassDecl> {
    module
        .classes
        .iter()
        .filter(|class| class.name != conventions.solution_class)
        .filter(|class| class.public_methods().count() > 1)
        .collect()
}

/// Whether `module` has the shape `mode` expects.
///
/// 判断 `module` 是否符合 `mode` 所需的结构。
pub fn verify(mode: Mode, module: &SolutionModule, conventions: &Conventions) -> bool {
    let entry = has_entry(module, conventions);
    let solution_class = module.find_class(&conventions.solution_class);

    match mode {
        Mode::Function => !module.functions.is_empty() && !entry && solution_class.is_none(),
        Mode::Method => !entry && solution_class.is_some_and(|c| c.public_methods().count() > 0),
        Mode::Class => {
            !entry && solution_class.is_none() && command_classes(module, conventions).len() == 1
        }
        Mode::Stream => entry,
    }
}

/// Selects the target for `mode`, honouring an explicit `target` name.
///
/// # Errors
/// Returns `HarnessError::Resolution` naming the mode and the module when no
/// target fits, when the choice is ambiguous or when the target path is deeper
/// than `Class.method`.
pub fn resolve(
    mode: Mode,
    module: &SolutionModule,
    target: Option<&str>,
    conventions: &Conventions,
) -> HarnessResult<Target> {
    let fail = |reason: String| HarnessError::Resolution {
        mode: mode.to_string(),
        module: module.name.clone(),
        reason,
    };

    match mode {
        Mode::Function => {
            let function = match target {
                Some(name) => module
                    .find_function(name)
                    .ok_or_else(|| fail(format!("there is no function {name}")))?,
                None => module
                    .functions
                    .iter()
                    .find(|f| matches!(f.body, Body::Args(_)))
                    .ok_or_else(|| fail("the solution has no functions".to_string()))?,
            };
            if matches!(function.body, Body::Stream(_)) {
                return Err(fail(format!("{} is a stream entry point", function.name)));
            }
            Ok(Target::Function(function.clone()))
        }
        Mode::Method => {
            let (class_name, method_name) = match target {
                None => (conventions.solution_class.as_str(), None),
                Some(path) => {
                    let segments: Vec<&str> = path.split('.').collect();
                    match segments.as_slice() {
                        [method] => (conventions.solution_class.as_str(), Some(*method)),
                        [class, method] => (*class, Some(*method)),
                        _ => {
                            return Err(fail(format!(
                                "searching nested classes is not supported ({path})"
                            )));
                        }
                    }
                }
            };

            let class = module
                .find_class(class_name)
                .ok_or_else(|| fail(format!("there is no class {class_name}")))?;
            let first_public = class
                .public_methods()
                .next()
                .ok_or_else(|| fail(format!("class {class_name} has no public methods")))?;
            let method = match method_name {
                Some(name) => class
                    .method(name)
                    .ok_or_else(|| fail(format!("class {class_name} has no method {name}")))?,
                None => first_public,
            };
            if class.constructor.iter().any(|p| !p.optional) {
                return Err(fail(format!(
                    "class {class_name} cannot be constructed without arguments"
                )));
            }

            Ok(Target::Method {
                class: class.clone(),
                method: method.clone(),
            })
        }
        Mode::Class => {
            let class = match target {
                Some(name) => module
                    .find_class(name)
                    .ok_or_else(|| fail(format!("there is no class {name}")))?,
                None => match command_classes(module, conventions).as_slice() {
                    [] => {
                        return Err(fail(
                            "no class other than the solution class has more than one public method"
                                .to_string(),
                        ));
                    }
                    [class] => *class,
                    many => {
                        let names: Vec<&str> = many.iter().map(|c| c.name.as_str()).collect();
                        return Err(fail(format!(
                            "several classes qualify ({}), name one as the target",
                            names.join(", ")
                        )));
                    }
                },
            };
            Ok(Target::Class(class.clone()))
        }
        Mode::Stream => {
            let name = target.unwrap_or(&conventions.entry_function);
            let function = module
                .find_function(name)
                .ok_or_else(|| fail(format!("there is no function {name}")))?;
            if matches!(function.body, Body::Args(_)) && function.required_params() > 0 {
                return Err(fail(format!("entry point {name} must take no parameters")));
            }
            Ok(Target::Stream(function.clone()))
        }
    }
}
