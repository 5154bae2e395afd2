//! # Solution Model Module / 解答模型模块
//!
//! A solution is registered as a `SolutionModule`: an ordered list of free
//! functions and classes, each declared together with a parameter descriptor
//! (name, shape and optionally a literal type). The descriptors tell the
//! testers how many arguments a target takes and which of them must be
//! marshalled into linked lists or trees before the call.
//!
//! 解答以 `SolutionModule` 的形式注册：一个有序的自由函数和类列表，
//! 每个都附带参数描述（名称、形状以及可选的字面量类型）。
//! 测试器据此得知目标需要多少个参数，以及哪些参数在调用前需要转换为链表或树。

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::any::{Any, type_name};
use std::fmt;
use std::io::{BufRead, Write};
use std::marker::PhantomData;
use std::rc::Rc;
use thiserror::Error;

use crate::core::config::Settings;
use crate::core::literal::to_literal_string;
use crate::core::nodes::{ListNode, NTreeNode, NodeKind, NodeValue, TreeNode};

/// An error raised by solution code.
/// 解答代码产生的错误。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TargetError {
    #[error("{0}")]
    Failed(String),
    /// An argument could not be read as the type the solution asked for.
    #[error("bad argument: {0}")]
    Argument(String),
    #[error("panicked at {}: {message}", location.as_deref().unwrap_or("<unknown>"))]
    Panicked {
        message: String,
        location: Option<String>,
    },
}

impl TargetError {
    pub fn failed(message: impl Into<String>) -> Self {
        TargetError::Failed(message.into())
    }
}

impl From<std::io::Error> for TargetError {
    fn from(err: std::io::Error) -> Self {
        TargetError::Failed(err.to_string())
    }
}

pub type TargetResult = Result<Arg, TargetError>;

/// Literal type a parameter may be pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralType {
    Integer,
    Float,
    Bool,
    String,
    Array,
    Object,
}

impl LiteralType {
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            LiteralType::Integer => value.is_i64() || value.is_u64(),
            LiteralType::Float => value.is_number(),
            LiteralType::Bool => value.is_boolean(),
            LiteralType::String => value.is_string(),
            LiteralType::Array => value.is_array(),
            LiteralType::Object => value.is_object(),
        }
    }
}

impl fmt::Display for LiteralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LiteralType::Integer => "int",
            LiteralType::Float => "float",
            LiteralType::Bool => "bool",
            LiteralType::String => "str",
            LiteralType::Array => "list",
            LiteralType::Object => "dict",
        };
        write!(f, "{name}")
    }
}

/// How a parameter or return value crosses the literal boundary.
/// 参数或返回值如何跨越字面量边界。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Shape {
    #[default]
    Plain,
    /// One structure encoded as a flat list.
    Node(NodeKind),
    /// A list of structures, each encoded as a flat list.
    NodeArray(NodeKind),
}

impl Shape {
    /// Whether `value` can be marshalled through this shape.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Shape::Plain => true,
            Shape::Node(_) => value.is_array() || value.is_null(),
            Shape::NodeArray(_) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| v.is_array() || v.is_null())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Plain => Ok(()),
            Shape::Node(kind) => write!(f, "{kind}"),
            Shape::NodeArray(kind) => write!(f, "list[{kind}]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub shape: Shape,
    pub literal: Option<LiteralType>,
    pub optional: bool,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shape: Shape::Plain,
            literal: None,
            optional: false,
        }
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name).shape(Shape::Node(NodeKind::List))
    }

    pub fn tree(name: impl Into<String>) -> Self {
        Self::new(name).shape(Shape::Node(NodeKind::Tree))
    }

    pub fn ntree(name: impl Into<String>) -> Self {
        Self::new(name).shape(Shape::Node(NodeKind::NTree))
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn literal(mut self, literal: LiteralType) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Whether `value` fits this parameter's shape and literal type.
    pub fn accepts(&self, value: &Value) -> bool {
        self.shape.accepts(value) && self.literal.is_none_or(|ty| ty.matches(value))
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        match (self.shape, self.literal) {
            (Shape::Plain, Some(ty)) => write!(f, ": {ty}")?,
            (Shape::Plain, None) => {}
            (shape, _) => write!(f, ": {shape}")?,
        }
        if self.optional {
            write!(f, " = ...")?;
        }
        Ok(())
    }
}

pub(crate) fn required_count(params: &[Param]) -> usize {
    params.iter().filter(|p| !p.optional).count()
}

pub(crate) fn render_params(params: &[Param]) -> String {
    params
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// A marshalled argument as seen by solution code.
/// 解答代码看到的已转换参数。
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Value(Value),
    Node(NodeValue),
    Nodes(Vec<NodeValue>),
}

impl Arg {
    pub fn null() -> Self {
        Arg::Value(Value::Null)
    }

    /// Serializes any value into a plain literal argument.
    pub fn encode<T: Serialize + ?Sized>(value: &T) -> TargetResult {
        serde_json::to_value(value)
            .map(Arg::Value)
            .map_err(|e| TargetError::Argument(e.to_string()))
    }

    /// Reads the argument as `T`. Structures are read through their flat list.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, TargetError> {
        serde_json::from_value(self.to_literal()).map_err(|e| {
            TargetError::Argument(format!(
                "cannot read {} as {}: {e}",
                to_literal_string(&self.to_literal()),
                type_name::<T>()
            ))
        })
    }

    /// Replaces the argument in place, the way a solution mutates its input.
    pub fn set<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), TargetError> {
        *self = Arg::encode(value)?;
        Ok(())
    }

    pub fn value(&self) -> Result<&Value, TargetError> {
        match self {
            Arg::Value(value) => Ok(value),
            other => Err(self.mismatch("a plain literal", other)),
        }
    }

    pub fn list(&self) -> Result<Option<Box<ListNode>>, TargetError> {
        match self {
            Arg::Node(NodeValue::List(head)) => Ok(head.clone()),
            other => Err(self.mismatch("a ListNode", other)),
        }
    }

    pub fn list_mut(&mut self) -> Result<&mut Option<Box<ListNode>>, TargetError> {
        match self {
            Arg::Node(NodeValue::List(head)) => Ok(head),
            _ => Err(TargetError::Argument("argument is not a ListNode".into())),
        }
    }

    pub fn tree(&self) -> Result<Option<Box<TreeNode>>, TargetError> {
        match self {
            Arg::Node(NodeValue::Tree(root)) => Ok(root.clone()),
            other => Err(self.mismatch("a TreeNode", other)),
        }
    }

    pub fn tree_mut(&mut self) -> Result<&mut Option<Box<TreeNode>>, TargetError> {
        match self {
            Arg::Node(NodeValue::Tree(root)) => Ok(root),
            _ => Err(TargetError::Argument("argument is not a TreeNode".into())),
        }
    }

    pub fn ntree(&self) -> Result<Option<Box<NTreeNode>>, TargetError> {
        match self {
            Arg::Node(NodeValue::NTree(root)) => Ok(root.clone()),
            other => Err(self.mismatch("a Node", other)),
        }
    }

    pub fn ntree_mut(&mut self) -> Result<&mut Option<Box<NTreeNode>>, TargetError> {
        match self {
            Arg::Node(NodeValue::NTree(root)) => Ok(root),
            _ => Err(TargetError::Argument("argument is not a Node".into())),
        }
    }

    pub fn nodes(&self) -> Result<&[NodeValue], TargetError> {
        match self {
            Arg::Nodes(nodes) => Ok(nodes),
            other => Err(self.mismatch("a list of structures", other)),
        }
    }

    /// The literal form of the argument, structures flattened.
    pub fn to_literal(&self) -> Value {
        match self {
            Arg::Value(value) => value.clone(),
            Arg::Node(node) => node.to_literal(),
            Arg::Nodes(nodes) => Value::Array(nodes.iter().map(NodeValue::to_literal).collect()),
        }
    }

    fn mismatch(&self, wanted: &str, found: &Arg) -> TargetError {
        TargetError::Argument(format!(
            "expected {wanted}, got {}",
            to_literal_string(&found.to_literal())
        ))
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<NodeValue> for Arg {
    fn from(node: NodeValue) -> Self {
        Arg::Node(node)
    }
}

impl From<Option<Box<ListNode>>> for Arg {
    fn from(head: Option<Box<ListNode>>) -> Self {
        Arg::Node(NodeValue::List(head))
    }
}

impl From<Option<Box<TreeNode>>> for Arg {
    fn from(root: Option<Box<TreeNode>>) -> Self {
        Arg::Node(NodeValue::Tree(root))
    }
}

impl From<Option<Box<NTreeNode>>> for Arg {
    fn from(root: Option<Box<NTreeNode>>) -> Self {
        Arg::Node(NodeValue::NTree(root))
    }
}

pub type ArgsFn = Rc<dyn Fn(&mut [Arg]) -> TargetResult>;
pub type StreamFn = Rc<dyn Fn(&mut dyn BufRead, &mut dyn Write) -> Result<(), TargetError>>;
pub type MethodFn = Rc<dyn Fn(&mut dyn Any, &mut [Arg]) -> TargetResult>;
pub type ConstructFn = Rc<dyn Fn(&mut [Arg]) -> Result<Box<dyn Any>, TargetError>>;

/// What a function does when called.
#[derive(Clone)]
pub enum Body {
    /// Takes marshalled arguments and returns a value.
    Args(ArgsFn),
    /// A stream entry point reading and writing injected handles.
    Stream(StreamFn),
}

#[derive(Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Shape,
    pub body: Body,
}

impl FunctionDecl {
    pub fn new<F>(name: impl Into<String>, params: Vec<Param>, returns: Shape, body: F) -> Self
    where
        F: Fn(&mut [Arg]) -> TargetResult + 'static,
    {
        Self {
            name: name.into(),
            params,
            returns,
            body: Body::Args(Rc::new(body)),
        }
    }

    /// A zero-parameter entry point that reads `input` and writes `output`.
    pub fn stream<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&mut dyn BufRead, &mut dyn Write) -> Result<(), TargetError> + 'static,
    {
        Self {
            name: name.into(),
            params: Vec::new(),
            returns: Shape::Plain,
            body: Body::Stream(Rc::new(body)),
        }
    }

    pub fn required_params(&self) -> usize {
        required_count(&self.params)
    }

    pub fn signature(&self) -> String {
        format!("{}({})", self.name, render_params(&self.params))
    }
}

impl fmt::Debug for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDecl")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct MethodDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Shape,
    pub public: bool,
    pub body: MethodFn,
}

impl MethodDecl {
    pub fn required_params(&self) -> usize {
        required_count(&self.params)
    }
}

impl fmt::Debug for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodDecl")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

#[derive(Clone)]
pub struct ClassDecl {
    pub name: String,
    pub constructor: Vec<Param>,
    construct: Option<ConstructFn>,
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn builder<T: 'static>(name: impl Into<String>) -> ClassBuilder<T> {
        ClassBuilder::new(name)
    }

    pub fn public_methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.methods.iter().filter(|m| m.public)
    }

    pub fn method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Creates an instance from already marshalled constructor arguments.
    pub fn instantiate(&self, args: &mut [Arg]) -> Result<Box<dyn Any>, TargetError> {
        match &self.construct {
            Some(construct) => construct(args),
            None => Err(TargetError::failed(format!(
                "class {} has no constructor",
                self.name
            ))),
        }
    }

    pub fn signature(&self, method: &MethodDecl) -> String {
        format!(
            "{}.{}({})",
            self.name,
            method.name,
            render_params(&method.params)
        )
    }
}

impl fmt::Debug for ClassDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassDecl")
            .field("name", &self.name)
            .field("constructor", &self.constructor)
            .field("methods", &self.methods)
            .finish_non_exhaustive()
    }
}

/// Typed builder for a class; the instance type is erased when built.
/// 类的类型化构建器；构建时擦除实例类型。
pub struct ClassBuilder<T> {
    name: String,
    constructor: Vec<Param>,
    construct: Option<ConstructFn>,
    methods: Vec<MethodDecl>,
    _instance: PhantomData<fn() -> T>,
}

impl<T: 'static> ClassBuilder<T> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constructor: Vec::new(),
            construct: None,
            methods: Vec::new(),
            _instance: PhantomData,
        }
    }

    pub fn constructor<F>(mut self, params: Vec<Param>, construct: F) -> Self
    where
        F: Fn(&mut [Arg]) -> Result<T, TargetError> + 'static,
    {
        self.constructor = params;
        self.construct = Some(Rc::new(move |args: &mut [Arg]| {
            construct(args).map(|instance| Box::new(instance) as Box<dyn Any>)
        }));
        self
    }

    pub fn method<F>(self, name: impl Into<String>, params: Vec<Param>, returns: Shape, body: F) -> Self
    where
        F: Fn(&mut T, &mut [Arg]) -> TargetResult + 'static,
    {
        self.add_method(name.into(), params, returns, true, body)
    }

    /// A method that exists on the class but does not count as a test target.
    pub fn hidden_method<F>(self, name: impl Into<String>, params: Vec<Param>, returns: Shape, body: F) -> Self
    where
        F: Fn(&mut T, &mut [Arg]) -> TargetResult + 'static,
    {
        self.add_method(name.into(), params, returns, false, body)
    }

    fn add_method<F>(mut self, name: String, params: Vec<Param>, returns: Shape, public: bool, body: F) -> Self
    where
        F: Fn(&mut T, &mut [Arg]) -> TargetResult + 'static,
    {
        let body: MethodFn = Rc::new(move |instance: &mut dyn Any, args: &mut [Arg]| {
            let this = instance.downcast_mut::<T>().ok_or_else(|| {
                TargetError::failed(format!("instance is not a {}", type_name::<T>()))
            })?;
            body(this, args)
        });
        self.methods.push(MethodDecl {
            name,
            params,
            returns,
            public,
            body,
        });
        self
    }

    pub fn build(self) -> ClassDecl {
        ClassDecl {
            name: self.name,
            constructor: self.constructor,
            construct: self.construct,
            methods: self.methods,
        }
    }
}

impl<T: Default + 'static> ClassBuilder<T> {
    /// Registers `T::default()` as a zero-argument constructor.
    pub fn default_constructor(self) -> Self {
        self.constructor(Vec::new(), |_| Ok(T::default()))
    }
}

/// Everything a solution declares, in declaration order.
/// 解答声明的全部内容，按声明顺序排列。
#[derive(Clone, Debug)]
pub struct SolutionModule {
    pub name: String,
    pub functions: Vec<FunctionDecl>,
    pub classes: Vec<ClassDecl>,
    pub settings: Settings,
}

impl SolutionModule {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            classes: Vec::new(),
            settings: Settings::default(),
        }
    }

    pub fn function(mut self, function: FunctionDecl) -> Self {
        self.functions.push(function);
        self
    }

    pub fn class(mut self, class: ClassDecl) -> Self {
        self.classes.push(class);
        self
    }

    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn find_function(&self, name: &str) -> Option<&FunctionDecl> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn find_class(&self, name: &str) -> Option<&ClassDecl> {
        self.classes.iter().find(|c| c.name == name)
    }
}
