//! # Harness Error Module / 测试框架错误模块
//!
//! Every failure the engine can raise while preparing or running a test case.
//! All variants except `TargetRuntime` describe a problem with the test data,
//! the solution's declarations or the settings; `TargetRuntime` wraps an error
//! raised by the solution code itself. Every variant is fatal to the run.
//!
//! 引擎在准备或运行测试用例时可能产生的所有错误。
//! 除 `TargetRuntime` 外，所有变体都描述测试数据、解答声明或设置中的问题；
//! `TargetRuntime` 包装解答代码自身产生的错误。所有变体都会终止本次运行。

use serde_json::Value;
use thiserror::Error;

use crate::core::literal::to_literal_string;
use crate::core::nodes::NodeError;
use crate::core::solution::TargetError;

#[derive(Error, Debug)]
pub enum HarnessError {
    /// A malformed literal line, a block with the wrong arity or mismatched
    /// command/argument/expected lengths.
    /// 格式错误的字面量行、元数错误的测试块或长度不一致的命令序列。
    #[error("data format error: {0}")]
    DataFormat(String),

    /// No target, an ambiguous target or an unsupported target path for the mode.
    /// 当前模式下没有目标、目标不唯一或目标路径不受支持。
    #[error("cannot resolve a {mode} target in solution '{module}': {reason}")]
    Resolution {
        mode: String,
        module: String,
        reason: String,
    },

    /// Argument count or shape does not match the resolved target's parameters.
    /// 参数数量或形状与目标声明的参数不匹配。
    #[error("signature error: {0}")]
    Signature(String),

    /// The solution code returned an error or panicked.
    /// 解答代码返回了错误或发生了 panic。
    #[error("{target} raised an error: {source}")]
    TargetRuntime {
        target: String,
        #[source]
        source: TargetError,
    },

    #[error("invalid settings: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<NodeError> for HarnessError {
    fn from(err: NodeError) -> Self {
        HarnessError::DataFormat(err.to_string())
    }
}

impl HarnessError {
    pub(crate) fn data(message: impl Into<String>) -> Self {
        HarnessError::DataFormat(message.into())
    }

    pub(crate) fn signature(message: impl Into<String>) -> Self {
        HarnessError::Signature(message.into())
    }

    /// Names the offending test tuple in data format and signature errors.
    /// Other variants are returned unchanged.
    pub fn in_test(self, test: &Value) -> Self {
        let with_test = |message: String| format!("{message}\n  in test: {}", to_literal_string(test));
        match self {
            HarnessError::DataFormat(message) => HarnessError::DataFormat(with_test(message)),
            HarnessError::Signature(message) => HarnessError::Signature(with_test(message)),
            other => other,
        }
    }
}

pub type HarnessResult<T> = Result<T, HarnessError>;
