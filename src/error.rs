//! 错误类型
//!
//! 求值引擎的所有失败都以值的形式返回，调用方负责打印消息并继续会话。

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// 表达式求值错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("Error: Division by zero!")]
    DivisionByZero,

    #[error("Error: Logarithm of non-positive number!")]
    NonPositiveLogarithm,

    #[error("Error: Square root of negative number!")]
    NegativeSquareRoot,

    /// 操作数数量不匹配：空输入、悬空运算符、多余的数字
    #[error("Error: Invalid expression!")]
    InvalidExpression,

    /// 仅在 `UnknownTokenPolicy::Reject` 下产生
    #[error("Error: Unrecognized input '{text}'!")]
    UnrecognizedInput { text: String, offset: usize },
}

impl EvalError {
    /// 算术定义域错误（除零、对数、开方）
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            EvalError::DivisionByZero | EvalError::NonPositiveLogarithm | EvalError::NegativeSquareRoot
        )
    }
}

pub type EvalResult<T> = Result<T, EvalError>;

/// 历史记录存储错误
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to read history file '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write history file '{}': {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

pub type HistoryResult<T> = Result<T, HistoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_calculator_output() {
        assert_eq!(EvalError::DivisionByZero.to_string(), "Error: Division by zero!");
        assert_eq!(
            EvalError::NonPositiveLogarithm.to_string(),
            "Error: Logarithm of non-positive number!"
        );
        assert_eq!(
            EvalError::NegativeSquareRoot.to_string(),
            "Error: Square root of negative number!"
        );
        assert_eq!(EvalError::InvalidExpression.to_string(), "Error: Invalid expression!");
    }

    #[test]
    fn domain_errors_are_classified() {
        assert!(EvalError::DivisionByZero.is_domain_error());
        assert!(!EvalError::InvalidExpression.is_domain_error());
        let err = EvalError::UnrecognizedInput { text: "x".into(), offset: 0 };
        assert!(!err.is_domain_error());
        assert_eq!(err.to_string(), "Error: Unrecognized input 'x'!");
    }
}
