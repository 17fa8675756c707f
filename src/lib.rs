//! 中缀算术表达式计算器
//!
//! 支持 `+ - * / ^`、括号以及 `sin cos tan log exp sqrt`。
//! 求值分三步：词法分析、中缀转后缀、后缀求值。

pub mod error;
pub mod operator;
pub mod lexer;
pub mod postfix;
pub mod evaluator;
pub mod engine;
pub mod history;
pub mod session;

pub use engine::{Engine, EngineConfig, evaluate};
pub use error::{EvalError, EvalResult, HistoryError};
pub use lexer::{Token, UnknownTokenPolicy, tokenize};
pub use operator::Operator;
pub use postfix::{PostfixItem, to_postfix};
