//! 求值引擎
//!
//! 串联分词、转换与求值三个阶段。引擎不保存调用之间的任何状态。

use crate::error::EvalResult;
use crate::evaluator::evaluate_postfix;
use crate::lexer::{UnknownTokenPolicy, tokenize_with};
use crate::postfix::{PostfixItem, render, to_postfix};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineConfig {
    pub unknown_tokens: UnknownTokenPolicy,
}

impl EngineConfig {
    pub fn strict() -> Self {
        Self {
            unknown_tokens: UnknownTokenPolicy::Reject,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// 分词并转换为后缀序列
    pub fn compile(&self, expression: &str) -> EvalResult<Vec<PostfixItem>> {
        let tokens = tokenize_with(expression.trim(), self.config.unknown_tokens)?;
        log::debug!("tokens: {:?}", tokens);
        let postfix = to_postfix(&tokens);
        log::debug!("postfix: {}", render(&postfix));
        Ok(postfix)
    }

    pub fn evaluate(&self, expression: &str) -> EvalResult<f64> {
        let postfix = self.compile(expression)?;
        evaluate_postfix(&postfix)
    }
}

/// 使用默认配置求值
pub fn evaluate(expression: &str) -> EvalResult<f64> {
    Engine::default().evaluate(expression)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EvalError;

    #[test]
    fn evaluates_with_default_config() {
        assert_eq!(evaluate("  2+3*4 \n"), Ok(14.0));
    }

    #[test]
    fn strict_engine_rejects_noise() {
        let engine = Engine::new(EngineConfig::strict());
        assert!(matches!(
            engine.evaluate("2 + x"),
            Err(EvalError::UnrecognizedInput { .. })
        ));
        assert_eq!(evaluate("2 + x"), Err(EvalError::InvalidExpression));
        assert_eq!(evaluate("2 x + 1"), Ok(3.0));
    }

    #[test]
    fn compile_exposes_postfix_form() {
        let postfix = Engine::default().compile("sqrt(16) + 1").unwrap();
        assert_eq!(render(&postfix), "16 sqrt 1 +");
    }
}
