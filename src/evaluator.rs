//! 后缀求值
//!
//! 在值栈上单趟执行后缀序列，遇到第一个错误即返回。

use crate::error::{EvalError, EvalResult};
use crate::operator::Operator;
use crate::postfix::PostfixItem;

/// 二元运算；左操作数为 `a`
pub(crate) fn apply_binary(op: Operator, a: f64, b: f64) -> EvalResult<f64> {
    match op {
        Operator::Add => Ok(a + b),
        Operator::Sub => Ok(a - b),
        Operator::Mul => Ok(a * b),
        Operator::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(a / b)
        }
        Operator::Pow => Ok(a.powf(b)),
        Operator::Sin
        | Operator::Cos
        | Operator::Tan
        | Operator::Log10
        | Operator::Exp
        | Operator::Sqrt => Err(EvalError::InvalidExpression),
    }
}

/// 一元函数
pub(crate) fn apply_function(op: Operator, value: f64) -> EvalResult<f64> {
    match op {
        Operator::Sin => Ok(value.sin()),
        Operator::Cos => Ok(value.cos()),
        Operator::Tan => Ok(value.tan()),
        Operator::Log10 => {
            if value <= 0.0 {
                return Err(EvalError::NonPositiveLogarithm);
            }
            Ok(value.log10())
        }
        Operator::Exp => Ok(value.exp()),
        Operator::Sqrt => {
            if value < 0.0 {
                return Err(EvalError::NegativeSquareRoot);
            }
            Ok(value.sqrt())
        }
        Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Pow => {
            Err(EvalError::InvalidExpression)
        }
    }
}

pub fn evaluate_postfix(items: &[PostfixItem]) -> EvalResult<f64> {
    let mut values: Vec<f64> = Vec::with_capacity(items.len());

    for item in items {
        match *item {
            PostfixItem::Number(value) => values.push(value),
            PostfixItem::Operator(op) if op.is_function() => {
                let value = values.pop().ok_or(EvalError::InvalidExpression)?;
                let result = apply_function(op, value)?;
                log::trace!("{}({}) = {}", op, value, result);
                values.push(result);
            }
            PostfixItem::Operator(op) => {
                let b = values.pop().ok_or(EvalError::InvalidExpression)?;
                let a = values.pop().ok_or(EvalError::InvalidExpression)?;
                let result = apply_binary(op, a, b)?;
                log::trace!("{} {} {} = {}", a, op, b, result);
                values.push(result);
            }
        }
    }

    match values.as_slice() {
        [result] => Ok(*result),
        _ => Err(EvalError::InvalidExpression),
    }
}
