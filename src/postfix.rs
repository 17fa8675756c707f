//! 中缀转后缀
//!
//! 运算符优先法（shunting-yard）单趟转换。本阶段不做结构校验，
//! 括号不匹配、操作数缺失等问题留给求值阶段的栈深检查。

use std::fmt;

use crate::lexer::Token;
use crate::operator::Operator;

/// 后缀序列中的元素，括号在转换中被消去
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PostfixItem {
    Number(f64),
    Operator(Operator),
}

impl fmt::Display for PostfixItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixItem::Number(value) => write!(f, "{}", value),
            PostfixItem::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// 以空格连接的后缀形式，如 `2 3 4 * +`
pub fn render(items: &[PostfixItem]) -> String {
    items.iter().map(|item| item.to_string()).collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum StackEntry {
    Operator(Operator),
    LeftParen,
}

impl StackEntry {
    fn precedence(self) -> u8 {
        match self {
            StackEntry::Operator(op) => op.precedence(),
            // 左括号只会被右括号弹出
            StackEntry::LeftParen => 0,
        }
    }
}

/// 弹出栈项到输出；未匹配的左括号没有后缀形式，直接丢弃
fn emit(entry: StackEntry, output: &mut Vec<PostfixItem>) {
    if let StackEntry::Operator(op) = entry {
        output.push(PostfixItem::Operator(op));
    }
}

pub fn to_postfix(tokens: &[Token]) -> Vec<PostfixItem> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackEntry> = Vec::new();

    for token in tokens {
        match *token {
            Token::Number(value) => output.push(PostfixItem::Number(value)),
            Token::LeftParen => stack.push(StackEntry::LeftParen),
            Token::RightParen => {
                while let Some(entry) = stack.pop() {
                    if entry == StackEntry::LeftParen {
                        break;
                    }
                    emit(entry, &mut output);
                }
                // sin(x)：括号之前的函数作用于括号内的值
                if let Some(&StackEntry::Operator(op)) = stack.last() {
                    if op.is_function() {
                        stack.pop();
                        output.push(PostfixItem::Operator(op));
                    }
                }
            }
            Token::Operator(op) if op.is_function() => stack.push(StackEntry::Operator(op)),
            Token::Operator(op) => {
                // 大于等于：所有二元运算符都按左结合处理，包括 `^`
                while let Some(&top) = stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    stack.pop();
                    emit(top, &mut output);
                }
                stack.push(StackEntry::Operator(op));
            }
        }
    }

    while let Some(entry) = stack.pop() {
        emit(entry, &mut output);
    }

    output
}
