//! 词法分析
//!
//! 基于 logos 将输入文本切分为 token 序列。无法识别的输入统一交给
//! [`UnknownTokenPolicy`] 处理：默认丢弃，严格模式下报错。

use std::fmt;

use logos::Logos;

use crate::error::{EvalError, EvalResult};
use crate::operator::Operator;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Number(f64),
    Operator(Operator),
    LeftParen,
    RightParen,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(value) => write!(f, "{}", value),
            Token::Operator(op) => write!(f, "{}", op),
            Token::LeftParen => f.write_str("("),
            Token::RightParen => f.write_str(")"),
        }
    }
}

/// 无法识别输入的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownTokenPolicy {
    /// 丢弃，数字串只取可读的前缀
    #[default]
    Skip,
    /// 以 `EvalError::UnrecognizedInput` 失败
    Reject,
}

impl UnknownTokenPolicy {
    fn unrecognized(self, text: &str, offset: usize) -> EvalResult<()> {
        match self {
            UnknownTokenPolicy::Skip => {
                log::warn!("ignoring unrecognized input '{}' at offset {}", text, offset);
                Ok(())
            }
            UnknownTokenPolicy::Reject => Err(EvalError::UnrecognizedInput {
                text: text.to_string(),
                offset,
            }),
        }
    }
}

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    #[regex(r"[0-9.]+")]
    Number,

    #[token("+", |_| Operator::Add)]
    #[token("-", |_| Operator::Sub)]
    #[token("*", |_| Operator::Mul)]
    #[token("/", |_| Operator::Div)]
    #[token("^", |_| Operator::Pow)]
    #[token("sin", |_| Operator::Sin)]
    #[token("cos", |_| Operator::Cos)]
    #[token("tan", |_| Operator::Tan)]
    #[token("log", |_| Operator::Log10)]
    #[token("exp", |_| Operator::Exp)]
    #[token("sqrt", |_| Operator::Sqrt)]
    Op(Operator),

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    // 不属于任何关键字的字母，逐个交给策略处理
    #[regex("[A-Za-z]")]
    Letter,
}

/// 读取 `digits[.digits]` 形式的最长前缀，返回数值与消耗的字节数
pub(crate) fn leading_decimal(run: &str) -> Option<(f64, usize)> {
    let bytes = run.as_bytes();
    let mut end = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end;
    if end < bytes.len() && bytes[end] == b'.' {
        let mut frac = end + 1;
        while frac < bytes.len() && bytes[frac].is_ascii_digit() {
            frac += 1;
        }
        digits += frac - end - 1;
        end = frac;
    }
    if digits == 0 {
        return None;
    }
    run[..end].parse::<f64>().ok().map(|value| (value, end))
}

/// 负数字面量只有 `(-4)` 一种写法：左括号、负号、数字、右括号在源文本中
/// 依次相邻（空白除外）。其余位置的 `-` 一律是减号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignState {
    Idle,
    Paren,
    ParenMinus,
    ParenMinusNumber,
}

impl SignState {
    fn after(self, lexeme: Option<Lexeme>) -> SignState {
        match (self, lexeme) {
            (_, Some(Lexeme::LParen)) => SignState::Paren,
            (SignState::Paren, Some(Lexeme::Op(Operator::Sub))) => SignState::ParenMinus,
            (SignState::ParenMinus, Some(Lexeme::Number)) => SignState::ParenMinusNumber,
            _ => SignState::Idle,
        }
    }
}

/// 把末尾的 `-`、数字合并为负数
fn fold_sign(tokens: &mut Vec<Token>) {
    if let [.., Token::Operator(Operator::Sub), Token::Number(value)] = tokens.as_slice() {
        let value = *value;
        tokens.truncate(tokens.len() - 2);
        tokens.push(Token::Number(-value));
    }
}

/// 宽松模式分词，从不失败
pub fn tokenize(text: &str) -> Vec<Token> {
    // Skip 策略下不会产生错误
    tokenize_with(text, UnknownTokenPolicy::Skip).unwrap_or_default()
}

pub fn tokenize_with(text: &str, policy: UnknownTokenPolicy) -> EvalResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut sign = SignState::Idle;
    let mut lexer = Lexeme::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let slice = lexer.slice();
        // 被丢弃或截断的输入同样打断 `(-4)` 的相邻关系
        let mut lexeme = result.ok();
        match result {
            Ok(Lexeme::Number) => match leading_decimal(slice) {
                Some((value, used)) => {
                    if used < slice.len() {
                        policy.unrecognized(&slice[used..], span.start + used)?;
                        lexeme = None;
                    }
                    tokens.push(Token::Number(value));
                }
                None => {
                    policy.unrecognized(slice, span.start)?;
                    lexeme = None;
                }
            },
            Ok(Lexeme::Op(op)) => tokens.push(Token::Operator(op)),
            Ok(Lexeme::LParen) => tokens.push(Token::LeftParen),
            Ok(Lexeme::RParen) => {
                if sign == SignState::ParenMinusNumber {
                    fold_sign(&mut tokens);
                }
                tokens.push(Token::RightParen);
            }
            Ok(Lexeme::Letter) | Err(()) => policy.unrecognized(slice, span.start)?,
        }
        sign = sign.after(lexeme);
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn splits_numbers_operators_and_parens() {
        let tokens = tokenize("2 + 3.5*(4)");
        assert_eq!(
            tokens,
            vec![
                Token::Number(2.0),
                Token::Operator(Operator::Add),
                Token::Number(3.5),
                Token::Operator(Operator::Mul),
                Token::LeftParen,
                Token::Number(4.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn recognizes_every_function_keyword() {
        let tokens = tokenize("sin cos tan log exp sqrt");
        let expected: Vec<Token> = Operator::FUNCTIONS.iter().map(|&op| Token::Operator(op)).collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn leading_minus_is_binary() {
        assert_eq!(
            tokenize("-5"),
            vec![Token::Operator(Operator::Sub), Token::Number(5.0)]
        );
    }

    #[test]
    fn minus_after_left_paren_is_a_sign() {
        assert_eq!(
            tokenize("sqrt(-4)"),
            vec![
                Token::Operator(Operator::Sqrt),
                Token::LeftParen,
                Token::Number(-4.0),
                Token::RightParen,
            ]
        );
        assert_eq!(
            tokenize("(2-4)"),
            vec![
                Token::LeftParen,
                Token::Number(2.0),
                Token::Operator(Operator::Sub),
                Token::Number(4.0),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn sign_folds_only_for_parenthesized_literal() {
        assert_eq!(
            tokenize("( - 4 )"),
            vec![Token::LeftParen, Token::Number(-4.0), Token::RightParen]
        );
        // `-` 与数字之间有被丢弃的字符
        assert_eq!(
            tokenize("(x-4)"),
            vec![
                Token::LeftParen,
                Token::Operator(Operator::Sub),
                Token::Number(4.0),
                Token::RightParen,
            ]
        );
        // 数字后面还有运算符
        assert_eq!(
            tokenize("(-3^2)"),
            vec![
                Token::LeftParen,
                Token::Operator(Operator::Sub),
                Token::Number(3.0),
                Token::Operator(Operator::Pow),
                Token::Number(2.0),
                Token::RightParen,
            ]
        );
        assert_eq!(
            tokenize("(-4"),
            vec![Token::LeftParen, Token::Operator(Operator::Sub), Token::Number(4.0)]
        );
    }

    #[test]
    fn stray_letters_are_dropped() {
        assert_eq!(
            tokenize("ssqrt(x9)"),
            vec![
                Token::Operator(Operator::Sqrt),
                Token::LeftParen,
                Token::Number(9.0),
                Token::RightParen,
            ]
        );
        assert_eq!(tokenize("2 # 3"), vec![Token::Number(2.0), Token::Number(3.0)]);
    }

    #[test]
    fn number_runs_keep_leading_decimal() {
        assert_eq!(tokenize("1.2.3"), vec![Token::Number(1.2)]);
        assert_eq!(tokenize(".5"), vec![Token::Number(0.5)]);
        assert_eq!(tokenize("7."), vec![Token::Number(7.0)]);
        assert!(tokenize(".").is_empty());
    }

    #[test]
    fn reject_policy_reports_offset() {
        let err = tokenize_with("2 + abc", UnknownTokenPolicy::Reject).unwrap_err();
        assert_eq!(err, EvalError::UnrecognizedInput { text: "a".into(), offset: 4 });

        let err = tokenize_with("1.2.3", UnknownTokenPolicy::Reject).unwrap_err();
        assert_eq!(err, EvalError::UnrecognizedInput { text: ".3".into(), offset: 3 });

        assert!(tokenize_with("sqrt(2) ^ 2", UnknownTokenPolicy::Reject).is_ok());
    }

    #[test]
    fn leading_decimal_prefixes() {
        assert_eq!(leading_decimal("12"), Some((12.0, 2)));
        assert_eq!(leading_decimal("1.25x"), Some((1.25, 4)));
        assert_eq!(leading_decimal(".."), None);
    }
}
