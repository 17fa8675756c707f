//! 运算符与函数
//!
//! 二元运算符和一元函数共用一个封闭枚举，优先级与元数都由方法给出。

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Sin,
    Cos,
    Tan,
    Log10,
    Exp,
    Sqrt,
}

impl Operator {
    pub const BINARY: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
    ];

    pub const FUNCTIONS: [Operator; 6] = [
        Operator::Sin,
        Operator::Cos,
        Operator::Tan,
        Operator::Log10,
        Operator::Exp,
        Operator::Sqrt,
    ];

    /// 优先级：`+ -` 为 1，`* /` 为 2，`^` 为 3，函数为 4
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Add | Operator::Sub => 1,
            Operator::Mul | Operator::Div => 2,
            Operator::Pow => 3,
            Operator::Sin
            | Operator::Cos
            | Operator::Tan
            | Operator::Log10
            | Operator::Exp
            | Operator::Sqrt => 4,
        }
    }

    pub fn is_function(self) -> bool {
        Self::FUNCTIONS.contains(&self)
    }

    /// 消耗的操作数个数
    pub fn arity(self) -> usize {
        if self.is_function() { 1 } else { 2 }
    }

    /// 书写形式；`Log10` 在输入中写作 `log`
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::Tan => "tan",
            Operator::Log10 => "log",
            Operator::Exp => "exp",
            Operator::Sqrt => "sqrt",
        }
    }

    /// 单字符二元运算符
    pub fn from_binary_char(c: char) -> Option<Operator> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
