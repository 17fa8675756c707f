//! 交互会话
//!
//! 保存“上一次结果”并负责把以运算符开头的输入接到它后面，
//! 成功的计算写入历史。

use crate::engine::Engine;
use crate::error::{EvalResult, HistoryResult};
use crate::history::{HistoryRecord, HistoryStore};
use crate::operator::Operator;

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 计算成功；`expression` 为实际求值的文本
    Evaluated { expression: String, result: f64 },
    /// 输入为 `C`，上一次结果已清除
    ResultCleared,
}

pub struct Session<S: HistoryStore> {
    engine: Engine,
    store: S,
    records: Vec<HistoryRecord>,
    last_result: Option<f64>,
}

/// 以 `to_string` 风格（六位小数）呈现上一次结果；负数加括号，
/// 因为引擎不支持一元负号。`-0.0` 同样按负数处理
pub fn render_previous(value: f64) -> String {
    if value.is_sign_negative() {
        format!("(0-{:.6})", -value)
    } else {
        format!("{:.6}", value)
    }
}

impl<S: HistoryStore> Session<S> {
    /// 启动时载入已有历史；载入失败时以空历史开始
    pub fn new(engine: Engine, store: S) -> Self {
        let records = match store.load_all() {
            Ok(records) => records,
            Err(e) => {
                log::warn!("{}", e);
                Vec::new()
            }
        };
        log::debug!("loaded {} history records", records.len());
        Self {
            engine,
            store,
            records,
            last_result: None,
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    pub fn last_result(&self) -> Option<f64> {
        self.last_result
    }

    pub fn clear_result(&mut self) {
        self.last_result = None;
    }

    pub fn clear_history(&mut self) -> HistoryResult<()> {
        self.records.clear();
        self.store.clear()
    }

    /// 将输入与上一次结果拼接成待求值的文本
    pub fn compose(&self, input: &str) -> String {
        let input = input.trim();
        let leading_operator = input.chars().next().and_then(Operator::from_binary_char);
        match (self.last_result, leading_operator) {
            (Some(previous), Some(_)) => format!("{} {}", render_previous(previous), input),
            _ => input.to_string(),
        }
    }

    pub fn submit(&mut self, input: &str) -> EvalResult<Outcome> {
        let input = input.trim();
        if input.eq_ignore_ascii_case("c") {
            self.clear_result();
            return Ok(Outcome::ResultCleared);
        }

        let expression = self.compose(input);
        let result = self.engine.evaluate(&expression)?;

        let record = HistoryRecord::new(expression.clone(), result);
        if let Err(e) = self.store.append(&record) {
            log::warn!("{}", e);
        }
        self.records.push(record);
        self.last_result = Some(result);

        Ok(Outcome::Evaluated { expression, result })
    }
}
