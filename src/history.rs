//! 计算历史
//!
//! 每条记录占一行，格式为 `<expression> = <result>`。存储实现通过
//! [`HistoryStore`] 注入会话，引擎本身不接触历史。

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{HistoryError, HistoryResult};

pub const DEFAULT_HISTORY_FILE: &str = "calculator_history.txt";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub expression: String,
    pub result: f64,
}

impl HistoryRecord {
    pub fn new(expression: impl Into<String>, result: f64) -> Self {
        Self {
            expression: expression.into(),
            result,
        }
    }

    /// 解析一行记录；没有 `=` 或结果不是数字时返回 `None`
    pub fn parse_line(line: &str) -> Option<Self> {
        let (expression, result) = line.split_once('=')?;
        let expression = expression.strip_suffix(' ').unwrap_or(expression);
        let result = result.strip_prefix(' ').unwrap_or(result);
        let result = result.trim_end().parse::<f64>().ok()?;
        Some(Self::new(expression, result))
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.expression, self.result)
    }
}

pub trait HistoryStore {
    fn append(&mut self, record: &HistoryRecord) -> HistoryResult<()>;

    fn load_all(&self) -> HistoryResult<Vec<HistoryRecord>>;

    fn clear(&mut self) -> HistoryResult<()>;
}

fn parse_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Vec<HistoryRecord> {
    lines
        .filter_map(|line| {
            let record = HistoryRecord::parse_line(line);
            if record.is_none() && !line.trim().is_empty() {
                log::debug!("skipping unreadable history line: {:?}", line);
            }
            record
        })
        .collect()
}

/// 追加写入的文本文件
#[derive(Debug, Clone)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_error(&self, source: io::Error) -> HistoryError {
        HistoryError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Default for FileHistory {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_FILE)
    }
}

impl HistoryStore for FileHistory {
    fn append(&mut self, record: &HistoryRecord) -> HistoryResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_error(e))?;
        writeln!(file, "{}", record).map_err(|e| self.write_error(e))
    }

    fn load_all(&self) -> HistoryResult<Vec<HistoryRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => Ok(parse_lines(content.lines())),
            // 首次运行时文件不存在
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(source) => Err(HistoryError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn clear(&mut self) -> HistoryResult<()> {
        File::create(&self.path).map(|_| ()).map_err(|e| self.write_error(e))
    }
}

/// 内存中的存储，按文件格式保存每一行
#[derive(Debug, Clone, Default)]
pub struct MemoryHistory {
    lines: Vec<String>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl HistoryStore for MemoryHistory {
    fn append(&mut self, record: &HistoryRecord) -> HistoryResult<()> {
        self.lines.push(record.to_string());
        Ok(())
    }

    fn load_all(&self) -> HistoryResult<Vec<HistoryRecord>> {
        Ok(parse_lines(self.lines.iter().map(String::as_str)))
    }

    fn clear(&mut self) -> HistoryResult<()> {
        self.lines.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_record_lines() {
        assert_eq!(
            HistoryRecord::parse_line("2+3*4 = 14"),
            Some(HistoryRecord::new("2+3*4", 14.0))
        );
        assert_eq!(
            HistoryRecord::parse_line("sqrt(2) = 1.4142135623730951"),
            Some(HistoryRecord::new("sqrt(2)", std::f64::consts::SQRT_2))
        );
        assert_eq!(HistoryRecord::parse_line("no separator"), None);
        assert_eq!(HistoryRecord::parse_line("1/0 = oops"), None);
    }

    #[test]
    fn display_and_parse_agree() {
        let record = HistoryRecord::new("10/4", 2.5);
        assert_eq!(record.to_string(), "10/4 = 2.5");
        assert_eq!(HistoryRecord::parse_line(&record.to_string()), Some(record));
    }

    #[test]
    fn memory_history_skips_bad_lines() {
        let store = MemoryHistory::with_lines(["1+1 = 2", "garbage", "", "2^3 = 8"]);
        let records = store.load_all().unwrap();
        assert_eq!(
            records,
            vec![HistoryRecord::new("1+1", 2.0), HistoryRecord::new("2^3", 8.0)]
        );
    }

    #[test]
    fn file_history_appends_loads_and_clears() {
        let path = std::env::temp_dir().join(format!("infix-calc-history-{}.txt", std::process::id()));
        let _ = fs::remove_file(&path);
        let mut store = FileHistory::new(&path);

        assert!(store.load_all().unwrap().is_empty());

        store.append(&HistoryRecord::new("1+2", 3.0)).unwrap();
        store.append(&HistoryRecord::new("log(100)", 2.0)).unwrap();
        assert_eq!(
            store.load_all().unwrap(),
            vec![HistoryRecord::new("1+2", 3.0), HistoryRecord::new("log(100)", 2.0)]
        );

        store.clear().unwrap();
        assert!(store.load_all().unwrap().is_empty());

        let _ = fs::remove_file(&path);
    }
}
