//! 命令行计算器
//!
//! 带参数时计算单个表达式；不带参数时进入交互菜单。

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use infix_calc::history::{DEFAULT_HISTORY_FILE, FileHistory, HistoryStore, MemoryHistory};
use infix_calc::postfix::render;
use infix_calc::session::{Outcome, Session};
use infix_calc::{Engine, EngineConfig};

/// 算术表达式计算器
#[derive(Parser, Debug)]
#[command(name = "calc", version, about, long_about = None)]
struct Args {
    /// 要计算的表达式；省略时进入交互菜单
    #[arg(allow_hyphen_values = true)]
    expression: Option<String>,

    /// 遇到无法识别的字符时报错，而不是忽略
    #[arg(long)]
    strict: bool,

    /// 在结果之前打印后缀形式
    #[arg(long)]
    postfix: bool,

    /// 交互菜单使用的历史文件
    #[arg(long, default_value = DEFAULT_HISTORY_FILE)]
    history: PathBuf,

    /// 历史只保存在内存中
    #[arg(long)]
    no_history: bool,

    /// 输出详细日志
    #[arg(short, long)]
    verbose: bool,
}

const MENU: &str = "\
====== Advanced Algebraic Calculator ======
1. Enter new expression
2. Continue with previous result (+/-/*//)
3. Show calculation history
4. Clear history
5. Clear current result (C)
6. Exit
===========================================";

fn run_once(engine: &Engine, expression: &str, show_postfix: bool) -> i32 {
    if show_postfix {
        match engine.compile(expression) {
            Ok(postfix) => println!("Postfix: {}", render(&postfix)),
            Err(e) => {
                println!("{}", e);
                return 1;
            }
        }
    }
    match engine.evaluate(expression) {
        Ok(result) => {
            println!("Result: {:.6}", result);
            0
        }
        Err(e) => {
            println!("{}", e);
            1
        }
    }
}

/// 读取一行；输入结束时返回 `None`
fn prompt(input: &mut impl BufRead, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("failed to read stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn handle_input<S: HistoryStore>(session: &mut Session<S>, input: &str, show_postfix: bool) {
    if show_postfix {
        if let Ok(postfix) = session.engine().compile(&session.compose(input)) {
            println!("Postfix: {}", render(&postfix));
        }
    }
    match session.submit(input) {
        Ok(Outcome::Evaluated { result, .. }) => println!("Result: {:.6}", result),
        Ok(Outcome::ResultCleared) => println!("Current result cleared."),
        Err(e) => println!("{}", e),
    }
}

fn interactive<S: HistoryStore>(mut session: Session<S>, show_postfix: bool) -> Result<()> {
    println!("Welcome to Advanced Algebraic Calculator!");
    println!("Features: + - * / ^ () sin cos tan log exp sqrt");

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!();
        println!("{}", MENU);
        let Some(choice) = prompt(&mut input, "Your choice: ")? else {
            break;
        };

        match choice.as_str() {
            "1" => {
                let Some(line) = prompt(&mut input, "Enter expression: ")? else {
                    break;
                };
                handle_input(&mut session, &line, show_postfix);
            }
            "2" => match session.last_result() {
                None => println!("No previous result. Enter an expression first."),
                Some(previous) => {
                    println!("Current result: {}", previous);
                    let Some(line) = prompt(&mut input, "Enter expression (example: +5 or *2): ")? else {
                        break;
                    };
                    handle_input(&mut session, &line, show_postfix);
                }
            },
            "3" => {
                if session.records().is_empty() {
                    println!("History is empty.");
                } else {
                    println!("\n====== Calculation History ======");
                    for (i, record) in session.records().iter().enumerate() {
                        println!("{}. {}", i + 1, record);
                    }
                    println!("================================");
                }
            }
            "4" => match session.clear_history() {
                Ok(()) => println!("History cleared."),
                Err(e) => println!("{}", e),
            },
            "5" => {
                session.clear_result();
                println!("Current result cleared.");
            }
            "6" => {
                println!("Exiting program. Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let config = if args.strict {
        EngineConfig::strict()
    } else {
        EngineConfig::default()
    };
    let engine = Engine::new(config);

    if let Some(expression) = args.expression {
        process::exit(run_once(&engine, &expression, args.postfix));
    }

    if args.no_history {
        interactive(Session::new(engine, MemoryHistory::new()), args.postfix)
    } else {
        log::debug!("history file: {}", args.history.display());
        interactive(Session::new(engine, FileHistory::new(args.history)), args.postfix)
    }
}
