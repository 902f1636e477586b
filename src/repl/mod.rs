//! The interactive REPL (§4.9): a `rustyline`-backed line editor with
//! persistent history and syntax highlighting, reading one or more
//! top-level forms per line and evaluating each in turn.

pub mod highlighter;
pub mod history;

use std::cell::RefCell;
use std::rc::Rc;

use owo_colors::OwoColorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use tracing::{info, warn};

use crate::env::Environment;
use crate::error::HostError;
use crate::eval::eval;
use crate::printer::render;
use crate::reader::read_forms;
use highlighter::ReplHelper;
use history::{get_history_path, load_history_from_path, save_history_to_path};

const PROMPT: &str = "cumunisp> ";

#[tracing::instrument(skip(env))]
pub fn start_repl(env: Rc<RefCell<Environment>>) -> anyhow::Result<()> {
    println!(
        "{} {}",
        "cumunisp".bold().cyan(),
        format!("v{}", env!("CARGO_PKG_VERSION")).dimmed()
    );
    println!("Press Ctrl-D or type (exit) to quit.");

    let mut rl: Editor<ReplHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    let history_path = get_history_path();
    if let Some(path) = &history_path {
        load_history_from_path(&mut rl, path);
    }

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line.as_str());
                if trimmed == "(exit)" {
                    info!("REPL exited via (exit)");
                    break;
                }
                eval_and_print(&env, trimmed);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                info!("REPL EOF");
                break;
            }
            Err(e) => {
                let err = HostError::Readline(e);
                warn!(error = %err, "REPL readline failure");
                return Err(err.into());
            }
        }
    }

    if let Some(path) = &history_path {
        save_history_to_path(&mut rl, path);
    }
    Ok(())
}

/// Parses `line` as zero or more top-level forms and evaluates each one in
/// `env`, printing its rendered result. An `Err` value prints the same way
/// any other result does, through `Value`'s `Display` impl.
fn eval_and_print(env: &Rc<RefCell<Environment>>, line: &str) {
    let root = match crate::syntax::parse_program(line) {
        Ok(root) => root,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    for form in read_forms(&root) {
        println!("{}", render(&eval(env, form)));
    }
}
