mod builtins;
mod cli;
mod env;
mod error;
mod eval;
mod logging;
mod printer;
mod reader;
mod repl;
mod syntax;
mod value;

#[cfg(test)]
mod test_utils;

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::cli::{Cli, Commands, RunArgs};
use crate::env::Environment;
use crate::error::HostError;
use crate::eval::eval;
use crate::printer::render;

fn main() -> Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    info!(?cli, "parsed CLI arguments");

    let root_env = Environment::new_with_prelude();

    match cli.command {
        Some(Commands::Repl(_)) => repl::start_repl(root_env),
        Some(Commands::Run(args)) => run(&root_env, args),
        None if cli.files.is_empty() => repl::start_repl(root_env),
        None => {
            for path in &cli.files {
                load_file(&root_env, path)?;
            }
            Ok(())
        }
    }
}

fn run(env: &Rc<RefCell<Environment>>, args: RunArgs) -> Result<()> {
    match args.expr {
        Some(expr) => {
            eval_expr(env, &expr);
            Ok(())
        }
        None => {
            let path = args.file.expect("clap guarantees expr xor file");
            load_file(env, &path)
        }
    }
}

/// Parses and evaluates a single expression string, as given to `run --expr`.
fn eval_expr(env: &Rc<RefCell<Environment>>, source: &str) {
    let node = match syntax::parse_expr(source) {
        Ok(node) => node,
        Err(e) => {
            println!("Error: {}", e);
            return;
        }
    };
    println!("{}", render(&eval(env, reader::read(&node))));
}

/// Loads a file at the CLI boundary: reading and parsing it are host-level
/// concerns reported through `HostError` (§4.10), distinct from the
/// `load` built-in's own `Value::Err`-based reporting for the same
/// operation invoked from inside a running program. Once the file is
/// in hand, each top-level form is evaluated exactly as `load` would,
/// with per-form evaluation errors still printed rather than propagated.
fn load_file(env: &Rc<RefCell<Environment>>, path: &Path) -> Result<()> {
    let contents = std::fs::read_to_string(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root = syntax::parse_program(&contents).map_err(|message| HostError::Parse {
        path: path.to_path_buf(),
        message,
    })?;
    for form in reader::read_forms(&root) {
        let result = eval(env, form);
        if result.is_err() {
            println!("{}", render(&result));
        }
    }
    Ok(())
}
