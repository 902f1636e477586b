//! I/O and meta built-ins: `print`, `err`, `load`.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::warn;

use crate::env::Environment;
use crate::eval::eval;
use crate::value::Value;

use super::{check, check_arity, check_type};

pub fn print(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    for arg in &args {
        print!("{} ", crate::printer::render(arg));
    }
    println!();
    Value::SExpr(Vec::new())
}

pub fn err(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("error", &args, 1));
    check!(check_type("error", &args, 0, "String"));
    match &args[0] {
        Value::Str(s) => Value::Err(s.clone()),
        _ => unreachable!("checked above"),
    }
}

/// Reads a file, parses every top-level form, and evaluates each one in
/// `env` in turn. Mirrors the behaviour of piping a file's contents into the
/// REPL, rather than wrapping the result in any kind of module value.
pub fn load(env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("load", &args, 1));
    check!(check_type("load", &args, 0, "String"));
    let Value::Str(path) = &args[0] else {
        unreachable!("checked above")
    };

    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => return Value::Err(format!("Could not load Library {}: {}", path, e)),
    };

    let root = match crate::syntax::parse_program(&contents) {
        Ok(root) => root,
        Err(parse_err) => {
            return Value::Err(format!("Could not load Library {}: {}", path, parse_err));
        }
    };

    for form in crate::reader::read_forms(&root) {
        let result = eval(env, form);
        if result.is_err() {
            warn!(path = %path, error = %crate::printer::render(&result), "error while loading library");
            println!("{}", crate::printer::render(&result));
        }
    }
    Value::SExpr(Vec::new())
}
