//! The built-in function library (§ Built-ins).
//!
//! Each submodule groups one family of operations, matching the grouping
//! used throughout the rest of the crate's documentation. `register_all`
//! is the single place that binds every built-in's public symbol(s).

pub mod arithmetic;
pub mod comparison;
pub mod control;
pub mod io;
pub mod list;
pub mod variable_forms;

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::value::{Builtin, BuiltinFn, Function, Value};

pub(crate) fn check_arity(func: &str, args: &[Value], expected: usize) -> Result<(), Value> {
    if args.len() != expected {
        return Err(Value::Err(format!(
            "Function '{}', passed incorrect number of arguments. Got: {}, Expected: {}!",
            func,
            args.len(),
            expected
        )));
    }
    Ok(())
}

pub(crate) fn check_type(func: &str, args: &[Value], index: usize, expected: &str) -> Result<(), Value> {
    let got = args[index].kind_name();
    if got != expected {
        return Err(Value::Err(format!(
            "Function '{}' passed incorrect type for argument {}. Got: {}, Expected: {}!",
            func, index, got, expected
        )));
    }
    Ok(())
}

pub(crate) fn check_not_empty(func: &str, args: &[Value], index: usize) -> Result<(), Value> {
    let empty = matches!(&args[index], Value::QExpr(items) if items.is_empty());
    if empty {
        return Err(Value::Err(format!(
            "Function '{}' passed {{}} for argument {}!",
            func, index
        )));
    }
    Ok(())
}

/// Early-returns the `Value::Err` out of the enclosing builtin if `$e` failed.
macro_rules! check {
    ($e:expr) => {
        if let Err(v) = $e {
            return v;
        }
    };
}
pub(crate) use check;

pub fn register_all(env: &Rc<RefCell<Environment>>) {
    use arithmetic::{add, div, max, min, mul, pow, rem, sub};
    use comparison::{eq, ge, gt, le, lt, ne};
    use control::if_form;
    use io::{err, load, print};
    use list::{cons, eval_builtin, head, init, join, len, list, tail};
    use variable_forms::{def, lambda, put};

    let entries: &[(&str, BuiltinFn)] = &[
        ("\\", lambda),
        ("def", def),
        ("=", put),
        ("list", list),
        ("head", head),
        ("tail", tail),
        ("eval", eval_builtin),
        ("join", join),
        ("cons", cons),
        ("init", init),
        ("len", len),
        ("+", add),
        ("add", add),
        ("-", sub),
        ("sub", sub),
        ("*", mul),
        ("mul", mul),
        ("/", div),
        ("div", div),
        ("%", rem),
        ("rem", rem),
        ("^", pow),
        ("pow", pow),
        ("min", min),
        ("max", max),
        (">", gt),
        (">=", ge),
        ("<", lt),
        ("<=", le),
        ("==", eq),
        ("!=", ne),
        ("if", if_form),
        ("print", print),
        ("err", err),
        ("load", load),
    ];

    for (name, func) in entries {
        Environment::put(
            env,
            (*name).to_string(),
            Value::Fun(Function::Builtin(Builtin { name: *name, func: *func })),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_all_binds_every_core_symbol() {
        let env = Environment::new_with_prelude();
        let expected = [
            "\\", "def", "=", "list", "head", "tail", "eval", "join", "cons", "init", "len", "+",
            "add", "-", "sub", "*", "mul", "/", "div", "%", "rem", "^", "pow", "min", "max", ">",
            ">=", "<", "<=", "==", "!=", "if", "print", "err", "load",
        ];
        for sym in expected {
            assert!(
                !matches!(Environment::lookup(&env, sym), Value::Err(_)),
                "expected {} to be bound",
                sym
            );
        }
    }

    #[test]
    fn aliases_share_the_same_underlying_function() {
        let env = Environment::new_with_prelude();
        assert_eq!(
            Environment::lookup(&env, "+"),
            Environment::lookup(&env, "add")
        );
    }
}
