//! Lambda construction and variable definition: `\`, `def`, `=`.

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::value::{Lambda, Value};

use super::{check, check_arity, check_type};

fn validate_formals(formals: &[String]) -> Result<(), Value> {
    let amp_positions: Vec<usize> = formals
        .iter()
        .enumerate()
        .filter(|(_, s)| s.as_str() == "&")
        .map(|(i, _)| i)
        .collect();

    match amp_positions.as_slice() {
        [] => Ok(()),
        [pos] if formals.len() >= 2 && *pos == formals.len() - 2 => Ok(()),
        _ => Err(Value::Err(
            "Function format invalid! Symbol '&' not followed by single symbol".to_string(),
        )),
    }
}

pub fn lambda(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("\\", &args, 2));
    check!(check_type("\\", &args, 0, "Q-Expression"));
    check!(check_type("\\", &args, 1, "Q-Expression"));

    let mut it = args.into_iter();
    let Value::QExpr(formal_items) = it.next().unwrap() else {
        unreachable!("checked above")
    };
    let body = it.next().unwrap();

    let mut formals = Vec::with_capacity(formal_items.len());
    for item in formal_items {
        match item {
            Value::Sym(name) => formals.push(name),
            other => {
                return Value::Err(format!(
                    "Cannot define non-symbol. Got: {}, Expected: Symbol!",
                    other.kind_name()
                ));
            }
        }
    }
    check!(validate_formals(&formals));

    Value::Fun(crate::value::Function::Lambda(Lambda::new(
        formals,
        body,
        Environment::empty(),
    )))
}

fn var_form(env: &Rc<RefCell<Environment>>, func: &str, args: Vec<Value>, global: bool) -> Value {
    check!(check_type(func, &args, 0, "Q-Expression"));

    let mut it = args.into_iter();
    let Value::QExpr(syms) = it.next().unwrap() else {
        unreachable!("checked above")
    };
    let values: Vec<Value> = it.collect();

    let mut names = Vec::with_capacity(syms.len());
    for s in syms {
        match s {
            Value::Sym(name) => names.push(name),
            other => {
                return Value::Err(format!(
                    "Function '{}' cannot define non-symbol! Got: {}, Expected: Symbol",
                    func,
                    other.kind_name()
                ));
            }
        }
    }

    if names.len() != values.len() {
        return Value::Err(format!(
            "Function '{}', passed too many arguments for symbols. Got: {}, Expected: {}",
            func,
            names.len(),
            values.len()
        ));
    }

    for (name, value) in names.into_iter().zip(values) {
        if global {
            Environment::def(env, name, value);
        } else {
            Environment::put(env, name, value);
        }
    }
    Value::SExpr(Vec::new())
}

pub fn def(env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    var_form(env, "def", args, true)
}

pub fn put(env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    var_form(env, "=", args, false)
}
