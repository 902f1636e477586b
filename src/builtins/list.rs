//! List manipulation built-ins, all operating on `Q-Expression` data.

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::eval::eval;
use crate::value::Value;

use super::{check, check_arity, check_not_empty, check_type};

pub fn list(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    Value::QExpr(args)
}

pub fn head(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("head", &args, 1));
    check!(check_type("head", &args, 0, "Q-Expression"));
    check!(check_not_empty("head", &args, 0));
    match args.into_iter().next().unwrap() {
        Value::QExpr(mut items) => Value::QExpr(vec![items.remove(0)]),
        _ => unreachable!("checked above"),
    }
}

pub fn tail(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("tail", &args, 1));
    check!(check_type("tail", &args, 0, "Q-Expression"));
    check!(check_not_empty("tail", &args, 0));
    match args.into_iter().next().unwrap() {
        Value::QExpr(mut items) => {
            items.remove(0);
            Value::QExpr(items)
        }
        _ => unreachable!("checked above"),
    }
}

/// All but the last element.
pub fn init(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("init", &args, 1));
    check!(check_type("init", &args, 0, "Q-Expression"));
    check!(check_not_empty("init", &args, 0));
    match args.into_iter().next().unwrap() {
        Value::QExpr(mut items) => {
            items.pop();
            Value::QExpr(items)
        }
        _ => unreachable!("checked above"),
    }
}

pub fn len(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("len", &args, 1));
    check!(check_type("len", &args, 0, "Q-Expression"));
    match &args[0] {
        Value::QExpr(items) => Value::Num(items.len() as f64),
        _ => unreachable!("checked above"),
    }
}

pub fn eval_builtin(env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("eval", &args, 1));
    check!(check_type("eval", &args, 0, "Q-Expression"));
    match args.into_iter().next().unwrap() {
        Value::QExpr(items) => eval(env, Value::SExpr(items)),
        _ => unreachable!("checked above"),
    }
}

pub fn join(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    for i in 0..args.len() {
        check!(check_type("join", &args, i, "Q-Expression"));
    }
    let mut out = Vec::new();
    for arg in args {
        if let Value::QExpr(items) = arg {
            out.extend(items);
        }
    }
    Value::QExpr(out)
}

pub fn cons(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("cons", &args, 2));
    check!(check_type("cons", &args, 1, "Q-Expression"));
    let mut it = args.into_iter();
    let head = it.next().unwrap();
    let Value::QExpr(mut rest) = it.next().unwrap() else {
        unreachable!("checked above")
    };
    rest.insert(0, head);
    Value::QExpr(rest)
}
