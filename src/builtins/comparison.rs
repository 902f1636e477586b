//! Ordering and equality operators. Results are `Num(1)`/`Num(0)`, matching
//! the rest of the language's lack of a dedicated boolean kind.

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::value::Value;

use super::{check, check_arity, check_type};

fn as_bool(b: bool) -> Value {
    Value::Num(if b { 1.0 } else { 0.0 })
}

fn ord(func: &str, args: Vec<Value>, cmp: impl Fn(f64, f64) -> bool) -> Value {
    check!(check_arity(func, &args, 2));
    check!(check_type(func, &args, 0, "Number"));
    check!(check_type(func, &args, 1, "Number"));
    let (Value::Num(a), Value::Num(b)) = (&args[0], &args[1]) else {
        unreachable!("checked above")
    };
    as_bool(cmp(*a, *b))
}

pub fn gt(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    ord(">", args, |a, b| a > b)
}

pub fn ge(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    ord(">=", args, |a, b| a >= b)
}

pub fn lt(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    ord("<", args, |a, b| a < b)
}

pub fn le(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    ord("<=", args, |a, b| a <= b)
}

pub fn eq(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("==", &args, 2));
    as_bool(args[0] == args[1])
}

pub fn ne(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("!=", &args, 2));
    as_bool(args[0] != args[1])
}
