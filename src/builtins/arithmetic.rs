//! Arithmetic operators. All of them fold over one-or-more `Num` arguments;
//! `-` with a single argument negates instead of folding.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::instrument;

use crate::env::Environment;
use crate::value::Value;

use super::check_type;

fn numbers(func: &str, args: &[Value]) -> Result<Vec<f64>, Value> {
    for i in 0..args.len() {
        check_type(func, args, i, "Number")?;
    }
    Ok(args
        .iter()
        .map(|v| match v {
            Value::Num(n) => *n,
            _ => unreachable!("checked above"),
        })
        .collect())
}

fn fold(
    func: &str,
    args: Vec<Value>,
    negate_unary: bool,
    combine: impl Fn(f64, f64) -> Result<f64, String>,
) -> Value {
    if args.is_empty() {
        return Value::Err(format!(
            "Function '{}', passed incorrect number of arguments. Got: 0, Expected: at least 1!",
            func
        ));
    }
    let nums = match numbers(func, &args) {
        Ok(n) => n,
        Err(e) => return e,
    };

    let mut acc = nums[0];
    if nums.len() == 1 {
        return Value::Num(if negate_unary { -acc } else { acc });
    }
    for &n in &nums[1..] {
        match combine(acc, n) {
            Ok(next) => acc = next,
            Err(msg) => return Value::Err(msg),
        }
    }
    Value::Num(acc)
}

#[instrument(skip(_env, args))]
pub fn add(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("+", args, false, |a, b| Ok(a + b))
}

#[instrument(skip(_env, args))]
pub fn sub(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("-", args, true, |a, b| Ok(a - b))
}

#[instrument(skip(_env, args))]
pub fn mul(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("*", args, false, |a, b| Ok(a * b))
}

#[instrument(skip(_env, args))]
pub fn div(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("/", args, false, |a, b| {
        if b == 0.0 {
            Err("Division by zero!".to_string())
        } else {
            Ok(a / b)
        }
    })
}

// Unlike `div`, `%` never checks for a zero divisor: `f64::rem` falls
// through to NaN the same way the original's unconditional `fmod` call does.
#[instrument(skip(_env, args))]
pub fn rem(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("%", args, false, |a, b| Ok(a % b))
}

#[instrument(skip(_env, args))]
pub fn pow(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("^", args, false, |a, b| Ok(a.powf(b)))
}

#[instrument(skip(_env, args))]
pub fn min(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("min", args, false, |a, b| Ok(a.min(b)))
}

#[instrument(skip(_env, args))]
pub fn max(_env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    fold("max", args, false, |a, b| Ok(a.max(b)))
}
