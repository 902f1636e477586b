//! Control flow. `if` is the only member; both branches are Q-Expressions so
//! the one not taken is never evaluated.

use std::cell::RefCell;
use std::rc::Rc;

use crate::env::Environment;
use crate::eval::{eval, retag_sexpr};
use crate::value::Value;

use super::{check, check_arity, check_type};

pub fn if_form(env: &Rc<RefCell<Environment>>, args: Vec<Value>) -> Value {
    check!(check_arity("if", &args, 3));
    check!(check_type("if", &args, 0, "Number"));
    check!(check_type("if", &args, 1, "Q-Expression"));
    check!(check_type("if", &args, 2, "Q-Expression"));

    let mut it = args.into_iter();
    let condition = it.next().unwrap();
    let then_branch = it.next().unwrap();
    let else_branch = it.next().unwrap();

    let chosen = if condition.truthy() { then_branch } else { else_branch };
    eval(env, retag_sexpr(chosen))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env() -> Rc<RefCell<Environment>> {
        Environment::new_with_prelude()
    }

    #[test]
    fn nonzero_condition_runs_the_then_branch() {
        let result = if_form(
            &env(),
            vec![
                Value::Num(1.0),
                Value::QExpr(vec![Value::Num(10.0)]),
                Value::QExpr(vec![Value::Num(20.0)]),
            ],
        );
        assert_eq!(result, Value::Num(10.0));
    }

    #[test]
    fn zero_condition_runs_the_else_branch() {
        let result = if_form(
            &env(),
            vec![
                Value::Num(0.0),
                Value::QExpr(vec![Value::Num(10.0)]),
                Value::QExpr(vec![Value::Num(20.0)]),
            ],
        );
        assert_eq!(result, Value::Num(20.0));
    }

    #[test]
    fn condition_must_be_a_number() {
        let result = if_form(
            &env(),
            vec![
                Value::Str("x".into()),
                Value::QExpr(Vec::new()),
                Value::QExpr(Vec::new()),
            ],
        );
        assert!(matches!(result, Value::Err(_)));
    }
}
