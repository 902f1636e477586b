//! The evaluator and the function call protocol.
//!
//! Every built-in and every user lambda is invoked through the same route:
//! a symbol resolves to a `Fun` value, its arguments are evaluated, and
//! `apply` dispatches on the resulting `Function`. There is no special-form
//! branching here — `\`, `def`, `=` and `if` are ordinary entries in the
//! global environment, resolved like any other symbol.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{instrument, trace};

use crate::env::Environment;
use crate::value::{Function, Lambda, Value};

#[instrument(skip(env), fields(value = %crate::printer::render(&value)))]
pub fn eval(env: &Rc<RefCell<Environment>>, value: Value) -> Value {
    match value {
        Value::Sym(name) => Environment::lookup(env, &name),
        Value::SExpr(items) => eval_sexpr(env, items),
        other => other,
    }
}

fn eval_sexpr(env: &Rc<RefCell<Environment>>, items: Vec<Value>) -> Value {
    let mut evaluated = Vec::with_capacity(items.len());
    for item in items {
        let result = eval(env, item);
        if result.is_err() {
            return result;
        }
        evaluated.push(result);
    }

    if evaluated.is_empty() {
        return Value::SExpr(evaluated);
    }
    if evaluated.len() == 1 {
        return evaluated.pop().unwrap();
    }

    let mut rest = evaluated;
    let head = rest.remove(0);

    match head {
        Value::Fun(f) => apply(env, f, rest),
        other => Value::Err(format!(
            "S-Expression starts with incorrect type. Got: {}, Expected: Function!",
            other.kind_name()
        )),
    }
}

/// Retags a `QExpr` as an `SExpr` so it can be evaluated; everything else
/// passes through unchanged. Used when a Q-Expression body needs to run
/// (lambda bodies, `eval`, `if` branches).
pub(crate) fn retag_sexpr(v: Value) -> Value {
    match v {
        Value::QExpr(items) => Value::SExpr(items),
        other => other,
    }
}

pub fn apply(env: &Rc<RefCell<Environment>>, f: Function, args: Vec<Value>) -> Value {
    match f {
        Function::Builtin(b) => (b.func)(env, args),
        Function::Lambda(lambda) => apply_lambda(env, lambda, args),
    }
}

/// The call protocol: bind formals to arguments one at a time, handling the
/// reserved `&` variadic marker, then either re-parent and evaluate the body
/// (full application) or return the partially-bound lambda unchanged.
fn apply_lambda(caller_env: &Rc<RefCell<Environment>>, mut f: Lambda, args: Vec<Value>) -> Value {
    let given = args.len();
    let total = f.formals.len();
    let mut remaining: std::collections::VecDeque<Value> = args.into();

    while !remaining.is_empty() {
        if f.formals.is_empty() {
            return Value::Err(format!(
                "Function passed too many arguments! Got: {}, Expected: {}",
                given, total
            ));
        }

        let sym = f.formals.remove(0);
        if sym == "&" {
            if f.formals.len() != 1 {
                return Value::Err(
                    "Function format invalid! Symbol '&' not followed by single symbol".into(),
                );
            }
            let rest_sym = f.formals.remove(0);
            let rest_values: Vec<Value> = remaining.into_iter().collect();
            Environment::put(&f.env, rest_sym, Value::QExpr(rest_values));
            remaining = std::collections::VecDeque::new();
            break;
        }

        let val = remaining.pop_front().unwrap();
        Environment::put(&f.env, sym, val);
    }

    if f.formals.first().map(|s| s.as_str()) == Some("&") {
        if f.formals.len() != 2 {
            return Value::Err(
                "Function format invalid. Symbol '&' not followed by single symbol.".into(),
            );
        }
        f.formals.remove(0);
        let rest_sym = f.formals.remove(0);
        Environment::put(&f.env, rest_sym, Value::QExpr(Vec::new()));
    }

    if f.formals.is_empty() {
        trace!("lambda fully applied, evaluating body");
        Environment::set_parent(&f.env, Rc::clone(caller_env));
        eval(&f.env, retag_sexpr(*f.body))
    } else {
        Value::Fun(Function::Lambda(f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_tracing;

    fn root() -> Rc<RefCell<Environment>> {
        Environment::empty()
    }

    #[test]
    fn numbers_and_strings_are_self_evaluating() {
        setup_tracing();
        let env = root();
        assert_eq!(eval(&env, Value::Num(1.0)), Value::Num(1.0));
        assert_eq!(eval(&env, Value::Str("hi".into())), Value::Str("hi".into()));
    }

    #[test]
    fn qexpr_is_self_evaluating() {
        setup_tracing();
        let env = root();
        let q = Value::QExpr(vec![Value::Sym("+".into())]);
        assert_eq!(eval(&env, q.clone()), q);
    }

    #[test]
    fn symbol_resolves_through_lookup() {
        setup_tracing();
        let env = root();
        Environment::put(&env, "x".into(), Value::Num(5.0));
        assert_eq!(eval(&env, Value::Sym("x".into())), Value::Num(5.0));
    }

    #[test]
    fn empty_sexpr_evaluates_to_itself() {
        setup_tracing();
        let env = root();
        assert_eq!(eval(&env, Value::SExpr(Vec::new())), Value::SExpr(Vec::new()));
    }

    #[test]
    fn singleton_sexpr_collapses_to_its_only_element() {
        setup_tracing();
        let env = root();
        assert_eq!(
            eval(&env, Value::SExpr(vec![Value::Num(9.0)])),
            Value::Num(9.0)
        );
    }

    #[test]
    fn error_in_an_argument_short_circuits_the_whole_call() {
        setup_tracing();
        let env = Environment::new_with_prelude();
        let expr = Value::SExpr(vec![
            Value::Sym("+".into()),
            Value::Sym("undefined".into()),
            Value::Num(1.0),
        ]);
        assert_eq!(
            eval(&env, expr),
            Value::Err("Unbound Symbol 'undefined'".into())
        );
    }

    #[test]
    fn head_must_be_a_function() {
        setup_tracing();
        let env = root();
        let expr = Value::SExpr(vec![Value::Num(1.0), Value::Num(2.0)]);
        assert_eq!(
            eval(&env, expr),
            Value::Err("S-Expression starts with incorrect type. Got: Number, Expected: Function!".into())
        );
    }

    #[test]
    fn partial_application_returns_a_function_awaiting_the_rest() {
        setup_tracing();
        let env = Environment::new_with_prelude();
        let lambda = Value::SExpr(vec![
            Value::Sym("\\".into()),
            Value::QExpr(vec![Value::Sym("x".into()), Value::Sym("y".into())]),
            Value::QExpr(vec![Value::Sym("+".into()), Value::Sym("x".into()), Value::Sym("y".into())]),
        ]);
        let partial = eval(&env, Value::SExpr(vec![lambda, Value::Num(1.0)]));
        assert!(matches!(partial, Value::Fun(Function::Lambda(_))));

        let applied = eval(&env, Value::SExpr(vec![partial, Value::Num(2.0)]));
        assert_eq!(applied, Value::Num(3.0));
    }

    #[test]
    fn variadic_formal_collects_remaining_args_as_a_qexpr() {
        setup_tracing();
        let env = Environment::new_with_prelude();
        let lambda = Value::SExpr(vec![
            Value::Sym("\\".into()),
            Value::QExpr(vec![
                Value::Sym("x".into()),
                Value::Sym("&".into()),
                Value::Sym("rest".into()),
            ]),
            Value::QExpr(vec![Value::Sym("rest".into())]),
        ]);
        let applied = eval(
            &env,
            Value::SExpr(vec![lambda, Value::Num(1.0), Value::Num(2.0), Value::Num(3.0)]),
        );
        assert_eq!(applied, Value::QExpr(vec![Value::Num(2.0), Value::Num(3.0)]));
    }

    #[test]
    fn variadic_formal_with_no_extra_args_binds_an_empty_qexpr() {
        setup_tracing();
        let env = Environment::new_with_prelude();
        let lambda = Value::SExpr(vec![
            Value::Sym("\\".into()),
            Value::QExpr(vec![
                Value::Sym("x".into()),
                Value::Sym("&".into()),
                Value::Sym("rest".into()),
            ]),
            Value::QExpr(vec![Value::Sym("rest".into())]),
        ]);
        let applied = eval(&env, Value::SExpr(vec![lambda, Value::Num(1.0)]));
        assert_eq!(applied, Value::QExpr(Vec::new()));
    }

    #[test]
    fn too_many_arguments_is_an_err_value() {
        setup_tracing();
        let env = Environment::new_with_prelude();
        let lambda = Value::SExpr(vec![
            Value::Sym("\\".into()),
            Value::QExpr(vec![Value::Sym("x".into())]),
            Value::QExpr(vec![Value::Sym("x".into())]),
        ]);
        let applied = eval(&env, Value::SExpr(vec![lambda, Value::Num(1.0), Value::Num(2.0)]));
        assert_eq!(
            applied,
            Value::Err("Function passed too many arguments! Got: 2, Expected: 1".into())
        );
    }

    #[test]
    fn cloning_a_lambda_does_not_alias_its_environment() {
        setup_tracing();
        let env = Environment::new_with_prelude();
        let lambda = Value::SExpr(vec![
            Value::Sym("\\".into()),
            Value::QExpr(vec![Value::Sym("x".into()), Value::Sym("y".into())]),
            Value::QExpr(vec![Value::Sym("+".into()), Value::Sym("x".into()), Value::Sym("y".into())]),
        ]);
        let base = eval(&env, lambda);
        let partial_a = eval(&env, Value::SExpr(vec![base.clone(), Value::Num(1.0)]));
        let partial_b = eval(&env, Value::SExpr(vec![base, Value::Num(100.0)]));

        let a = eval(&env, Value::SExpr(vec![partial_a, Value::Num(2.0)]));
        let b = eval(&env, Value::SExpr(vec![partial_b, Value::Num(2.0)]));
        assert_eq!(a, Value::Num(3.0));
        assert_eq!(b, Value::Num(102.0));
    }
}
