//! The Printer: `Display` for `Value`, plus the string-escaping helper used
//! both here and by the reader.

use std::fmt;

use crate::value::{Function, Value};

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", format_num(*n)),
            Value::Sym(s) => write!(f, "{}", s),
            Value::Str(s) => write!(f, "\"{}\"", escape(s)),
            Value::Err(msg) => write!(f, "Error: {}", msg),
            Value::SExpr(items) => write_list(f, items, '(', ')'),
            Value::QExpr(items) => write_list(f, items, '{', '}'),
            Value::Fun(Function::Builtin(_)) => write!(f, "<builtin>"),
            Value::Fun(Function::Lambda(l)) => {
                write!(f, "(\\ {{")?;
                for (i, name) in l.formals.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", name)?;
                }
                write!(f, "}} {})", l.body)
            }
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Value], open: char, close: char) -> fmt::Result {
    write!(f, "{}", open)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "{}", close)
}

/// Approximates C's `%g`: integral values print without a fractional part,
/// everything else is trimmed of trailing zeros.
fn format_num(n: f64) -> String {
    if n.is_finite() && n == n.trunc() && n.abs() < 1e15 {
        return format!("{}", n as i64);
    }
    let rendered = format!("{:.6}", n);
    let trimmed = rendered.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

pub fn render(v: &Value) -> String {
    format!("{}", v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Builtin, Lambda};
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::env::Environment;

    #[test]
    fn integers_print_without_a_decimal_point() {
        assert_eq!(render(&Value::Num(6.0)), "6");
        assert_eq!(render(&Value::Num(-3.0)), "-3");
    }

    #[test]
    fn fractional_numbers_trim_trailing_zeros() {
        assert_eq!(render(&Value::Num(3.5)), "3.5");
    }

    #[test]
    fn strings_are_quoted_and_escaped() {
        assert_eq!(render(&Value::Str("a\nb".into())), "\"a\\nb\"");
    }

    #[test]
    fn errors_render_with_a_prefix() {
        assert_eq!(render(&Value::Err("boom".into())), "Error: boom");
    }

    #[test]
    fn sexpr_and_qexpr_use_distinct_brackets() {
        assert_eq!(
            render(&Value::SExpr(vec![Value::Num(1.0), Value::Num(2.0)])),
            "(1 2)"
        );
        assert_eq!(
            render(&Value::QExpr(vec![Value::Num(1.0), Value::Num(2.0)])),
            "{1 2}"
        );
    }

    #[test]
    fn builtin_renders_as_a_placeholder() {
        fn f(_env: &Rc<RefCell<Environment>>, _args: Vec<crate::value::Value>) -> crate::value::Value {
            Value::Num(0.0)
        }
        let v = Value::Fun(crate::value::Function::Builtin(Builtin { name: "+", func: f }));
        assert_eq!(render(&v), "<builtin>");
    }

    #[test]
    fn lambda_renders_its_formals_and_body() {
        let env = Environment::empty();
        let lambda = Lambda::new(
            vec!["x".into(), "y".into()],
            Value::QExpr(vec![Value::Sym("x".into())]),
            env,
        );
        assert_eq!(
            render(&Value::Fun(crate::value::Function::Lambda(lambda))),
            "(\\ {x y} {x})"
        );
    }
}
