//! Lexically-scoped environments.
//!
//! An `Environment` frame is a flat map of bindings plus an optional parent.
//! Lookups walk outward through parents; `def` always writes to the
//! outermost (global) frame, `put` writes to the frame it's given.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use tracing::trace;

use crate::value::Value;

#[derive(Debug)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// A frame with no bindings and no parent yet.
    pub fn empty() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment {
            bindings: HashMap::new(),
            parent: None,
        }))
    }

    /// The global environment, pre-populated with the built-in library.
    pub fn new_with_prelude() -> Rc<RefCell<Self>> {
        let env = Self::empty();
        crate::builtins::register_all(&env);
        env
    }

    pub fn child(parent: &Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Environment {
            bindings: HashMap::new(),
            parent: Some(Rc::clone(parent)),
        }))
    }

    /// Search this frame, then each parent in turn.
    pub fn lookup(env: &Rc<RefCell<Environment>>, sym: &str) -> Value {
        if let Some(v) = env.borrow().bindings.get(sym) {
            return v.clone();
        }
        let parent = env.borrow().parent.clone();
        match parent {
            Some(p) => Environment::lookup(&p, sym),
            None => {
                trace!(symbol = sym, "unbound symbol");
                Value::Err(format!("Unbound Symbol '{}'", sym))
            }
        }
    }

    /// Binds `sym` in this exact frame, shadowing any outer binding.
    pub fn put(env: &Rc<RefCell<Environment>>, sym: String, value: Value) {
        env.borrow_mut().bindings.insert(sym, value);
    }

    /// Binds `sym` in the outermost (global) frame reachable from `env`.
    pub fn def(env: &Rc<RefCell<Environment>>, sym: String, value: Value) {
        let mut current = Rc::clone(env);
        loop {
            let next = current.borrow().parent.clone();
            match next {
                Some(p) => current = p,
                None => break,
            }
        }
        Environment::put(&current, sym, value);
    }

    /// Deep-copies the bindings of this frame into a new, independent frame
    /// that shares the same parent pointer. Used whenever a `Lambda` value
    /// is cloned, so that no two live values can mutate the same frame.
    pub fn copy(env: &Rc<RefCell<Environment>>) -> Rc<RefCell<Environment>> {
        let borrowed = env.borrow();
        let bindings = borrowed.bindings.clone();
        let parent = borrowed.parent.clone();
        Rc::new(RefCell::new(Environment { bindings, parent }))
    }

    pub fn set_parent(env: &Rc<RefCell<Environment>>, parent: Rc<RefCell<Environment>>) {
        env.borrow_mut().parent = Some(parent);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_to_parent() {
        let root = Environment::empty();
        Environment::put(&root, "x".into(), Value::Num(1.0));
        let child = Environment::child(&root);
        assert_eq!(Environment::lookup(&child, "x"), Value::Num(1.0));
    }

    #[test]
    fn lookup_missing_symbol_is_an_err_value() {
        let root = Environment::empty();
        assert_eq!(
            Environment::lookup(&root, "missing"),
            Value::Err("Unbound Symbol 'missing'".into())
        );
    }

    #[test]
    fn put_shadows_without_touching_parent() {
        let root = Environment::empty();
        Environment::put(&root, "x".into(), Value::Num(1.0));
        let child = Environment::child(&root);
        Environment::put(&child, "x".into(), Value::Num(2.0));
        assert_eq!(Environment::lookup(&child, "x"), Value::Num(2.0));
        assert_eq!(Environment::lookup(&root, "x"), Value::Num(1.0));
    }

    #[test]
    fn def_writes_through_to_the_global_frame() {
        let root = Environment::empty();
        let child = Environment::child(&root);
        Environment::def(&child, "x".into(), Value::Num(9.0));
        assert_eq!(Environment::lookup(&root, "x"), Value::Num(9.0));
    }

    #[test]
    fn copy_is_independent_but_shares_parent() {
        let root = Environment::empty();
        Environment::put(&root, "shared".into(), Value::Num(1.0));
        let frame = Environment::child(&root);
        Environment::put(&frame, "x".into(), Value::Num(1.0));

        let copied = Environment::copy(&frame);
        Environment::put(&copied, "x".into(), Value::Num(2.0));

        assert_eq!(Environment::lookup(&frame, "x"), Value::Num(1.0));
        assert_eq!(Environment::lookup(&copied, "x"), Value::Num(2.0));
        assert_eq!(Environment::lookup(&copied, "shared"), Value::Num(1.0));
    }
}
