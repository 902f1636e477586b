//! The Reader: turns a generic external AST into a `Value`.
//!
//! `AstNode` is deliberately generic (a tag, raw contents, and children) so
//! that this module never needs to know anything about the concrete syntax
//! that produced it; `syntax.rs` is the only thing that constructs nodes.

use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub tag: String,
    pub contents: String,
    pub children: Vec<AstNode>,
}

impl AstNode {
    pub fn leaf(tag: &str, contents: &str) -> Self {
        AstNode {
            tag: tag.to_string(),
            contents: contents.to_string(),
            children: Vec::new(),
        }
    }

    pub fn branch(tag: &str, children: Vec<AstNode>) -> Self {
        AstNode {
            tag: tag.to_string(),
            contents: String::new(),
            children,
        }
    }
}

/// Translates every top-level child of a `root` node (as produced by
/// `syntax::parse_program`) into its own `Value`, without wrapping them in
/// an enclosing `SExpr`. Used by `load` and the REPL, which evaluate each
/// top-level form independently rather than as one combination.
pub fn read_forms(root: &AstNode) -> Vec<Value> {
    root.children.iter().map(read).collect()
}

/// Translates one AST node into a `Value`.
pub fn read(node: &AstNode) -> Value {
    if node.tag.contains("number") {
        return read_number(&node.contents);
    }
    if node.tag.contains("string") {
        return read_string(&node.contents);
    }
    if node.tag.contains("symbol") {
        return Value::Sym(node.contents.clone());
    }

    let children: Vec<Value> = node.children.iter().map(read).collect();

    if node.tag.contains("qexpr") {
        Value::QExpr(children)
    } else {
        // root or sexpr
        Value::SExpr(children)
    }
}

fn read_number(text: &str) -> Value {
    match text.parse::<f64>() {
        Ok(n) => Value::Num(n),
        Err(_) => Value::Err("Invalid number!".to_string()),
    }
}

fn read_string(raw: &str) -> Value {
    // `raw` still carries the surrounding quotes, as captured by the syntax
    // layer; strip them before un-escaping.
    let inner = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(raw);
    Value::Str(unescape(inner))
}

pub fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_a_number_leaf() {
        assert_eq!(read(&AstNode::leaf("number", "42")), Value::Num(42.0));
    }

    #[test]
    fn invalid_number_reads_to_an_err_value() {
        assert!(matches!(read(&AstNode::leaf("number", "4.2.2")), Value::Err(_)));
    }

    #[test]
    fn reads_a_symbol_leaf() {
        assert_eq!(read(&AstNode::leaf("symbol", "+")), Value::Sym("+".into()));
    }

    #[test]
    fn reads_and_unescapes_a_string_leaf() {
        assert_eq!(
            read(&AstNode::leaf("string", "\"hi\\nthere\"")),
            Value::Str("hi\nthere".into())
        );
    }

    #[test]
    fn reads_sexpr_and_qexpr_branches() {
        let sexpr = AstNode::branch(
            "sexpr",
            vec![AstNode::leaf("symbol", "+"), AstNode::leaf("number", "1")],
        );
        assert_eq!(
            read(&sexpr),
            Value::SExpr(vec![Value::Sym("+".into()), Value::Num(1.0)])
        );

        let qexpr = AstNode::branch("qexpr", vec![AstNode::leaf("number", "1")]);
        assert_eq!(read(&qexpr), Value::QExpr(vec![Value::Num(1.0)]));
    }

    #[test]
    fn root_reads_as_sexpr() {
        let root = AstNode::branch("root", vec![AstNode::leaf("number", "1")]);
        assert_eq!(read(&root), Value::SExpr(vec![Value::Num(1.0)]));
    }

    #[test]
    fn read_forms_keeps_top_level_forms_separate() {
        let root = AstNode::branch(
            "root",
            vec![
                AstNode::branch(
                    "sexpr",
                    vec![AstNode::leaf("symbol", "+"), AstNode::leaf("number", "1")],
                ),
                AstNode::leaf("number", "2"),
            ],
        );
        assert_eq!(
            read_forms(&root),
            vec![
                Value::SExpr(vec![Value::Sym("+".into()), Value::Num(1.0)]),
                Value::Num(2.0),
            ]
        );
    }
}
