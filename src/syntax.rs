//! Concrete syntax: a `nom` grammar producing the generic `AstNode` tree
//! consumed by `reader.rs`. This module never touches `Value` directly.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{is_not, take_while1},
    character::complete::{char, digit0, digit1, multispace1, not_line_ending},
    combinator::{opt, recognize},
    multi::many0,
    sequence::pair,
};
use tracing::instrument;

use crate::reader::AstNode;

fn skip_ws(input: &str) -> IResult<&str, ()> {
    let (input, _) = many0(alt((
        multispace1,
        recognize(pair(char(';'), not_line_ending)),
    )))
    .parse(input)?;
    Ok((input, ()))
}

fn lexeme<'a, F>(mut inner: F) -> impl FnMut(&'a str) -> IResult<&'a str, AstNode>
where
    F: FnMut(&'a str) -> IResult<&'a str, AstNode>,
{
    move |input: &'a str| {
        let (input, node) = inner(input)?;
        let (input, _) = skip_ws(input)?;
        Ok((input, node))
    }
}

fn number(input: &str) -> IResult<&str, AstNode> {
    let (rest, text) = recognize((opt(char('-')), digit1, opt(pair(char('.'), digit0)))).parse(input)?;
    Ok((rest, AstNode::leaf("number", text)))
}

fn is_symbol_char(c: char) -> bool {
    c.is_alphanumeric() || "_+-*/\\=<>!&%^".contains(c)
}

fn symbol(input: &str) -> IResult<&str, AstNode> {
    let (rest, text) = take_while1(is_symbol_char).parse(input)?;
    Ok((rest, AstNode::leaf("symbol", text)))
}

fn string_lit(input: &str) -> IResult<&str, AstNode> {
    let (rest, text) = recognize((
        char('"'),
        many0(alt((is_not("\"\\"), recognize(pair(char('\\'), nom::character::complete::anychar))))),
        char('"'),
    ))
    .parse(input)?;
    Ok((rest, AstNode::leaf("string", text)))
}

fn expr(input: &str) -> IResult<&str, AstNode> {
    alt((
        lexeme(number),
        lexeme(string_lit),
        lexeme(symbol),
        lexeme(sexpr),
        lexeme(qexpr),
    ))
    .parse(input)
}

fn sexpr(input: &str) -> IResult<&str, AstNode> {
    let (input, _) = char('(').parse(input)?;
    let (input, _) = skip_ws(input)?;
    let (input, children) = many0(expr).parse(input)?;
    let (input, _) = char(')').parse(input)?;
    Ok((input, AstNode::branch("sexpr", children)))
}

fn qexpr(input: &str) -> IResult<&str, AstNode> {
    let (input, _) = char('{').parse(input)?;
    let (input, _) = skip_ws(input)?;
    let (input, children) = many0(expr).parse(input)?;
    let (input, _) = char('}').parse(input)?;
    Ok((input, AstNode::branch("qexpr", children)))
}

/// Parses a single top-level expression, as used by the REPL.
#[instrument(skip(input))]
pub fn parse_expr(input: &str) -> Result<AstNode, String> {
    let (rest, _) = skip_ws(input).map_err(|e| format!("{:?}", e))?;
    let (rest, node) = expr(rest).map_err(|e| format!("{:?}", e))?;
    let (rest, _) = skip_ws(rest).map_err(|e| format!("{:?}", e))?;
    if !rest.is_empty() {
        return Err(format!("unexpected trailing input: {:?}", rest));
    }
    Ok(node)
}

/// Parses an entire source file as zero or more top-level expressions,
/// wrapped in a synthetic `root` node.
#[instrument(skip(input))]
pub fn parse_program(input: &str) -> Result<AstNode, String> {
    let (rest, _) = skip_ws(input).map_err(|e| format!("{:?}", e))?;
    let (rest, children) = many0(expr).parse(rest).map_err(|e| format!("{:?}", e))?;
    let (rest, _) = skip_ws(rest).map_err(|e| format!("{:?}", e))?;
    if !rest.is_empty() {
        return Err(format!("unexpected trailing input: {:?}", rest));
    }
    Ok(AstNode::branch("root", children))
}
