//! A `nom`-based parser for the sly expression language.
//!
//! Parses the body of a template interpolation, `${ expr @ opt=value, ... }`,
//! into an [`Expression`]: the root node plus the option side-table. The `${}`
//! wrapper is optional so plugin attribute values can be parsed directly.

use crate::error::ExpressionError;
use crate::expression::{Expression, OptionMap};
use crate::node::{BinaryOperator, ExpressionNode, Number, UnaryOperator};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{escaped_transform, is_not, tag, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{map, opt, recognize, value, verify},
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, pair, preceded},
};

// --- Main Public Parser ---

pub fn parse_interpolation(input: &str) -> Result<Expression, ExpressionError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(trimmed);

    match interpolation_body(body.trim()) {
        Ok(("", expression)) => Ok(expression),
        Ok((rem, _)) => Err(ExpressionError::Parse(
            input.to_string(),
            format!("parser did not consume all input, remainder: '{}'", rem),
        )),
        Err(e) => Err(ExpressionError::Parse(input.to_string(), e.to_string())),
    }
}

/// Parses a bare expression with no option list, e.g. an option value.
pub fn parse_expression(input: &str) -> Result<ExpressionNode, ExpressionError> {
    match expression(input.trim()) {
        Ok(("", node)) => Ok(node),
        Ok((rem, _)) => Err(ExpressionError::Parse(
            input.to_string(),
            format!("parser did not consume all input, remainder: '{}'", rem),
        )),
        Err(e) => Err(ExpressionError::Parse(input.to_string(), e.to_string())),
    }
}

// --- Combinators & Helpers ---

fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

fn build_binary_expr_parser<'a, F, G>(
    sub_expr_parser: F,
    op_parser: G,
) -> impl FnMut(&'a str) -> IResult<&'a str, ExpressionNode>
where
    F: Parser<&'a str, Output = ExpressionNode, Error = nom::error::Error<&'a str>> + Clone,
    G: Parser<&'a str, Output = BinaryOperator, Error = nom::error::Error<&'a str>> + Clone,
{
    move |input: &str| {
        let (input, mut left) = sub_expr_parser.clone().parse(input)?;
        let (input, remainder) =
            many0(pair(ws(op_parser.clone()), sub_expr_parser.clone())).parse(input)?;

        for (op, right) in remainder {
            left = ExpressionNode::binary(op, left, right);
        }
        Ok((input, left))
    }
}

// --- Interpolation body: expression plus optional `@` option list ---

fn interpolation_body(input: &str) -> IResult<&str, Expression> {
    let (input, root) = ws(expression).parse(input)?;
    let (input, options) = opt(preceded(ws(char('@')), option_list)).parse(input)?;
    Ok((
        input,
        Expression::with_options(root, options.unwrap_or_default()),
    ))
}

fn option_list(input: &str) -> IResult<&str, OptionMap> {
    map(separated_list1(ws(char(',')), option_entry), |entries| {
        entries.into_iter().collect()
    })
    .parse(input)
}

fn option_entry(input: &str) -> IResult<&str, (String, ExpressionNode)> {
    let (input, name) = option_name(input)?;
    let (input, value) = opt(preceded(ws(char('=')), expression)).parse(input)?;
    // A bare option flag carries no value.
    Ok((
        input,
        (name.to_string(), value.unwrap_or(ExpressionNode::NullLiteral)),
    ))
}

fn option_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_')(input)
}

// --- Expression Parsers (in order of precedence) ---

fn expression(input: &str) -> IResult<&str, ExpressionNode> {
    let (input, condition) = or_expr(input)?;
    // The conditional operator sits above `||` and nests to the right.
    let (input, branches) = opt(pair(
        preceded(ws(char('?')), expression),
        preceded(ws(char(':')), expression),
    ))
    .parse(input)?;

    match branches {
        Some((then_branch, else_branch)) => Ok((
            input,
            ExpressionNode::ternary(condition, then_branch, else_branch),
        )),
        None => Ok((input, condition)),
    }
}

fn or_op(input: &str) -> IResult<&str, BinaryOperator> {
    map(tag("||"), |_| BinaryOperator::Or).parse(input)
}

fn and_op(input: &str) -> IResult<&str, BinaryOperator> {
    map(tag("&&"), |_| BinaryOperator::And).parse(input)
}

fn or_expr(input: &str) -> IResult<&str, ExpressionNode> {
    build_binary_expr_parser(and_expr, or_op)(input)
}

fn and_expr(input: &str) -> IResult<&str, ExpressionNode> {
    build_binary_expr_parser(equality_expr, and_op)(input)
}

fn equality_op(input: &str) -> IResult<&str, BinaryOperator> {
    // The strict forms must be tried first or `===` parses as `==` + `=`.
    alt((
        map(tag("==="), |_| BinaryOperator::StrictEq),
        map(tag("!=="), |_| BinaryOperator::StrictNeq),
        map(tag("=="), |_| BinaryOperator::Eq),
        map(tag("!="), |_| BinaryOperator::Neq),
    ))
    .parse(input)
}

fn relational_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(tag("<="), |_| BinaryOperator::Leq),
        map(tag(">="), |_| BinaryOperator::Geq),
        map(tag("<"), |_| BinaryOperator::Lt),
        map(tag(">"), |_| BinaryOperator::Gt),
    ))
    .parse(input)
}

fn additive_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(char('+'), |_| BinaryOperator::Add),
        map(char('-'), |_| BinaryOperator::Sub),
    ))
    .parse(input)
}

fn multiplicative_op(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        map(char('*'), |_| BinaryOperator::Mul),
        map(char('/'), |_| BinaryOperator::Div),
        map(char('%'), |_| BinaryOperator::Rem),
    ))
    .parse(input)
}

fn equality_expr(input: &str) -> IResult<&str, ExpressionNode> {
    build_binary_expr_parser(relational_expr, equality_op)(input)
}

fn relational_expr(input: &str) -> IResult<&str, ExpressionNode> {
    build_binary_expr_parser(additive_expr, relational_op)(input)
}

fn additive_expr(input: &str) -> IResult<&str, ExpressionNode> {
    build_binary_expr_parser(multiplicative_expr, additive_op)(input)
}

fn multiplicative_expr(input: &str) -> IResult<&str, ExpressionNode> {
    build_binary_expr_parser(unary_expr, multiplicative_op)(input)
}

fn unary_expr(input: &str) -> IResult<&str, ExpressionNode> {
    let (i, not_op) = opt(ws(char('!'))).parse(input)?;
    let (i, node) = primary_expr(i)?;

    if not_op.is_some() {
        Ok((i, ExpressionNode::unary(UnaryOperator::Not, node)))
    } else {
        Ok((i, node))
    }
}

// --- Primary Expressions ---

fn primary_expr(input: &str) -> IResult<&str, ExpressionNode> {
    alt((
        number_literal,
        string_literal,
        array_literal,
        delimited(ws(char('(')), expression, ws(char(')'))),
        identifier_or_keyword,
    ))
    .parse(input)
}

fn number_literal(input: &str) -> IResult<&str, ExpressionNode> {
    let (rest, text) = recognize((
        opt(char('-')),
        digit1,
        opt(pair(char('.'), digit1)),
    ))
    .parse(input)?;

    let number = if text.contains('.') {
        text.parse::<f64>().map(Number::Double)
    } else {
        text.parse::<i64>().map(Number::Long).or_else(|_| {
            // Integer overflow falls back to the floating representation.
            text.parse::<f64>().map(Number::Double)
        })
    };
    match number {
        Ok(n) => Ok((rest, ExpressionNode::NumericConstant(n))),
        Err(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        ))),
    }
}

fn string_literal(input: &str) -> IResult<&str, ExpressionNode> {
    map(alt((quoted_string('\''), quoted_string('"'))), |s| {
        ExpressionNode::StringConstant(s)
    })
    .parse(input)
}

fn quoted_string<'a>(
    quote: char,
) -> impl Parser<&'a str, Output = String, Error = nom::error::Error<&'a str>> {
    let forbidden: &'static str = if quote == '\'' { "'\\" } else { "\"\\" };
    delimited(
        char(quote),
        map(
            opt(escaped_transform(
                is_not(forbidden),
                '\\',
                alt((
                    value('\'', char('\'')),
                    value('"', char('"')),
                    value('\\', char('\\')),
                    value('\n', char('n')),
                    value('\t', char('t')),
                )),
            )),
            Option::unwrap_or_default,
        ),
        char(quote),
    )
}

fn array_literal(input: &str) -> IResult<&str, ExpressionNode> {
    map(
        delimited(
            ws(char('[')),
            separated_list0(ws(char(',')), expression),
            ws(char(']')),
        ),
        ExpressionNode::ArrayLiteral,
    )
    .parse(input)
}

/// Parses a dotted identifier, mapping the reserved words `true`, `false`
/// and `null` to their literal nodes.
fn identifier_or_keyword(input: &str) -> IResult<&str, ExpressionNode> {
    let (rest, name) = verify(
        recognize(separated_list1(char('.'), identifier_segment)),
        |s: &str| !s.is_empty(),
    )
    .parse(input)?;

    let node = match name {
        "true" => ExpressionNode::BooleanConstant(true),
        "false" => ExpressionNode::BooleanConstant(false),
        "null" => ExpressionNode::NullLiteral,
        _ => ExpressionNode::Identifier(name.to_string()),
    };
    Ok((rest, node))
}

fn identifier_segment(input: &str) -> IResult<&str, &str> {
    verify(
        take_while1(|c: char| c.is_alphanumeric() || c == '_'),
        |s: &str| s.chars().next().is_some_and(|c| c.is_alphabetic() || c == '_'),
    )
    .parse(input)
}
