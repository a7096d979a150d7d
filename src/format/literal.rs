//! Parser for the JavaScript literals the index generator emits.
//!
//! Shards and the manifest are scripts of the form `var name = <literal>;`
//! where the literal uses single- or double-quoted strings, arrays, objects
//! with bare or quoted keys, and numbers. Values are parsed into
//! `serde_json::Value` so the decoders can walk them uniformly.

use crate::error::{FormatError, FormatResult};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1, take_until, take_while, take_while1, take_while_m_n},
    character::complete::{anychar, char, digit1, multispace1},
    combinator::{all_consuming, cut, map, map_opt, opt, recognize, value},
    error::{context, convert_error, VerboseError},
    multi::{fold_many0, many0, many1, separated_list0},
    sequence::{delimited, pair, preceded, separated_pair, terminated, tuple},
    IResult,
};
use serde_json::{Map, Number, Value};

type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// Parse a script of `var name = literal;` declarations.
///
/// Returns the declarations in source order.
pub fn parse_script(text: &str) -> FormatResult<Vec<(String, Value)>> {
    finish(
        text,
        all_consuming(delimited(ws, many1(terminated(declaration, ws)), ws))(text),
    )
}

/// Parse a single bare literal, optionally followed by `;`.
pub fn parse_literal(text: &str) -> FormatResult<Value> {
    finish(
        text,
        all_consuming(delimited(
            ws,
            literal,
            tuple((ws, opt(char(';')), ws)),
        ))(text),
    )
}

fn finish<'a, T>(text: &'a str, result: Res<'a, T>) -> FormatResult<T> {
    match result {
        Ok((_, parsed)) => Ok(parsed),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(FormatError::Syntax(convert_error(text, e)))
        }
        Err(nom::Err::Incomplete(_)) => Err(FormatError::Syntax("Incomplete input".to_string())),
    }
}

// ============================================================================
// Whitespace and comments
// ============================================================================

fn ws(input: &str) -> Res<'_, &str> {
    recognize(many0(alt((
        multispace1,
        recognize(pair(tag("//"), take_while(|c| c != '\n'))),
        recognize(tuple((tag("/*"), take_until("*/"), tag("*/")))),
    ))))(input)
}

// ============================================================================
// Declarations
// ============================================================================

fn identifier(input: &str) -> Res<'_, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_' || c == '$')(input)
}

fn declaration(input: &str) -> Res<'_, (String, Value)> {
    let (input, _) = alt((tag("var"), tag("let"), tag("const")))(input)?;
    let (input, _) = multispace1(input)?;
    let (input, name) = context("variable name", cut(identifier))(input)?;
    let (input, _) = context("'='", cut(delimited(ws, char('='), ws)))(input)?;
    let (input, val) = cut(literal)(input)?;
    let (input, _) = ws(input)?;
    let (input, _) = opt(char(';'))(input)?;
    Ok((input, (name.to_string(), val)))
}

// ============================================================================
// Literals
// ============================================================================

fn literal(input: &str) -> Res<'_, Value> {
    context(
        "literal",
        alt((
            map(string_literal, Value::String),
            number,
            value(Value::Bool(true), tag("true")),
            value(Value::Bool(false), tag("false")),
            value(Value::Null, tag("null")),
            array,
            object,
        )),
    )(input)
}

fn array(input: &str) -> Res<'_, Value> {
    let (input, _) = terminated(char('['), ws)(input)?;
    let (input, items) = separated_list0(delimited(ws, char(','), ws), literal)(input)?;
    let (input, _) = pair(ws, opt(terminated(char(','), ws)))(input)?;
    let (input, _) = context("closing bracket", cut(char(']')))(input)?;
    Ok((input, Value::Array(items)))
}

fn property_name(input: &str) -> Res<'_, String> {
    alt((string_literal, map(identifier, str::to_string)))(input)
}

fn object(input: &str) -> Res<'_, Value> {
    let (input, _) = terminated(char('{'), ws)(input)?;
    let (input, members) = separated_list0(
        delimited(ws, char(','), ws),
        separated_pair(property_name, delimited(ws, char(':'), ws), literal),
    )(input)?;
    let (input, _) = pair(ws, opt(terminated(char(','), ws)))(input)?;
    let (input, _) = context("closing brace", cut(char('}')))(input)?;
    Ok((input, Value::Object(members.into_iter().collect::<Map<_, _>>())))
}

fn number(input: &str) -> Res<'_, Value> {
    map_opt(
        recognize(tuple((
            opt(char('-')),
            digit1,
            opt(pair(char('.'), digit1)),
        ))),
        |digits: &str| {
            if digits.contains('.') {
                digits
                    .parse::<f64>()
                    .ok()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
            } else {
                digits.parse::<i64>().ok().map(|n| Value::Number(n.into()))
            }
        },
    )(input)
}

// ============================================================================
// Strings
// ============================================================================

enum Fragment<'a> {
    Literal(&'a str),
    Escaped(char),
}

fn string_literal(input: &str) -> Res<'_, String> {
    alt((quoted('\''), quoted('"')))(input)
}

fn quoted<'a>(quote: char) -> impl FnMut(&'a str) -> Res<'a, String> {
    move |input: &'a str| {
        let (input, _) = char(quote)(input)?;
        let (input, body) = fold_many0(
            alt((
                map(take_till1(move |c| c == quote || c == '\\'), Fragment::Literal),
                map(preceded(char('\\'), escape), Fragment::Escaped),
            )),
            String::new,
            |mut acc, fragment| {
                match fragment {
                    Fragment::Literal(s) => acc.push_str(s),
                    Fragment::Escaped(c) => acc.push(c),
                }
                acc
            },
        )(input)?;
        let (input, _) = context("closing quote", cut(char(quote)))(input)?;
        Ok((input, body))
    }
}

fn escape(input: &str) -> Res<'_, char> {
    alt((
        preceded(
            char('u'),
            cut(map_opt(
                take_while_m_n(4, 4, |c: char| c.is_ascii_hexdigit()),
                |hex: &str| u32::from_str_radix(hex, 16).ok().and_then(char::from_u32),
            )),
        ),
        value('\n', char('n')),
        value('\t', char('t')),
        value('\r', char('r')),
        value('\u{8}', char('b')),
        value('\u{c}', char('f')),
        anychar,
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_quoted_array() {
        let value = parse_literal("['a', ['b', 1, 'c']]").unwrap();
        assert_eq!(value, json!(["a", ["b", 1, "c"]]));
    }

    #[test]
    fn test_escapes() {
        let value = parse_literal(r#"['it\'s', "say \"hi\"", 'a\\b', 'A\n']"#).unwrap();
        assert_eq!(value, json!(["it's", "say \"hi\"", "a\\b", "A\n"]));
    }

    #[test]
    fn test_empty_strings_and_arrays() {
        assert_eq!(parse_literal("['', [ ], []]").unwrap(), json!(["", [], []]));
    }

    #[test]
    fn test_trailing_commas() {
        assert_eq!(parse_literal("[1, 2, ]").unwrap(), json!([1, 2]));
        assert_eq!(parse_literal("{a: 1,}").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_object_with_bare_and_numeric_keys() {
        let value = parse_literal("{ 0: \"all\", 'one': 'x', two: -2.5 }").unwrap();
        assert_eq!(value, json!({"0": "all", "one": "x", "two": -2.5}));
    }

    #[test]
    fn test_keywords() {
        assert_eq!(
            parse_literal("[true, false, null]").unwrap(),
            json!([true, false, null])
        );
    }

    #[test]
    fn test_script_declarations() {
        let script = "// generated\nvar a =\n[\n  ['x_0',['X',['x.html',1,'X']]]\n];\nvar b = { 1: 'y' };";
        let decls = parse_script(script).unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].0, "a");
        assert_eq!(decls[0].1, json!([["x_0", ["X", ["x.html", 1, "X"]]]]));
        assert_eq!(decls[1].0, "b");
        assert_eq!(decls[1].1, json!({"1": "y"}));
    }

    #[test]
    fn test_block_comments_are_skipped() {
        let decls = parse_script("/* header\n spanning */ var a = [1] /* tail */;").unwrap();
        assert_eq!(decls[0].1, json!([1]));
    }

    #[test]
    fn test_unterminated_array_is_syntax_error() {
        let err = parse_literal("['a', 'b'").unwrap_err();
        assert!(matches!(err, FormatError::Syntax(_)));
    }

    #[test]
    fn test_unterminated_string_is_syntax_error() {
        assert!(parse_literal("['abc]").is_err());
    }

    #[test]
    fn test_script_rejects_trailing_garbage() {
        assert!(parse_script("var a = [1]; garbage").is_err());
    }

    #[test]
    fn test_script_requires_declaration() {
        assert!(parse_script("   ").is_err());
    }
}
