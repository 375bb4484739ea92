//! A `nom`-based parser for the single-attribute filter predicate `@attr='value'`.
use crate::error::PathError;
use nom::{
    IResult, Parser,
    bytes::complete::{is_not, take_while1},
    character::complete::{char, multispace0},
    combinator::map,
    sequence::{delimited, preceded, separated_pair},
};
use std::fmt;

/// An attribute-equality filter attached to one path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Predicate {
    pub attribute: String,
    pub value: String,
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}='{}'", self.attribute, self.value)
    }
}

/// Parses a predicate body (without the surrounding brackets).
///
/// Surrounding whitespace is ignored, as is one optional pair of enclosing
/// brackets, so both `@id='7'` and `[@id='7']` are accepted.
pub fn parse_predicate(input: &str) -> Result<Predicate, PathError> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    match predicate(body.trim()) {
        Ok(("", p)) => Ok(p),
        Ok((rem, _)) => Err(PathError::Predicate(
            input.to_string(),
            format!("Parser did not consume all input. Remainder: '{}'", rem),
        )),
        Err(e) => Err(PathError::Predicate(input.to_string(), e.to_string())),
    }
}

// --- Combinators ---

fn attribute_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-' || c == ':').parse(input)
}

fn quoted_value(input: &str) -> IResult<&str, &str> {
    delimited(char('\''), is_not("'"), char('\'')).parse(input)
}

fn predicate(input: &str) -> IResult<&str, Predicate> {
    map(
        separated_pair(
            preceded(char('@'), attribute_name),
            delimited(multispace0, char('='), multispace0),
            quoted_value,
        ),
        |(attribute, value): (&str, &str)| Predicate {
            attribute: attribute.to_string(),
            value: value.to_string(),
        },
    )
    .parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_predicate() {
        let p = parse_predicate("@type='billing'").unwrap();
        assert_eq!(p.attribute, "type");
        assert_eq!(p.value, "billing");
        assert_eq!(p.to_string(), "@type='billing'");
    }

    #[test]
    fn test_parse_predicate_with_brackets_and_spaces() {
        let p = parse_predicate("  [@qualifier = 'ZIP']  ").unwrap();
        assert_eq!(p.attribute, "qualifier");
        assert_eq!(p.value, "ZIP");
    }

    #[test]
    fn test_value_may_contain_dots_and_equals() {
        let p = parse_predicate("@ref='a.b=c'").unwrap();
        assert_eq!(p.value, "a.b=c");
    }

    #[test]
    fn test_reject_malformed_predicates() {
        assert!(parse_predicate("type='billing'").is_err());
        assert!(parse_predicate("@type=billing").is_err());
        assert!(parse_predicate("@type=\"billing\"").is_err());
        assert!(parse_predicate("@type=''").is_err());
        assert!(parse_predicate("@type='a' and @b='c'").is_err());
        assert!(parse_predicate("").is_err());
    }
}
