//! Parser for numeric comparison filters carried in query parameters.
//!
//! A filter is an operator immediately followed by an unsigned decimal:
//! `<=12.5`, `>=3`, `=350`. The input is searched, not matched whole: the
//! leftmost operator directly followed by a digit wins and the rest of the
//! string is ignored, so `>=1 AND <=5` reads as `>=1` and `==4` as `=4`.
//!
//! Parsing is permissive: input containing no such operator (an empty
//! string, `<5`, `>=-1`, `= 4`, `=abc`) yields no filter instead of an
//! error, so a garbled parameter narrows nothing rather than failing the
//! whole request.

use once_cell::sync::Lazy;
use regex::Regex;

use recipedb_core::{Clause, Comparison};

static FILTER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(<=|>=|=)([0-9]+(?:\.[0-9]+)?)").expect("numeric filter pattern is valid")
});

/// A parsed `field <op> value` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericFilter {
    pub field: String,
    pub op: Comparison,
    pub value: f64,
}

impl NumericFilter {
    /// Converts the filter into a predicate clause.
    #[must_use]
    pub fn into_clause(self) -> Clause {
        Clause::compare(self.field, self.op, self.value)
    }
}

/// Parses `raw` into a filter on `field`, or `None` when it does not match.
#[must_use]
pub fn parse_numeric_filter(raw: Option<&str>, field: &str) -> Option<NumericFilter> {
    let captures = FILTER_PATTERN.captures(raw?)?;

    let op = match &captures[1] {
        "<=" => Comparison::Lte,
        ">=" => Comparison::Gte,
        _ => Comparison::Eq,
    };

    let value: f64 = captures[2].parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    Some(NumericFilter {
        field: field.to_string(),
        op,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> Option<(Comparison, f64)> {
        parse_numeric_filter(Some(raw), "rating").map(|f| (f.op, f.value))
    }

    #[test]
    fn parses_each_operator() {
        assert_eq!(parse("<=12.5"), Some((Comparison::Lte, 12.5)));
        assert_eq!(parse(">=3"), Some((Comparison::Gte, 3.0)));
        assert_eq!(parse("=350"), Some((Comparison::Eq, 350.0)));
        assert_eq!(parse("=0"), Some((Comparison::Eq, 0.0)));
    }

    #[test]
    fn first_operator_followed_by_a_number_wins() {
        assert_eq!(parse(">=1 AND <=5"), Some((Comparison::Gte, 1.0)));
        assert_eq!(parse(">=1<=5"), Some((Comparison::Gte, 1.0)));
        assert_eq!(parse("==4"), Some((Comparison::Eq, 4.0)));
        assert_eq!(parse(">=4stars"), Some((Comparison::Gte, 4.0)));
        assert_eq!(parse("rating>=4"), Some((Comparison::Gte, 4.0)));
        assert_eq!(parse("x=4"), Some((Comparison::Eq, 4.0)));
        assert_eq!(parse("=4x"), Some((Comparison::Eq, 4.0)));
        assert_eq!(parse("=1."), Some((Comparison::Eq, 1.0)));
        assert_eq!(parse(" <=12.5 "), Some((Comparison::Lte, 12.5)));
    }

    #[test]
    fn keeps_the_target_field() {
        let filter = parse_numeric_filter(Some("<=300"), "nutrients.calories").unwrap();
        assert_eq!(filter.field, "nutrients.calories");
        assert_eq!(
            filter.into_clause(),
            Clause::compare("nutrients.calories", Comparison::Lte, 300.0)
        );
    }

    #[test]
    fn absent_or_empty_is_no_filter() {
        assert_eq!(parse_numeric_filter(None, "rating"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn malformed_input_is_silently_dropped() {
        for raw in [
            "4", "<4", ">4", "=>4", "<=-1", "=-5", ">=abc", "=.5", ">= 4", "= 4", "=١٢",
        ] {
            assert_eq!(parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn overflowing_values_are_dropped() {
        let huge = format!("<={}", "9".repeat(400));
        assert_eq!(parse(&huge), None);
    }
}
