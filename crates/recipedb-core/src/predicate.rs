//! Structured predicates consumed by [`RecipeStore`](crate::traits::RecipeStore).
//!
//! A [`Predicate`] is a conjunction of field-level [`Clause`]s. There is no
//! disjunction or negation: every clause must hold for a record to match, and
//! an empty predicate matches every record.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::recipe::{FieldRef, Recipe};

/// Numeric comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// `field <= value`
    Lte,
    /// `field >= value`
    Gte,
    /// `field == value`
    Eq,
}

impl Comparison {
    /// Applies the operator to `lhs <op> rhs`.
    #[must_use]
    pub fn holds(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lte => lhs <= rhs,
            Self::Gte => lhs >= rhs,
            Self::Eq => lhs == rhs,
        }
    }

    /// Operator token as written in query parameters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lte => "<=",
            Self::Gte => ">=",
            Self::Eq => "=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Single field-level constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Clause {
    /// Case-insensitive, unanchored substring match on a text field.
    Contains { field: String, needle: String },
    /// Exact, case-sensitive equality on a text field.
    Equals { field: String, value: String },
    /// Numeric comparison. Only numeric values satisfy it.
    Compare {
        field: String,
        op: Comparison,
        value: f64,
    },
}

impl Clause {
    /// Builds a [`Clause::Contains`]; the needle is lowercased once here.
    #[must_use]
    pub fn contains(field: impl Into<String>, needle: &str) -> Self {
        Self::Contains {
            field: field.into(),
            needle: needle.to_lowercase(),
        }
    }

    #[must_use]
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Equals {
            field: field.into(),
            value: value.into(),
        }
    }

    #[must_use]
    pub fn compare(field: impl Into<String>, op: Comparison, value: f64) -> Self {
        Self::Compare {
            field: field.into(),
            op,
            value,
        }
    }

    /// Field path the clause constrains.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Contains { field, .. } | Self::Equals { field, .. } | Self::Compare { field, .. } => {
                field
            }
        }
    }

    /// Evaluates the clause against a recipe. Absent fields never match.
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        match (self, recipe.field(self.field())) {
            (Self::Contains { needle, .. }, Some(FieldRef::Text(text))) => {
                text.to_lowercase().contains(needle.as_str())
            }
            (Self::Equals { value, .. }, Some(FieldRef::Text(text))) => text == value,
            (Self::Compare { op, value, .. }, Some(FieldRef::Number(number))) => {
                op.holds(number, *value)
            }
            _ => false,
        }
    }
}

/// Conjunction of clauses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// Predicate matching every record.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a clause (builder pattern).
    #[must_use]
    pub fn and(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.clauses.iter().all(|clause| clause.matches(recipe))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sort order applied by [`RecipeStore::find`](crate::traits::RecipeStore::find).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }

    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Orders two recipes on the sort field.
    ///
    /// Records lacking the field sort after every record that has it, in both
    /// directions. Numbers sort before text when a field mixes both.
    #[must_use]
    pub fn compare(&self, a: &Recipe, b: &Recipe) -> Ordering {
        match (a.field(&self.field), b.field(&self.field)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(lhs), Some(rhs)) => {
                let ordering = compare_values(lhs, rhs);
                match self.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
        }
    }
}

fn compare_values(lhs: FieldRef<'_>, rhs: FieldRef<'_>) -> Ordering {
    match (lhs, rhs) {
        (FieldRef::Number(a), FieldRef::Number(b)) => a.total_cmp(&b),
        (FieldRef::Text(a), FieldRef::Text(b)) => a.cmp(b),
        (FieldRef::Number(_), FieldRef::Text(_)) => Ordering::Less,
        (FieldRef::Text(_), FieldRef::Number(_)) => Ordering::Greater,
    }
}

/// Sort/skip/limit window for a find call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub sort: Option<SortSpec>,
    pub skip: u64,
    pub limit: Option<u64>,
}

impl FindOptions {
    #[must_use]
    pub fn sorted(mut self, sort: SortSpec) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn window(mut self, skip: u64, limit: u64) -> Self {
        self.skip = skip;
        self.limit = Some(limit);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(title: &str, cuisine: &str, rating: Option<f64>) -> Recipe {
        Recipe {
            title: Some(title.to_string()),
            cuisine: Some(cuisine.to_string()),
            rating,
            ..Recipe::default()
        }
    }

    #[test]
    fn empty_predicate_matches_everything() {
        assert!(Predicate::all().matches(&Recipe::default()));
    }

    #[test]
    fn contains_is_case_insensitive_infix() {
        let clause = Clause::contains("title", "CAKE");
        assert!(clause.matches(&recipe("Carrot Cake", "American", None)));
        assert!(clause.matches(&recipe("cupcakes", "American", None)));
        assert!(!clause.matches(&recipe("Carrot Pie", "American", None)));
        assert!(!clause.matches(&Recipe::default()));
    }

    #[test]
    fn equals_is_case_sensitive() {
        let clause = Clause::equals("cuisine", "italian");
        assert!(clause.matches(&recipe("Pasta", "italian", None)));
        assert!(!clause.matches(&recipe("Pasta", "Italian", None)));
    }

    #[test]
    fn compare_ignores_missing_values() {
        let clause = Clause::compare("rating", Comparison::Gte, 4.0);
        assert!(clause.matches(&recipe("a", "b", Some(4.0))));
        assert!(!clause.matches(&recipe("a", "b", Some(3.9))));
        assert!(!clause.matches(&recipe("a", "b", None)));
    }

    #[test]
    fn clauses_are_conjoined() {
        let predicate = Predicate::all()
            .and(Clause::contains("title", "cake"))
            .and(Clause::compare("rating", Comparison::Gte, 4.0));

        assert!(predicate.matches(&recipe("Carrot Cake", "American", Some(4.5))));
        assert!(!predicate.matches(&recipe("Carrot Cake", "American", Some(3.9))));
        assert!(!predicate.matches(&recipe("Carrot Soup", "American", Some(4.5))));
    }

    #[test]
    fn descending_sort_places_missing_last() {
        let spec = SortSpec::descending("rating");
        let high = recipe("a", "b", Some(5.0));
        let low = recipe("a", "b", Some(1.0));
        let unrated = recipe("a", "b", None);

        assert_eq!(spec.compare(&high, &low), Ordering::Less);
        assert_eq!(spec.compare(&unrated, &low), Ordering::Greater);
        assert_eq!(spec.compare(&unrated, &unrated), Ordering::Equal);
    }
}
