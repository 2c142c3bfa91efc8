//! Translates search parameters into a store predicate.

use serde::Deserialize;

use recipedb_core::{Clause, Predicate};

use crate::filter_parser::parse_numeric_filter;

pub const TITLE_FIELD: &str = "title";
pub const CUISINE_FIELD: &str = "cuisine";
pub const RATING_FIELD: &str = "rating";
pub const TOTAL_TIME_FIELD: &str = "total_time";
pub const CALORIES_FIELD: &str = "nutrients.calories";

/// Raw search parameters, exactly as they arrive on the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchCriteria {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<String>,
    pub total_time: Option<String>,
    pub calories: Option<String>,
}

impl SearchCriteria {
    /// Builds the conjunction of every recognised criterion.
    #[must_use]
    pub fn to_predicate(&self) -> Predicate {
        QueryBuilder::new()
            .title(self.title.as_deref())
            .cuisine(self.cuisine.as_deref())
            .numeric(RATING_FIELD, self.rating.as_deref())
            .numeric(TOTAL_TIME_FIELD, self.total_time.as_deref())
            .numeric(CALORIES_FIELD, self.calories.as_deref())
            .build()
    }
}

/// Accumulates clauses; inputs that do not yield a constraint are skipped.
#[derive(Debug, Default)]
pub struct QueryBuilder {
    predicate: Predicate,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive substring match on the title.
    pub fn title(mut self, title: Option<&str>) -> Self {
        if let Some(title) = title.filter(|t| !t.is_empty()) {
            self.predicate.push(Clause::contains(TITLE_FIELD, title));
        }
        self
    }

    /// Exact, case-sensitive cuisine match.
    pub fn cuisine(mut self, cuisine: Option<&str>) -> Self {
        if let Some(cuisine) = cuisine.filter(|c| !c.is_empty()) {
            self.predicate.push(Clause::equals(CUISINE_FIELD, cuisine));
        }
        self
    }

    /// Numeric comparison parsed from `raw`; garbled input adds nothing.
    pub fn numeric(mut self, field: &str, raw: Option<&str>) -> Self {
        if let Some(filter) = parse_numeric_filter(raw, field) {
            self.predicate.push(filter.into_clause());
        }
        self
    }

    pub fn build(self) -> Predicate {
        self.predicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipedb_core::{Comparison, NutrientValue, Recipe};

    fn criteria() -> SearchCriteria {
        SearchCriteria::default()
    }

    fn recipe(title: &str, cuisine: &str, calories: Option<NutrientValue>) -> Recipe {
        Recipe {
            title: Some(title.to_string()),
            cuisine: Some(cuisine.to_string()),
            nutrients: calories.map(|c| [("calories".to_string(), c)].into_iter().collect()),
            ..Recipe::default()
        }
    }

    #[test]
    fn no_criteria_matches_everything() {
        let predicate = criteria().to_predicate();
        assert!(predicate.is_empty());
        assert!(predicate.matches(&Recipe::default()));
    }

    #[test]
    fn maps_each_parameter_to_its_field() {
        let predicate = SearchCriteria {
            title: Some("pie".into()),
            cuisine: Some("Southern Recipes".into()),
            rating: Some(">=4.5".into()),
            total_time: Some("<=120".into()),
            calories: Some("=389".into()),
        }
        .to_predicate();

        assert_eq!(
            predicate.clauses(),
            &[
                Clause::contains("title", "pie"),
                Clause::equals("cuisine", "Southern Recipes"),
                Clause::compare("rating", Comparison::Gte, 4.5),
                Clause::compare("total_time", Comparison::Lte, 120.0),
                Clause::compare("nutrients.calories", Comparison::Eq, 389.0),
            ]
        );
    }

    #[test]
    fn empty_and_malformed_inputs_are_ignored() {
        let predicate = SearchCriteria {
            title: Some(String::new()),
            cuisine: Some(String::new()),
            rating: Some(">4".into()),
            total_time: Some("abc".into()),
            calories: Some(String::new()),
        }
        .to_predicate();

        assert!(predicate.is_empty());
    }

    #[test]
    fn whitespace_title_is_still_a_substring_match() {
        let predicate = SearchCriteria {
            title: Some(" ".into()),
            ..criteria()
        }
        .to_predicate();

        assert_eq!(predicate.clauses(), &[Clause::contains("title", " ")]);
        assert!(predicate.matches(&recipe("Apple pie", "x", None)));
        assert!(!predicate.matches(&recipe("Focaccia", "x", None)));
    }

    #[test]
    fn title_is_case_insensitive_but_cuisine_is_exact() {
        let predicate = SearchCriteria {
            title: Some("PIE".into()),
            cuisine: Some("italian".into()),
            ..criteria()
        }
        .to_predicate();

        assert!(predicate.matches(&recipe("Apple pie", "italian", None)));
        assert!(!predicate.matches(&recipe("Apple pie", "Italian", None)));
        assert!(!predicate.matches(&recipe("Apple tart", "italian", None)));
    }

    #[test]
    fn calorie_filter_only_matches_numeric_values() {
        let predicate = SearchCriteria {
            calories: Some("<=300".into()),
            ..criteria()
        }
        .to_predicate();

        assert!(predicate.matches(&recipe("a", "x", Some(NutrientValue::Number(250.0)))));
        assert!(predicate.matches(&recipe("b", "x", Some(NutrientValue::Number(300.0)))));
        assert!(!predicate.matches(&recipe("c", "x", Some(NutrientValue::Number(301.0)))));
        assert!(!predicate.matches(&recipe("d", "x", Some(NutrientValue::Text("250 kcal".into())))));
        assert!(!predicate.matches(&recipe("e", "x", Some(NutrientValue::Missing))));
        assert!(!predicate.matches(&recipe("f", "x", None)));
    }

    #[test]
    fn criteria_deserialize_from_query_pairs() {
        let parsed: SearchCriteria =
            serde_json::from_str(r#"{"title":"soup","rating":">=4"}"#).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("soup"));
        assert_eq!(parsed.rating.as_deref(), Some(">=4"));
        assert!(parsed.cuisine.is_none());
    }
}
