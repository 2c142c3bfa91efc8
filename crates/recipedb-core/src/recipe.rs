//! Recipe domain types.
//!
//! Every attribute of a [`Recipe`] is optional: the bulk payloads this service
//! ingests are loosely typed, so absence is modelled as "unknown" rather than
//! as a zero value. Text attributes accept numbers and store them as text
//! (`"serves": 4` becomes `"4"`), numeric attributes accept numeric strings.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::RecipeId;

/// Path prefix addressing entries of [`Recipe::nutrients`].
pub const NUTRIENTS_PREFIX: &str = "nutrients.";

/// A single recipe record as found in the bulk payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, deserialize_with = "lenient_text")]
    pub cuisine: Option<String>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,

    /// Rating, conventionally within `0..=5`.
    #[serde(default, deserialize_with = "lenient_number")]
    pub rating: Option<f64>,

    /// Preparation time in minutes.
    #[serde(default, deserialize_with = "lenient_number")]
    pub prep_time: Option<f64>,

    /// Cooking time in minutes.
    #[serde(default, deserialize_with = "lenient_number")]
    pub cook_time: Option<f64>,

    /// Total time in minutes.
    #[serde(default, deserialize_with = "lenient_number")]
    pub total_time: Option<f64>,

    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,

    /// Serving description, kept as text even when numeric-looking.
    #[serde(default, deserialize_with = "lenient_text")]
    pub serves: Option<String>,

    /// Open nutrient-name to value mapping; keys differ per record.
    #[serde(default)]
    pub nutrients: Option<BTreeMap<String, NutrientValue>>,
}

/// Value stored under a nutrient key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutrientValue {
    Number(f64),
    Text(String),
    /// `null` in the payload, including normalized `NaN` tokens.
    Missing,
}

/// A recipe together with its store-assigned identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecipe {
    pub id: RecipeId,

    #[serde(flatten)]
    pub recipe: Recipe,
}

impl StoredRecipe {
    /// Wraps a recipe with a freshly generated identifier.
    #[must_use]
    pub fn assign(recipe: Recipe) -> Self {
        Self {
            id: RecipeId::new(),
            recipe,
        }
    }
}

/// Borrowed view of a single field value, used when evaluating predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldRef<'a> {
    Number(f64),
    Text(&'a str),
}

impl Recipe {
    /// Resolves a field path such as `rating` or `nutrients.calories`.
    ///
    /// Returns `None` when the field is absent, null, or unknown.
    #[must_use]
    pub fn field(&self, path: &str) -> Option<FieldRef<'_>> {
        if let Some(key) = path.strip_prefix(NUTRIENTS_PREFIX) {
            return match self.nutrients.as_ref()?.get(key)? {
                NutrientValue::Number(value) => Some(FieldRef::Number(*value)),
                NutrientValue::Text(text) => Some(FieldRef::Text(text)),
                NutrientValue::Missing => None,
            };
        }

        match path {
            "cuisine" => self.cuisine.as_deref().map(FieldRef::Text),
            "title" => self.title.as_deref().map(FieldRef::Text),
            "description" => self.description.as_deref().map(FieldRef::Text),
            "serves" => self.serves.as_deref().map(FieldRef::Text),
            "rating" => self.rating.map(FieldRef::Number),
            "prep_time" => self.prep_time.map(FieldRef::Number),
            "cook_time" => self.cook_time.map(FieldRef::Number),
            "total_time" => self.total_time.map(FieldRef::Number),
            _ => None,
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Integer(value) => value.to_string(),
        Raw::Float(value) => value.to_string(),
        Raw::Bool(value) => value.to_string(),
    }))
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Option::<Raw>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Raw::Number(value)) => value,
        Some(Raw::Text(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| D::Error::custom(format!("expected a number, found {text:?}")))?
        }
    };

    // "NaN"/"inf" strings parse as floats but are never representable values.
    Ok(value.is_finite().then_some(value))
}
