//! Core domain types and traits for the RecipeDB query service.

pub mod config;
pub mod error;
pub mod ids;
pub mod predicate;
pub mod recipe;
pub mod traits;

pub use config::RecipeDbConfig;
pub use error::{CoreError, CoreResult};
pub use ids::RecipeId;
pub use predicate::{Clause, Comparison, FindOptions, Predicate, SortDirection, SortSpec};
pub use recipe::{FieldRef, NutrientValue, Recipe, StoredRecipe};
pub use traits::{RecipeStore, StoreStatus};
