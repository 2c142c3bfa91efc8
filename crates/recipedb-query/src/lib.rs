//! Query layer for RecipeDB.
//!
//! Turns loosely-typed request parameters into store predicates and page
//! windows, and runs the list and search operations against a
//! [`RecipeStore`](recipedb_core::RecipeStore).

pub mod filter_parser;
pub mod pagination;
pub mod query_builder;
pub mod service;

pub use filter_parser::{parse_numeric_filter, NumericFilter};
pub use pagination::{coerce_positive, PageDefaults, PageParams, Pagination};
pub use query_builder::{QueryBuilder, SearchCriteria};
pub use service::{RecipePage, RecipeQueryService, SearchResults};
