//! Predicate evaluation shared by the bundled stores.

use recipedb_core::{FindOptions, Predicate, StoredRecipe};

/// Filters, sorts (stably) and windows `records`.
pub(crate) fn select(
    records: &[StoredRecipe],
    predicate: &Predicate,
    options: &FindOptions,
) -> Vec<StoredRecipe> {
    let mut matched: Vec<&StoredRecipe> = records
        .iter()
        .filter(|stored| predicate.matches(&stored.recipe))
        .collect();

    if let Some(sort) = &options.sort {
        matched.sort_by(|a, b| sort.compare(&a.recipe, &b.recipe));
    }

    let skip = usize::try_from(options.skip).unwrap_or(usize::MAX);
    let take = options
        .limit
        .map_or(usize::MAX, |limit| usize::try_from(limit).unwrap_or(usize::MAX));

    matched.into_iter().skip(skip).take(take).cloned().collect()
}

pub(crate) fn count(records: &[StoredRecipe], predicate: &Predicate) -> u64 {
    if predicate.is_empty() {
        return records.len() as u64;
    }
    records
        .iter()
        .filter(|stored| predicate.matches(&stored.recipe))
        .count() as u64
}
