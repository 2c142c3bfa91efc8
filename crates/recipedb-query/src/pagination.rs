//! Page/limit handling for the list endpoint.

use serde::Deserialize;

use recipedb_core::config::QueryConfig;

/// Fallback values used when a request omits or garbles `page`/`limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageDefaults {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageDefaults {
    fn default() -> Self {
        Self { page: 1, limit: 10 }
    }
}

impl From<&QueryConfig> for PageDefaults {
    fn from(config: &QueryConfig) -> Self {
        Self {
            page: config.default_page.max(1),
            limit: config.default_limit.max(1),
        }
    }
}

/// Raw `page`/`limit` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A resolved, 1-based page window. Both fields are always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
}

impl Pagination {
    /// Builds a window, replacing zeros with the defaults.
    #[must_use]
    pub fn new(page: u64, limit: u64, defaults: PageDefaults) -> Self {
        Self {
            page: if page == 0 { defaults.page } else { page },
            limit: if limit == 0 { defaults.limit } else { limit },
        }
    }

    /// Resolves raw query parameters, falling back per field.
    #[must_use]
    pub fn from_params(params: &PageParams, defaults: PageDefaults) -> Self {
        Self::new(
            coerce_positive(params.page.as_deref()).unwrap_or(defaults.page),
            coerce_positive(params.limit.as_deref()).unwrap_or(defaults.limit),
            defaults,
        )
    }

    /// Number of records preceding this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages needed for `total` records; zero when there are none.
    #[must_use]
    pub fn page_count(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }
}

/// Lenient integer coercion: takes the leading integer of the trimmed input
/// (`"2abc"` is 2, `"2.9"` is 2) and discards anything not strictly positive.
/// Values beyond `u64` saturate.
#[must_use]
pub fn coerce_positive(raw: Option<&str>) -> Option<u64> {
    let trimmed = raw?.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let value = rest[..digits_len].parse::<u64>().unwrap_or(u64::MAX);
    if negative || value == 0 {
        return None;
    }
    Some(value)
}
