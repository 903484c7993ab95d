//! The pagination and search contract shared by every paginated list endpoint.
//!
//! Requests carry `page` (1-based), `pageSize` (a positive integer or the
//! literal `"all"`), `search`, `sortBy`, and `sortOrder`. Responses wrap the
//! rows in [`Page`] with a [`PageMeta`] block. The skip/take arithmetic and
//! the `"all"` special case live here so the repositories and the HTTP layer
//! cannot drift apart.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Default page size when the request omits `pageSize`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Page size: either a fixed row count or "return everything as one page".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    Count(i64),
    All,
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::Count(DEFAULT_PAGE_SIZE)
    }
}

impl PageSize {
    /// LIMIT/OFFSET for the given 1-based page, or `None` for `All`.
    pub fn limit_offset(&self, page: i64) -> Option<(i64, i64)> {
        match self {
            PageSize::All => None,
            PageSize::Count(size) => {
                let page = page.max(1);
                Some((*size, (page - 1) * size))
            }
        }
    }
}

impl<'de> Deserialize<'de> for PageSize {
    /// Accepts a JSON number, a numeric string, or the literal `"all"`.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n > 0 => Ok(PageSize::Count(n)),
            Raw::Number(n) => Err(de::Error::custom(format!(
                "pageSize must be positive, got {n}"
            ))),
            Raw::Text(s) if s == "all" => Ok(PageSize::All),
            Raw::Text(s) => s
                .parse::<i64>()
                .ok()
                .filter(|n| *n > 0)
                .map(PageSize::Count)
                .ok_or_else(|| {
                    de::Error::custom(format!("pageSize must be a positive integer or \"all\", got \"{s}\""))
                }),
        }
    }
}

/// Sort direction. Anything other than `"desc"` means ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(if s == "desc" {
            SortOrder::Desc
        } else {
            SortOrder::Asc
        })
    }
}

/// Body of a paginated list request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default)]
    pub page_size: PageSize,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort_by: Option<String>,
    #[serde(default)]
    pub sort_order: SortOrder,
}

fn default_page() -> i64 {
    1
}

impl PageQuery {
    /// LIMIT/OFFSET for this query, or `None` when `pageSize` is `"all"`.
    pub fn limit_offset(&self) -> Option<(i64, i64)> {
        self.page_size.limit_offset(self.page)
    }

    /// The ILIKE pattern for the `search` term (`%term%`).
    pub fn search_pattern(&self) -> String {
        format!("%{}%", self.search)
    }
}

/// Pagination metadata returned with every paginated list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl PageMeta {
    /// Compute the meta block for a query that matched `total` rows.
    ///
    /// `pageSize = "all"` collapses to a single page whose size is the total
    /// row count; otherwise `totalPages = ceil(total / pageSize)`.
    pub fn compute(total: i64, query: &PageQuery) -> Self {
        match query.page_size {
            PageSize::All => PageMeta {
                total,
                page: 1,
                page_size: total,
                total_pages: 1,
            },
            PageSize::Count(size) => PageMeta {
                total,
                page: query.page.max(1),
                page_size: size,
                total_pages: (total + size - 1) / size,
            },
        }
    }
}

/// A page of rows plus its meta block.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: i64, query: &PageQuery) -> Self {
        Page {
            data,
            meta: PageMeta::compute(total, query),
        }
    }
}

/// Resolve a requested sort field against a whitelist of sortable columns.
///
/// Returns the matching column expression, or `fallback` when the field is
/// unknown. Sort fields come from clients and are interpolated into SQL, so
/// everything must pass through this check.
pub fn resolve_sort_column<'a>(
    sort_by: Option<&str>,
    allowed: &[(&str, &'a str)],
    fallback: &'a str,
) -> &'a str {
    sort_by
        .and_then(|field| {
            allowed
                .iter()
                .find(|(name, _)| *name == field)
                .map(|(_, column)| *column)
        })
        .unwrap_or(fallback)
}
