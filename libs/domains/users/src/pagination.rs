use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 10;
/// Upper bound on page size
pub const MAX_LIMIT: usize = 100;

/// Raw `page`/`limit` query parameters.
///
/// Each parameter is parsed on its own: an empty or non-numeric value is
/// treated as absent without affecting the other. Values below 1 fall back
/// to the defaults; `limit` is capped at [`MAX_LIMIT`].
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number, starting at 1
    #[serde(default, deserialize_with = "lenient_number")]
    pub page: Option<i64>,
    /// Items per page (1-100)
    #[serde(default, deserialize_with = "lenient_number")]
    pub limit: Option<i64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

impl PageParams {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Effective `(page, limit)` after defaults and clamping.
    pub fn resolve(&self) -> (usize, usize) {
        let page = self
            .page
            .and_then(|p| usize::try_from(p).ok())
            .filter(|&p| p >= 1)
            .unwrap_or(DEFAULT_PAGE);

        let limit = self
            .limit
            .and_then(|l| usize::try_from(l).ok())
            .filter(|&l| l >= 1)
            .map_or(DEFAULT_LIMIT, |l| l.min(MAX_LIMIT));

        (page, limit)
    }
}

/// Pagination metadata returned alongside a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    #[schema(example = 1)]
    pub page: usize,
    #[schema(example = 10)]
    pub limit: usize,
    #[schema(example = 100)]
    pub total: usize,
    #[schema(example = 10)]
    pub total_pages: usize,
    #[schema(example = true)]
    pub has_more: bool,
}

/// One page of items plus its metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}

/// Slice `items` into the requested page.
///
/// A page past the end is empty rather than an error.
pub fn paginate<T>(items: Vec<T>, params: PageParams) -> Page<T> {
    let (page, limit) = params.resolve();
    let total = items.len();
    let total_pages = total.div_ceil(limit);
    let start = (page - 1).saturating_mul(limit);

    if start >= total {
        return Page {
            items: Vec::new(),
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages,
                has_more: false,
            },
        };
    }

    let end = start.saturating_add(limit).min(total);

    Page {
        items: items.into_iter().skip(start).take(end - start).collect(),
        pagination: Pagination {
            page,
            limit,
            total,
            total_pages,
            has_more: end < total,
        },
    }
}
