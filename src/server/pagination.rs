use std::convert::Infallible;

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::Deserialize;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// 1-based page number from the `page` query parameter. Absent or non-numeric
/// values fall back to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(pub i64);

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

#[derive(Deserialize)]
struct PageParams {
    page: Option<String>,
}

impl<S> FromRequestParts<S> for Page
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let page = Query::<PageParams>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(params)| params.page)
            .and_then(|page| page.trim().parse().ok())
            .map(Page)
            .unwrap_or_default();
        Ok(page)
    }
}

/// Slice of `records` shown on `page`. Pages before the first or past the last are
/// empty.
pub fn paginate<T>(page: Page, records: Vec<T>) -> Vec<T> {
    let Some(index) = page.0.checked_sub(1).and_then(|i| usize::try_from(i).ok()) else {
        return Vec::new();
    };
    let Some(start) = index.checked_mul(QUESTIONS_PER_PAGE) else {
        return Vec::new();
    };
    records
        .into_iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .collect()
}
