// src/api/pagination.rs
//! Cursor pagination over list endpoints.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::error::AppError;
use serde::Deserialize;

/// One page of a list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedResponse<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Follows `next_cursor` until the endpoint reports no more results.
pub async fn fetch_all_pages<T, F, Fut>(mut fetch_fn: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(usize, Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut all_items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;

    loop {
        let response = fetch_fn(NOTION_API_PAGE_SIZE, cursor).await?;
        pages_fetched += 1;

        all_items.extend(response.results);
        cursor = response.next_cursor;

        if !response.has_more || cursor.is_none() {
            break;
        }
    }

    log::debug!(
        "Collected {} items over {} cursor pages",
        all_items.len(),
        pages_fetched
    );
    Ok(all_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn follows_cursors_until_exhausted() {
        let items = fetch_all_pages(|page_size, cursor| async move {
            assert_eq!(page_size, NOTION_API_PAGE_SIZE);
            Ok(match cursor.as_deref() {
                None => PaginatedResponse {
                    results: vec![1, 2],
                    next_cursor: Some("c1".into()),
                    has_more: true,
                },
                Some("c1") => PaginatedResponse {
                    results: vec![3],
                    next_cursor: None,
                    has_more: false,
                },
                Some(other) => panic!("unexpected cursor {}", other),
            })
        })
        .await
        .unwrap();

        assert_eq!(items, vec![1, 2, 3]);
    }
}
