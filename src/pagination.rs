//! Page-number pagination for list endpoints.
//!
//! Query parameters: `page` (1-based, default 1) and `page_size` (default 10,
//! capped at 100). Responses are wrapped in an envelope carrying the total
//! `count` and relative `next`/`previous` links. Requesting a page past the
//! end is a 404, not an empty page; an empty first page is still valid.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    pub fn limit(&self) -> i64 {
        self.page_size() as i64
    }

    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.limit()
    }
}

/// The pagination envelope around a page of results.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: T,
}

impl<T> Page<T> {
    /// Builds the envelope for the current page, deriving the `next` and
    /// `previous` links from the request path and the total row count.
    ///
    /// Fails with `NotFound` when the requested page lies beyond the last
    /// page of the result set.
    pub fn paginate(path: &str, query: &PageQuery, count: i64, results: T) -> Result<Self, AppError> {
        let page = query.page();
        let size = query.page_size();
        let total_pages = ((count + size as i64 - 1) / size as i64).max(1) as u32;

        if page > total_pages {
            return Err(AppError::NotFound("invalid page".into()));
        }

        let link = |p: u32| format!("{}?page={}&page_size={}", path, p, size);
        let next = (page < total_pages).then(|| link(page + 1));
        let previous = (page > 1).then(|| link(page - 1));

        Ok(Page {
            count,
            next,
            previous,
            results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn query(page: Option<u32>, page_size: Option<u32>) -> PageQuery {
        PageQuery { page, page_size }
    }

    #[test]
    fn test_defaults_and_caps() {
        let q = query(None, None);
        assert_eq!(q.page(), 1);
        assert_eq!(q.page_size(), 10);
        assert_eq!(q.offset(), 0);

        let q = query(Some(0), Some(1000));
        assert_eq!(q.page(), 1);
        assert_eq!(q.page_size(), 100);

        let q = query(Some(3), Some(25));
        assert_eq!(q.limit(), 25);
        assert_eq!(q.offset(), 50);
    }

    #[test]
    fn test_single_page_has_no_links() {
        let page = Page::paginate("/users/1/tasks/", &query(None, None), 4, ()).unwrap();
        assert_eq!(page.count, 4);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
    }

    #[test]
    fn test_middle_page_links() {
        let page = Page::paginate("/users/1/tasks/", &query(Some(2), Some(10)), 25, ()).unwrap();
        assert_eq!(
            page.next.as_deref(),
            Some("/users/1/tasks/?page=3&page_size=10")
        );
        assert_eq!(
            page.previous.as_deref(),
            Some("/users/1/tasks/?page=1&page_size=10")
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let page = Page::paginate("/users/1/tasks/", &query(Some(3), Some(10)), 25, ()).unwrap();
        assert_eq!(page.next, None);
        assert_eq!(
            page.previous.as_deref(),
            Some("/users/1/tasks/?page=2&page_size=10")
        );
    }

    #[test]
    fn test_empty_first_page_is_valid() {
        let page = Page::paginate("/users/9/tasks/", &query(None, None), 0, ()).unwrap();
        assert_eq!(page.count, 0);
        assert_eq!(page.next, None);
        assert_eq!(page.previous, None);
    }

    #[test]
    fn test_page_past_the_end_is_not_found() {
        match Page::paginate("/users/1/tasks/", &query(Some(4), Some(10)), 25, ()) {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "invalid page"),
            other => panic!("expected NotFound, got {:?}", other.map(|p| p.count)),
        }

        // An empty result set only has page 1.
        assert!(Page::paginate("/users/9/tasks/", &query(Some(2), None), 0, ()).is_err());
    }
}
