//! Page requests and the pages returned for them.

use serde::{Deserialize, Serialize};

/// Default number of items on a page when the caller does not say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Column a paged client listing can be ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    Name,
    Cpf,
    Income,
    BirthDate,
    Children,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: Direction,
}

/// Zero-based page index plus page size and optional ordering.
///
/// Rows are always tie-broken by ascending id so that consecutive pages never
/// overlap or skip records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Option<Sort>,
}

impl PageRequest {
    /// Requests page `page` (zero-based) holding at most `size` items.
    ///
    /// A zero size is treated as one.
    pub fn of(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: None,
        }
    }

    pub fn sorted_by(mut self, field: SortField, direction: Direction) -> Self {
        self.sort = Some(Sort { field, direction });
        self
    }

    pub fn offset(&self) -> i64 {
        (self.page.saturating_mul(self.size)).min(i64::MAX as usize) as i64
    }

    pub fn limit(&self) -> i64 {
        self.size.min(i64::MAX as usize) as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::of(0, DEFAULT_PAGE_SIZE)
    }
}

/// A slice of an ordered result set plus the metadata to navigate the rest.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub number: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: usize) -> Self {
        Self {
            content,
            number: request.page,
            size: request.size,
            total_elements,
            total_pages: total_elements.div_ceil(request.size),
        }
    }

    /// Converts every item while keeping the paging metadata untouched.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            number: self.number,
            size: self.size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_first(&self) -> bool {
        self.number == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_size_is_clamped() {
        let request = PageRequest::of(3, 0);
        assert_eq!(request.size, 1);
        assert_eq!(request.offset(), 3);
        assert_eq!(request.limit(), 1);
    }

    #[test]
    fn total_pages_rounds_up() {
        let page = Page::new(vec![1, 2, 3, 4, 5, 6], &PageRequest::of(0, 6), 12);
        assert_eq!(page.total_pages, 2);
        assert!(page.is_first());
        assert!(page.has_next());

        let last = Page::new(vec![1], &PageRequest::of(2, 5), 11);
        assert_eq!(last.total_pages, 3);
        assert!(last.is_last());
    }

    #[test]
    fn empty_result_has_no_pages() {
        let page: Page<i32> = Page::new(vec![], &PageRequest::of(0, 10), 0);
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
        assert!(page.is_last());
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page::new(vec![1, 2], &PageRequest::of(1, 2), 5);
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.content, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.number, 1);
        assert_eq!(mapped.size, 2);
        assert_eq!(mapped.total_elements, 5);
        assert_eq!(mapped.total_pages, 3);
    }

    #[test]
    fn sorted_by_sets_order() {
        let request = PageRequest::of(0, 5).sorted_by(SortField::Income, Direction::Desc);
        assert_eq!(
            request.sort,
            Some(Sort {
                field: SortField::Income,
                direction: Direction::Desc,
            })
        );
    }
}
