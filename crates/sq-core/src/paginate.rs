//! # Paginator
//!
//! Offset pagination over the filtered, sorted collection. Invalid inputs are
//! corrected, never rejected.

use crate::options::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};

/// Page metadata, computed against the post-filter, pre-pagination set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
}

/// Slice `items` to the requested page.
///
/// `page < 1` becomes 1 and `page_size <= 0` becomes the default of 10. A
/// start past the end yields an empty page.
pub fn paginate<T>(items: &[T], page: i64, page_size: i64) -> (&[T], PageMeta) {
    let page = usize::try_from(if page >= 1 { page } else { DEFAULT_PAGE }).unwrap_or(usize::MAX);
    let page_size = usize::try_from(if page_size >= 1 {
        page_size
    } else {
        DEFAULT_PAGE_SIZE
    })
    .unwrap_or(usize::MAX);

    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size).max(1);

    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    (
        &items[start..end],
        PageMeta {
            total_items,
            total_pages,
            current_page: page,
            page_size,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_partial_page() {
        let items: Vec<u32> = (0..23).collect();
        let (page, meta) = paginate(&items, 3, 10);
        assert_eq!(page, &[20, 21, 22]);
        assert_eq!(
            meta,
            PageMeta {
                total_items: 23,
                total_pages: 3,
                current_page: 3,
                page_size: 10
            }
        );
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let items: Vec<u32> = (0..23).collect();
        let (page, meta) = paginate(&items, 4, 10);
        assert!(page.is_empty());
        assert_eq!(meta.total_pages, 3);
        assert_eq!(meta.current_page, 4);
    }

    #[test]
    fn test_invalid_inputs_are_corrected() {
        let items: Vec<u32> = (0..15).collect();
        let (page, meta) = paginate(&items, 0, -5);
        assert_eq!(page.len(), 10);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.page_size, 10);
        assert_eq!(meta.total_pages, 2);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let items: Vec<u32> = Vec::new();
        let (page, meta) = paginate(&items, 1, 10);
        assert!(page.is_empty());
        assert_eq!(meta.total_items, 0);
        assert_eq!(meta.total_pages, 1);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let items: Vec<u32> = (0..5).collect();
        let (page, meta) = paginate(&items, i64::MAX, i64::MAX);
        assert!(page.is_empty());
        assert_eq!(meta.total_pages, 1);
    }
}
