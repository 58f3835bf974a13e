//! Page-number pagination over an in-memory sequence.
//!
//! The board filters the full job set in memory and slices the result into
//! fixed-size pages. Pages are 1-based. Requesting a page past the end is a
//! valid query that yields an empty slice rather than an error, so the page
//! layer can disable its controls instead of handling failures.

use serde::Serialize;

// ============================================================================
// PageInfo
// ============================================================================

/// Metadata describing one page of a filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The 1-based page that was served (after clamping).
    pub current_page: u32,
    /// `ceil(total_count / page_size)`; 0 when nothing matched.
    pub total_pages: u32,
    /// Number of items across all pages.
    pub total_count: usize,
}

impl PageInfo {
    /// Page info for an empty result set.
    ///
    /// The current page is still reported (minimum displayable is page 1)
    /// even though there are zero pages of content.
    pub fn empty(current_page: u32) -> Self {
        PageInfo {
            current_page: normalize_page(current_page),
            total_pages: 0,
            total_count: 0,
        }
    }
}

// ============================================================================
// Page math
// ============================================================================

/// Clamp a requested page to the displayable minimum of 1.
pub fn normalize_page(page: u32) -> u32 {
    page.max(1)
}

/// Number of pages needed for `count` items at `page_size` per page.
///
/// Zero items means zero pages. `page_size` must be non-zero; the caller
/// owns that policy constant.
pub fn total_pages(count: usize, page_size: usize) -> u32 {
    count.div_ceil(page_size) as u32
}

/// Index range `[(page - 1) * page_size, page * page_size)` clamped to
/// `count`, so the range is always a valid slice of the sequence.
pub fn page_bounds(page: u32, page_size: usize, count: usize) -> std::ops::Range<usize> {
    let page = normalize_page(page) as usize;
    let start = (page - 1).saturating_mul(page_size).min(count);
    let end = page.saturating_mul(page_size).min(count);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_page_clamps_zero() {
        assert_eq!(normalize_page(0), 1);
        assert_eq!(normalize_page(1), 1);
        assert_eq!(normalize_page(7), 7);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(1, 6), 1);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(14, 6), 3);
    }

    #[test]
    fn test_page_bounds_full_and_partial_pages() {
        assert_eq!(page_bounds(1, 6, 14), 0..6);
        assert_eq!(page_bounds(2, 6, 14), 6..12);
        assert_eq!(page_bounds(3, 6, 14), 12..14);
    }

    #[test]
    fn test_page_bounds_past_the_end_is_empty() {
        let range = page_bounds(4, 6, 14);
        assert!(range.is_empty());
        assert_eq!(range, 14..14);
    }

    #[test]
    fn test_page_bounds_clamps_page_zero() {
        assert_eq!(page_bounds(0, 6, 14), 0..6);
    }

    #[test]
    fn test_page_bounds_empty_sequence() {
        assert!(page_bounds(1, 6, 0).is_empty());
        assert!(page_bounds(3, 6, 0).is_empty());
    }

    #[test]
    fn test_empty_page_info_reports_requested_page() {
        let info = PageInfo::empty(5);
        assert_eq!(info.current_page, 5);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.total_count, 0);
    }
}
