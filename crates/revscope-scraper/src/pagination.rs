//! Offset-based paging of a user's review history.
//!
//! The review page takes a `rec_pagestart` offset in steps of ten:
//!
//! ```text
//! /user_details_reviews_self?userid=ID                     (page 0)
//! /user_details_reviews_self?userid=ID&rec_pagestart=10    (page 1)
//! /user_details_reviews_self?userid=ID&rec_pagestart=20    (page 2)
//! ```

use revscope_core::REVIEWS_PER_PAGE;

/// Number of review pages needed to cover `total_reviews`.
#[must_use]
pub fn page_count(total_reviews: usize) -> usize {
    total_reviews.div_ceil(REVIEWS_PER_PAGE)
}

/// The `rec_pagestart` value for a 0-indexed page, or `None` for page 0,
/// which is requested without an offset.
#[must_use]
pub fn page_start_offset(page: usize) -> Option<usize> {
    (page > 0).then(|| page * REVIEWS_PER_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_reviews_needs_no_pages() {
        assert_eq!(page_count(0), 0);
    }

    #[test]
    fn partial_page_rounds_up() {
        assert_eq!(page_count(1), 1);
        assert_eq!(page_count(10), 1);
        assert_eq!(page_count(11), 2);
        assert_eq!(page_count(95), 10);
    }

    #[test]
    fn first_page_has_no_offset() {
        assert_eq!(page_start_offset(0), None);
    }

    #[test]
    fn later_pages_step_by_ten() {
        assert_eq!(page_start_offset(1), Some(10));
        assert_eq!(page_start_offset(4), Some(40));
    }
}
