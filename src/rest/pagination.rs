//! Page slicing and page-count arithmetic.

/// One page of results plus the metadata needed for the list envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
}

impl<T> Pagination<T> {
    /// Slice an in-memory collection.
    ///
    /// An out-of-range page yields an empty item list; the total still counts
    /// the whole collection.
    pub fn from_items(items: Vec<T>, page: u64, per_page: u64) -> Self {
        let total = items.len() as u64;
        let offset = offset(page, per_page).min(total);
        let limit = offset.saturating_add(per_page).min(total);
        let items = items
            .into_iter()
            .skip(offset as usize)
            .take((limit - offset) as usize)
            .collect();

        Self {
            items,
            total,
            page,
            per_page,
        }
    }

    /// Wrap a page that was already fetched with skip/limit.
    pub fn from_page(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        Self {
            items,
            total,
            page,
            per_page,
        }
    }

    /// Number of pages, or 0 when the page size is 0.
    pub fn pages(&self) -> u64 {
        if self.per_page == 0 {
            0
        } else {
            self.total.div_ceil(self.per_page)
        }
    }
}

/// Number of items before `page`.
pub fn offset(page: u64, per_page: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(per_page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let p = Pagination::from_items((1..=10).collect::<Vec<u32>>(), 1, 4);
        assert_eq!(p.items, vec![1, 2, 3, 4]);
        assert_eq!(p.total, 10);
        assert_eq!(p.pages(), 3);
    }

    #[test]
    fn test_last_partial_page() {
        let p = Pagination::from_items((1..=10).collect::<Vec<u32>>(), 3, 4);
        assert_eq!(p.items, vec![9, 10]);
    }

    #[test]
    fn test_out_of_range_page_is_empty() {
        let p = Pagination::from_items(vec!["a", "b", "c"], 100, 25);
        assert!(p.items.is_empty());
        assert_eq!(p.total, 3);
        assert_eq!(p.page, 100);
    }

    #[test]
    fn test_zero_page_size() {
        let p = Pagination::from_items(vec![1, 2, 3], 1, 0);
        assert!(p.items.is_empty());
        assert_eq!(p.pages(), 0);
    }

    #[test]
    fn test_page_count_rounds_up() {
        assert_eq!(Pagination::<u8>::from_page(vec![], 0, 1, 25).pages(), 0);
        assert_eq!(Pagination::<u8>::from_page(vec![], 25, 1, 25).pages(), 1);
        assert_eq!(Pagination::<u8>::from_page(vec![], 26, 1, 25).pages(), 2);
    }

    #[test]
    fn test_slice_never_exceeds_bounds() {
        for total in 0..12u64 {
            for per_page in 0..6u64 {
                for page in 1..6u64 {
                    let items: Vec<u64> = (0..total).collect();
                    let p = Pagination::from_items(items, page, per_page);
                    let remaining = total.saturating_sub(offset(page, per_page));
                    assert!(p.items.len() as u64 <= per_page);
                    assert!(p.items.len() as u64 <= remaining);
                    let expected_pages = if per_page == 0 {
                        0
                    } else {
                        (total + per_page - 1) / per_page
                    };
                    assert_eq!(p.pages(), expected_pages);
                }
            }
        }
    }

    #[test]
    fn test_offset() {
        assert_eq!(offset(1, 25), 0);
        assert_eq!(offset(3, 10), 20);
    }
}
