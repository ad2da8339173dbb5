use std::num::NonZeroUsize;

/// Number of pages needed for `len` items; zero for an empty list.
pub fn page_count(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Items on page `page` (0-based). Out-of-range pages are empty.
pub fn page_slice<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> &[T] {
    let size = page_size.get();
    let Some(start) = page.checked_mul(size).filter(|start| *start < items.len()) else {
        return &[];
    };
    let end = (start + size).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn counts_pages() {
        assert_eq!(page_count(0, size(5)), 0);
        assert_eq!(page_count(5, size(5)), 1);
        assert_eq!(page_count(6, size(5)), 2);
        assert_eq!(page_count(15, size(7)), 3);
    }

    #[test]
    fn last_page_holds_remainder() {
        let items: Vec<u32> = (0..12).collect();
        assert_eq!(page_slice(&items, size(5), 2), &[10, 11]);
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(page_slice(&items, size(5), 1).len(), 5);
    }

    #[test]
    fn out_of_range_is_empty() {
        let items = [1, 2, 3];
        assert!(page_slice(&items, size(5), 1).is_empty());
        assert!(page_slice(&items, size(5), usize::MAX).is_empty());
        assert!(page_slice::<u8>(&[], size(5), 0).is_empty());
    }
}
