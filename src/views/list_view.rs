use std::cmp::Ordering;
use std::num::NonZeroUsize;

use super::pagination::{page_count, page_slice};

/// Filter and ordering for one kind of list.
pub trait Criteria<T> {
    fn matches(&self, item: &T) -> bool;

    /// `None` keeps fetch order.
    fn compare(&self, _a: &T, _b: &T) -> Option<Ordering> {
        None
    }
}

/// A fetched list with its criteria and current page.
///
/// The filtered set is recomputed eagerly on every change, and any change to
/// the items or the criteria returns to the first page.
#[derive(Debug, Clone)]
pub struct ListView<T, C> {
    items: Vec<T>,
    criteria: C,
    filtered: Vec<T>,
    page_size: NonZeroUsize,
    page: usize,
}

impl<T: Clone, C: Criteria<T>> ListView<T, C> {
    pub fn new(items: Vec<T>, criteria: C, page_size: NonZeroUsize) -> Self {
        let mut view = Self {
            items,
            criteria,
            filtered: Vec::new(),
            page_size,
            page: 0,
        };
        view.refilter();
        view
    }

    fn refilter(&mut self) {
        let mut filtered: Vec<T> = self
            .items
            .iter()
            .filter(|item| self.criteria.matches(item))
            .cloned()
            .collect();
        let criteria = &self.criteria;
        filtered.sort_by(|a, b| criteria.compare(a, b).unwrap_or(Ordering::Equal));
        self.filtered = filtered;
        self.page = 0;
    }

    /// Replaces the whole set, as after a refetch.
    pub fn replace_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.refilter();
    }

    pub fn update_criteria(&mut self, update: impl FnOnce(&mut C)) {
        update(&mut self.criteria);
        self.refilter();
    }

    /// Edits every item matching `select` in place. Returns how many changed.
    pub fn patch(&mut self, select: impl Fn(&T) -> bool, mut edit: impl FnMut(&mut T)) -> usize {
        let mut changed = 0;
        for item in self.items.iter_mut().filter(|item| select(item)) {
            edit(item);
            changed += 1;
        }
        self.refilter();
        changed
    }

    /// Moves to `page`, clamped to the last page.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.min(self.page_count().saturating_sub(1));
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.page_size = page_size;
        self.page = 0;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn criteria(&self) -> &C {
        &self.criteria
    }

    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    pub fn current_page(&self) -> &[T] {
        page_slice(&self.filtered, self.page_size, self.page)
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
    }

    pub fn page_count(&self) -> usize {
        page_count(self.filtered.len(), self.page_size)
    }
}
