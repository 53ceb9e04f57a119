//! Client-side pagination of the filtered view.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self { index: 0, size: DEFAULT_PAGE_SIZE }
    }
}

impl Page {
    fn effective_size(self) -> usize {
        self.size.max(1)
    }

    /// Number of pages for `len` items. Never zero, so an empty view still
    /// has a first page to render.
    #[must_use]
    pub fn count(self, len: usize) -> usize {
        len.div_ceil(self.effective_size()).max(1)
    }

    /// Pull the index back onto the last page when the view shrinks.
    #[must_use]
    pub fn clamp(self, len: usize) -> Self {
        Self { index: self.index.min(self.count(len) - 1), ..self }
    }

    #[must_use]
    pub fn slice<T>(self, items: &[T]) -> &[T] {
        let page = self.clamp(items.len());
        let size = page.effective_size();
        let start = (page.index * size).min(items.len());
        let end = (start + size).min(items.len());
        &items[start..end]
    }

    /// Footer text such as `11-20 of 42`.
    #[must_use]
    pub fn range_label(self, len: usize) -> String {
        if len == 0 {
            return "0 of 0".to_owned();
        }
        let page = self.clamp(len);
        let size = page.effective_size();
        let start = page.index * size + 1;
        let end = (page.index * size + size).min(len);
        format!("{start}-{end} of {len}")
    }
}
