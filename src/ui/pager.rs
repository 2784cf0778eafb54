//! Paged collection view.
//!
//! Splits a fixed record list into pages whose size depends on the layout:
//! 3 per page on compact viewports, 6 otherwise. Navigation never wraps; the
//! prev/next controls are disabled at the ends instead.
//!
//! ## Page-Size Changes
//!
//! When the page size changes the current page is recomputed so that the
//! record at the top of the old page stays visible, then clamped into
//! `[0, total_pages)`. Going from page 3 at size 3 (records 10–12) to size 6
//! lands on page 1 (records 7–12).

use super::viewport::LayoutClass;
use serde::{Deserialize, Serialize};

/// Page sizes per layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageSizes {
    pub compact: usize,
    pub wide: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            compact: 3,
            wide: 6,
        }
    }
}

impl PageSizes {
    pub fn for_layout(&self, class: LayoutClass) -> usize {
        if class.is_compact() {
            self.compact
        } else {
            self.wide
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    len: usize,
    page_size: usize,
    current: usize,
    // Reserved for page-transition animation; nothing sets it yet.
    animating: bool,
}

impl Pager {
    /// A zero page size is treated as 1.
    pub fn new(len: usize, page_size: usize) -> Self {
        Self {
            len,
            page_size: page_size.max(1),
            current: 0,
            animating: false,
        }
    }

    /// `ceil(len / page_size)`; zero for an empty list.
    pub fn total_pages(&self) -> usize {
        self.len.div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Jump to `page`. Out-of-range targets are ignored. Returns `true` if the
    /// page changed.
    pub fn go_to_page(&mut self, page: isize) -> bool {
        if self.animating || page < 0 {
            return false;
        }
        let page = page as usize;
        if page >= self.total_pages() || page == self.current {
            return false;
        }
        self.current = page;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        self.go_to_page(self.current as isize - 1)
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.current as isize + 1)
    }

    pub fn has_prev(&self) -> bool {
        self.current > 0
    }

    pub fn has_next(&self) -> bool {
        self.current + 1 < self.total_pages()
    }

    /// Change the page size, keeping the first visible record on screen.
    pub fn set_page_size(&mut self, page_size: usize) {
        let page_size = page_size.max(1);
        if page_size == self.page_size {
            return;
        }
        let first_visible = self.current * self.page_size;
        self.page_size = page_size;
        self.current = (first_visible / page_size).min(self.total_pages().saturating_sub(1));
    }

    /// Index range of the current page.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.page_range(self.current)
    }

    /// Index range of an arbitrary page, clipped to the list.
    pub fn page_range(&self, page: usize) -> std::ops::Range<usize> {
        let start = (page * self.page_size).min(self.len);
        let end = (start + self.page_size).min(self.len);
        start..end
    }

    /// The records on the current page, in list order.
    ///
    /// `records` must be the list this pager was built for.
    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        debug_assert_eq!(records.len(), self.len, "pager built for a different list");
        &records[self.range()]
    }
}
