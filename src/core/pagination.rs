use crate::models::Page;

/// Default number of listings per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum number of page links shown at once
pub const PAGE_WINDOW_WIDTH: usize = 7;

/// Number of pages for `total_items` at `page_size` per page
#[inline]
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// Slice one 1-indexed page out of an ordered sequence.
///
/// Page numbers outside `1..=total_pages` give an empty page.
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);

    let page_items = if page == 0 || page > total_pages {
        Vec::new()
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_items);
        items.into_iter().skip(start).take(end - start).collect()
    };

    Page {
        items: page_items,
        page,
        page_size,
        total_items,
        total_pages,
    }
}

/// Page numbers to show around `current_page`.
///
/// Up to seven contiguous pages centred on the current one. Near the start
/// the window is pinned to page 1, near the end to the last page.
pub fn page_window(total_pages: usize, current_page: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }

    let half = PAGE_WINDOW_WIDTH / 2;
    let current = current_page.clamp(1, total_pages);

    let mut start = current.saturating_sub(half).max(1);
    let mut end = (current + half).min(total_pages);

    if current <= half + 1 {
        end = PAGE_WINDOW_WIDTH.min(total_pages);
    }
    if current + half + 1 > total_pages {
        start = (total_pages + 1).saturating_sub(PAGE_WINDOW_WIDTH).max(1);
    }

    (start..=end).collect()
}
