// src/pagination.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PAGE_WINDOW_SIBLINGS};

/// One entry of the page-number strip under a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageItem {
    Page { number: u32 },
    Ellipsis,
}

/// Pagination metadata returned next to a page of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageMeta {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub window: Vec<PageItem>,
}

/// Builds the page strip: first and last page, `siblings` pages around
/// `current`, and an ellipsis for every collapsed gap wider than one page.
pub fn page_window(current: u32, total_pages: u32, siblings: u32) -> Vec<PageItem> {
    if total_pages == 0 {
        return Vec::new();
    }

    let current = current.clamp(1, total_pages);
    let start = current.saturating_sub(siblings).max(1);
    let end = current.saturating_add(siblings).min(total_pages);

    let mut items = Vec::new();

    if start > 1 {
        items.push(PageItem::Page { number: 1 });
        match start {
            2 => {}
            3 => items.push(PageItem::Page { number: 2 }),
            _ => items.push(PageItem::Ellipsis),
        }
    }

    items.extend((start..=end).map(|number| PageItem::Page { number }));

    if end < total_pages {
        match total_pages - end {
            1 => {}
            2 => items.push(PageItem::Page { number: total_pages - 1 }),
            _ => items.push(PageItem::Ellipsis),
        }
        items.push(PageItem::Page { number: total_pages });
    }

    items
}

/// Slices out one 1-based page of `items`.
pub fn paginate<T>(items: &[T], page: Option<usize>, page_size: Option<usize>) -> (&[T], PageMeta) {
    let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let page = page.unwrap_or(1).max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size).min(total_items);
    let end = start.saturating_add(page_size).min(total_items);

    let window = page_window(
        u32::try_from(page).unwrap_or(u32::MAX),
        u32::try_from(total_pages).unwrap_or(u32::MAX),
        PAGE_WINDOW_SIBLINGS,
    );

    (
        &items[start..end],
        PageMeta {
            page,
            page_size,
            total_items,
            total_pages,
            window,
        },
    )
}
