//! Pagination row: renders page buttons from the bounds the controller
//! provides and maps a pressed button to a page-change intent. No page
//! math happens here beyond those bounds.

use user_admin_core::PaginationState;

use super::Intent;

/// Render the page buttons; the current page is bracketed. Nothing is
/// rendered when everything fits on one page.
pub fn render_pagination(pagination: &PaginationState, loading: bool) -> String {
    if pagination.total_pages <= 1 {
        return String::new();
    }
    let buttons = (1..=pagination.total_pages)
        .map(|page| {
            if page == pagination.page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    if loading {
        format!("Page: {buttons} (loading…)")
    } else {
        format!("Page: {buttons}")
    }
}

/// Map a pressed page button to its intent. Buttons are disabled while a
/// load is in flight; the current page and anything outside the rendered
/// bounds emit nothing.
pub fn select_page(pagination: &PaginationState, target: u32, loading: bool) -> Option<Intent> {
    if loading || target == pagination.page {
        return None;
    }
    if target < 1 || target > pagination.total_pages {
        return None;
    }
    Some(Intent::ChangePage(target))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination(page: u32, total_pages: u32) -> PaginationState {
        PaginationState {
            page,
            limit: 10,
            total: u64::from(total_pages) * 10,
            total_pages,
        }
    }

    #[test]
    fn single_page_renders_nothing() {
        assert_eq!(render_pagination(&pagination(1, 1), false), "");
        assert_eq!(render_pagination(&pagination(1, 0), false), "");
    }

    #[test]
    fn current_page_is_bracketed() {
        assert_eq!(render_pagination(&pagination(2, 3), false), "Page: 1 [2] 3");
    }

    #[test]
    fn loading_row_is_marked_disabled() {
        assert!(render_pagination(&pagination(2, 3), true).contains("(loading…)"));
    }

    #[test]
    fn select_page_emits_change_page_within_bounds() {
        assert_eq!(
            select_page(&pagination(1, 3), 3, false),
            Some(Intent::ChangePage(3))
        );
    }

    #[test]
    fn select_page_ignores_current_out_of_bounds_and_loading() {
        let p = pagination(2, 3);
        assert_eq!(select_page(&p, 2, false), None);
        assert_eq!(select_page(&p, 0, false), None);
        assert_eq!(select_page(&p, 4, false), None);
        assert_eq!(select_page(&p, 1, true), None);
    }
}
