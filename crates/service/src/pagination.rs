//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct to normalize list inputs, and
//! [`page_window`], which picks the page-number buttons (with ellipsis
//! placeholders) a pagination control should render.

use serde::{Deserialize, Serialize};

/// Button budget used when the caller does not pick one.
pub const DEFAULT_MAX_BUTTONS: u32 = 5;
const MIN_BUTTONS: u32 = 3;
/// Largest budget [`page_window`] honours; bigger requests are lowered to it.
pub const MAX_BUTTONS_CAP: u32 = 101;
const MAX_PER_PAGE: u32 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        ((page - 1) as u64, per_page as u64)
    }

    /// Number of pages needed to show `total_items`.
    pub fn total_pages(self, total_items: u64) -> u32 {
        let (_, per_page) = self.normalize();
        let pages = total_items.div_ceil(per_page);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Current page clamped to `1..=total_pages` (1 when there are no pages).
    pub fn clamp_page(self, total_pages: u32) -> u32 {
        self.page.clamp(1, total_pages.max(1))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

/// One rendered unit of a pagination control.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageEntry {
    Page { number: u32 },
    Ellipsis,
}

impl PageEntry {
    pub fn page(number: u32) -> Self { PageEntry::Page { number } }

    pub fn number(&self) -> Option<u32> {
        match self {
            PageEntry::Page { number } => Some(*number),
            PageEntry::Ellipsis => None,
        }
    }
}

/// Compute the entries of a compact pagination control.
///
/// Pages `1` and `total_pages` are always present. Between them sits a run of
/// `max_buttons - 2` pages around `current_page`; when that run would cross
/// either end it is shifted inward, keeping its width. Even widths lean left.
/// Ellipses mark every omitted stretch, and `max_buttons` bounds the number of
/// page entries only.
///
/// Out-of-range input is tolerated: `current_page` is clamped into
/// `1..=total_pages` and the budget is clamped into `3..=MAX_BUTTONS_CAP`.
pub fn page_window(current_page: u32, total_pages: u32, max_buttons: u32) -> Vec<PageEntry> {
    if total_pages == 0 {
        return Vec::new();
    }
    let max_buttons = max_buttons.clamp(MIN_BUTTONS, MAX_BUTTONS_CAP);
    if total_pages <= max_buttons {
        return (1..=total_pages).map(PageEntry::page).collect();
    }

    let current = current_page.clamp(1, total_pages);
    let width = max_buttons - 2;
    let half = width / 2;
    // total_pages > max_buttons, so the upper bound is always >= 1
    let start = current
        .saturating_sub(half)
        .max(1)
        .min(total_pages - width + 1);
    let end = start + width - 1;

    // the run may touch page 1 or the last page; those are emitted separately
    let first = start.max(2);
    let last = end.min(total_pages - 1);

    let mut entries = Vec::with_capacity(max_buttons as usize + 2);
    entries.push(PageEntry::page(1));
    if first > last {
        entries.push(PageEntry::Ellipsis);
    } else {
        if first > 2 {
            entries.push(PageEntry::Ellipsis);
        }
        entries.extend((first..=last).map(PageEntry::page));
        if last < total_pages - 1 {
            entries.push(PageEntry::Ellipsis);
        }
    }
    entries.push(PageEntry::page(total_pages));
    entries
}

#[cfg(test)]
mod tests {
    use super::{page_window, PageEntry, Pagination, DEFAULT_MAX_BUTTONS, MAX_BUTTONS_CAP};

    const E: PageEntry = PageEntry::Ellipsis;

    fn p(n: u32) -> PageEntry { PageEntry::page(n) }

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination { page: 1, per_page: 20 };
        assert_eq!(p.total_pages(0), 0);
        assert_eq!(p.total_pages(20), 1);
        assert_eq!(p.total_pages(21), 2);
        assert_eq!(Pagination { page: 1, per_page: 0 }.total_pages(3), 3);
    }

    #[test]
    fn clamp_page_stays_in_range() {
        assert_eq!(Pagination { page: 0, per_page: 20 }.clamp_page(7), 1);
        assert_eq!(Pagination { page: 9, per_page: 20 }.clamp_page(7), 7);
        assert_eq!(Pagination { page: 4, per_page: 20 }.clamp_page(7), 4);
        assert_eq!(Pagination { page: 4, per_page: 20 }.clamp_page(0), 1);
    }

    #[test]
    fn centered_on_current_page() {
        assert_eq!(page_window(10, 20, 5), vec![p(1), E, p(9), p(10), p(11), E, p(20)]);
    }

    #[test]
    fn first_page_shifts_run_to_interior_start() {
        assert_eq!(page_window(1, 20, 5), vec![p(1), p(2), p(3), E, p(20)]);
    }

    #[test]
    fn last_page_shifts_run_to_interior_end() {
        assert_eq!(page_window(20, 20, 5), vec![p(1), E, p(18), p(19), p(20)]);
    }

    #[test]
    fn few_pages_are_all_shown() {
        assert_eq!(page_window(2, 3, 5), vec![p(1), p(2), p(3)]);
        assert_eq!(page_window(5, 5, 5), vec![p(1), p(2), p(3), p(4), p(5)]);
    }

    #[test]
    fn no_pages_no_entries() {
        assert!(page_window(1, 0, 5).is_empty());
        assert!(page_window(0, 0, 0).is_empty());
    }

    #[test]
    fn run_touching_second_page_shows_it_literally() {
        assert_eq!(page_window(3, 20, 5), vec![p(1), p(2), p(3), p(4), E, p(20)]);
        assert_eq!(page_window(18, 20, 5), vec![p(1), E, p(17), p(18), p(19), p(20)]);
    }

    #[test]
    fn single_omitted_page_still_gets_ellipsis() {
        assert_eq!(page_window(4, 20, 5), vec![p(1), E, p(3), p(4), p(5), E, p(20)]);
    }

    #[test]
    fn even_budget_leans_left() {
        assert_eq!(page_window(10, 20, 6), vec![p(1), E, p(8), p(9), p(10), p(11), E, p(20)]);
    }

    #[test]
    fn minimum_budget_at_edge_collapses_run() {
        assert_eq!(page_window(1, 10, 3), vec![p(1), E, p(10)]);
        assert_eq!(page_window(5, 10, 3), vec![p(1), E, p(5), E, p(10)]);
    }

    #[test]
    fn out_of_range_inputs_are_tolerated() {
        assert_eq!(page_window(0, 20, 5), page_window(1, 20, 5));
        assert_eq!(page_window(99, 20, 5), page_window(20, 20, 5));
        assert_eq!(page_window(10, 20, 1), page_window(10, 20, 3));
    }

    #[test]
    fn huge_budget_is_capped() {
        let entries = page_window(1, u32::MAX, u32::MAX - 1);
        assert_eq!(entries.len(), 101);
        assert_eq!(entries.first(), Some(&p(1)));
        assert_eq!(entries.last(), Some(&p(u32::MAX)));

        let entries = page_window(u32::MAX / 2, u32::MAX, u32::MAX - 1);
        let numbers: Vec<u32> = entries.iter().filter_map(PageEntry::number).collect();
        assert_eq!(numbers.len() as u32, MAX_BUTTONS_CAP);
        assert_eq!(entries.len() as u32, MAX_BUTTONS_CAP + 2);
        assert_eq!(page_window(7, 1_000, u32::MAX), page_window(7, 1_000, MAX_BUTTONS_CAP));
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(page_window(1, 20, DEFAULT_MAX_BUTTONS)).unwrap();
        assert_eq!(json[0], serde_json::json!({"kind": "page", "number": 1}));
        assert_eq!(json[3], serde_json::json!({"kind": "ellipsis"}));
    }

    #[test]
    fn window_properties_hold_for_all_small_inputs() {
        for max_buttons in 3..=9u32 {
            for total in 0..=60u32 {
                for current in 1..=total.max(1) {
                    let entries = page_window(current, total, max_buttons);
                    let ctx = format!("current={current} total={total} max={max_buttons}");

                    if total == 0 {
                        assert!(entries.is_empty(), "{ctx}");
                        continue;
                    }
                    if total <= max_buttons {
                        let want: Vec<_> = (1..=total).map(p).collect();
                        assert_eq!(entries, want, "{ctx}");
                        continue;
                    }

                    let numbers: Vec<u32> = entries.iter().filter_map(PageEntry::number).collect();
                    assert!(numbers.len() as u32 <= max_buttons, "{ctx}");
                    assert_eq!(entries.first(), Some(&p(1)), "{ctx}");
                    assert_eq!(entries.last(), Some(&p(total)), "{ctx}");
                    assert!(numbers.windows(2).all(|w| w[0] < w[1]), "{ctx}");
                    assert!(numbers.contains(&current), "{ctx}");

                    for (i, entry) in entries.iter().enumerate() {
                        if *entry != E {
                            continue;
                        }
                        let before = entries[i - 1].number().expect("ellipsis follows a page");
                        let after = entries[i + 1].number().expect("ellipsis precedes a page");
                        assert!(after - before > 1, "{ctx}");
                    }
                    // consecutive pages without an ellipsis must be adjacent numbers
                    for w in entries.windows(2) {
                        if let (Some(a), Some(b)) = (w[0].number(), w[1].number()) {
                            assert_eq!(b, a + 1, "{ctx}");
                        }
                    }
                    assert_eq!(entries, page_window(current, total, max_buttons), "{ctx}");
                }
            }
        }
    }
}
