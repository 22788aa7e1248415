//! Page window computation for the pagination strip.

use crate::ui::viewmodel::PageSlot;

const LEFT_EDGE: u32 = 1;
const LEFT_CURRENT: u32 = 2;
const RIGHT_CURRENT: u32 = 2;
const RIGHT_EDGE: u32 = 1;

/// Returns the page numbers to show around `current_page`, with gaps.
///
/// Always includes the first and last page and up to two pages either side of
/// the current one, e.g. `1 … 3 4 [5] 6 7 … 10`.
#[must_use]
pub fn page_slots(total_pages: u32, current_page: u32) -> Vec<PageSlot> {
    let last_page = total_pages;
    if last_page == 0 {
        return vec![];
    }
    let current_page = current_page.clamp(1, last_page);

    let mut slots = Vec::new();

    let left_end = (1 + LEFT_EDGE).min(last_page.saturating_add(1));
    slots.extend((1..left_end).map(PageSlot::Page));

    let mid_start = left_end.max(current_page.saturating_sub(LEFT_CURRENT));
    let mid_end = current_page
        .saturating_add(RIGHT_CURRENT + 1)
        .min(last_page.saturating_add(1));

    if mid_start > left_end {
        slots.push(PageSlot::Gap);
    }
    slots.extend((mid_start..mid_end).map(PageSlot::Page));

    let right_start = mid_end.max(last_page.saturating_sub(RIGHT_EDGE) + 1);
    if right_start > mid_end {
        slots.push(PageSlot::Gap);
    }
    slots.extend((right_start..=last_page).map(PageSlot::Page));

    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageSlot::{Gap, Page};

    #[test]
    fn test_no_pages() {
        assert!(page_slots(0, 1).is_empty());
    }

    #[test]
    fn test_small_total_has_no_gaps() {
        assert_eq!(page_slots(4, 1), vec![Page(1), Page(2), Page(3), Page(4)]);
    }

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(
            page_slots(10, 5),
            vec![Page(1), Gap, Page(3), Page(4), Page(5), Page(6), Page(7), Gap, Page(10)]
        );
    }

    #[test]
    fn test_window_at_the_end() {
        assert_eq!(page_slots(10, 10), vec![Page(1), Gap, Page(8), Page(9), Page(10)]);
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        assert_eq!(page_slots(3, 9), vec![Page(1), Page(2), Page(3)]);
    }

    #[test]
    fn test_huge_total_does_not_overflow() {
        let max = u32::MAX;
        assert_eq!(page_slots(max, max), vec![Page(1), Gap, Page(max - 2), Page(max - 1), Page(max)]);
        assert_eq!(page_slots(max, 1), vec![Page(1), Page(2), Page(3), Gap, Page(max)]);
    }
}
