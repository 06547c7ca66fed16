//! Scroll-driven fetch scheduling.
//! 滚动驱动的分页加载调度。
//!
//! The scheduler never polls. It is evaluated whenever the render window
//! changes and answers one question: should `load_more` run now?

use crate::list::ListSnapshot;
use crate::window::WindowLayout;

#[derive(Debug, Clone)]
pub struct FetchScheduler {
    /// Trailing distance, in records, at which the next page is requested.
    threshold: usize,
    /// Epoch in which the sparse-list trigger already fired.
    sparse_fired: Option<u64>,
}

impl FetchScheduler {
    pub fn new(threshold: usize) -> Self {
        Self {
            threshold,
            sparse_fired: None,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Re-evaluates after any change to the visible window. A list whose
    /// first page never arrived always asks again.
    pub fn on_window_changed(&mut self, layout: &WindowLayout, list: &ListSnapshot) -> bool {
        if list.is_fetching {
            return false;
        }
        if list.first_page_pending {
            return true;
        }
        if !list.has_more {
            return false;
        }
        match layout.last_rendered_index {
            Some(last) => last + self.threshold + 1 >= layout.item_count,
            // Nothing materialized yet, only the loader slot.
            None => self.on_layout_settled(layout, list),
        }
    }

    /// Mount/reset hook for lists shorter than one screen, where no scroll
    /// event will ever approach the end. Fires at most once per epoch.
    pub fn on_layout_settled(&mut self, layout: &WindowLayout, list: &ListSnapshot) -> bool {
        if !list.has_more || list.is_fetching || !layout.covers_all_items {
            return false;
        }
        if self.sparse_fired == Some(list.epoch) {
            return false;
        }
        self.sparse_fired = Some(list.epoch);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ps_core::ListKind;

    fn snapshot(has_more: bool, is_fetching: bool, epoch: u64) -> ListSnapshot {
        ListSnapshot {
            list: ListKind::Generated,
            items: Vec::new(),
            total: 0,
            fetched_from_store: 0,
            has_more,
            first_page_pending: false,
            is_fetching,
            initial_loading: false,
            query: String::new(),
            epoch,
        }
    }

    fn layout(item_count: usize, last: Option<usize>, covers_all: bool) -> WindowLayout {
        WindowLayout {
            slots: Vec::new(),
            total_height: 0,
            item_count,
            first_visible_index: None,
            last_rendered_index: last,
            covers_all_items: covers_all,
        }
    }

    #[test]
    fn triggers_within_threshold() {
        let mut scheduler = FetchScheduler::new(8);
        assert!(scheduler.on_window_changed(&layout(50, Some(41), false), &snapshot(true, false, 1)));
    }

    #[test]
    fn stays_idle_outside_threshold() {
        let mut scheduler = FetchScheduler::new(8);
        assert!(!scheduler.on_window_changed(&layout(50, Some(40), false), &snapshot(true, false, 1)));
    }

    #[test]
    fn never_triggers_without_more_or_while_fetching() {
        let mut scheduler = FetchScheduler::new(8);
        let near_end = layout(50, Some(49), true);
        assert!(!scheduler.on_window_changed(&near_end, &snapshot(false, false, 1)));
        assert!(!scheduler.on_window_changed(&near_end, &snapshot(true, true, 1)));
    }

    #[test]
    fn sparse_trigger_fires_once_per_epoch() {
        let mut scheduler = FetchScheduler::new(0);
        let sparse = layout(3, Some(2), true);

        assert!(scheduler.on_layout_settled(&sparse, &snapshot(true, false, 4)));
        assert!(!scheduler.on_layout_settled(&sparse, &snapshot(true, false, 4)));
        assert!(scheduler.on_layout_settled(&sparse, &snapshot(true, false, 5)));
    }

    #[test]
    fn sparse_trigger_requires_window_to_cover_items() {
        let mut scheduler = FetchScheduler::new(0);
        assert!(!scheduler.on_layout_settled(&layout(30, Some(10), false), &snapshot(true, false, 1)));
    }

    #[test]
    fn missing_first_page_always_wants_a_fetch() {
        let mut scheduler = FetchScheduler::new(8);
        let empty = layout(0, None, true);
        let mut failed = snapshot(false, false, 3);
        failed.first_page_pending = true;

        assert!(scheduler.on_window_changed(&empty, &failed));
        assert!(scheduler.on_window_changed(&empty, &failed));

        failed.is_fetching = true;
        assert!(!scheduler.on_window_changed(&empty, &failed));
    }

    #[test]
    fn empty_window_with_pending_data_uses_sparse_trigger() {
        let mut scheduler = FetchScheduler::new(8);
        let empty = layout(0, None, true);
        assert!(scheduler.on_window_changed(&empty, &snapshot(true, false, 2)));
        assert!(!scheduler.on_window_changed(&empty, &snapshot(true, false, 2)));
    }
}
