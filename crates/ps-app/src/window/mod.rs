//! Virtualized render window.
//! 虚拟化渲染窗口。
//!
//! Headless: the renderer supplies the viewport height, scroll offset,
//! pointer position and measured item heights; the window answers which
//! slots to materialize and where. Offsets are prefix sums over measured
//! heights, falling back to the estimate for unmeasured records.

mod heights;
mod slot;

pub use heights::HeightCache;
pub use slot::{ActionTarget, ItemAction, PositionedSlot, Slot};

use ps_core::{Record, RecordId};

/// Result of one layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowLayout {
    /// Materialized slots in order, including overscan and, when more data
    /// is pending and the tail is rendered, the loader placeholder.
    pub slots: Vec<PositionedSlot>,
    /// Scrollable content height, placeholder included.
    pub total_height: u64,
    pub item_count: usize,
    pub first_visible_index: Option<usize>,
    /// Index of the last materialized record.
    pub last_rendered_index: Option<usize>,
    /// Whether every record fits above the bottom edge of the viewport.
    pub covers_all_items: bool,
}

impl WindowLayout {
    pub fn items(&self) -> impl Iterator<Item = &Record> {
        self.slots.iter().filter_map(|s| s.slot.record())
    }

    pub fn has_placeholder(&self) -> bool {
        self.slots.iter().any(|s| s.slot.is_placeholder())
    }
}

/// Outcome of the post-layout hover re-evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Retarget {
    Unchanged,
    /// Hover moved to another record, or to nothing.
    Changed(Option<RecordId>),
}

#[derive(Debug, Clone)]
pub struct VirtualWindow {
    viewport_height: u32,
    scroll_offset: u64,
    overscan: usize,
    heights: HeightCache,
    /// Last known pointer position, relative to the viewport top.
    pointer_y: Option<u32>,
    hovered: Option<RecordId>,
    last_item_count: usize,
}

impl VirtualWindow {
    pub fn new(viewport_height: u32, estimated_item_height: u32, overscan: usize) -> Self {
        Self {
            viewport_height,
            scroll_offset: 0,
            overscan,
            heights: HeightCache::new(estimated_item_height),
            pointer_y: None,
            hovered: None,
            last_item_count: 0,
        }
    }

    pub fn viewport_height(&self) -> u32 {
        self.viewport_height
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn hovered(&self) -> Option<&RecordId> {
        self.hovered.as_ref()
    }

    pub fn heights(&self) -> &HeightCache {
        &self.heights
    }

    pub fn set_viewport_height(&mut self, height: u32) {
        self.viewport_height = height;
    }

    /// Computes the slots to materialize for `items`.
    pub fn layout(&self, items: &[Record], has_more: bool) -> WindowLayout {
        let top = self.scroll_offset;
        let bottom = top + self.viewport_height as u64;

        let mut offsets = Vec::with_capacity(items.len());
        let mut y = 0u64;
        let mut first_visible = None;
        let mut last_visible = None;
        for (idx, record) in items.iter().enumerate() {
            let h = self.heights.get(&record.id) as u64;
            offsets.push(y);
            if y < bottom && y + h > top {
                first_visible.get_or_insert(idx);
                last_visible = Some(idx);
            }
            y += h;
        }
        let items_height = y;
        let loader_height = if has_more { self.heights.estimate() as u64 } else { 0 };

        let rendered = match (first_visible, last_visible) {
            (Some(first), Some(last)) => Some((
                first.saturating_sub(self.overscan),
                (last + self.overscan).min(items.len() - 1),
            )),
            // Scrolled past every record, into the loader slot.
            _ if !items.is_empty() && top >= items_height && self.overscan > 0 => {
                Some((items.len().saturating_sub(self.overscan), items.len() - 1))
            }
            _ => None,
        };

        let mut slots = Vec::new();
        if let Some((start, end)) = rendered {
            for idx in start..=end {
                let record = &items[idx];
                slots.push(PositionedSlot {
                    index: idx,
                    offset: offsets[idx],
                    height: self.heights.get(&record.id),
                    slot: Slot::Item(record.clone()),
                });
            }
        }

        let tail_rendered = items.is_empty() || rendered.map(|(_, end)| end) == Some(items.len() - 1);
        if has_more && (tail_rendered || items_height < bottom) {
            slots.push(PositionedSlot {
                index: items.len(),
                offset: items_height,
                height: self.heights.estimate(),
                slot: Slot::LoaderPlaceholder,
            });
        }

        WindowLayout {
            slots,
            total_height: items_height + loader_height,
            item_count: items.len(),
            first_visible_index: first_visible,
            last_rendered_index: rendered.map(|(_, end)| end),
            covers_all_items: items_height <= bottom,
        }
    }

    pub fn scroll_to(&mut self, offset: u64, total_height: u64) {
        let max = total_height.saturating_sub(self.viewport_height as u64);
        self.scroll_offset = offset.min(max);
    }

    pub fn scroll_by(&mut self, delta: i64, total_height: u64) {
        let target = if delta.is_negative() {
            self.scroll_offset.saturating_sub(delta.unsigned_abs())
        } else {
            self.scroll_offset.saturating_add(delta as u64)
        };
        self.scroll_to(target, total_height);
    }

    /// Scrolls so that `index` is the first visible record.
    pub fn scroll_to_index(&mut self, items: &[Record], index: usize, has_more: bool) {
        let offset: u64 = items
            .iter()
            .take(index)
            .map(|r| self.heights.get(&r.id) as u64)
            .sum();
        let total = self.layout(items, has_more).total_height;
        self.scroll_to(offset, total);
    }

    /// Replaces the estimate for `id` with its measured height.
    ///
    /// When the record lies entirely above the viewport, the scroll offset
    /// moves by the same delta so visible content stays put. Returns the
    /// applied scroll adjustment.
    pub fn measure(&mut self, items: &[Record], id: &RecordId, height: u32) -> i64 {
        let mut top = 0u64;
        let mut found = false;
        for record in items {
            if &record.id == id {
                found = true;
                break;
            }
            top += self.heights.get(&record.id) as u64;
        }
        if !found {
            return 0;
        }

        let previous = self.heights.set(id, height);
        let new_height = self.heights.get(id);
        if previous == new_height {
            return 0;
        }
        let delta = new_height as i64 - previous as i64;
        if top + previous as u64 <= self.scroll_offset {
            self.scroll_offset = if delta.is_negative() {
                self.scroll_offset.saturating_sub(delta.unsigned_abs())
            } else {
                self.scroll_offset + delta as u64
            };
            return delta;
        }
        0
    }

    /// Hit-tests `y` (viewport-relative) against a layout.
    pub fn hit_test<'a>(&self, layout: &'a WindowLayout, y: u32) -> Option<&'a PositionedSlot> {
        let content_y = self.scroll_offset + y as u64;
        layout.slots.iter().find(|s| s.contains(content_y))
    }

    /// Records the pointer position and updates the hover target.
    pub fn pointer_moved(&mut self, layout: &WindowLayout, y: u32) -> Option<RecordId> {
        self.pointer_y = Some(y);
        self.hovered = self.hovered_at(layout, y);
        self.hovered.clone()
    }

    pub fn pointer_left(&mut self) {
        self.pointer_y = None;
        self.hovered = None;
    }

    /// Post-layout hook. A change in item count (typically a removal) moves
    /// records under a stationary pointer without any pointer event, so the
    /// hover target is re-resolved at the last known pointer position.
    pub fn after_layout(&mut self, layout: &WindowLayout) -> Retarget {
        if layout.item_count == self.last_item_count {
            return Retarget::Unchanged;
        }
        self.last_item_count = layout.item_count;

        let Some(y) = self.pointer_y else {
            return Retarget::Unchanged;
        };
        let target = self.hovered_at(layout, y);
        if target == self.hovered {
            return Retarget::Unchanged;
        }
        self.hovered = target.clone();
        Retarget::Changed(target)
    }

    /// Forgets heights of records that left the list.
    pub fn prune(&mut self, items: &[Record]) {
        self.heights.retain(items);
    }

    /// Back to the top, measurements discarded. Used on query change.
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.heights.clear();
        self.hovered = None;
        self.last_item_count = 0;
    }

    fn hovered_at(&self, layout: &WindowLayout, y: u32) -> Option<RecordId> {
        self.hit_test(layout, y)
            .and_then(|s| s.slot.record())
            .map(|r| r.id.clone())
    }
}
