use ps_core::{Record, RecordId};

/// What occupies one position of the render window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Item(Record),
    /// Trailing "loading" row shown while more pages exist. Never a record.
    LoaderPlaceholder,
}

impl Slot {
    pub fn record(&self) -> Option<&Record> {
        match self {
            Slot::Item(record) => Some(record),
            Slot::LoaderPlaceholder => None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Slot::LoaderPlaceholder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedSlot {
    pub index: usize,
    /// Content offset of the slot's top edge.
    pub offset: u64,
    pub height: u32,
    pub slot: Slot,
}

impl PositionedSlot {
    pub fn contains(&self, content_y: u64) -> bool {
        content_y >= self.offset && content_y < self.offset + self.height as u64
    }

    /// The only way to obtain an [`ActionTarget`]; `None` for the loader.
    pub fn action_target(&self) -> Option<ActionTarget> {
        match &self.slot {
            Slot::Item(record) => Some(ActionTarget {
                index: self.index,
                record: record.clone(),
            }),
            Slot::LoaderPlaceholder => None,
        }
    }
}

/// A real record a per-item action may be dispatched to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTarget {
    index: usize,
    record: Record,
}

impl ActionTarget {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn id(&self) -> &RecordId {
        &self.record.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemAction {
    Select,
    Copy,
    Delete,
}
