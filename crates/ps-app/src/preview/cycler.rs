use ps_core::PreviewLinks;

/// Tracks which preview link of one record is currently shown.
///
/// The current link is remembered by value, so a store refresh that
/// returns the same set in a different order keeps it in place. An append
/// is detected by the link count growing since the previous sync.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewCycler {
    current: Option<String>,
    last_count: usize,
}

impl PreviewCycler {
    /// Starts on the record's default link, or its oldest one.
    pub fn new(links: &PreviewLinks) -> Self {
        Self {
            current: links
                .default_link()
                .map(str::to_string)
                .or_else(|| links.links().first().cloned()),
            last_count: links.len(),
        }
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_index(&self, links: &PreviewLinks) -> Option<usize> {
        self.current.as_deref().and_then(|c| links.position(c))
    }

    /// Reconciles with the record's links as of this render.
    pub fn sync(&mut self, links: &PreviewLinks) -> Option<&str> {
        let count = links.len();
        if count > self.last_count {
            self.current = links.links().last().cloned();
        } else if self.current_index(links).is_none() {
            self.current = links
                .default_link()
                .map(str::to_string)
                .or_else(|| links.links().first().cloned());
        }
        self.last_count = count;
        self.current()
    }

    /// Moves `delta` links forward (negative: back), wrapping around.
    pub fn step(&mut self, links: &PreviewLinks, delta: isize) -> Option<&str> {
        let count = links.len();
        if count == 0 {
            self.current = None;
            return None;
        }
        let idx = self.current_index(links).unwrap_or(0) as isize;
        let next = (idx + delta).rem_euclid(count as isize) as usize;
        self.current = Some(links.links()[next].clone());
        self.last_count = count;
        self.current()
    }
}
