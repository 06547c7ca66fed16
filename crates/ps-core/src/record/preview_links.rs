use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewLinkError {
    #[error("preview link is empty")]
    Empty,

    #[error("preview link not attached: {0}")]
    NotAttached(String),
}

/// Ordered set of image references attached to a record, oldest first,
/// with an optional default used for compact display.
/// 记录的预览图链接集合（按添加顺序，最旧在前）及默认链接。
///
/// Invariant: `default`, when set, is always one of `links`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewLinks {
    links: Vec<String>,
    default: Option<String>,
}

impl PreviewLinks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the set from persisted parts. Duplicates are dropped and a
    /// dangling default is cleared so the invariant holds for any input.
    pub fn from_parts(links: Vec<String>, default: Option<String>) -> Self {
        let mut set = Self::new();
        for link in links {
            let _ = set.add(link);
        }
        set.default = default.filter(|d| set.contains(d));
        set
    }

    pub fn links(&self) -> &[String] {
        &self.links
    }

    pub fn default_link(&self) -> Option<&str> {
        self.default.as_deref()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn contains(&self, link: &str) -> bool {
        self.links.iter().any(|l| l == link)
    }

    pub fn position(&self, link: &str) -> Option<usize> {
        self.links.iter().position(|l| l == link)
    }

    /// Appends `link`. Returns `Ok(false)` when it was already attached.
    ///
    /// The first link attached to an empty set becomes the default.
    pub fn add(&mut self, link: impl Into<String>) -> Result<bool, PreviewLinkError> {
        let link = link.into();
        if link.trim().is_empty() {
            return Err(PreviewLinkError::Empty);
        }
        if self.contains(&link) {
            return Ok(false);
        }
        if self.default.is_none() {
            self.default = Some(link.clone());
        }
        self.links.push(link);
        Ok(true)
    }

    /// Detaches `link`. If it was the default, the link that moves into its
    /// position becomes the default, else the newest remaining link, else
    /// the default is cleared.
    pub fn remove(&mut self, link: &str) -> Result<(), PreviewLinkError> {
        let idx = self
            .position(link)
            .ok_or_else(|| PreviewLinkError::NotAttached(link.to_string()))?;
        self.links.remove(idx);

        if self.default.as_deref() == Some(link) {
            self.default = self
                .links
                .get(idx)
                .or_else(|| self.links.last())
                .cloned();
        }
        Ok(())
    }

    pub fn set_default(&mut self, link: &str) -> Result<(), PreviewLinkError> {
        if !self.contains(link) {
            return Err(PreviewLinkError::NotAttached(link.to_string()));
        }
        self.default = Some(link.to_string());
        Ok(())
    }
}
