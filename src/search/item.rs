use crate::region::{Region, Regions};

/// A region as seen by search: its display path and lowercase match key.
/// Holds its tier by `Arc`, so items are cheap to clone.
#[derive(Debug, Clone)]
pub struct SearchItem {
    tier: Regions,
    idx: usize,
    display: String,
    key: String,
}

impl SearchItem {
    /// Item for region `idx` of `tier`. Returns `None` if out of range.
    pub fn new(tier: Regions, idx: usize) -> Option<Self> {
        let display = tier.get(idx)?.display_name();
        let key = display.to_lowercase();
        Some(Self { tier, idx, display, key })
    }

    #[inline] pub fn region(&self) -> &Region { &self.tier[self.idx] }

    #[inline] pub fn display(&self) -> &str { &self.display }

    /// Lowercase display, what queries are matched against.
    #[inline] pub fn key(&self) -> &str { &self.key }
}

impl PartialEq for SearchItem {
    fn eq(&self, other: &Self) -> bool {
        self.region().key() == other.region().key()
    }
}

/// Flatten loaded tiers into one search corpus.
pub fn flatten(tiers: &[Regions]) -> Vec<SearchItem> {
    tiers.iter()
        .flat_map(|tier| (0..tier.len()).filter_map(|i| SearchItem::new(tier.clone(), i)))
        .collect()
}
