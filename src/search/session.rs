use geo::Geometry;
use serde::Serialize;

use crate::{
    region::RegionKind,
    search::{index::prefetch_codes, SearchIndex, SearchItem},
};

/// Keys the search box reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
    Tab,
}

/// A committed region, handed to whoever draws overlays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub name: String,
    pub country: String,
    pub kind: RegionKind,
    pub admin1_name: Option<String>,
    pub native_name: Option<String>,
    pub iso3: Option<String>,
    #[serde(skip)]
    pub geometry: Geometry<f64>,
}

impl From<&SearchItem> for Selection {
    fn from(item: &SearchItem) -> Self {
        let region = item.region();
        Self {
            name: region.name.clone(),
            country: region.country.clone(),
            kind: region.kind,
            admin1_name: region.admin1_name.clone(),
            native_name: region.native_name.clone(),
            iso3: region.iso3.clone(),
            geometry: region.geometry.clone(),
        }
    }
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Ignored,
    /// The active row moved; its display is now in the query box.
    Moved(usize),
    /// Tab accepted the hint and searched again.
    Completed { prefetch: Vec<String> },
    Selected(Selection),
    /// A child subdivision was committed and searched for.
    DrilledIn { prefetch: Vec<String> },
    Closed,
}

/// One displayed row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    pub item: &'a SearchItem,
    /// Listed under an expanded parent rather than as a result
    pub child: bool,
}

/// State of one search box: query, results, active row and inline expansion.
#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    query: String,              // What the box shows
    typed: String,              // What results were computed for
    results: Vec<SearchItem>,
    children: Vec<SearchItem>,
    expanded: Option<usize>,    // Result the children belong to
    active: Option<usize>,      // Index into rows()
    open: bool,
}

impl SearchSession {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn query(&self) -> &str { &self.query }

    #[inline] pub fn results(&self) -> &[SearchItem] { &self.results }

    #[inline] pub fn is_open(&self) -> bool { self.open }

    #[inline] pub fn active(&self) -> Option<usize> { self.active }

    #[inline] pub fn is_expanded(&self) -> bool { self.expanded.is_some() }

    /// Rows as displayed: results, with the expansion's children after their parent.
    pub fn rows(&self) -> Vec<Row<'_>> {
        let mut rows = Vec::with_capacity(self.results.len() + self.children.len());
        for (i, item) in self.results.iter().enumerate() {
            rows.push(Row { item, child: false });
            if self.expanded == Some(i) {
                rows.extend(self.children.iter().map(|item| Row { item, child: true }));
            }
        }
        rows
    }

    /// Type into the box. Returns the ISO3 codes whose tiers should be prefetched.
    pub fn set_query(&mut self, index: &SearchIndex, text: &str) -> Vec<String> {
        self.query = text.to_string();
        self.typed = text.to_string();
        self.open = true;
        self.active = None;
        self.collapse();
        self.results = index.search(text);
        prefetch_codes(&self.results)
    }

    /// Recompute results for the last typed query, e.g. after more tiers loaded.
    /// The active row follows its region to its new position, or is cleared
    /// when that region dropped out.
    pub fn refresh(&mut self, index: &SearchIndex) {
        let highlighted = self.active
            .and_then(|a| self.rows().get(a).map(|row| (row.item.region().key(), row.child)));
        self.results = index.search(&self.typed);
        if self.expanded.is_some() {
            self.expanded = self.perfect_match();
            self.children = match self.expanded {
                Some(i) => index.children(&self.results[i]),
                None => Vec::new(),
            };
        }
        self.active = highlighted.and_then(|(key, child)| {
            self.rows().iter().position(|row| row.child == child && row.item.region().key() == key)
        });
    }

    /// Index of the result whose display equals the typed query.
    pub fn perfect_match(&self) -> Option<usize> {
        let q = self.typed.trim().to_lowercase();
        if q.is_empty() {
            return None;
        }
        self.results.iter().position(|item| item.key() == q)
    }

    /// Show or hide the children of the perfect match. Returns whether the
    /// list is now expanded.
    pub fn toggle_expand(&mut self, index: &SearchIndex) -> bool {
        if self.expanded.is_some() {
            self.collapse();
            return false;
        }
        let Some(i) = self.perfect_match() else { return false };
        if self.results[i].region().kind == RegionKind::District {
            return false;
        }
        self.children = index.children(&self.results[i]);
        self.expanded = Some(i);
        self.active = None;
        true
    }

    fn collapse(&mut self) {
        self.expanded = None;
        self.children.clear();
    }

    /// Autocomplete text: the active (or first) row's display, if it extends
    /// the query case-insensitively.
    pub fn hint(&self) -> Option<String> {
        if self.query.trim().is_empty() {
            return None;
        }
        let rows = self.rows();
        let target = self.active.and_then(|a| rows.get(a)).or_else(|| rows.first())?;
        completion(&self.query, target.item.display())
    }

    pub fn handle_key(&mut self, index: &SearchIndex, key: Key) -> KeyOutcome {
        match key {
            Key::Down | Key::Up => {
                let n = self.rows().len();
                if !self.open || n == 0 {
                    return KeyOutcome::Ignored;
                }
                let next = match (key, self.active) {
                    (Key::Down, Some(a)) => (a + 1) % n,
                    (Key::Down, None) => 0,
                    (_, Some(a)) => (a + n - 1) % n,
                    (_, None) => n - 1,
                };
                let display = self.rows()[next].item.display().to_string();
                self.active = Some(next);
                self.query = display;
                KeyOutcome::Moved(next)
            }
            Key::Enter => {
                if let Some(a) = self.active {
                    return self.select_row(index, a);
                }
                match self.perfect_match() {
                    Some(0) => self.select_row(index, 0),
                    _ => KeyOutcome::Ignored,
                }
            }
            Key::Escape => {
                self.open = false;
                self.active = None;
                KeyOutcome::Closed
            }
            Key::Tab => match self.hint() {
                Some(hint) => KeyOutcome::Completed { prefetch: self.set_query(index, &hint) },
                None => KeyOutcome::Ignored,
            },
        }
    }

    /// Commit a displayed row, as Enter or a click does.
    pub fn select_row(&mut self, index: &SearchIndex, row: usize) -> KeyOutcome {
        let Some(Row { item, child }) = self.rows().get(row).copied() else {
            return KeyOutcome::Ignored;
        };
        if child && item.region().kind == RegionKind::Subdivision {
            let display = item.display().to_string();
            return KeyOutcome::DrilledIn { prefetch: self.set_query(index, &display) };
        }

        let selection = Selection::from(item);
        self.query.clear();
        self.typed.clear();
        self.results.clear();
        self.collapse();
        self.active = None;
        self.open = false;
        KeyOutcome::Selected(selection)
    }
}

/// `query` followed by the rest of `display`, if `display` starts with
/// `query` ignoring case.
fn completion(query: &str, display: &str) -> Option<String> {
    let mut rest = display.chars();
    for q in query.chars() {
        let d = rest.next()?;
        if !d.to_lowercase().eq(q.to_lowercase()) {
            return None;
        }
    }
    Some(format!("{query}{}", rest.as_str()))
}
