use ahash::AHashSet;

use crate::{
    catalog::RegionCatalog,
    codes,
    region::{RegionKind, Regions},
    search::{item::flatten, rank, SearchItem},
};

/// The flattened search corpus, rebuilt when the catalog's contents move.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    items: Vec<SearchItem>,
    revision: Option<u64>,
    limit: usize,
}

impl Default for SearchIndex {
    fn default() -> Self {
        Self { items: Vec::new(), revision: None, limit: rank::DEFAULT_LIMIT }
    }
}

impl SearchIndex {
    /// Index a fixed set of tiers.
    pub fn from_tiers(tiers: &[Regions], limit: usize) -> Self {
        Self { items: flatten(tiers), revision: None, limit }
    }

    /// Index everything the catalog has loaded so far.
    pub fn from_catalog<S>(catalog: &RegionCatalog<S>, limit: usize) -> Self {
        let mut index = Self { limit, ..Self::default() };
        index.refresh(catalog);
        index
    }

    /// Rebuild if the catalog has changed since the last build.
    /// Returns whether anything was rebuilt.
    pub fn refresh<S>(&mut self, catalog: &RegionCatalog<S>) -> bool {
        if self.revision == Some(catalog.revision()) {
            return false;
        }
        let snapshot = catalog.snapshot();
        self.items = flatten(&snapshot.tiers);
        self.revision = Some(snapshot.revision);
        true
    }

    #[inline] pub fn len(&self) -> usize { self.items.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.items.is_empty() }

    #[inline] pub fn limit(&self) -> usize { self.limit }

    pub fn search(&self, query: &str) -> Vec<SearchItem> {
        rank::search(query, &self.items, self.limit)
    }

    /// Direct children of a country or subdivision, sorted for display.
    pub fn children(&self, parent: &SearchItem) -> Vec<SearchItem> {
        let parent = parent.region();
        let Some(child_kind) = parent.kind.child() else { return Vec::new() };

        let mut children: Vec<SearchItem> = self.items.iter()
            .filter(|item| {
                let region = item.region();
                region.kind == child_kind
                    && match (&parent.iso3, &region.iso3) {
                        (Some(a), Some(b)) => a == b,
                        _ => parent.country == region.country,
                    }
                    && (child_kind != RegionKind::District
                        || region.admin1_name.as_deref() == Some(parent.name.as_str()))
            })
            .cloned()
            .collect();
        children.sort_by(rank::compare);
        children
    }
}

/// Distinct ISO3 codes implied by a result list, in result order: a country
/// names itself, lower tiers name their parent country.
pub fn prefetch_codes(results: &[SearchItem]) -> Vec<String> {
    let mut seen = AHashSet::new();
    results.iter()
        .filter_map(|item| {
            let region = item.region();
            region.iso3.clone().or_else(|| codes::resolve_iso3(&region.country).map(str::to_string))
        })
        .filter(|code| seen.insert(code.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::catalog::MemSource;
    use crate::region::{testing::*, Feature, Region};

    fn index() -> SearchIndex {
        let tier: Regions = vec![
            country("Germany", "DEU"),
            subdivision("Bayern", "Germany", "DEU"),
            subdivision("Berlin", "Germany", "DEU"),
            district("Oberbayern", "Bayern", "Germany", "DEU"),
            district("Mitte", "Berlin", "Germany", "DEU"),
            subdivision("Bern", "Switzerland", "CHE"),
        ].into();
        SearchIndex::from_tiers(&[tier], rank::DEFAULT_LIMIT)
    }

    #[test]
    fn children_of_a_country() {
        let index = index();
        let germany = &index.search("germany")[0];
        let names: Vec<_> = index.children(germany).iter().map(|c| c.region().name.clone()).collect();
        assert_eq!(names, ["Bayern", "Berlin"]);
    }

    #[test]
    fn children_of_a_subdivision() {
        let index = index();
        let bayern = &index.search("bayern")[0];
        let names: Vec<_> = index.children(bayern).iter().map(|c| c.region().name.clone()).collect();
        assert_eq!(names, ["Oberbayern"]);

        let oberbayern = &index.search("oberbayern")[0];
        assert!(index.children(oberbayern).is_empty());
    }

    #[test]
    fn prefetch_codes_are_distinct_and_ordered() {
        let index = index();
        let results = index.search("be");
        assert_eq!(prefetch_codes(&results), ["DEU", "CHE"]);

        let stray: Regions = vec![Region { iso3: None, ..subdivision("Texas", "United States", "USA") }].into();
        let items = flatten(&[stray]);
        assert_eq!(prefetch_codes(&items), ["USA"]);
    }

    #[tokio::test]
    async fn refresh_follows_catalog_revision() {
        let Value::Object(props) = json!({ "NAME_0": "Germany", "NAME_1": "Bayern" }) else { unreachable!() };
        let source = MemSource::new()
            .with_tier(RegionKind::Subdivision, "DEU", vec![Feature::new(Some(square(10.0, 48.0, 12.0, 50.0)), props)]);
        let catalog = RegionCatalog::new(source);

        let mut index = SearchIndex::from_catalog(&catalog, 5);
        assert!(index.is_empty());
        assert!(!index.refresh(&catalog));

        catalog.load_admin1("DEU").await;
        assert!(index.refresh(&catalog));
        assert_eq!(index.search("bay")[0].display(), "Bayern, Germany");
        assert!(!index.refresh(&catalog));
    }
}
