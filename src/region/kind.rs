use std::fmt;

use serde::{Deserialize, Serialize};

/// Administrative tier of a region. Ordering is tier priority, country first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Country,        // Highest-level entity
    Subdivision,    // Admin1 -> Country
    #[serde(alias = "admin2")]
    District,       // Admin2 -> Subdivision
}

impl RegionKind {
    pub const ALL: [RegionKind; 3] = [RegionKind::Country, RegionKind::Subdivision, RegionKind::District];

    pub fn to_str(&self) -> &'static str {
        match self {
            RegionKind::Country => "country",
            RegionKind::Subdivision => "subdivision",
            RegionKind::District => "district",
        }
    }

    /// Short badge shown next to search rows.
    pub fn badge(&self) -> &'static str {
        match self {
            RegionKind::Country => "CTY",
            RegionKind::Subdivision => "REG",
            RegionKind::District => "DST",
        }
    }

    /// Dense index for per-tier tables.
    #[inline] pub(crate) fn index(&self) -> usize { *self as usize }

    /// The tier directly below this one, if any.
    pub fn child(&self) -> Option<RegionKind> {
        match self {
            RegionKind::Country => Some(RegionKind::Subdivision),
            RegionKind::Subdivision => Some(RegionKind::District),
            RegionKind::District => None,
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::RegionKind;

    #[test]
    fn priority_order() {
        assert!(RegionKind::Country < RegionKind::Subdivision);
        assert!(RegionKind::Subdivision < RegionKind::District);
    }

    #[test]
    fn legacy_admin2_name_is_accepted() {
        let kind: RegionKind = serde_json::from_str("\"admin2\"").unwrap();
        assert_eq!(kind, RegionKind::District);
        assert_eq!(serde_json::to_string(&kind).unwrap(), "\"district\"");
    }

    #[test]
    fn children() {
        assert_eq!(RegionKind::Country.child(), Some(RegionKind::Subdivision));
        assert_eq!(RegionKind::District.child(), None);
    }
}
