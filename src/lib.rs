#![doc = "mapregion public API"]
pub mod catalog;
pub mod codes;
pub mod config;
pub mod geom;
pub mod io;
pub mod overlay;
pub mod region;
pub mod search;

#[doc(inline)]
pub use catalog::{CacheStats, DiskSource, FetchError, MemSource, RegionCatalog, RegionSource};

#[cfg(feature = "download")]
#[doc(inline)]
pub use catalog::HttpSource;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use overlay::{OverlayRecord, OverlayResolver, PersistedState, Resolution};

#[doc(inline)]
pub use region::{Region, RegionKind, Regions};

#[doc(inline)]
pub use search::{SearchIndex, SearchSession, Selection};
