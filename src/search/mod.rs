//! Incremental region search.
//!
//! Results are computed synchronously from whatever tiers are loaded. Each
//! search also names the countries whose deeper tiers should be fetched next,
//! so results converge as the user keeps typing.
mod index;
mod item;
mod rank;
mod session;

pub use index::{prefetch_codes, SearchIndex};
pub use item::{flatten, SearchItem};
pub use rank::{fuzzy_score, search, DEFAULT_LIMIT};
pub use session::{Key, KeyOutcome, Row, SearchSession, Selection};
