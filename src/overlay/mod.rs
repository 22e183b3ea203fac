//! Persisted overlays and their rehydration into geometry.
mod record;
mod resolve;

pub use record::{OverlayRecord, OverlayStyle, PersistedState, STATE_VERSION};
pub use resolve::{normalize, Overlay, OverlayResolver, Resolution};
