mod anchor;
mod bbox;
mod index;

use bbox::BoundingBox;

pub use anchor::label_anchor;
pub use index::RegionIndex;
