//! Weighted hierarchy, squarified layout, category colours and legend grid
//! for treemap charts. Pure computation only; drawing lives elsewhere.

pub mod color;
pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod legend;

pub use color::{CategoryColorMap, PALETTE, palette_color};
pub use error::{Result, TreemapError};
pub use hierarchy::{Hierarchy, Node, NodeId, NodeKind, RawNode};
pub use layout::{PHI, Rect, TreemapLayout, squarify};
pub use legend::{LegendConfig, LegendItem, LegendLayout, column_count};
