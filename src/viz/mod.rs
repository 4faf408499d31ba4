//! Drawing surfaces for rendered maps.
//!
//! - `page`: one HTML file with both maps as inline SVG, hover tooltips and a toggle
//! - `snapshot`: a static SVG/PNG of a single map through plotters
//! - `legend`: threshold legend layout shared by both

pub mod legend;
pub mod page;
pub mod snapshot;
pub mod types;

pub use legend::{Legend, LegendEntry, LegendTick, build_legend};
pub use page::{render_page, write_page};
pub use snapshot::render_snapshot;
pub use types::MapPanel;
