//! house_price_maps
//!
//! Choropleth maps of average house prices: England by region and London by
//! borough. Pairs with the `hpmap` CLI.
//!
//! ### Features
//! - Load price tables (JSON or CSV) and region boundaries (GeoJSON) from files or URLs
//! - Threshold color scales with a gray fill for regions without a price
//! - One HTML page with both maps, hover tooltips, legends and a toggle button
//! - Static SVG/PNG snapshots, CSV/JSON export of the joined table, join reports
//!
//! ### Example
//! ```no_run
//! use house_price_maps::{AppConfig, load_inputs, pipeline, viz};
//!
//! let config = AppConfig::default();
//! let inputs = load_inputs(&config);
//! let maps = pipeline::build_maps(&config, &inputs);
//! viz::write_page("maps.html", "Average house prices", &maps.panels(&config))?;
//! if let Ok(england) = &maps.england {
//!     house_price_maps::storage::save_csv(&england.map.joined_rows(), "england.csv")?;
//!     println!("{:#?}", england.report);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod index;
pub mod interact;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod projection;
pub mod render;
pub mod scale;
pub mod source;
pub mod stats;
pub mod storage;
pub mod viz;

pub use config::{AppConfig, MapConfig};
pub use error::MapError;
pub use index::PriceIndex;
pub use interact::{MapToggle, MapView};
pub use loader::{Inputs, load_inputs};
pub use models::{Color, Fill, JoinedRow, NameKey, PriceRecord, RegionFeature};
pub use render::{RegionRenderer, RenderedMap};
pub use scale::ThresholdScale;
pub use source::Source;
