//! Public types for the page and snapshot renderers.

use super::legend::Legend;
use crate::render::RenderedMap;

/// One map surface on the page: ready to draw, or the reason it could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum MapPanel {
    Ready {
        title: String,
        map: RenderedMap,
        legend: Legend,
        width: u32,
        height: u32,
    },
    Failed {
        title: String,
        message: String,
    },
}

impl MapPanel {
    pub fn title(&self) -> &str {
        match self {
            MapPanel::Ready { title, .. } | MapPanel::Failed { title, .. } => title,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, MapPanel::Failed { .. })
    }
}
