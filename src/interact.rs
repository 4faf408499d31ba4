//! Pointer-hover and map-toggle state.
//!
//! Every event overwrites the visual state it touches; there is no queue and
//! no partial update. The page script applies the same transitions in the browser.

use crate::render::RenderedMap;

/// Tooltip offset from the pointer, in pixels: right of and above the cursor.
pub const TOOLTIP_OFFSET: (f64, f64) = (10.0, -10.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShapeState {
    #[default]
    Normal,
    Dimmed,
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeHandle {
    pub name: String,
    pub tooltip: String,
    pub state: ShapeState,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tooltip {
    pub visible: bool,
    pub html: String,
    pub left: f64,
    pub top: f64,
}

impl Tooltip {
    fn place(&mut self, at: Point) {
        self.left = at.x + TOOLTIP_OFFSET.0;
        self.top = at.y + TOOLTIP_OFFSET.1;
    }
}

/// The shapes of one map and the tooltip they share.
#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    shapes: Vec<ShapeHandle>,
    tooltip: Tooltip,
}

impl MapView {
    pub fn new(map: &RenderedMap) -> Self {
        let shapes = map
            .shapes
            .iter()
            .map(|s| ShapeHandle {
                name: s.name.clone(),
                tooltip: s.tooltip_html(),
                state: ShapeState::Normal,
            })
            .collect();
        Self {
            shapes,
            tooltip: Tooltip::default(),
        }
    }

    pub fn shapes(&self) -> &[ShapeHandle] {
        &self.shapes
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    pub fn state_of(&self, name: &str) -> Option<ShapeState> {
        self.shapes.iter().find(|s| s.name == name).map(|s| s.state)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.shapes.iter().position(|s| s.name == name)
    }

    /// Set every shape to `all`, then shape `index` (if any) to `one`.
    pub fn set_all_then_override(&mut self, all: ShapeState, one: Option<(usize, ShapeState)>) {
        for s in &mut self.shapes {
            s.state = all;
        }
        if let Some((i, state)) = one
            && let Some(s) = self.shapes.get_mut(i)
        {
            s.state = state;
        }
    }

    /// Pointer entered shape `index`: dim the rest, activate it, show its tooltip.
    /// An unknown index leaves the view unchanged.
    pub fn pointer_enter(&mut self, index: usize, at: Point) {
        let Some(html) = self.shapes.get(index).map(|s| s.tooltip.clone()) else {
            return;
        };
        self.set_all_then_override(ShapeState::Dimmed, Some((index, ShapeState::Active)));
        self.tooltip.visible = true;
        self.tooltip.html = html;
        self.tooltip.place(at);
    }

    /// Tooltip follows the pointer while it is shown.
    pub fn pointer_move(&mut self, at: Point) {
        if self.tooltip.visible {
            self.tooltip.place(at);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.set_all_then_override(ShapeState::Normal, None);
        self.tooltip.visible = false;
    }
}

/// Shows exactly one of `count` maps; the first initially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapToggle {
    count: usize,
    visible: usize,
}

impl MapToggle {
    pub fn new(count: usize) -> Self {
        Self { count, visible: 0 }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn is_visible(&self, i: usize) -> bool {
        self.count > 0 && i == self.visible
    }

    pub fn toggle(&mut self) {
        if self.count > 0 {
            self.visible = (self.visible + 1) % self.count;
        }
    }
}
