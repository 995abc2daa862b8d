//! Panel geometry and expansion state for the tree renderer.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use jsonmap_model::{FieldPath, Point, Rect};

/// Where a panel sits on screen and how its rows are stacked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelLayout {
    /// Top-left corner of the first row.
    pub origin: Point,
    /// Width of a top-level row.
    pub width: f32,
    pub row_height: f32,
    /// Horizontal offset applied per nesting level.
    pub indent: f32,
    /// Vertical scroll of the panel content.
    pub scroll_offset: f32,
    /// Height of the visible area. Rows fully outside it get no position.
    pub visible_height: Option<f32>,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self {
            origin: Point::new(0.0, 0.0),
            width: 320.0,
            row_height: 24.0,
            indent: 16.0,
            scroll_offset: 0.0,
            visible_height: None,
        }
    }
}

impl PanelLayout {
    /// Default layout placed at `x`.
    pub fn at(x: f32) -> Self {
        Self {
            origin: Point::new(x, 0.0),
            ..Self::default()
        }
    }

    /// Rect of the `index`-th stacked row at nesting `depth`.
    pub fn row_rect(&self, index: usize, depth: usize) -> Rect {
        let inset = self.indent * depth as f32;
        Rect::new(
            self.origin.x + inset,
            self.origin.y + self.row_height * index as f32 - self.scroll_offset,
            (self.width - inset).max(0.0),
            self.row_height,
        )
    }

    pub fn is_visible(&self, rect: &Rect) -> bool {
        match self.visible_height {
            Some(height) => rect.bottom() > self.origin.y && rect.top() < self.origin.y + height,
            None => true,
        }
    }
}

/// Branches the user has collapsed in one panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    collapsed: BTreeSet<FieldPath>,
}

impl Expansion {
    pub fn is_collapsed(&self, path: &FieldPath) -> bool {
        self.collapsed.contains(path)
    }

    pub fn collapse(&mut self, path: FieldPath) -> bool {
        self.collapsed.insert(path)
    }

    pub fn expand(&mut self, path: &FieldPath) -> bool {
        self.collapsed.remove(path)
    }

    /// Flip the state of `path`. Returns true when it is now collapsed.
    pub fn toggle(&mut self, path: &FieldPath) -> bool {
        if self.collapsed.remove(path) {
            false
        } else {
            self.collapsed.insert(path.clone());
            true
        }
    }

    pub fn expand_all(&mut self) {
        self.collapsed.clear();
    }
}
