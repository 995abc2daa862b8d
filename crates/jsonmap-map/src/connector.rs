//! Links drawn between mapped source and target rows.

use serde::{Deserialize, Serialize};

use jsonmap_model::{Color, FieldPath, Point, Rect};

use crate::store::MappingSet;
use crate::tree::PositionMap;

/// Colours cycled through by rule index.
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::rgb(0xFF, 0x00, 0x00),
    Color::rgb(0x00, 0xFF, 0x00),
    Color::rgb(0x00, 0x00, 0xFF),
    Color::rgb(0xFF, 0xFF, 0x00),
    Color::rgb(0x00, 0xFF, 0xFF),
    Color::rgb(0xFF, 0x00, 0xFF),
];

/// Used only when the configured palette is empty.
const FALLBACK_COLOR: Color = Color::rgb(0, 0, 0);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorStyle {
    pub palette: Vec<Color>,
    /// Distance between a row edge and its link anchor.
    pub anchor_gap: f32,
    pub stroke_width: f32,
}

impl Default for ConnectorStyle {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            anchor_gap: 5.0,
            stroke_width: 2.0,
        }
    }
}

impl ConnectorStyle {
    pub fn color_for(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return FALLBACK_COLOR;
        }
        self.palette[index % self.palette.len()]
    }

    /// Anchor on the right edge of a source row.
    pub fn source_anchor(&self, rect: &Rect) -> Point {
        Point::new(rect.right() + self.anchor_gap, rect.mid_y())
    }

    /// Anchor on the left edge of a target row.
    pub fn target_anchor(&self, rect: &Rect) -> Point {
        Point::new(rect.left() - self.anchor_gap, rect.mid_y())
    }
}

/// A directed segment from a source row to a target row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    /// Position of the rule in the mapping set.
    pub index: usize,
    pub source: FieldPath,
    pub target: FieldPath,
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub stroke_width: f32,
}

/// Compute one link per rule whose rows both have a position.
///
/// Rules with an unplaced row (collapsed ancestor, scrolled away, stale path)
/// are skipped. Colours follow the rule index, so a skipped rule does not
/// shift the colours of the others.
pub fn connect(
    rules: &MappingSet,
    source: &PositionMap,
    target: &PositionMap,
    style: &ConnectorStyle,
) -> Vec<Link> {
    rules
        .iter()
        .enumerate()
        .filter_map(|(index, rule)| {
            let from = source.get(&rule.source)?;
            let to = target.get(&rule.target)?;
            Some(Link {
                index,
                source: rule.source.clone(),
                target: rule.target.clone(),
                from: style.source_anchor(&from),
                to: style.target_anchor(&to),
                color: style.color_for(index),
                stroke_width: style.stroke_width,
            })
        })
        .collect()
}
