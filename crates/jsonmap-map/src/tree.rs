//! Projection of a JSON object into positioned rows.
//!
//! Rendering is a pure function of (data, role, rules, layout, expansion). It
//! returns the visual tree together with the position of every placed row, so
//! connectors can be computed straight from its output.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use jsonmap_model::{FieldPath, Object, Rect, Role};

use crate::controller::DragState;
use crate::layout::{Expansion, PanelLayout};
use crate::store::MappingSet;

/// Mapping status of a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Unmapped,
    /// Source row: targets of its rules, in rule order.
    MappedTo { targets: Vec<FieldPath> },
    /// Target row: sources of the rules that target it, in rule order.
    MappedFrom { sources: Vec<FieldPath> },
}

impl RowStatus {
    pub fn is_mapped(&self) -> bool {
        !matches!(self, Self::Unmapped)
    }

    /// Paths on the other side of the rules touching this row.
    pub fn counterparts(&self) -> &[FieldPath] {
        match self {
            Self::Unmapped => &[],
            Self::MappedTo { targets } => targets,
            Self::MappedFrom { sources } => sources,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowKind {
    /// The value is an object. Children are empty when the branch is collapsed.
    Branch { children: Vec<Row> },
    /// Any other value: primitive, array or null.
    Leaf,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub path: FieldPath,
    pub key: String,
    /// Nesting level below the rendered root.
    pub depth: usize,
    /// Compact JSON of the value, integral floats without a fraction.
    pub display: String,
    pub kind: RowKind,
    pub status: RowStatus,
    /// Source rows with at least one rule show a cancel control.
    pub cancellable: bool,
    pub collapsed: bool,
    /// Source row currently being dragged.
    pub dragging: bool,
    /// Target row under the pointer during a drag.
    pub drop_target: bool,
}

impl Row {
    pub fn children(&self) -> &[Row] {
        match &self.kind {
            RowKind::Branch { children } => children,
            RowKind::Leaf => &[],
        }
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.kind, RowKind::Branch { .. })
    }
}

/// Row rects keyed by field path, for one panel and one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionMap {
    rects: HashMap<FieldPath, Rect>,
}

impl PositionMap {
    pub fn get(&self, path: &FieldPath) -> Option<Rect> {
        self.rects.get(path).copied()
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.rects.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    fn insert(&mut self, path: FieldPath, rect: Rect) {
        self.rects.insert(path, rect);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedTree {
    pub role: Role,
    pub rows: Vec<Row>,
    pub positions: PositionMap,
}

impl RenderedTree {
    pub fn empty(role: Role) -> Self {
        Self {
            role,
            rows: Vec::new(),
            positions: PositionMap::default(),
        }
    }

    /// All rows in display order.
    pub fn flatten(&self) -> Vec<&Row> {
        fn walk<'a>(rows: &'a [Row], out: &mut Vec<&'a Row>) {
            for row in rows {
                out.push(row);
                walk(row.children(), out);
            }
        }
        let mut out = Vec::new();
        walk(&self.rows, &mut out);
        out
    }

    pub fn find(&self, path: &FieldPath) -> Option<&Row> {
        self.flatten().into_iter().find(|row| &row.path == path)
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.find(path).is_some()
    }

    /// Flag the dragged source row or the hovered target row.
    ///
    /// Flags from an earlier call are cleared first.
    pub fn mark_drag(&mut self, state: &DragState) {
        fn walk(rows: &mut [Row], role: Role, state: &DragState) {
            for row in rows {
                let (dragging, drop_target) = match (role, state) {
                    (Role::Source, DragState::Dragging { source, .. }) => {
                        (&row.path == source, false)
                    }
                    (Role::Target, DragState::Dragging { hover, .. }) => {
                        (false, hover.as_ref() == Some(&row.path))
                    }
                    (_, DragState::Idle) => (false, false),
                };
                row.dragging = dragging;
                row.drop_target = drop_target;
                if let RowKind::Branch { children } = &mut row.kind {
                    walk(children, role, state);
                }
            }
        }
        walk(&mut self.rows, self.role, state);
    }
}

/// Render `data` as rows for the panel playing `role`.
///
/// `parent` is the path of `data` itself when rendering a subtree.
pub fn render_tree(
    data: &Object,
    role: Role,
    parent: Option<&FieldPath>,
    rules: &MappingSet,
    layout: &PanelLayout,
    expansion: &Expansion,
) -> RenderedTree {
    let mut renderer = Renderer {
        role,
        rules,
        layout,
        expansion,
        next_index: 0,
        positions: PositionMap::default(),
    };
    let rows = renderer.object_rows(data, parent, 0);
    RenderedTree {
        role,
        rows,
        positions: renderer.positions,
    }
}

struct Renderer<'a> {
    role: Role,
    rules: &'a MappingSet,
    layout: &'a PanelLayout,
    expansion: &'a Expansion,
    next_index: usize,
    positions: PositionMap,
}

impl Renderer<'_> {
    fn object_rows(&mut self, data: &Object, parent: Option<&FieldPath>, depth: usize) -> Vec<Row> {
        data.iter()
            .map(|(key, value)| self.row(key, value, parent, depth))
            .collect()
    }

    fn row(&mut self, key: &str, value: &Value, parent: Option<&FieldPath>, depth: usize) -> Row {
        let path = FieldPath::under(parent, key);
        self.place(&path, depth);

        let status = self.status(&path);
        let cancellable = self.role == Role::Source && status.is_mapped();
        let collapsed = value.is_object() && self.expansion.is_collapsed(&path);
        let kind = match value {
            Value::Object(_) if collapsed => RowKind::Branch {
                children: Vec::new(),
            },
            Value::Object(child) => RowKind::Branch {
                children: self.object_rows(child, Some(&path), depth + 1),
            },
            _ => RowKind::Leaf,
        };

        Row {
            key: key.to_string(),
            depth,
            display: jsonmap_model::display::compact(value),
            kind,
            status,
            cancellable,
            collapsed,
            dragging: false,
            drop_target: false,
            path,
        }
    }

    fn place(&mut self, path: &FieldPath, depth: usize) {
        let rect = self.layout.row_rect(self.next_index, depth);
        self.next_index += 1;
        if self.layout.is_visible(&rect) {
            self.positions.insert(path.clone(), rect);
        }
    }

    fn status(&self, path: &FieldPath) -> RowStatus {
        let counterparts: Vec<FieldPath> = match self.role {
            Role::Source => self.rules.targets_of(path).cloned().collect(),
            Role::Target => self.rules.sources_for_target(path).cloned().collect(),
        };
        match (counterparts.is_empty(), self.role) {
            (true, _) => RowStatus::Unmapped,
            (false, Role::Source) => RowStatus::MappedTo {
                targets: counterparts,
            },
            (false, Role::Target) => RowStatus::MappedFrom {
                sources: counterparts,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use jsonmap_model::MappingRule;

    use super::*;
    use crate::store::FanOutPolicy;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn sample() -> Object {
        object(json!({"user": {"name": "Ann", "age": 5}, "tags": ["a"], "note": null}))
    }

    fn render(role: Role, rules: &MappingSet, expansion: &Expansion) -> RenderedTree {
        render_tree(&sample(), role, None, rules, &PanelLayout::default(), expansion)
    }

    #[test]
    fn one_row_per_key_at_every_level() {
        let tree = render(Role::Source, &MappingSet::default(), &Expansion::default());
        let paths: Vec<&str> = tree.flatten().iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["user", "user.name", "user.age", "tags", "note"]);
        assert_eq!(tree.positions.len(), 5);
    }

    #[test]
    fn leaves_show_compact_json() {
        let tree = render(Role::Source, &MappingSet::default(), &Expansion::default());
        let name = tree.find(&FieldPath::parse("user.name")).unwrap();
        assert_eq!(name.display, "\"Ann\"");
        assert!(!name.is_branch());
        let tags = tree.find(&FieldPath::parse("tags")).unwrap();
        assert_eq!(tags.display, "[\"a\"]");
        assert!(!tags.is_branch());
        let note = tree.find(&FieldPath::parse("note")).unwrap();
        assert_eq!(note.display, "null");
    }

    #[test]
    fn rows_are_stacked_in_display_order() {
        let tree = render(Role::Source, &MappingSet::default(), &Expansion::default());
        let age = tree.positions.get(&FieldPath::parse("user.age")).unwrap();
        assert_eq!(age, Rect::new(16.0, 48.0, 304.0, 24.0));
    }

    #[test]
    fn mapped_source_rows_are_cancellable() {
        let rules = MappingSet::from_rules(
            [MappingRule::new("user.name", "profile.fullName")],
            FanOutPolicy::Allow,
        );
        let source = render(Role::Source, &rules, &Expansion::default());
        let name = source.find(&FieldPath::parse("user.name")).unwrap();
        assert!(name.cancellable);
        assert_eq!(
            name.status,
            RowStatus::MappedTo {
                targets: vec![FieldPath::parse("profile.fullName")]
            }
        );
        let age = source.find(&FieldPath::parse("user.age")).unwrap();
        assert!(!age.cancellable);
    }

    #[test]
    fn target_rows_report_sources_but_never_cancel() {
        let rules = MappingSet::from_rules([MappingRule::new("x", "user.name")], FanOutPolicy::Allow);
        let target = render(Role::Target, &rules, &Expansion::default());
        let name = target.find(&FieldPath::parse("user.name")).unwrap();
        assert_eq!(
            name.status,
            RowStatus::MappedFrom {
                sources: vec![FieldPath::parse("x")]
            }
        );
        assert_eq!(name.status.counterparts(), &[FieldPath::parse("x")]);
        assert!(!name.cancellable);
    }

    #[test]
    fn drag_state_flags_dragged_and_hovered_rows() {
        let rules = MappingSet::default();
        let dragging = DragState::Dragging {
            source: FieldPath::parse("user.age"),
            hover: Some(FieldPath::parse("user.name")),
        };

        let mut source = render(Role::Source, &rules, &Expansion::default());
        source.mark_drag(&dragging);
        let flagged: Vec<&str> = source
            .flatten()
            .into_iter()
            .filter(|row| row.dragging)
            .map(|row| row.path.as_str())
            .collect();
        assert_eq!(flagged, vec!["user.age"]);
        assert!(source.flatten().iter().all(|row| !row.drop_target));

        let mut target = render(Role::Target, &rules, &Expansion::default());
        target.mark_drag(&dragging);
        let hovered: Vec<&str> = target
            .flatten()
            .into_iter()
            .filter(|row| row.drop_target)
            .map(|row| row.path.as_str())
            .collect();
        assert_eq!(hovered, vec!["user.name"]);

        target.mark_drag(&DragState::Idle);
        assert!(target.flatten().iter().all(|row| !row.drop_target));
    }

    #[test]
    fn collapsed_branch_hides_children() {
        let mut expansion = Expansion::default();
        expansion.collapse(FieldPath::parse("user"));
        let tree = render(Role::Source, &MappingSet::default(), &expansion);
        let user = tree.find(&FieldPath::parse("user")).unwrap();
        assert!(user.collapsed);
        assert!(user.children().is_empty());
        assert!(!tree.positions.contains(&FieldPath::parse("user.name")));
        let tags = tree.positions.get(&FieldPath::parse("tags")).unwrap();
        assert_eq!(tags.y, 24.0);
    }

    #[test]
    fn rows_outside_visible_area_have_no_position() {
        let layout = PanelLayout {
            visible_height: Some(48.0),
            ..PanelLayout::default()
        };
        let tree = render_tree(
            &sample(),
            Role::Source,
            None,
            &MappingSet::default(),
            &layout,
            &Expansion::default(),
        );
        assert_eq!(tree.flatten().len(), 5);
        assert!(tree.positions.contains(&FieldPath::parse("user.name")));
        assert!(!tree.positions.contains(&FieldPath::parse("user.age")));
    }

    #[test]
    fn parent_path_prefixes_row_paths() {
        let parent = FieldPath::parse("root");
        let tree = render_tree(
            &object(json!({"a": 1})),
            Role::Target,
            Some(&parent),
            &MappingSet::default(),
            &PanelLayout::default(),
            &Expansion::default(),
        );
        assert_eq!(tree.rows[0].path, "root.a");
        assert_eq!(tree.rows[0].depth, 0);
    }
}
