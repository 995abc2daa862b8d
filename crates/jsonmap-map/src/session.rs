//! A mapping session: inputs, rules, gesture state and the derived view.
//!
//! Every change is followed by a recomputation in a fixed order:
//!
//! 1. commit the change to the mapping set
//! 2. re-run the transform over all source records
//! 3. re-render both trees and their row positions
//! 4. recompute connector links
//!
//! Layout-only changes (scroll, collapse, resize) and drag or hover moves
//! start at step 3.

use serde_json::Value;
use tracing::{debug, warn};

use jsonmap_model::{FieldPath, MappingRule, Object, Role, display, expect_object, source_records};

use crate::connector::{Link, connect};
use crate::controller::{Command, DragController, Outcome};
use crate::layout::{Expansion, PanelLayout};
use crate::options::MapperOptions;
use crate::store::MappingSet;
use crate::transform::apply_to_records;
use crate::tree::{RenderedTree, render_tree};

/// Everything derived from the session inputs.
#[derive(Debug, Clone)]
struct SessionView {
    preview: Vec<Value>,
    source_tree: RenderedTree,
    target_tree: RenderedTree,
    links: Vec<Link>,
}

#[derive(Debug, Clone)]
pub struct MappingSession {
    records: Vec<Object>,
    target: Object,
    rules: MappingSet,
    controller: DragController,
    options: MapperOptions,
    source_expansion: Expansion,
    target_expansion: Expansion,
    view: SessionView,
}

impl MappingSession {
    /// Open a session over source records and a target shape.
    ///
    /// The first record is the one shown in the source panel.
    pub fn new(records: Vec<Object>, target: Object, options: MapperOptions) -> Self {
        let rules = MappingSet::new(options.fan_out);
        let mut session = Self {
            records,
            target,
            rules,
            controller: DragController::new(),
            options,
            source_expansion: Expansion::default(),
            target_expansion: Expansion::default(),
            view: SessionView {
                preview: Vec::new(),
                source_tree: RenderedTree::empty(Role::Source),
                target_tree: RenderedTree::empty(Role::Target),
                links: Vec::new(),
            },
        };
        session.refresh();
        session
    }

    /// Open a session from raw JSON documents.
    pub fn from_json(
        source: Value,
        target: Value,
        options: MapperOptions,
    ) -> jsonmap_model::Result<Self> {
        let records = source_records(source)?;
        let target = expect_object(target, "target")?;
        Ok(Self::new(records, target, options))
    }

    /// Append previously saved rules, as if each had been dropped in order.
    pub fn load_rules(&mut self, rules: impl IntoIterator<Item = MappingRule>) -> usize {
        let mut appended = 0;
        for rule in rules {
            if self.rules.append(rule).changed() {
                appended += 1;
            }
        }
        if appended > 0 {
            self.refresh();
        }
        appended
    }

    /// Apply one gesture.
    ///
    /// Gestures naming rows that are not on screen are filtered here: a drag
    /// from an unknown source row is ignored and a drop onto an unknown target
    /// row counts as dropping outside any target.
    pub fn dispatch(&mut self, command: Command) -> Outcome {
        let command = match command {
            Command::BeginDrag(source) if !self.view.source_tree.contains(&source) => {
                warn!(source = %source, "drag from unknown source row ignored");
                return Outcome::Ignored;
            }
            Command::Hover(Some(target)) if !self.view.target_tree.contains(&target) => {
                Command::Hover(None)
            }
            Command::Drop(target) if !self.view.target_tree.contains(&target) => {
                debug!(target = %target, "drop outside target rows");
                Command::Abort
            }
            other => other,
        };

        let outcome = self.controller.apply(command, &mut self.rules);
        if outcome.mutated() {
            self.refresh();
        } else if outcome != Outcome::Ignored {
            // Drag or hover moved; only the row flags change.
            self.refresh_layout();
        }
        outcome
    }

    /// Apply gestures in order, returning each outcome.
    pub fn dispatch_all(&mut self, commands: impl IntoIterator<Item = Command>) -> Vec<Outcome> {
        commands
            .into_iter()
            .map(|command| self.dispatch(command))
            .collect()
    }

    /// Collapse or expand a branch. Returns true when it is now collapsed.
    pub fn toggle_collapsed(&mut self, role: Role, path: &FieldPath) -> bool {
        let collapsed = match role {
            Role::Source => self.source_expansion.toggle(path),
            Role::Target => self.target_expansion.toggle(path),
        };
        self.refresh_layout();
        collapsed
    }

    pub fn scroll_to(&mut self, role: Role, offset: f32) {
        self.options.layout_mut(role).scroll_offset = offset;
        self.refresh_layout();
    }

    pub fn set_layout(&mut self, role: Role, layout: PanelLayout) {
        *self.options.layout_mut(role) = layout;
        self.refresh_layout();
    }

    pub fn rules(&self) -> &MappingSet {
        &self.rules
    }

    pub fn controller(&self) -> &DragController {
        &self.controller
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    pub fn records(&self) -> &[Object] {
        &self.records
    }

    pub fn target(&self) -> &Object {
        &self.target
    }

    /// Transformed records, as of the last mutation.
    pub fn preview(&self) -> &[Value] {
        &self.view.preview
    }

    /// Preview as indented JSON; empty when there are no source records.
    ///
    /// Integral floats are shown without a fraction.
    pub fn preview_json(&self) -> serde_json::Result<String> {
        if self.records.is_empty() {
            return Ok(String::new());
        }
        display::pretty(&self.view.preview)
    }

    pub fn source_tree(&self) -> &RenderedTree {
        &self.view.source_tree
    }

    pub fn target_tree(&self) -> &RenderedTree {
        &self.view.target_tree
    }

    pub fn links(&self) -> &[Link] {
        &self.view.links
    }

    /// Records to hand to the persistence gateway.
    pub fn payload(&self) -> Vec<Value> {
        self.view.preview.clone()
    }

    fn refresh(&mut self) {
        self.view.preview = apply_to_records(&self.records, &self.rules);
        self.refresh_layout();
    }

    fn refresh_layout(&mut self) {
        self.view.source_tree = match self.records.first() {
            Some(record) => render_tree(
                record,
                Role::Source,
                None,
                &self.rules,
                &self.options.source_layout,
                &self.source_expansion,
            ),
            None => RenderedTree::empty(Role::Source),
        };
        self.view.target_tree = render_tree(
            &self.target,
            Role::Target,
            None,
            &self.rules,
            &self.options.target_layout,
            &self.target_expansion,
        );
        self.view.source_tree.mark_drag(self.controller.state());
        self.view.target_tree.mark_drag(self.controller.state());
        self.view.links = connect(
            &self.rules,
            &self.view.source_tree.positions,
            &self.view.target_tree.positions,
            &self.options.connector,
        );
        debug!(
            rules = self.rules.len(),
            links = self.view.links.len(),
            "mapping view refreshed"
        );
    }
}
