//! Drag-and-drop interaction as an explicit state machine.
//!
//! Pointer gestures arrive as [`Command`]s. Only this controller mutates the
//! [`MappingSet`]: a completed drop appends a rule, a cancel click removes all
//! rules for a source path.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use jsonmap_model::{FieldPath, MappingRule};

use crate::store::{AppendOutcome, MappingSet};

/// A discrete user gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "path", rename_all = "snake_case")]
pub enum Command {
    /// Start dragging the source row at this path.
    BeginDrag(FieldPath),
    /// The pointer is over this target row (or over none).
    Hover(Option<FieldPath>),
    /// Release over the target row at this path.
    Drop(FieldPath),
    /// Release anywhere that is not a target row.
    Abort,
    /// Click the cancel affordance of the source row at this path.
    CancelAt(FieldPath),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        source: FieldPath,
        /// Target row currently under the pointer.
        hover: Option<FieldPath>,
    },
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command does not apply in the current state.
    Ignored,
    DragStarted,
    HoverChanged,
    /// A drop completed; the store reported this.
    Dropped { rule: MappingRule, append: AppendOutcome },
    Aborted,
    Cancelled { removed: usize },
}

impl Outcome {
    /// True when the mapping set changed.
    pub fn mutated(&self) -> bool {
        match self {
            Self::Dropped { append, .. } => append.changed(),
            Self::Cancelled { removed } => *removed > 0,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Source path being dragged, if any.
    pub fn dragging(&self) -> Option<&FieldPath> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(source),
            DragState::Idle => None,
        }
    }

    /// Target path highlighted as the drop site, if any.
    pub fn hovered(&self) -> Option<&FieldPath> {
        match &self.state {
            DragState::Dragging { hover, .. } => hover.as_ref(),
            DragState::Idle => None,
        }
    }

    pub fn apply(&mut self, command: Command, rules: &mut MappingSet) -> Outcome {
        trace!(?command, state = ?self.state, "drag command");
        match command {
            Command::BeginDrag(source) => {
                debug!(source = %source, "drag started");
                self.state = DragState::Dragging {
                    source,
                    hover: None,
                };
                Outcome::DragStarted
            }
            Command::Hover(target) => match &mut self.state {
                DragState::Dragging { hover, .. } => {
                    if *hover == target {
                        Outcome::Ignored
                    } else {
                        *hover = target;
                        Outcome::HoverChanged
                    }
                }
                DragState::Idle => Outcome::Ignored,
            },
            Command::Drop(target) => match std::mem::take(&mut self.state) {
                DragState::Dragging { source, .. } => {
                    let rule = MappingRule::new(source, target);
                    let append = rules.append(rule.clone());
                    Outcome::Dropped { rule, append }
                }
                DragState::Idle => Outcome::Ignored,
            },
            Command::Abort => match std::mem::take(&mut self.state) {
                DragState::Dragging { source, .. } => {
                    debug!(source = %source, "drag aborted");
                    Outcome::Aborted
                }
                DragState::Idle => Outcome::Ignored,
            },
            Command::CancelAt(source) => Outcome::Cancelled {
                removed: rules.remove_by_source(&source),
            },
        }
    }
}
