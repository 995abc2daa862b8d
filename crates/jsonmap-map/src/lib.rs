//! Mapping engine for renaming fields of nested JSON objects.
//!
//! A user drags a source field onto a target field; each drop becomes a
//! [`MappingRule`](jsonmap_model::MappingRule) in a [`MappingSet`]. The set is
//! applied to the source data by [`apply_mapping`], which renames fields in
//! place, and is visualised by [`connect`] as links between the rows produced
//! by [`render_tree`].
//!
//! # Example
//!
//! ```ignore
//! use jsonmap_map::{Command, MapperOptions, MappingSession};
//! use jsonmap_model::FieldPath;
//!
//! let mut session = MappingSession::from_json(source, target, MapperOptions::default())?;
//! session.dispatch(Command::BeginDrag(FieldPath::parse("user.name")));
//! session.dispatch(Command::Drop(FieldPath::parse("profile.fullName")));
//!
//! println!("{}", session.preview_json()?);
//! for link in session.links() {
//!     println!("{} -> {} ({})", link.source, link.target, link.color);
//! }
//! ```

#![deny(unsafe_code)]

pub mod connector;
pub mod controller;
pub mod layout;
pub mod options;
pub mod session;
pub mod store;
pub mod transform;
pub mod tree;

pub use connector::{ConnectorStyle, DEFAULT_PALETTE, Link, connect};
pub use controller::{Command, DragController, DragState, Outcome};
pub use layout::{Expansion, PanelLayout};
pub use options::MapperOptions;
pub use session::MappingSession;
pub use store::{AppendOutcome, FanOutPolicy, MappingSet};
pub use transform::{apply_mapping, apply_to_records, apply_to_value};
pub use tree::{PositionMap, RenderedTree, Row, RowKind, RowStatus, render_tree};
