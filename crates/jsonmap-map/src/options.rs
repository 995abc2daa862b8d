//! Configuration options for a mapping session.

use serde::{Deserialize, Serialize};

use jsonmap_model::Role;

use crate::connector::ConnectorStyle;
use crate::layout::PanelLayout;
use crate::store::FanOutPolicy;

/// Default horizontal position of the target panel.
pub const TARGET_PANEL_X: f32 = 480.0;

/// Options controlling mapping and presentation behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperOptions {
    /// How repeated drops from one source field are stored.
    pub fan_out: FanOutPolicy,
    pub source_layout: PanelLayout,
    pub target_layout: PanelLayout,
    pub connector: ConnectorStyle,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            fan_out: FanOutPolicy::default(),
            source_layout: PanelLayout::default(),
            target_layout: PanelLayout::at(TARGET_PANEL_X),
            connector: ConnectorStyle::default(),
        }
    }
}

impl MapperOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fan_out(mut self, policy: FanOutPolicy) -> Self {
        self.fan_out = policy;
        self
    }

    pub fn with_connector(mut self, connector: ConnectorStyle) -> Self {
        self.connector = connector;
        self
    }

    pub fn layout(&self, role: Role) -> &PanelLayout {
        match role {
            Role::Source => &self.source_layout,
            Role::Target => &self.target_layout,
        }
    }

    pub fn layout_mut(&mut self, role: Role) -> &mut PanelLayout {
        match role {
            Role::Source => &mut self.source_layout,
            Role::Target => &mut self.target_layout,
        }
    }
}
