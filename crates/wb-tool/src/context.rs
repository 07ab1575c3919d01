//! Per-event input and collaborators handed to the pointer tool

use serde::{Deserialize, Serialize};

use wb_viewport::View;

use crate::document::Document;
use crate::polygon::PolygonTool;

/// Which mouse button, if any, is driving the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingMode {
    /// No button held: hover only
    #[default]
    None,
    /// Primary button: picking and manipulation
    Left,
    /// Secondary button: ignored by the pointer tool
    Right,
}

/// Modifier keys held during the event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    /// Toggle selection; free rotation while dragging the ring
    #[serde(default)]
    pub shift: bool,
    /// Extend picks to the whole connected waypoint path
    #[serde(default)]
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ctrl: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        shift: false,
        ctrl: true,
    };
}

/// Everything a pointer event handler needs besides the tool itself
pub struct ToolContext<'a> {
    pub view: &'a mut dyn View,
    pub doc: &'a mut dyn Document,
    pub polygons: &'a mut dyn PolygonTool,
    pub modifiers: Modifiers,
}

impl<'a> ToolContext<'a> {
    pub fn new(
        view: &'a mut dyn View,
        doc: &'a mut dyn Document,
        polygons: &'a mut dyn PolygonTool,
    ) -> Self {
        Self {
            view,
            doc,
            polygons,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Polygon sub-tool pivot: selected point first, then polygon centroid
    pub fn polygon_pivot(&self) -> Option<glam::Vec3> {
        self.polygons
            .selected_point_center()
            .or_else(|| self.polygons.selected_polygon_center())
    }
}
