//! Scripted pointer sessions
//!
//! A replay script is a RON file holding a scene, the view it is shown in,
//! the tool settings and a list of pointer events. Playing it drives a
//! [`PointerTool`] exactly like a host viewport would.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use wb_core::{Scene, ToolConfig};
use wb_viewport::{GizmoMode, OrthoView};

use crate::context::{Modifiers, ToolContext, TrackingMode};
use crate::document::EditorDocument;
use crate::pointer::PointerTool;
use crate::polygon::NoPolygons;

/// Errors raised while loading a replay script
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// One scripted input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ReplayEvent {
    /// Primary button pressed
    Down {
        point: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Pointer moved with the primary button held
    Drag {
        point: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    /// Pointer moved with no button held
    Hover { point: Vec2 },
    /// Primary button released
    Up {
        point: Vec2,
        #[serde(default)]
        modifiers: Modifiers,
    },
    SetMode(GizmoMode),
    Deactivate,
    Activate,
}

/// A scripted session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub scene: Scene,
    #[serde(default)]
    pub view: OrthoView,
    #[serde(default)]
    pub config: ToolConfig,
    #[serde(default)]
    pub events: Vec<ReplayEvent>,
}

impl ReplayScript {
    pub fn from_ron_str(text: &str) -> Result<Self, ReplayError> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}

/// State after playing a script
#[derive(Debug)]
pub struct Replay {
    pub view: OrthoView,
    pub doc: EditorDocument,
    pub tool: PointerTool,
}

impl Replay {
    /// Activate a fresh tool on the script's scene and play every event
    pub fn run(script: ReplayScript) -> Self {
        let mut replay = Self {
            view: script.view,
            doc: EditorDocument::new(script.scene),
            tool: PointerTool::new(script.config),
        };
        replay.apply(&ReplayEvent::Activate);
        for event in &script.events {
            replay.apply(event);
        }
        info!(
            "Replayed {} events, {} edits committed",
            script.events.len(),
            replay.doc.history().len()
        );
        replay
    }

    fn apply(&mut self, event: &ReplayEvent) {
        debug!(?event, "Replay event");
        let mut polygons = NoPolygons;
        let mut ctx = ToolContext::new(&mut self.view, &mut self.doc, &mut polygons);
        let tool = &mut self.tool;
        match *event {
            ReplayEvent::Down { point, modifiers } => {
                ctx.modifiers = modifiers;
                tool.mouse_down(TrackingMode::Left, point, &mut ctx);
            }
            ReplayEvent::Drag { point, modifiers } => {
                ctx.modifiers = modifiers;
                tool.mouse_moved(TrackingMode::Left, point, &mut ctx);
            }
            ReplayEvent::Hover { point } => tool.mouse_moved(TrackingMode::None, point, &mut ctx),
            ReplayEvent::Up { point, modifiers } => {
                ctx.modifiers = modifiers;
                tool.mouse_up(TrackingMode::Left, point, &mut ctx);
            }
            ReplayEvent::SetMode(mode) => tool.set_gizmo_mode(mode, &mut ctx),
            ReplayEvent::Deactivate => tool.deactivate(&mut ctx),
            ReplayEvent::Activate => tool.activate(&mut ctx),
        }
    }
}
