//! Select/move/rotate pointer tool
//!
//! The tool is a small state machine driven by pointer events. A mouse-down
//! decides what the drag will do (gizmo manipulation, polygon sub-tool,
//! plain object move or rubber-band selection); moves apply it; the
//! mouse-up commits or finalizes it.

mod gizmo_drag;
mod input;

#[cfg(test)]
mod tests;

use glam::{Vec2, Vec3};
use tracing::debug;
use uuid::Uuid;

use wb_core::{SelectionCleared, ToolConfig};
use wb_viewport::{Gizmo, GizmoCursor, GizmoHandle, GizmoMode};

use crate::context::ToolContext;
use crate::drag::DragSession;
use crate::edit::ModifyEdit;

/// What the current left-button drag is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    /// No drag in progress
    #[default]
    Idle,
    /// Rubber-band selection
    DragSelectRect,
    /// Dragging a gizmo handle
    MovingGizmo,
    /// Plain drag of the picked selection; `moving` once past the hysteresis
    MovingObject { moving: bool },
    /// The polygon sub-tool owns the drag
    DelegatedToPolygonTool,
}

/// The pointer tool
#[derive(Debug)]
pub struct PointerTool {
    config: ToolConfig,
    gizmo: Gizmo,
    state: PointerState,
    /// Selected entity the current drag acts through
    current_object: Option<Uuid>,
    /// Pending edit owned by the tool until committed
    edit: Option<ModifyEdit>,
    session: DragSession,
    down_screen: Vec2,
    /// Snapped click point, shifted so the dragged object lands on the grid
    down_world: Vec3,
    rotating: bool,
    /// Pointer events are ignored unless the tool is active
    active: bool,
}

impl Default for PointerTool {
    fn default() -> Self {
        Self::new(ToolConfig::default())
    }
}

impl PointerTool {
    pub fn new(config: ToolConfig) -> Self {
        Self {
            config,
            gizmo: Gizmo::new(),
            state: PointerState::Idle,
            current_object: None,
            edit: None,
            session: DragSession::default(),
            down_screen: Vec2::ZERO,
            down_world: Vec3::ZERO,
            rotating: false,
            active: false,
        }
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Settings are read on every drag frame; changes apply on the next move
    pub fn config_mut(&mut self) -> &mut ToolConfig {
        &mut self.config
    }

    pub fn gizmo(&self) -> &Gizmo {
        &self.gizmo
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn current_object(&self) -> Option<Uuid> {
        self.current_object
    }

    /// True between [`Self::activate`] and [`Self::deactivate`]
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn has_pending_edit(&self) -> bool {
        self.edit.is_some()
    }

    /// True while the rotation ring is being dragged
    pub fn is_rotating(&self) -> bool {
        self.rotating
    }

    /// Cursor for the handle under the pointer
    pub fn cursor(&self) -> GizmoCursor {
        self.gizmo.cursor()
    }

    /// Make this the active tool
    pub fn activate(&mut self, ctx: &mut ToolContext<'_>) {
        self.active = true;
        self.gizmo.hovered = GizmoHandle::None;
        self.gizmo.active = GizmoHandle::None;
        self.check_for_properties_panel(ctx);
        self.update_gizmo_center(ctx);
        debug!("Pointer tool activated");
    }

    /// Switch away from this tool.
    ///
    /// Any drag in progress is abandoned: the pending edit is reverted and
    /// dropped, never committed. The selection is left alone.
    pub fn deactivate(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(edit) = self.edit.take() {
            edit.revert(ctx.doc.scene_mut());
            debug!("Discarded pending edit on deactivate");
        }
        self.active = false;
        self.state = PointerState::Idle;
        self.current_object = None;
        self.rotating = false;
        self.gizmo.visible = false;
        self.gizmo.active = GizmoHandle::None;
        self.gizmo.hovered = GizmoHandle::None;
        ctx.polygons.deactivate();
    }

    /// Switch between the translate handles and the rotation ring
    pub fn set_gizmo_mode(&mut self, mode: GizmoMode, ctx: &mut ToolContext<'_>) {
        self.gizmo.mode = mode;
        self.update_gizmo_center(ctx);
        ctx.view.invalidate();
    }

    /// Re-derive the gizmo pivot from the selection
    pub fn update_gizmo_center(&mut self, ctx: &ToolContext<'_>) {
        self.gizmo.update_pivot(ctx.doc.scene(), ctx.polygon_pivot());
    }

    /// Show the properties panel matching the selection
    pub fn check_for_properties_panel(&self, ctx: &mut ToolContext<'_>) {
        let shape = ctx
            .doc
            .scene()
            .selection_shape(ctx.polygons.selected_polygon_kind());
        ctx.doc.show_properties(shape);
    }

    /// Deselect everything, polygon triggers included
    pub fn clear_selection(&mut self, ctx: &mut ToolContext<'_>) {
        let cleared = ctx.doc.scene_mut().clear_selection();
        ctx.polygons.clear_selection();
        self.selection_cleared(cleared, ctx);
    }

    fn selection_cleared(&mut self, _cleared: SelectionCleared, ctx: &ToolContext<'_>) {
        self.update_gizmo_center(ctx);
    }

    fn invalidate_selected(ctx: &mut ToolContext<'_>) {
        for id in ctx.doc.scene().selected_ids() {
            ctx.doc.invalidate_entity(id);
        }
    }
}
