//! Gizmo handle dragging

use glam::{Vec2, Vec3};
use tracing::warn;

use wb_viewport::GizmoHandle;

use super::PointerTool;
use crate::context::ToolContext;
use crate::drag::{local_translation, rotation_status, snap_destination, z_height};

impl PointerTool {
    pub(super) fn drag_gizmo(&mut self, screen: Vec2, ctx: &mut ToolContext<'_>) {
        let world = ctx.view.view_to_world_tracking(screen);

        // Polygon points are edited in place; no pending edit is involved
        if self.gizmo.is_polygon_target() {
            self.apply_handle(screen, world, ctx);
            ctx.view.invalidate();
            return;
        }

        if self.edit.is_none() {
            warn!("Gizmo move without a pending edit, ignoring");
            return;
        }

        Self::invalidate_selected(ctx);
        self.apply_handle(screen, world, ctx);
        Self::invalidate_selected(ctx);

        self.update_gizmo_center(ctx);
        ctx.doc.refresh_all_views();
    }

    fn apply_handle(&mut self, screen: Vec2, world: Vec3, ctx: &mut ToolContext<'_>) {
        match self.gizmo.active {
            GizmoHandle::None => {}
            GizmoHandle::RotateZ => self.rotate_with_gizmo(world, ctx),
            GizmoHandle::MoveZ => self.lift_with_gizmo(screen, ctx),
            handle => self.translate_with_gizmo(handle, world, ctx),
        }
    }

    fn translate_with_gizmo(&mut self, handle: GizmoHandle, world: Vec3, ctx: &mut ToolContext<'_>) {
        let delta = (world - self.session.start_world).truncate();
        let offset = local_translation(handle, self.gizmo.angle, delta);
        let offset = snap_destination(&*ctx.view, self.session.start_center, offset);

        if self.gizmo.is_polygon_target() {
            if ctx.polygons.has_selected_point() {
                ctx.polygons.set_selected_point_offset(offset);
            } else {
                ctx.polygons.set_polygon_offset(offset);
            }
            // Nothing else recomputes the center this frame
            self.gizmo.center = self.session.start_center + offset.extend(0.0);
        } else if let Some(edit) = self.edit.as_mut() {
            edit.set_planar_offset(ctx.doc.scene_mut(), offset);
        }
    }

    fn lift_with_gizmo(&mut self, screen: Vec2, ctx: &mut ToolContext<'_>) {
        if self.config.lock_z_axis || self.gizmo.is_polygon_target() {
            return;
        }
        let height = z_height(
            self.session.start_z,
            self.session.start_screen,
            screen,
            self.config.z_drag_sensitivity,
        );
        if let Some(edit) = self.edit.as_mut() {
            edit.set_z_offset(ctx.doc.scene_mut(), height - self.session.start_z);
        }
    }

    fn rotate_with_gizmo(&mut self, world: Vec3, ctx: &mut ToolContext<'_>) {
        let center = self.gizmo.center;
        let step =
            self.session
                .advance_rotation(world, center, &self.config, ctx.modifiers.shift);

        if self.gizmo.is_polygon_target() {
            // Polygons store points, so they turn incrementally
            ctx.polygons.rotate_selected_polygon(step.frame_delta, center);
            self.update_gizmo_center(ctx);
        } else if let Some(edit) = self.edit.as_mut() {
            edit.rotate_to(ctx.doc.scene_mut(), step.angle);
        }

        ctx.doc
            .set_status_text(rotation_status(step.delta, self.config.rotation_snap_degrees));
    }
}
