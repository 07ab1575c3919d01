//! Drag transform engine
//!
//! Turns a handle and the current pointer position into a translation offset
//! or a rotation step. Everything here is pure; the pointer tool routes the
//! results to the pending edit or the polygon sub-tool.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use wb_core::ToolConfig;
use wb_viewport::{CoordinateAdapter, GizmoHandle};

/// Per-drag state captured on mouse-down
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragSession {
    /// Pointer position when the drag started
    pub start_screen: Vec2,
    /// World point under the pointer when the drag started
    pub start_world: Vec3,
    /// Gizmo center when the drag started
    pub start_center: Vec3,
    /// Gizmo angle when the drag started
    pub object_start_angle: f32,
    /// Gizmo height when the drag started
    pub start_z: f32,
    /// Pointer angle around the center on the previous frame
    pub prev_mouse_angle: f32,
    /// Sum of wrapped per-frame pointer angle deltas
    pub accumulated_delta: f32,
    /// Last reported rotation (final angle minus start angle)
    pub rotation_delta: f32,
}

impl DragSession {
    /// Start a drag at `screen`/`world` on a gizmo centered at `center`
    pub fn begin(screen: Vec2, world: Vec3, center: Vec3, angle: f32) -> Self {
        Self {
            start_screen: screen,
            start_world: world,
            start_center: center,
            object_start_angle: angle,
            start_z: center.z,
            prev_mouse_angle: pointer_angle(world, center),
            accumulated_delta: 0.0,
            rotation_delta: 0.0,
        }
    }

    /// Advance the rotation by one pointer sample.
    ///
    /// The frame delta is measured against the previous sample, not the drag
    /// start, and wrapped into `[-PI, PI]` so crossing the atan2 seam never
    /// jumps.
    pub fn advance_rotation(
        &mut self,
        world: Vec3,
        center: Vec3,
        config: &ToolConfig,
        free_rotation: bool,
    ) -> RotationStep {
        let current = pointer_angle(world, center);
        let frame_delta = wrap_angle(current - self.prev_mouse_angle);
        self.prev_mouse_angle = current;
        self.accumulated_delta += frame_delta;

        let raw = self.object_start_angle + self.accumulated_delta * config.rotation_gain;
        let angle = if config.snaps_rotation(free_rotation) {
            snap_angle_degrees(raw.to_degrees(), config.rotation_snap_degrees).to_radians()
        } else {
            raw
        };
        self.rotation_delta = angle - self.object_start_angle;

        RotationStep {
            frame_delta: frame_delta * config.rotation_gain,
            angle,
            delta: self.rotation_delta,
        }
    }
}

/// Result of one rotation sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationStep {
    /// Gain-scaled, unsnapped rotation since the previous sample
    pub frame_delta: f32,
    /// Absolute angle to rotate to (snapped unless free)
    pub angle: f32,
    /// `angle` minus the start angle
    pub delta: f32,
}

/// Planar angle of `world` around `center`
pub fn pointer_angle(world: Vec3, center: Vec3) -> f32 {
    let d = world.truncate() - center.truncate();
    d.y.atan2(d.x)
}

/// Wrap an angle difference into `[-PI, PI]`
pub fn wrap_angle(mut angle: f32) -> f32 {
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Snap degrees to the nearest multiple of `step`, halves rounding up
pub fn snap_angle_degrees(degrees: f32, step: f32) -> f32 {
    if step <= 0.0 {
        return degrees;
    }
    ((degrees + step / 2.0) / step).floor() * step
}

/// Project a world-space drag delta onto the handle's axes.
///
/// The axis handles keep only the component along the gizmo's local axis;
/// the plane handle passes the delta through. Other handles yield nothing.
pub fn local_translation(handle: GizmoHandle, angle: f32, delta: Vec2) -> Vec2 {
    let local_x = Vec2::from_angle(angle);
    let local_y = local_x.perp();
    match handle {
        GizmoHandle::MoveX => local_x * delta.dot(local_x),
        GizmoHandle::MoveY => local_y * delta.dot(local_y),
        GizmoHandle::MoveXY => delta,
        _ => Vec2::ZERO,
    }
}

/// Snap the destination of a planar move and return the effective offset
pub fn snap_destination<V: CoordinateAdapter + ?Sized>(
    view: &V,
    start_center: Vec3,
    offset: Vec2,
) -> Vec2 {
    let destination = start_center + offset.extend(0.0);
    (view.snap(destination) - start_center).truncate()
}

/// Height for a Z-handle drag: screen-up movement raises the object
pub fn z_height(start_z: f32, start_screen: Vec2, screen: Vec2, sensitivity: f32) -> f32 {
    start_z + (start_screen.y - screen.y) * sensitivity
}

/// Status bar text for a rotation in progress
pub fn rotation_status(delta: f32, snap_degrees: f32) -> String {
    if snap_degrees > 0.0 {
        format!(
            "Rotation: {:.0} degrees (Shift for free rotation, snap: {:.0})",
            delta.to_degrees(),
            snap_degrees
        )
    } else {
        format!("Rotation: {:.1} degrees", delta.to_degrees())
    }
}
