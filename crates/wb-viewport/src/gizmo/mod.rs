//! Transform gizmo geometry
//!
//! The gizmo is a pure projection of the selection: its pivot comes from the
//! selected entities (or the polygon sub-tool), its scale from the view zoom.
//! This module places it, projects its handles into screen space and
//! hit-tests pointer positions against them. Drawing is left to the host.

mod collision;

pub use collision::{distance_to_segment, point_in_quad, ring_hit};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use tracing::debug;

use wb_core::Scene;

use crate::constants::{gizmo as size, pick, scale as zoom_scale};
use crate::view::CoordinateAdapter;

/// Gizmo mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoMode {
    /// Axis and plane translation handles
    #[default]
    Translate,
    /// Yaw rotation ring
    Rotate,
}

/// Which gizmo handle is hovered or being dragged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoHandle {
    /// No handle
    #[default]
    None,
    /// Local X axis
    MoveX,
    /// Local Y axis
    MoveY,
    /// World Z axis
    MoveZ,
    /// Local XY plane square
    MoveXY,
    /// Yaw ring
    RotateZ,
}

impl GizmoHandle {
    /// True for any handle
    pub fn is_some(&self) -> bool {
        *self != GizmoHandle::None
    }

    /// True for the translation handles
    pub fn is_translation(&self) -> bool {
        matches!(
            self,
            GizmoHandle::MoveX | GizmoHandle::MoveY | GizmoHandle::MoveZ | GizmoHandle::MoveXY
        )
    }
}

/// What the gizmo acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GizmoTarget {
    /// Selected scene entities, edited through a pending edit
    #[default]
    Entities,
    /// Selected polygon trigger point or whole polygon
    Polygon,
}

/// Cursor to show for the hovered handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoCursor {
    /// Regular pointer
    Default,
    /// Over a translation handle
    Move,
    /// Over the rotation ring
    Rotate,
}

/// Gizmo pivot derived from the current selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pivot {
    /// Gizmo center in world space
    pub center: Vec3,
    /// Gizmo orientation (yaw) in radians
    pub angle: f32,
    /// What the gizmo manipulates
    pub target: GizmoTarget,
}

/// Compute the gizmo pivot.
///
/// With entities selected the center is the mean of their positions and the
/// angle is the first selected entity's angle. Otherwise `polygon_pivot`
/// (the polygon sub-tool's selected point or polygon centroid) is used with
/// angle zero. `None` means the gizmo is hidden.
pub fn compute_pivot(scene: &Scene, polygon_pivot: Option<Vec3>) -> Option<Pivot> {
    let mut sum = Vec3::ZERO;
    let mut count = 0usize;
    for entity in scene.selected() {
        sum += entity.position;
        count += 1;
    }

    if let Some(first) = scene.first_selected() {
        return Some(Pivot {
            center: sum / count as f32,
            angle: first.angle,
            target: GizmoTarget::Entities,
        });
    }

    polygon_pivot.map(|center| Pivot {
        center,
        angle: 0.0,
        target: GizmoTarget::Polygon,
    })
}

/// Gizmo scale for a zoom level
pub fn scale_for_zoom(zoom: f32) -> f32 {
    (zoom / zoom_scale::ZOOM_DIVISOR).clamp(zoom_scale::MIN, zoom_scale::MAX)
}

/// Gizmo handles projected into screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoLayout {
    /// Projected gizmo center
    pub center: Vec2,
    /// Local X axis end, if it projects
    pub x_end: Option<Vec2>,
    /// Local Y axis end, if it projects
    pub y_end: Option<Vec2>,
    /// World Z axis end, if it projects
    pub z_end: Option<Vec2>,
    /// XY plane square corners, if all four project
    pub plane: Option<[Vec2; 4]>,
    /// Projected ring radius in pixels
    pub ring_radius: f32,
    /// Axis hit tolerance in pixels
    pub tolerance: f32,
}

impl GizmoLayout {
    /// Ring hit tolerance in pixels
    pub fn ring_tolerance(&self) -> f32 {
        self.tolerance.max(self.ring_radius * pick::RING_TOLERANCE_RATIO)
    }
}

/// Transform gizmo state
#[derive(Debug, Clone)]
pub struct Gizmo {
    /// Shown when something is selected
    pub visible: bool,
    /// Translate or rotate
    pub mode: GizmoMode,
    /// Center in world space
    pub center: Vec3,
    /// Screen-relative scale from the view zoom
    pub scale: f32,
    /// Orientation (yaw) in radians
    pub angle: f32,
    /// What the gizmo manipulates
    pub target: GizmoTarget,
    /// Handle under the pointer while no button is held
    pub hovered: GizmoHandle,
    /// Handle being dragged
    pub active: GizmoHandle,
}

impl Default for Gizmo {
    fn default() -> Self {
        Self {
            visible: false,
            mode: GizmoMode::Translate,
            center: Vec3::ZERO,
            scale: 1.0,
            angle: 0.0,
            target: GizmoTarget::Entities,
            hovered: GizmoHandle::None,
            active: GizmoHandle::None,
        }
    }
}

impl Gizmo {
    /// Create a hidden gizmo
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-derive center, angle, visibility and target from the selection
    pub fn update_pivot(&mut self, scene: &Scene, polygon_pivot: Option<Vec3>) {
        match compute_pivot(scene, polygon_pivot) {
            Some(pivot) => {
                if !self.visible || self.target != pivot.target {
                    debug!(kind = ?pivot.target, center = ?pivot.center, "Gizmo shown");
                }
                self.center = pivot.center;
                self.angle = pivot.angle;
                self.target = pivot.target;
                self.visible = true;
            }
            None => {
                if self.visible {
                    debug!("Gizmo hidden");
                }
                self.visible = false;
                self.target = GizmoTarget::Entities;
            }
        }
    }

    /// Re-derive the scale from the view zoom
    pub fn update_scale(&mut self, zoom: f32) {
        self.scale = scale_for_zoom(zoom);
    }

    /// True when the gizmo acts on a polygon trigger
    pub fn is_polygon_target(&self) -> bool {
        self.target == GizmoTarget::Polygon
    }

    /// Cursor for the hovered handle
    pub fn cursor(&self) -> GizmoCursor {
        match self.hovered {
            GizmoHandle::RotateZ => GizmoCursor::Rotate,
            handle if handle.is_translation() => GizmoCursor::Move,
            _ => GizmoCursor::Default,
        }
    }

    /// Unit direction of the local X axis in the ground plane
    pub fn local_x(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    /// Unit direction of the local Y axis in the ground plane
    pub fn local_y(&self) -> Vec2 {
        self.local_x().perp()
    }

    /// Project the handles through the view.
    ///
    /// `None` when the gizmo is hidden or its center does not project.
    pub fn layout<V: CoordinateAdapter + ?Sized>(&self, view: &V) -> Option<GizmoLayout> {
        if !self.visible {
            return None;
        }
        let center = view.world_to_screen(self.center)?;
        let project = |offset: Vec3| view.world_to_screen(self.center + offset);

        let axis_length = size::AXIS_LENGTH * self.scale;
        let screen_axis_length = project(Vec3::X * axis_length)
            .map(|end| end.distance(center))
            .unwrap_or(0.0);
        let tolerance = pick::TOLERANCE_FLOOR.max(screen_axis_length * pick::AXIS_TOLERANCE_RATIO);

        let ring_radius = project(Vec3::X * size::RING_RADIUS * self.scale)
            .map(|edge| edge.distance(center))
            .unwrap_or(0.0);

        let x_dir = self.local_x().extend(0.0);
        let y_dir = self.local_y().extend(0.0);

        let half = size::PLANE_HALF_SIZE * self.scale;
        let corners = [
            (x_dir + y_dir) * half,
            (-x_dir + y_dir) * half,
            (-x_dir - y_dir) * half,
            (x_dir - y_dir) * half,
        ];
        let plane = match corners.map(|corner| project(corner)) {
            [Some(a), Some(b), Some(c), Some(d)] => Some([a, b, c, d]),
            _ => None,
        };

        Some(GizmoLayout {
            center,
            x_end: project(x_dir * axis_length),
            y_end: project(y_dir * axis_length),
            z_end: project(Vec3::Z * axis_length),
            plane,
            ring_radius,
            tolerance,
        })
    }

    /// Which handle, if any, is under a screen point.
    ///
    /// Returns the first axis within tolerance in Z, X, Y order, not the
    /// closest one, so Z wins where they overlap. The plane square is only
    /// tested when no axis is hit. Handles that do not project are skipped.
    pub fn pick<V: CoordinateAdapter + ?Sized>(&self, screen: Vec2, view: &V) -> GizmoHandle {
        let Some(layout) = self.layout(view) else {
            return GizmoHandle::None;
        };

        match self.mode {
            GizmoMode::Rotate => {
                if layout.ring_radius > 0.0
                    && ring_hit(screen, layout.center, layout.ring_radius, layout.ring_tolerance())
                {
                    return GizmoHandle::RotateZ;
                }
            }
            GizmoMode::Translate => {
                let axes = [
                    (GizmoHandle::MoveZ, layout.z_end),
                    (GizmoHandle::MoveX, layout.x_end),
                    (GizmoHandle::MoveY, layout.y_end),
                ];
                for (handle, end) in axes {
                    if let Some(end) = end {
                        if distance_to_segment(screen, layout.center, end) < layout.tolerance {
                            return handle;
                        }
                    }
                }

                if let Some(plane) = layout.plane {
                    if point_in_quad(screen, &plane) {
                        return GizmoHandle::MoveXY;
                    }
                }
            }
        }

        GizmoHandle::None
    }
}
