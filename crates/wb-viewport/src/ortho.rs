//! Oblique top-down map view

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use wb_core::{Entity, PickFilter};

use crate::view::{CoordinateAdapter, ScreenRect, View};

/// Top-down orthographic view with height drawn as an upward screen offset.
///
/// World X runs right, world Y runs up the screen and each unit of height
/// lifts a point by `z_lift` pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrthoView {
    /// Screen position of the world origin
    pub origin: Vec2,
    /// Pixels per world unit
    pub pixels_per_unit: f32,
    /// Screen pixels per world unit of height
    pub z_lift: f32,
    /// Zoom level reported to the gizmo
    pub zoom: f32,
    /// Grid spacing for snapping (`None` disables snapping)
    pub grid: Option<f32>,
    /// Pick footprint radius in world units
    pub pick_radius: f32,
    /// Picking settings
    pub filter: PickFilter,
    /// Whether polygon triggers are drawn
    pub show_polygon_triggers: bool,
    /// Whether waypoints are drawn
    pub show_waypoints: bool,
    /// Current rubber-band rectangle, if shown
    #[serde(skip)]
    pub feedback: Option<ScreenRect>,
    /// Repaint requests since creation
    #[serde(skip)]
    pub invalidations: usize,
}

impl Default for OrthoView {
    fn default() -> Self {
        Self {
            origin: Vec2::ZERO,
            pixels_per_unit: 1.0,
            z_lift: 0.5,
            zoom: 200.0,
            grid: None,
            pick_radius: 5.0,
            filter: PickFilter::default(),
            show_polygon_triggers: true,
            show_waypoints: true,
            feedback: None,
            invalidations: 0,
        }
    }
}

impl OrthoView {
    /// Create a view with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable grid snapping with the given spacing
    pub fn with_grid(mut self, spacing: f32) -> Self {
        self.grid = Some(spacing);
        self
    }
}

impl CoordinateAdapter for OrthoView {
    fn view_to_world(&self, screen: Vec2) -> Vec3 {
        let local = (screen - self.origin) / self.pixels_per_unit;
        Vec3::new(local.x, -local.y, 0.0)
    }

    fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let x = self.origin.x + world.x * self.pixels_per_unit;
        let y = self.origin.y - world.y * self.pixels_per_unit - world.z * self.z_lift;
        Some(Vec2::new(x, y))
    }

    fn snap(&self, world: Vec3) -> Vec3 {
        match self.grid {
            Some(spacing) if spacing > 0.0 => Vec3::new(
                (world.x / spacing).round() * spacing,
                (world.y / spacing).round() * spacing,
                world.z,
            ),
            _ => world,
        }
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }
}

impl View for OrthoView {
    fn pick_filter(&self) -> PickFilter {
        self.filter
    }

    fn polygon_triggers_visible(&self) -> bool {
        self.show_polygon_triggers
    }

    fn waypoints_visible(&self) -> bool {
        self.show_waypoints
    }

    fn entity_hit(&self, entity: &Entity, world: Vec3) -> bool {
        entity.position.truncate().distance_squared(world.truncate())
            <= self.pick_radius * self.pick_radius
    }

    fn rect_feedback(&mut self, active: bool, rect: ScreenRect) {
        self.feedback = active.then_some(rect);
    }

    fn invalidate(&mut self) {
        self.invalidations += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_roundtrip_on_ground() {
        let view = OrthoView {
            origin: Vec2::new(400.0, 300.0),
            pixels_per_unit: 2.0,
            ..OrthoView::default()
        };
        let world = Vec3::new(12.5, -7.0, 0.0);
        let screen = view.world_to_screen(world).unwrap();
        assert_eq!(screen, Vec2::new(425.0, 314.0));
        assert!((view.view_to_world(screen) - world).length() < 1e-5);
    }

    #[test]
    fn test_height_lifts_on_screen() {
        let view = OrthoView::default();
        let ground = view.world_to_screen(Vec3::ZERO).unwrap();
        let raised = view.world_to_screen(Vec3::new(0.0, 0.0, 10.0)).unwrap();
        assert!(raised.y < ground.y);
        assert_eq!(raised.x, ground.x);
    }

    #[test]
    fn test_snap_is_idempotent() {
        let view = OrthoView::default().with_grid(10.0);
        let snapped = view.snap(Vec3::new(14.0, 26.0, 3.0));
        assert_eq!(snapped, Vec3::new(10.0, 30.0, 3.0));
        assert_eq!(view.snap(snapped), snapped);
    }
}
