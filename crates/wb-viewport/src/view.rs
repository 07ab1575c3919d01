//! Coordinate adapter and view contracts

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use wb_core::{Entity, PickFilter};

/// Conversion between screen pixels and world coordinates
pub trait CoordinateAdapter {
    /// World point under a screen point, exact (used for click origins)
    fn view_to_world(&self, screen: Vec2) -> Vec3;

    /// World point under a screen point while tracking a drag
    fn view_to_world_tracking(&self, screen: Vec2) -> Vec3 {
        self.view_to_world(screen)
    }

    /// Screen point of a world point, `None` when off-screen or behind the camera
    fn world_to_screen(&self, world: Vec3) -> Option<Vec2>;

    /// Snap a world point to the grid. Must be idempotent.
    fn snap(&self, world: Vec3) -> Vec3;

    /// Current zoom level of the view
    fn zoom(&self) -> f32;
}

/// A viewport the pointer tool operates in
pub trait View: CoordinateAdapter {
    /// Picking settings of this view
    fn pick_filter(&self) -> PickFilter;

    /// Whether polygon triggers are drawn (and therefore pickable)
    fn polygon_triggers_visible(&self) -> bool;

    /// Whether waypoints are drawn (and therefore marquee-selectable)
    fn waypoints_visible(&self) -> bool;

    /// Whether a click at `world` lands on the entity's footprint
    fn entity_hit(&self, entity: &Entity, world: Vec3) -> bool;

    /// Entity whose rendered model is under the screen point
    fn picked_3d_entity(&self, _screen: Vec2) -> Option<Uuid> {
        None
    }

    /// Show or hide the rubber-band rectangle
    fn rect_feedback(&mut self, active: bool, rect: ScreenRect);

    /// Request a repaint of this view
    fn invalidate(&mut self);
}

/// Axis-aligned rectangle in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl ScreenRect {
    /// Normalized rectangle spanning two corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Inclusive containment test
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Width and height
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}
