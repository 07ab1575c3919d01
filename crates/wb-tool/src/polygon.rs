//! Polygon trigger sub-tool contract
//!
//! Polygon triggers are edited by their own tool; the pointer tool only hands
//! it mouse-downs it cannot use and drives it from the gizmo.

use glam::{Vec2, Vec3};

use wb_core::PolygonKind;
use wb_viewport::View;

/// Polygon trigger editing, as seen by the pointer tool
pub trait PolygonTool {
    /// Try to pick a trigger point or edge under the pointer.
    ///
    /// Returns true when something was hit and the sub-tool takes the drag.
    fn pick_on_mouse_down(&mut self, screen: Vec2, world: Vec3, view: &dyn View) -> bool;

    fn start_drag(&mut self, screen: Vec2, world: Vec3);

    fn on_move(&mut self, screen: Vec2, world: Vec3);

    fn on_up(&mut self, screen: Vec2, world: Vec3);

    fn selected_point_center(&self) -> Option<Vec3>;

    fn selected_polygon_center(&self) -> Option<Vec3>;

    /// Kind of the selected polygon, if one is selected
    fn selected_polygon_kind(&self) -> Option<PolygonKind>;

    fn has_selected_point(&self) -> bool;

    /// Remember point positions so offsets are relative to the drag start
    fn store_start_positions(&mut self);

    fn set_selected_point_offset(&mut self, offset: Vec2);

    fn set_polygon_offset(&mut self, offset: Vec2);

    /// Rotate the selected polygon by `delta` radians around `pivot`
    fn rotate_selected_polygon(&mut self, delta: f32, pivot: Vec3);

    fn clear_selection(&mut self);

    fn deactivate(&mut self);
}

/// Sub-tool for views without a trigger layer: never picks anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPolygons;

impl PolygonTool for NoPolygons {
    fn pick_on_mouse_down(&mut self, _screen: Vec2, _world: Vec3, _view: &dyn View) -> bool {
        false
    }

    fn start_drag(&mut self, _screen: Vec2, _world: Vec3) {}

    fn on_move(&mut self, _screen: Vec2, _world: Vec3) {}

    fn on_up(&mut self, _screen: Vec2, _world: Vec3) {}

    fn selected_point_center(&self) -> Option<Vec3> {
        None
    }

    fn selected_polygon_center(&self) -> Option<Vec3> {
        None
    }

    fn selected_polygon_kind(&self) -> Option<PolygonKind> {
        None
    }

    fn has_selected_point(&self) -> bool {
        false
    }

    fn store_start_positions(&mut self) {}

    fn set_selected_point_offset(&mut self, _offset: Vec2) {}

    fn set_polygon_offset(&mut self, _offset: Vec2) {}

    fn rotate_selected_polygon(&mut self, _delta: f32, _pivot: Vec3) {}

    fn clear_selection(&mut self) {}

    fn deactivate(&mut self) {}
}
