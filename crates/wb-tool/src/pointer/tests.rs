use glam::{Vec2, Vec3};
use uuid::Uuid;

use wb_core::{EditorCategory, Entity, PickFilter, PolygonKind, Scene, SelectionShape, ToolConfig};
use wb_viewport::{GizmoCursor, GizmoHandle, GizmoMode, OrthoView, View};

use super::{PointerState, PointerTool};
use crate::context::{Modifiers, ToolContext, TrackingMode};
use crate::document::{Document, EditorDocument};
use crate::polygon::{NoPolygons, PolygonTool};

/// Ortho view with the world origin at screen (500, 500), one pixel per unit
fn view() -> OrthoView {
    OrthoView {
        origin: Vec2::new(500.0, 500.0),
        ..OrthoView::default()
    }
}

fn screen_of(world: Vec3) -> Vec2 {
    Vec2::new(500.0 + world.x, 500.0 - world.y)
}

/// Polygon sub-tool double recording what the pointer tool asked of it
#[derive(Default)]
struct FakePolygons {
    pickable: bool,
    polygon_center: Option<Vec3>,
    point: Option<Vec3>,
    kind: Option<PolygonKind>,
    drags: usize,
    moves: usize,
    ups: usize,
    point_offset: Option<Vec2>,
    polygon_offset: Option<Vec2>,
    rotation: f32,
    deactivated: bool,
}

impl PolygonTool for FakePolygons {
    fn pick_on_mouse_down(&mut self, _screen: Vec2, _world: Vec3, _view: &dyn View) -> bool {
        self.pickable
    }

    fn start_drag(&mut self, _screen: Vec2, _world: Vec3) {
        self.drags += 1;
    }

    fn on_move(&mut self, _screen: Vec2, _world: Vec3) {
        self.moves += 1;
    }

    fn on_up(&mut self, _screen: Vec2, _world: Vec3) {
        self.ups += 1;
    }

    fn selected_point_center(&self) -> Option<Vec3> {
        self.point
    }

    fn selected_polygon_center(&self) -> Option<Vec3> {
        self.polygon_center
    }

    fn selected_polygon_kind(&self) -> Option<PolygonKind> {
        self.kind
    }

    fn has_selected_point(&self) -> bool {
        self.point.is_some()
    }

    fn store_start_positions(&mut self) {}

    fn set_selected_point_offset(&mut self, offset: Vec2) {
        self.point_offset = Some(offset);
    }

    fn set_polygon_offset(&mut self, offset: Vec2) {
        self.polygon_offset = Some(offset);
    }

    fn rotate_selected_polygon(&mut self, delta: f32, _pivot: Vec3) {
        self.rotation += delta;
    }

    fn clear_selection(&mut self) {
        self.kind = None;
    }

    fn deactivate(&mut self) {
        self.deactivated = true;
    }
}

/// Scene, view, document and tool for one scenario
struct Harness {
    view: OrthoView,
    doc: EditorDocument,
    polygons: NoPolygons,
    tool: PointerTool,
}

impl Harness {
    fn new(scene: Scene) -> Self {
        Self::with_config(scene, ToolConfig::default())
    }

    fn with_config(scene: Scene, config: ToolConfig) -> Self {
        let mut harness = Self {
            view: view(),
            doc: EditorDocument::new(scene),
            polygons: NoPolygons,
            tool: PointerTool::new(config),
        };
        harness.run(Modifiers::NONE, |tool, ctx| tool.activate(ctx));
        harness
    }

    fn run(&mut self, modifiers: Modifiers, f: impl FnOnce(&mut PointerTool, &mut ToolContext<'_>)) {
        let mut ctx = ToolContext::new(&mut self.view, &mut self.doc, &mut self.polygons)
            .with_modifiers(modifiers);
        f(&mut self.tool, &mut ctx);
    }

    fn down(&mut self, screen: Vec2, modifiers: Modifiers) {
        self.run(modifiers, |tool, ctx| tool.mouse_down(TrackingMode::Left, screen, ctx));
    }

    fn drag(&mut self, screen: Vec2, modifiers: Modifiers) {
        self.run(modifiers, |tool, ctx| tool.mouse_moved(TrackingMode::Left, screen, ctx));
    }

    fn hover(&mut self, screen: Vec2) {
        self.run(Modifiers::NONE, |tool, ctx| tool.mouse_moved(TrackingMode::None, screen, ctx));
    }

    fn up(&mut self, screen: Vec2, modifiers: Modifiers) {
        self.run(modifiers, |tool, ctx| tool.mouse_up(TrackingMode::Left, screen, ctx));
    }

    fn click_drag(&mut self, from: Vec2, to: Vec2, modifiers: Modifiers) {
        self.down(from, modifiers);
        self.drag(to, modifiers);
        self.up(to, modifiers);
    }

    fn position(&self, id: Uuid) -> Vec3 {
        self.doc.scene.entity(id).unwrap().position
    }

    fn selected(&self, id: Uuid) -> bool {
        self.doc.scene.entity(id).unwrap().is_selected()
    }
}

fn two_selected() -> (Scene, Uuid, Uuid) {
    let mut scene = Scene::new();
    let a = scene.add_entity(Entity::new("A", Vec3::ZERO));
    let b = scene.add_entity(Entity::new("B", Vec3::new(10.0, 0.0, 0.0)));
    scene.set_selected(a, true);
    scene.set_selected(b, true);
    (scene, a, b)
}

#[test]
fn test_local_x_drag_moves_whole_selection() {
    let (scene, a, b) = two_selected();
    let mut h = Harness::new(scene);

    // Gizmo sits at the mean (5, 0, 0), screen (505, 500)
    assert!(h.tool.gizmo().visible);
    h.down(Vec2::new(525.0, 501.0), Modifiers::NONE);
    assert_eq!(h.tool.state(), PointerState::MovingGizmo);
    assert_eq!(h.tool.gizmo().active, GizmoHandle::MoveX);
    assert_eq!(h.tool.current_object(), Some(a));

    // World delta (5, -4): only the local X part applies
    h.drag(Vec2::new(530.0, 505.0), Modifiers::NONE);
    h.up(Vec2::new(530.0, 505.0), Modifiers::NONE);

    assert!((h.position(a) - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
    assert!((h.position(b) - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-5);
    assert_eq!(h.doc.history().len(), 1);
    assert!(!h.tool.has_pending_edit());
    assert_eq!(h.tool.gizmo().active, GizmoHandle::None);
    assert!((h.tool.gizmo().center - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_rotation_snaps_to_three_degrees() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Tank", Vec3::ZERO));
    scene.set_selected(id, true);
    let mut h = Harness::new(scene);
    h.run(Modifiers::NONE, |tool, ctx| tool.set_gizmo_mode(GizmoMode::Rotate, ctx));

    h.down(Vec2::new(535.0, 500.0), Modifiers::NONE);
    assert_eq!(h.tool.gizmo().active, GizmoHandle::RotateZ);
    assert!(h.tool.is_rotating());

    // 47 degrees applied after the 1.5 gain
    let mouse = (47.0_f32 / 1.5).to_radians();
    let target = Vec2::new(500.0 + 35.0 * mouse.cos(), 500.0 - 35.0 * mouse.sin());
    h.drag(target, Modifiers::NONE);

    let angle = h.doc.scene.entity(id).unwrap().angle;
    assert!((angle.to_degrees() - 48.0).abs() < 1e-3);
    assert_eq!(
        h.doc.status_text(),
        "Rotation: 48 degrees (Shift for free rotation, snap: 3)"
    );

    h.up(target, Modifiers::NONE);
    assert!(!h.tool.is_rotating());
    assert_eq!(h.doc.history().len(), 1);
    assert!((h.tool.gizmo().angle.to_degrees() - 48.0).abs() < 1e-3);
}

#[test]
fn test_shift_rotation_is_free() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Tank", Vec3::ZERO));
    scene.set_selected(id, true);
    let mut h = Harness::new(scene);
    h.run(Modifiers::NONE, |tool, ctx| tool.set_gizmo_mode(GizmoMode::Rotate, ctx));

    let mouse = (47.0_f32 / 1.5).to_radians();
    let target = Vec2::new(500.0 + 35.0 * mouse.cos(), 500.0 - 35.0 * mouse.sin());
    h.click_drag(Vec2::new(535.0, 500.0), target, Modifiers::SHIFT);

    let angle = h.doc.scene.entity(id).unwrap().angle;
    assert!((angle.to_degrees() - 47.0).abs() < 1e-2);
}

#[test]
fn test_marquee_replaces_selection() {
    let mut scene = Scene::new();
    let inside = scene.add_entity(Entity::new("Inside", Vec3::ZERO));
    let outside = scene.add_entity(Entity::new("Outside", Vec3::new(50.0, 50.0, 0.0)));
    let previous = scene.add_entity(Entity::new("Previous", Vec3::new(100.0, -100.0, 0.0)));
    scene.set_selected(previous, true);
    let mut h = Harness::new(scene);

    h.down(Vec2::new(480.0, 480.0), Modifiers::NONE);
    assert_eq!(h.tool.state(), PointerState::DragSelectRect);
    assert!(!h.selected(previous));

    h.drag(Vec2::new(520.0, 520.0), Modifiers::NONE);
    assert!(h.view.feedback.is_some());
    // Nothing changes until release
    assert!(!h.selected(inside));

    h.up(Vec2::new(520.0, 520.0), Modifiers::NONE);
    assert!(h.view.feedback.is_none());
    assert!(h.selected(inside));
    assert!(!h.selected(outside));
    assert!(!h.selected(previous));
    assert_eq!(
        h.doc.properties(),
        Some(&SelectionShape::Generic {
            single: Some(inside)
        })
    );
    assert!(h.doc.history().is_empty());
}

#[test]
fn test_shift_marquee_toggles() {
    let mut scene = Scene::new();
    let a = scene.add_entity(Entity::new("A", Vec3::ZERO));
    let b = scene.add_entity(Entity::new("B", Vec3::new(10.0, 0.0, 0.0)));
    let far = scene.add_entity(Entity::new("Far", Vec3::new(200.0, 0.0, 0.0)));
    scene.set_selected(a, true);
    scene.set_selected(far, true);
    let mut h = Harness::new(scene);

    // Starts off both footprints and away from the gizmo
    h.click_drag(Vec2::new(490.0, 480.0), Vec2::new(520.0, 520.0), Modifiers::SHIFT);

    assert!(!h.selected(a));
    assert!(h.selected(b));
    assert!(h.selected(far));
}

#[test]
fn test_marquee_skips_hidden_waypoints() {
    let mut scene = Scene::new();
    let waypoint = scene.add_entity(Entity::waypoint(1, Vec3::ZERO));
    let tank = scene.add_entity(Entity::new("Tank", Vec3::new(5.0, 5.0, 0.0)));
    let mut h = Harness::new(scene);
    h.view.show_waypoints = false;

    h.click_drag(Vec2::new(480.0, 470.0), Vec2::new(520.0, 520.0), Modifiers::NONE);

    assert!(!h.selected(waypoint));
    assert!(h.selected(tank));
}

#[test]
fn test_locked_z_handle_is_inert() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Tower", Vec3::ZERO));
    scene.set_selected(id, true);
    let mut h = Harness::new(scene);

    h.down(Vec2::new(500.0, 490.0), Modifiers::NONE);
    assert_eq!(h.tool.gizmo().active, GizmoHandle::MoveZ);
    for y in [400.0, 300.0, 560.0] {
        h.drag(Vec2::new(500.0, y), Modifiers::NONE);
        assert_eq!(h.position(id), Vec3::ZERO);
    }
    h.up(Vec2::new(500.0, 560.0), Modifiers::NONE);
    assert_eq!(h.position(id), Vec3::ZERO);
}

#[test]
fn test_unlocked_z_handle_lifts() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Tower", Vec3::ZERO));
    scene.set_selected(id, true);
    let config = ToolConfig {
        lock_z_axis: false,
        ..ToolConfig::default()
    };
    let mut h = Harness::with_config(scene, config);

    h.click_drag(Vec2::new(500.0, 490.0), Vec2::new(500.0, 400.0), Modifiers::NONE);

    assert!((h.position(id) - Vec3::new(0.0, 0.0, 45.0)).length() < 1e-4);
    assert_eq!(h.doc.history().len(), 1);
}

#[test]
fn test_z_lock_applies_on_next_move() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Tower", Vec3::ZERO));
    scene.set_selected(id, true);
    let config = ToolConfig {
        lock_z_axis: false,
        ..ToolConfig::default()
    };
    let mut h = Harness::with_config(scene, config);

    h.down(Vec2::new(500.0, 490.0), Modifiers::NONE);
    assert_eq!(h.tool.gizmo().active, GizmoHandle::MoveZ);
    h.drag(Vec2::new(500.0, 470.0), Modifiers::NONE);
    assert!((h.position(id).z - 10.0).abs() < 1e-4);

    // Locking mid-drag freezes the height from the next frame on
    h.tool.config_mut().lock_z_axis = true;
    h.drag(Vec2::new(500.0, 400.0), Modifiers::NONE);
    assert!((h.position(id).z - 10.0).abs() < 1e-4);

    h.up(Vec2::new(500.0, 400.0), Modifiers::NONE);
    assert!((h.position(id).z - 10.0).abs() < 1e-4);
    assert_eq!(h.doc.history().len(), 1);
}

#[test]
fn test_rotation_snap_change_applies_on_next_move() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Tank", Vec3::ZERO));
    scene.set_selected(id, true);
    let mut h = Harness::new(scene);
    h.run(Modifiers::NONE, |tool, ctx| tool.set_gizmo_mode(GizmoMode::Rotate, ctx));

    let mouse = (47.0_f32 / 1.5).to_radians();
    let target = Vec2::new(500.0 + 35.0 * mouse.cos(), 500.0 - 35.0 * mouse.sin());
    let angle = |h: &Harness| h.doc.scene.entity(id).unwrap().angle.to_degrees();

    h.down(Vec2::new(535.0, 500.0), Modifiers::NONE);
    h.drag(target, Modifiers::NONE);
    assert!((angle(&h) - 48.0).abs() < 1e-3);

    // Same pointer position, coarser snap
    h.tool.config_mut().rotation_snap_degrees = 15.0;
    h.drag(target, Modifiers::NONE);
    assert!((angle(&h) - 45.0).abs() < 1e-3);
    assert_eq!(
        h.doc.status_text(),
        "Rotation: 45 degrees (Shift for free rotation, snap: 15)"
    );

    // Snapping off
    h.tool.config_mut().rotation_snap_degrees = 0.0;
    h.drag(target, Modifiers::NONE);
    assert!((angle(&h) - 47.0).abs() < 1e-2);

    h.up(target, Modifiers::NONE);
    assert_eq!(h.doc.history().len(), 1);
}

#[test]
fn test_plain_drag_waits_for_hysteresis() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Crate", Vec3::ZERO));
    let mut h = Harness::new(scene);

    h.down(Vec2::new(500.0, 500.0), Modifiers::NONE);
    assert!(h.selected(id));
    assert_eq!(h.tool.current_object(), Some(id));
    assert_eq!(h.tool.state(), PointerState::MovingObject { moving: false });

    h.drag(Vec2::new(502.0, 497.0), Modifiers::NONE);
    assert!(!h.tool.has_pending_edit());
    assert_eq!(h.position(id), Vec3::ZERO);

    h.drag(Vec2::new(510.0, 500.0), Modifiers::NONE);
    assert_eq!(h.tool.state(), PointerState::MovingObject { moving: true });
    assert!((h.position(id) - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);

    h.up(Vec2::new(510.0, 500.0), Modifiers::NONE);
    assert_eq!(h.doc.history().len(), 1);
    assert!(h.doc.entity_invalidations() > 0);
}

#[test]
fn test_click_without_drag_commits_nothing() {
    let mut scene = Scene::new();
    scene.add_entity(Entity::new("Crate", Vec3::ZERO));
    let mut h = Harness::new(scene);

    h.click_drag(Vec2::new(500.0, 500.0), Vec2::new(501.0, 501.0), Modifiers::NONE);
    assert!(h.doc.history().is_empty());
}

#[test]
fn test_plain_drag_lands_on_grid() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Crate", Vec3::new(3.0, 0.0, 0.0)));
    let mut h = Harness::new(scene);
    h.view.grid = Some(10.0);
    h.view.pick_radius = 8.0;

    h.down(Vec2::new(501.0, 500.0), Modifiers::NONE);
    h.drag(Vec2::new(509.0, 500.0), Modifiers::NONE);

    // Object lands on a grid line, not 3 + a grid step
    assert!((h.position(id) - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
}

#[test]
fn test_deactivate_discards_pending_edit() {
    let (scene, a, b) = two_selected();
    let mut h = Harness::new(scene);

    h.down(Vec2::new(525.0, 501.0), Modifiers::NONE);
    h.drag(Vec2::new(540.0, 501.0), Modifiers::NONE);
    assert!((h.position(a) - Vec3::new(15.0, 0.0, 0.0)).length() < 1e-5);

    h.run(Modifiers::NONE, |tool, ctx| tool.deactivate(ctx));
    assert_eq!(h.position(a), Vec3::ZERO);
    assert_eq!(h.position(b), Vec3::new(10.0, 0.0, 0.0));
    assert!(!h.tool.has_pending_edit());
    assert!(!h.tool.gizmo().visible);
    assert_eq!(h.tool.current_object(), None);
    // Selection survives the tool switch
    assert!(h.selected(a) && h.selected(b));

    // Stale events from the abandoned drag do nothing
    h.drag(Vec2::new(560.0, 501.0), Modifiers::NONE);
    let panels_before = h.doc.properties().copied();
    h.up(Vec2::new(560.0, 501.0), Modifiers::NONE);
    assert_eq!(h.position(a), Vec3::ZERO);
    assert!(h.doc.history().is_empty());
    assert!(!h.tool.is_active());
    assert!(!h.tool.gizmo().visible);
    assert_eq!(h.doc.properties().copied(), panels_before);

    // Reactivating brings the gizmo back for the kept selection
    h.run(Modifiers::NONE, |tool, ctx| tool.activate(ctx));
    assert!(h.tool.gizmo().visible);
    assert_eq!(h.tool.state(), PointerState::Idle);
}

#[test]
fn test_hover_invalidates_only_on_change() {
    let (scene, a, _) = two_selected();
    let mut h = Harness::new(scene);
    let before = h.view.invalidations;

    h.hover(Vec2::new(525.0, 501.0));
    assert_eq!(h.tool.gizmo().hovered, GizmoHandle::MoveX);
    assert_eq!(h.tool.cursor(), GizmoCursor::Move);
    assert_eq!(h.view.invalidations, before + 1);

    h.hover(Vec2::new(530.0, 500.0));
    assert_eq!(h.view.invalidations, before + 1);

    h.hover(Vec2::new(700.0, 700.0));
    assert_eq!(h.tool.gizmo().hovered, GizmoHandle::None);
    assert_eq!(h.view.invalidations, before + 2);

    // Hover never touches the selection or the drag state
    assert!(h.selected(a));
    assert_eq!(h.tool.state(), PointerState::Idle);
    assert!(!h.tool.has_pending_edit());
}

#[test]
fn test_right_button_is_ignored() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Crate", Vec3::ZERO));
    let mut h = Harness::new(scene);

    h.run(Modifiers::NONE, |tool, ctx| {
        tool.mouse_down(TrackingMode::Right, Vec2::new(500.0, 500.0), ctx)
    });
    assert!(!h.selected(id));
    assert_eq!(h.tool.state(), PointerState::Idle);
}

#[test]
fn test_closest_entity_wins_ties_by_order() {
    let mut scene = Scene::new();
    let first = scene.add_entity(Entity::new("First", Vec3::new(2.0, 0.0, 0.0)));
    let second = scene.add_entity(Entity::new("Second", Vec3::new(-2.0, 0.0, 0.0)));
    let near = scene.add_entity(Entity::new("Near", Vec3::new(0.0, 3.0, 0.0)));
    let mut h = Harness::new(scene);

    h.down(Vec2::new(500.0, 500.0), Modifiers::NONE);
    h.up(Vec2::new(500.0, 500.0), Modifiers::NONE);
    assert!(h.selected(first));
    assert!(!h.selected(second));
    assert!(!h.selected(near));
}

#[test]
fn test_shift_click_toggles_and_plain_click_keeps_group() {
    let mut scene = Scene::new();
    let a = scene.add_entity(Entity::new("A", Vec3::ZERO));
    let b = scene.add_entity(Entity::new("B", Vec3::new(100.0, 0.0, 0.0)));
    let mut h = Harness::new(scene);

    h.down(screen_of(Vec3::ZERO), Modifiers::NONE);
    h.up(screen_of(Vec3::ZERO), Modifiers::NONE);
    h.down(screen_of(Vec3::new(100.0, 0.0, 0.0)), Modifiers::SHIFT);
    h.up(screen_of(Vec3::new(100.0, 0.0, 0.0)), Modifiers::SHIFT);
    assert!(h.selected(a) && h.selected(b));

    // Clicking a selected entity (off the gizmo) keeps the group for dragging
    h.down(Vec2::new(603.0, 503.0), Modifiers::NONE);
    assert!(h.selected(a) && h.selected(b));
    assert_eq!(h.tool.current_object(), Some(b));
    h.drag(Vec2::new(613.0, 503.0), Modifiers::NONE);
    h.up(Vec2::new(613.0, 503.0), Modifiers::NONE);
    assert!((h.position(a) - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
    assert!((h.position(b) - Vec3::new(110.0, 0.0, 0.0)).length() < 1e-5);

    h.down(Vec2::new(613.0, 503.0), Modifiers::SHIFT);
    assert!(!h.selected(b));
    assert!(h.selected(a));
}

#[test]
fn test_ctrl_click_selects_waypoint_path() {
    let mut scene = Scene::new();
    let w1 = scene.add_entity(Entity::waypoint(1, Vec3::ZERO));
    let w2 = scene.add_entity(Entity::waypoint(2, Vec3::new(40.0, 0.0, 0.0)));
    let w3 = scene.add_entity(Entity::waypoint(3, Vec3::new(0.0, 80.0, 0.0)));
    let lone = scene.add_entity(Entity::waypoint(4, Vec3::new(120.0, 0.0, 0.0)));
    scene.link_waypoints(1, 2);
    scene.link_waypoints(2, 3);
    scene.link_waypoints(3, 1);
    let mut h = Harness::new(scene);

    h.down(screen_of(Vec3::ZERO), Modifiers::CTRL);
    h.up(screen_of(Vec3::ZERO), Modifiers::CTRL);
    assert!(h.selected(w1) && h.selected(w2) && h.selected(w3));
    assert!(!h.selected(lone));

    // Shift+ctrl on a selected waypoint drops the whole path
    let both = Modifiers {
        shift: true,
        ctrl: true,
    };
    let at = screen_of(Vec3::new(0.0, 80.0, 0.0));
    h.down(at, both);
    h.up(at, both);
    assert!(!h.selected(w1) && !h.selected(w2) && !h.selected(w3));
}

#[test]
fn test_single_waypoint_shows_waypoint_panel() {
    let mut scene = Scene::new();
    let w1 = scene.add_entity(Entity::waypoint(1, Vec3::ZERO));
    let mut h = Harness::new(scene);

    h.down(screen_of(Vec3::ZERO), Modifiers::NONE);
    h.up(screen_of(Vec3::ZERO), Modifiers::NONE);
    assert_eq!(h.doc.properties(), Some(&SelectionShape::SingleWaypoint(w1)));
}

#[test]
fn test_road_click_grabs_paired_endpoint() {
    let mut scene = Scene::new();
    let end = scene.add_entity(Entity::road_point("Road A", Vec3::ZERO));
    let start = scene.add_entity(Entity::road_point("Road B", Vec3::new(0.05, 0.0, 0.0)));
    let other = scene.add_entity(Entity::road_point("Road C", Vec3::new(3.0, 0.0, 0.0)));
    let mut h = Harness::new(scene);

    h.down(screen_of(Vec3::ZERO), Modifiers::NONE);
    h.up(screen_of(Vec3::ZERO), Modifiers::NONE);

    assert!(h.selected(end));
    assert!(h.selected(start));
    assert!(!h.selected(other));
    assert_eq!(h.doc.properties(), Some(&SelectionShape::Roads));
}

#[test]
fn test_pick_constraint_filters_entities() {
    let mut scene = Scene::new();
    let tank = scene.add_entity(Entity::with_template("Tank", Vec3::ZERO, EditorCategory::Vehicle));
    let road = scene.add_entity(Entity::road_point("Road", Vec3::new(3.0, 0.0, 0.0)));
    let mut h = Harness::new(scene);
    h.view.filter = PickFilter::constrained(EditorCategory::Road);

    h.down(screen_of(Vec3::ZERO), Modifiers::NONE);
    assert!(!h.selected(tank));
    assert!(h.selected(road));
}

#[test]
fn test_polygon_pick_takes_over_drag() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Crate", Vec3::ZERO));
    let mut view = view();
    let mut doc = EditorDocument::new(scene);
    let mut polygons = FakePolygons {
        pickable: true,
        kind: Some(PolygonKind::Water),
        ..FakePolygons::default()
    };
    let mut tool = PointerTool::default();

    {
        let mut ctx = ToolContext::new(&mut view, &mut doc, &mut polygons);
        tool.activate(&mut ctx);
        tool.mouse_down(TrackingMode::Left, Vec2::new(500.0, 500.0), &mut ctx);
        assert_eq!(tool.state(), PointerState::DelegatedToPolygonTool);
        tool.mouse_moved(TrackingMode::Left, Vec2::new(520.0, 500.0), &mut ctx);
        tool.mouse_up(TrackingMode::Left, Vec2::new(520.0, 500.0), &mut ctx);
    }

    assert_eq!(polygons.drags, 1);
    assert_eq!(polygons.moves, 1);
    assert_eq!(polygons.ups, 1);
    // No entity picking while the sub-tool owns the drag
    assert!(!doc.scene.entity(id).unwrap().is_selected());
    assert_eq!(doc.scene.entity(id).unwrap().position, Vec3::ZERO);
    assert_eq!(
        doc.properties(),
        Some(&SelectionShape::SinglePolygon(PolygonKind::Water))
    );
}

#[test]
fn test_polygon_not_consulted_when_hidden() {
    let mut scene = Scene::new();
    let id = scene.add_entity(Entity::new("Crate", Vec3::ZERO));
    let mut view = view();
    view.show_polygon_triggers = false;
    let mut doc = EditorDocument::new(scene);
    let mut polygons = FakePolygons {
        pickable: true,
        ..FakePolygons::default()
    };
    let mut tool = PointerTool::default();

    let mut ctx = ToolContext::new(&mut view, &mut doc, &mut polygons);
    tool.activate(&mut ctx);
    tool.mouse_down(TrackingMode::Left, Vec2::new(500.0, 500.0), &mut ctx);
    assert!(ctx.doc.scene().entity(id).unwrap().is_selected());
    drop(ctx);
    assert_eq!(polygons.drags, 0);
}

#[test]
fn test_polygon_gizmo_moves_point_and_center() {
    let mut view = view();
    let mut doc = EditorDocument::new(Scene::new());
    let mut polygons = FakePolygons {
        polygon_center: Some(Vec3::new(0.0, 0.0, 0.0)),
        point: Some(Vec3::ZERO),
        ..FakePolygons::default()
    };
    let mut tool = PointerTool::default();

    {
        let mut ctx = ToolContext::new(&mut view, &mut doc, &mut polygons);
        tool.activate(&mut ctx);
        assert!(tool.gizmo().is_polygon_target());

        // Plane square, lower left of the center
        tool.mouse_down(TrackingMode::Left, Vec2::new(486.0, 514.0), &mut ctx);
        assert_eq!(tool.gizmo().active, GizmoHandle::MoveXY);
        tool.mouse_moved(TrackingMode::Left, Vec2::new(496.0, 504.0), &mut ctx);
        assert!((tool.gizmo().center - Vec3::new(10.0, 10.0, 0.0)).length() < 1e-5);
        tool.mouse_up(TrackingMode::Left, Vec2::new(496.0, 504.0), &mut ctx);
    }

    assert_eq!(polygons.point_offset, Some(Vec2::new(10.0, 10.0)));
    assert_eq!(polygons.polygon_offset, None);
    assert!(doc.history().is_empty());
}

#[test]
fn test_polygon_gizmo_rotates_incrementally() {
    let mut view = view();
    let mut doc = EditorDocument::new(Scene::new());
    let mut polygons = FakePolygons {
        polygon_center: Some(Vec3::ZERO),
        ..FakePolygons::default()
    };
    let mut tool = PointerTool::default();

    {
        let mut ctx = ToolContext::new(&mut view, &mut doc, &mut polygons);
        tool.activate(&mut ctx);
        tool.set_gizmo_mode(GizmoMode::Rotate, &mut ctx);
        tool.mouse_down(TrackingMode::Left, Vec2::new(535.0, 500.0), &mut ctx);
        // Quarter turn of the mouse, in two steps
        tool.mouse_moved(TrackingMode::Left, Vec2::new(525.0, 475.0), &mut ctx);
        tool.mouse_moved(TrackingMode::Left, Vec2::new(500.0, 465.0), &mut ctx);
        tool.mouse_up(TrackingMode::Left, Vec2::new(500.0, 465.0), &mut ctx);
    }

    // Unsnapped, gain applied
    assert!((polygons.rotation.to_degrees() - 135.0).abs() < 1e-3);
}

#[test]
fn test_deactivate_forwards_to_polygon_tool() {
    let mut view = view();
    let mut doc = EditorDocument::new(Scene::new());
    let mut polygons = FakePolygons::default();
    let mut tool = PointerTool::default();

    let mut ctx = ToolContext::new(&mut view, &mut doc, &mut polygons);
    tool.deactivate(&mut ctx);
    drop(ctx);
    assert!(polygons.deactivated);
}
