//! Pointer event handlers

use glam::{Vec2, Vec3};
use tracing::{debug, info, warn};
use uuid::Uuid;

use wb_core::constants::ROAD_PAIR_DISTANCE;
use wb_core::{EditorCategory, allow_pick};
use wb_viewport::{GizmoHandle, ScreenRect};

use super::{PointerState, PointerTool};
use crate::context::{ToolContext, TrackingMode};
use crate::drag::DragSession;
use crate::edit::ModifyEdit;

impl PointerTool {
    /// Primary button pressed
    pub fn mouse_down(&mut self, mode: TrackingMode, screen: Vec2, ctx: &mut ToolContext<'_>) {
        if !self.active || mode != TrackingMode::Left {
            return;
        }

        let world = ctx.view.view_to_world(screen);
        self.down_screen = screen;
        self.down_world = ctx.view.snap(world);
        self.state = PointerState::Idle;

        self.gizmo.update_scale(ctx.view.zoom());
        let handle = self.gizmo.pick(screen, &*ctx.view);
        if handle.is_some() {
            self.begin_gizmo_drag(handle, screen, world, ctx);
            return;
        }

        let filter = ctx.view.pick_filter();
        if matches!(filter.constraint, None | Some(EditorCategory::Waypoint))
            && ctx.view.polygon_triggers_visible()
            && ctx.polygons.pick_on_mouse_down(screen, world, &*ctx.view)
        {
            ctx.polygons.start_drag(screen, world);
            self.state = PointerState::DelegatedToPolygonTool;
            debug!("Polygon trigger picked, delegating drag");
            return;
        }

        self.current_object = None;
        let picked = Self::closest_pick(screen, world, ctx);
        let shift = ctx.modifiers.shift;
        let ctrl = ctx.modifiers.ctrl;

        if let Some(id) = picked {
            let (was_selected, waypoint) = ctx
                .doc
                .scene()
                .entity(id)
                .map(|e| (e.is_selected(), e.waypoint_id))
                .unwrap_or((false, None));

            if shift {
                let select = !was_selected;
                let scene = ctx.doc.scene_mut();
                scene.set_selected(id, select);
                if let Some(waypoint) = waypoint.filter(|_| ctrl) {
                    scene.select_waypoint_path(waypoint, select);
                }
            } else if was_selected {
                // Keep the selection so the whole group can be dragged
                self.current_object = Some(id);
            } else {
                self.clear_selection(ctx);
                let scene = ctx.doc.scene_mut();
                scene.set_selected(id, true);
                if let Some(waypoint) = waypoint.filter(|_| ctrl) {
                    scene.select_waypoint_path(waypoint, true);
                }
            }

            if !shift && matches!(filter.constraint, None | Some(EditorCategory::Road)) {
                Self::select_paired_roads(id, ctx);
            }
        } else if !shift {
            self.clear_selection(ctx);
        }

        if picked.is_some() {
            if self.current_object.is_none() {
                self.current_object = ctx.doc.scene().first_selected().map(|e| e.id);
            }
            if !self.gizmo.visible {
                self.align_drag_to_grid(ctx);
            }
            self.state = PointerState::MovingObject { moving: false };
            debug!(?picked, "Picked entity");
        } else {
            self.state = PointerState::DragSelectRect;
        }

        self.update_gizmo_center(ctx);
    }

    /// Pointer moved, with or without a button held
    pub fn mouse_moved(&mut self, mode: TrackingMode, screen: Vec2, ctx: &mut ToolContext<'_>) {
        if !self.active {
            return;
        }
        self.gizmo.update_scale(ctx.view.zoom());

        match mode {
            TrackingMode::None => {
                let previous = self.gizmo.hovered;
                self.gizmo.hovered = self.gizmo.pick(screen, &*ctx.view);
                if previous != self.gizmo.hovered {
                    ctx.view.invalidate();
                }
                return;
            }
            TrackingMode::Right => return,
            TrackingMode::Left => {}
        }

        match self.state {
            PointerState::Idle => {}
            PointerState::DelegatedToPolygonTool => {
                let world = ctx.view.view_to_world_tracking(screen);
                ctx.polygons.on_move(screen, world);
            }
            PointerState::DragSelectRect => {
                let rect = ScreenRect::from_corners(self.down_screen, screen);
                ctx.view.rect_feedback(true, rect);
                ctx.view.invalidate();
            }
            PointerState::MovingGizmo => self.drag_gizmo(screen, ctx),
            PointerState::MovingObject { moving } => self.drag_object(moving, screen, ctx),
        }
    }

    /// Primary button released
    pub fn mouse_up(&mut self, mode: TrackingMode, screen: Vec2, ctx: &mut ToolContext<'_>) {
        if !self.active {
            // Stale release after a tool switch: keep the gizmo hidden
            debug!("Pointer up while inactive, ignoring");
            return;
        }
        if mode != TrackingMode::Left {
            return;
        }

        match std::mem::take(&mut self.state) {
            PointerState::Idle => {}
            PointerState::DelegatedToPolygonTool => {
                let world = ctx.view.view_to_world(screen);
                ctx.polygons.on_up(screen, world);
            }
            PointerState::MovingGizmo => {
                if let Some(edit) = self.edit.take() {
                    ctx.doc.commit_edit(edit);
                }
                self.gizmo.active = GizmoHandle::None;
                self.rotating = false;
                self.session.rotation_delta = 0.0;
            }
            PointerState::MovingObject { moving: true } => {
                if self.current_object.is_some() {
                    if let Some(edit) = self.edit.take() {
                        ctx.doc.commit_edit(edit);
                    }
                }
            }
            PointerState::MovingObject { moving: false } => {}
            PointerState::DragSelectRect => self.finish_marquee(screen, ctx),
        }

        self.check_for_properties_panel(ctx);
        self.update_gizmo_center(ctx);
    }

    fn begin_gizmo_drag(
        &mut self,
        handle: GizmoHandle,
        screen: Vec2,
        world: Vec3,
        ctx: &mut ToolContext<'_>,
    ) {
        self.gizmo.active = handle;
        self.session = DragSession::begin(screen, world, self.gizmo.center, self.gizmo.angle);
        if self.gizmo.is_polygon_target() {
            ctx.polygons.store_start_positions();
        }
        self.rotating = handle == GizmoHandle::RotateZ;

        if self.edit.is_none() {
            self.edit = Some(ModifyEdit::begin(ctx.doc.scene()));
        }
        self.current_object = ctx.doc.scene().first_selected().map(|e| e.id);
        self.state = PointerState::MovingGizmo;
        debug!(?handle, "Gizmo drag started");
    }

    /// Closest pickable entity under the click.
    ///
    /// Squared planar distance from the click decides; the first entity in
    /// enumeration order wins a tie. A model hit in the 3D view is the
    /// fallback when no footprint is hit.
    fn closest_pick(screen: Vec2, world: Vec3, ctx: &ToolContext<'_>) -> Option<Uuid> {
        let filter = ctx.view.pick_filter();
        let scene = ctx.doc.scene();

        let mut closest = ctx
            .view
            .picked_3d_entity(screen)
            .filter(|id| scene.entity(*id).is_some_and(|e| allow_pick(e, &filter)));
        let mut best = f32::MAX;

        for entity in scene.entities() {
            if !allow_pick(entity, &filter) || !ctx.view.entity_hit(entity, world) {
                continue;
            }
            let distance = entity.position.truncate().distance_squared(world.truncate());
            if distance < best {
                best = distance;
                closest = Some(entity.id);
            }
        }
        closest
    }

    /// Grab the other end of a road along with the picked one
    fn select_paired_roads(picked: Uuid, ctx: &mut ToolContext<'_>) {
        let scene = ctx.doc.scene_mut();
        let Some(anchor) = scene.entity(picked).filter(|e| e.is_road()).map(|e| e.position) else {
            return;
        };
        let paired: Vec<Uuid> = scene
            .entities()
            .iter()
            .filter(|e| {
                e.is_road() && e.position.truncate().distance(anchor.truncate()) < ROAD_PAIR_DISTANCE
            })
            .map(|e| e.id)
            .collect();
        for id in paired {
            scene.set_selected(id, true);
        }
    }

    /// Shift the drag origin by the current object's distance from the grid,
    /// so a plain drag moves it onto grid points rather than by grid steps
    fn align_drag_to_grid(&mut self, ctx: &ToolContext<'_>) {
        let Some(location) = self
            .current_object
            .and_then(|id| ctx.doc.scene().entity(id))
            .map(|e| e.position)
        else {
            return;
        };
        let snapped = ctx.view.snap(location);
        self.down_world.x += location.x - snapped.x;
        self.down_world.y += location.y - snapped.y;
    }

    fn drag_object(&mut self, mut moving: bool, screen: Vec2, ctx: &mut ToolContext<'_>) {
        if self.current_object.is_none() {
            return;
        }

        if !moving {
            // Screen pixels, so the threshold does not depend on zoom
            let d = screen - self.down_screen;
            if d.x.abs() > self.config.hysteresis_px || d.y.abs() > self.config.hysteresis_px {
                moving = true;
                self.state = PointerState::MovingObject { moving };
                self.edit = Some(ModifyEdit::begin(ctx.doc.scene()));
                debug!("Object drag started");
            }
        }
        if !moving {
            return;
        }
        let Some(edit) = self.edit.as_mut() else {
            warn!("Object move without a pending edit, ignoring");
            return;
        };

        Self::invalidate_selected(ctx);
        let world = ctx.view.snap(ctx.view.view_to_world_tracking(screen));
        let offset = (world - self.down_world).truncate();
        edit.set_planar_offset(ctx.doc.scene_mut(), offset);
        Self::invalidate_selected(ctx);

        self.update_gizmo_center(ctx);
        ctx.doc.refresh_all_views();
    }

    fn finish_marquee(&mut self, screen: Vec2, ctx: &mut ToolContext<'_>) {
        let rect = ScreenRect::from_corners(self.down_screen, screen);
        ctx.view.rect_feedback(false, rect);
        ctx.view.invalidate();

        let filter = ctx.view.pick_filter();
        let waypoints_visible = ctx.view.waypoints_visible();
        let view = &*ctx.view;
        let hits: Vec<Uuid> = ctx
            .doc
            .scene()
            .entities()
            .iter()
            .filter(|e| waypoints_visible || !e.is_waypoint())
            .filter(|e| allow_pick(e, &filter))
            .filter(|e| view.world_to_screen(e.position).is_some_and(|p| rect.contains(p)))
            .map(|e| e.id)
            .collect();

        let scene = ctx.doc.scene_mut();
        for &id in &hits {
            if ctx.modifiers.shift {
                scene.toggle_selected(id);
            } else {
                scene.set_selected(id, true);
            }
        }
        for &id in &hits {
            ctx.doc.invalidate_entity(id);
        }
        info!("Marquee matched {} entities", hits.len());
    }
}
