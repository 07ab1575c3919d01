//! Orbit camera perspective view

use glam::{Mat4, Vec2, Vec3, Vec4};

use wb_core::{Entity, PickFilter};

use crate::view::{CoordinateAdapter, ScreenRect, View};

/// Orbit camera around a target on the ground
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye position
    pub position: Vec3,
    /// Orbit target
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
    // Orbit state
    /// Orbit yaw in radians
    pub yaw: f32,
    /// Orbit pitch in radians
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

impl Camera {
    /// Create a new camera looking down at the origin
    pub fn new() -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Z,
            fov: 40.0_f32.to_radians(),
            near: 1.0,
            far: 5000.0,
            yaw: -90.0_f32.to_radians(),
            pitch: 60.0_f32.to_radians(),
            distance: 400.0,
        };
        camera.update_position_from_orbit();
        camera
    }

    /// Orbit the camera around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw += delta_yaw;
        self.pitch =
            (self.pitch + delta_pitch).clamp(-89.0_f32.to_radians(), 89.0_f32.to_radians());
        self.update_position_from_orbit();
    }

    /// Zoom the camera
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(10.0, 10000.0);
        self.update_position_from_orbit();
    }

    /// Move the orbit target
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
        self.update_position_from_orbit();
    }

    fn update_position_from_orbit(&mut self) {
        let x = self.distance * self.pitch.cos() * self.yaw.cos();
        let y = self.distance * self.pitch.cos() * self.yaw.sin();
        let z = self.distance * self.pitch.sin();
        self.position = self.target + Vec3::new(x, y, z);
    }

    /// Get view matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get projection matrix
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, self.near, self.far)
    }
}

/// Perspective viewport backed by an orbit [`Camera`]
#[derive(Debug, Clone)]
pub struct CameraView {
    /// The orbit camera
    pub camera: Camera,
    /// Viewport size in pixels
    pub size: Vec2,
    /// Height of the ground plane that clicks land on
    pub ground_z: f32,
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
    pub feedback: Option<ScreenRect>,
    /// Repaint requests since creation
    pub invalidations: usize,
}

impl CameraView {
    /// Create a view of the given pixel size
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            camera: Camera::new(),
            size: Vec2::new(width.max(1.0), height.max(1.0)),
            ground_z: 0.0,
            grid: None,
            pick_radius: 5.0,
            filter: PickFilter::default(),
            show_polygon_triggers: true,
            show_waypoints: true,
            feedback: None,
            invalidations: 0,
        }
    }

    fn aspect(&self) -> f32 {
        self.size.x / self.size.y
    }

    fn view_proj(&self) -> Mat4 {
        self.camera.projection_matrix(self.aspect()) * self.camera.view_matrix()
    }

    /// Convert screen coordinates to a world ray
    pub fn screen_to_ray(&self, screen: Vec2) -> (Vec3, Vec3) {
        // Convert to normalized device coordinates
        let ndc_x = (2.0 * screen.x / self.size.x) - 1.0;
        let ndc_y = 1.0 - (2.0 * screen.y / self.size.y);

        let inv_view_proj = self.view_proj().inverse();
        let near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;

        (near, (far - near).normalize())
    }
}

impl CoordinateAdapter for CameraView {
    fn view_to_world(&self, screen: Vec2) -> Vec3 {
        let (origin, dir) = self.screen_to_ray(screen);
        if dir.z.abs() < 1e-6 {
            return Vec3::new(origin.x, origin.y, self.ground_z);
        }
        let t = (self.ground_z - origin.z) / dir.z;
        if t < 0.0 {
            // Looking away from the ground: fall back to the ray origin
            return Vec3::new(origin.x, origin.y, self.ground_z);
        }
        origin + dir * t
    }

    fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_proj() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        if ndc.z < 0.0 || ndc.z > 1.0 {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.size.x,
            (1.0 - ndc.y) * 0.5 * self.size.y,
        ))
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
        self.camera.distance
    }
}

impl View for CameraView {
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
