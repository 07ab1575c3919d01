//! Gizmo geometry constants

/// Gizmo sizes in world units, before the gizmo scale is applied
pub mod gizmo {
    /// Length of each translation axis
    pub const AXIS_LENGTH: f32 = 40.0;
    /// Half size of the XY plane handle square
    pub const PLANE_HALF_SIZE: f32 = 20.0;
    /// Radius of the rotation ring
    pub const RING_RADIUS: f32 = 35.0;
}

/// Screen-space hit tolerances
pub mod pick {
    /// Minimum hit tolerance in pixels
    pub const TOLERANCE_FLOOR: f32 = 12.0;
    /// Axis tolerance as a fraction of the projected axis length
    pub const AXIS_TOLERANCE_RATIO: f32 = 0.3;
    /// Ring tolerance as a fraction of the projected ring radius
    pub const RING_TOLERANCE_RATIO: f32 = 0.35;
    /// Squared pixel length below which a segment is treated as a point
    pub const DEGENERATE_SEGMENT_LENGTH_SQ: f32 = 0.001;
}

/// Zoom to gizmo scale mapping
pub mod scale {
    /// Zoom level at which the gizmo has unit scale
    pub const ZOOM_DIVISOR: f32 = 200.0;
    /// Smallest gizmo scale
    pub const MIN: f32 = 0.5;
    /// Largest gizmo scale
    pub const MAX: f32 = 3.0;
}
