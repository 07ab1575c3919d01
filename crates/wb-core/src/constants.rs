//! Global constants for wb-core

/// Default rotation snap increment in degrees
pub const DEFAULT_ROTATION_SNAP_DEGREES: f32 = 3.0;

/// Screen pixels a plain drag must exceed before objects start moving
pub const DRAG_HYSTERESIS_PX: f32 = 3.0;

/// World height per screen pixel when dragging the Z handle
pub const Z_DRAG_SENSITIVITY: f32 = 0.5;

/// Applied rotation per unit of mouse rotation around the gizmo
pub const ROTATION_GAIN: f32 = 1.5;

/// Road points closer than this (world units) are grabbed together
pub const ROAD_PAIR_DISTANCE: f32 = 0.1;
