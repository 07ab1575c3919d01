//! WorldBuilder viewport geometry
//!
//! Screen/world conversion and the transform gizmo the pointer tool drives.
//!
//! - [`view::CoordinateAdapter`] / [`view::View`] - contracts the host viewport implements
//! - [`ortho::OrthoView`] - oblique top-down map view
//! - [`camera::CameraView`] - orbit camera perspective view
//! - [`gizmo`] - gizmo placement, screen layout and handle hit-testing

pub mod camera;
pub mod constants;
pub mod gizmo;
pub mod ortho;
pub mod view;

pub use camera::{Camera, CameraView};
pub use gizmo::{
    Gizmo, GizmoCursor, GizmoHandle, GizmoLayout, GizmoMode, GizmoTarget, Pivot, compute_pivot,
    scale_for_zoom,
};
pub use ortho::OrthoView;
pub use view::{CoordinateAdapter, ScreenRect, View};
