//! WorldBuilder pointer tool
//!
//! Turns pointer events over a viewport into selection changes and object
//! transforms through the transform gizmo.
//!
//! - [`PointerTool`] - interaction state machine
//! - [`drag`] - translation and rotation math for gizmo drags
//! - [`ModifyEdit`] - pending offset/rotation edit, committed on release
//! - [`Document`] / [`PolygonTool`] - collaborators the host provides
//! - [`replay`] - scripted sessions for the `wb-replay` binary

pub mod context;
pub mod document;
pub mod drag;
pub mod edit;
pub mod pointer;
pub mod polygon;
pub mod replay;

pub use context::{Modifiers, ToolContext, TrackingMode};
pub use document::{Document, EditorDocument};
pub use drag::{DragSession, RotationStep};
pub use edit::{EntitySnapshot, ModifyEdit};
pub use pointer::{PointerState, PointerTool};
pub use polygon::{NoPolygons, PolygonTool};
pub use replay::{Replay, ReplayError, ReplayEvent, ReplayScript};
