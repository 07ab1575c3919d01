//! WorldBuilder core
//!
//! Scene model and selection state consumed by the pointer tool.
//!
//! - [`Scene`] - ordered entity store with waypoint links and side build lists
//! - [`selection`] - selection manager and selection-shape dispatch
//! - [`pick`] - category and visibility pick filter
//! - [`waypoint`] - connected waypoint path selection
//! - [`config`] - process-wide tool settings

pub mod config;
pub mod constants;
pub mod entity;
pub mod pick;
pub mod scene;
pub mod selection;
pub mod waypoint;

pub use config::{ConfigError, ToolConfig};
pub use entity::{EditorCategory, Entity, EntityFlags, Template, WaypointId};
pub use pick::{PickFilter, allow_pick};
pub use scene::{BuildListEntry, Scene, Side, WaypointLink};
pub use selection::{PolygonKind, SelectionCleared, SelectionShape};
pub use waypoint::waypoint_path;
