//! Map entities (objects, waypoints, road points) placed in the scene

use glam::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Waypoint identifier referenced by waypoint links
pub type WaypointId = u32;

/// Editor sorting category of a thing template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EditorCategory {
    Audio,
    Waypoint,
    Road,
    Light,
    Structure,
    Infantry,
    Vehicle,
    Shrubbery,
    Misc,
}

impl EditorCategory {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            EditorCategory::Audio => "Audio",
            EditorCategory::Waypoint => "Waypoint",
            EditorCategory::Road => "Road",
            EditorCategory::Light => "Light",
            EditorCategory::Structure => "Structure",
            EditorCategory::Infantry => "Infantry",
            EditorCategory::Vehicle => "Vehicle",
            EditorCategory::Shrubbery => "Shrubbery",
            EditorCategory::Misc => "Misc",
        }
    }
}

/// Thing template an entity was placed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub category: EditorCategory,
}

impl Template {
    pub fn new(name: impl Into<String>, category: EditorCategory) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Per-entity editor flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFlags {
    /// Entity is one end of a road segment
    #[serde(default)]
    pub road_point: bool,
    /// Entity is hidden from the viewport
    #[serde(default)]
    pub dont_render: bool,
}

/// A selectable entity in the scene
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: Uuid,
    pub name: String,
    pub position: Vec3,
    /// Yaw in radians
    #[serde(default)]
    pub angle: f32,
    #[serde(default)]
    pub template: Option<Template>,
    #[serde(default)]
    pub flags: EntityFlags,
    /// Set for waypoints only
    #[serde(default)]
    pub waypoint_id: Option<WaypointId>,
    /// Only the selection methods on [`crate::Scene`] write this
    #[serde(default)]
    pub(crate) selected: bool,
}

impl Entity {
    /// Create a new template-less entity at the given position
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            position,
            angle: 0.0,
            template: None,
            flags: EntityFlags::default(),
            waypoint_id: None,
            selected: false,
        }
    }

    /// Create an entity placed from a template
    pub fn with_template(
        name: impl Into<String>,
        position: Vec3,
        category: EditorCategory,
    ) -> Self {
        let name = name.into();
        Self {
            template: Some(Template::new(name.clone(), category)),
            ..Self::new(name, position)
        }
    }

    /// Create a waypoint
    pub fn waypoint(waypoint_id: WaypointId, position: Vec3) -> Self {
        Self {
            waypoint_id: Some(waypoint_id),
            ..Self::new(format!("Waypoint {waypoint_id}"), position)
        }
    }

    /// Create a road end point
    pub fn road_point(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            flags: EntityFlags {
                road_point: true,
                ..EntityFlags::default()
            },
            ..Self::new(name, position)
        }
    }

    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_waypoint(&self) -> bool {
        self.waypoint_id.is_some()
    }

    pub fn is_road(&self) -> bool {
        self.flags.road_point
    }

    pub fn is_light(&self) -> bool {
        self.template_category() == Some(EditorCategory::Light)
    }

    pub fn template_category(&self) -> Option<EditorCategory> {
        self.template.as_ref().map(|t| t.category)
    }

    /// Category used for pick constraints.
    ///
    /// Templates carry their own category; template-less entities are
    /// classified as waypoints or road points, with road points winning.
    pub fn derived_category(&self) -> Option<EditorCategory> {
        if let Some(category) = self.template_category() {
            return Some(category);
        }
        if self.is_road() {
            Some(EditorCategory::Road)
        } else if self.is_waypoint() {
            Some(EditorCategory::Waypoint)
        } else {
            None
        }
    }
}
