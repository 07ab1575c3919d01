//! Scene store: ordered entities, waypoint links and side build lists

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Entity, WaypointId};

/// Undirected link between two waypoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaypointLink {
    pub a: WaypointId,
    pub b: WaypointId,
}

impl WaypointLink {
    pub fn new(a: WaypointId, b: WaypointId) -> Self {
        Self { a, b }
    }

    /// The other end of the link when `id` is one of its ends
    pub fn other(&self, id: WaypointId) -> Option<WaypointId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

/// Entry of a side's build list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildListEntry {
    pub name: String,
    #[serde(default)]
    pub selected: bool,
}

/// A player side and its build list
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Side {
    pub name: String,
    #[serde(default)]
    pub build_list: Vec<BuildListEntry>,
}

/// Serialization form of [`Scene`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SceneData {
    #[serde(default)]
    entities: Vec<Entity>,
    #[serde(default)]
    waypoint_links: Vec<WaypointLink>,
    #[serde(default)]
    sides: Vec<Side>,
}

/// The editable scene.
///
/// Entities are kept in enumeration order: every "first selected" or
/// "closest pick" tie-break refers to this order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(into = "SceneData")]
pub struct Scene {
    pub(crate) entities: Vec<Entity>,
    pub waypoint_links: Vec<WaypointLink>,
    pub sides: Vec<Side>,
    /// Index of the first selected entity in enumeration order
    pub(crate) first_selected: Option<usize>,
}

impl From<Scene> for SceneData {
    fn from(scene: Scene) -> Self {
        Self {
            entities: scene.entities,
            waypoint_links: scene.waypoint_links,
            sides: scene.sides,
        }
    }
}

impl From<SceneData> for Scene {
    fn from(data: SceneData) -> Self {
        let mut scene = Self {
            entities: data.entities,
            waypoint_links: data.waypoint_links,
            sides: data.sides,
            first_selected: None,
        };
        scene.rescan_first_selected(0);
        scene
    }
}

impl<'de> Deserialize<'de> for Scene {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = SceneData::deserialize(deserializer)?;
        Ok(Scene::from(data))
    }
}

impl Scene {
    /// Create an empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity, returning its ID
    pub fn add_entity(&mut self, entity: Entity) -> Uuid {
        let id = entity.id;
        let index = self.entities.len();
        let selected = entity.selected;
        self.entities.push(entity);
        if selected && self.first_selected.is_none() {
            self.first_selected = Some(index);
        }
        id
    }

    /// Remove an entity
    pub fn remove_entity(&mut self, id: Uuid) -> Option<Entity> {
        let index = self.index_of(id)?;
        let entity = self.entities.remove(index);
        self.rescan_first_selected(0);
        Some(entity)
    }

    /// Link two waypoints
    pub fn link_waypoints(&mut self, a: WaypointId, b: WaypointId) {
        self.waypoint_links.push(WaypointLink::new(a, b));
    }

    /// All entities in enumeration order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Mutable access to entities.
    ///
    /// Selection flags stay private to the selection methods, so the cached
    /// first-selected index cannot go stale through this.
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn entity(&self, id: Uuid) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: Uuid) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub(crate) fn index_of(&self, id: Uuid) -> Option<usize> {
        self.entities.iter().position(|e| e.id == id)
    }

    /// Recompute the first-selected cache scanning from `start`
    pub(crate) fn rescan_first_selected(&mut self, start: usize) {
        self.first_selected = self
            .entities
            .iter()
            .enumerate()
            .skip(start)
            .find(|(_, e)| e.selected)
            .map(|(i, _)| i);
    }
}
