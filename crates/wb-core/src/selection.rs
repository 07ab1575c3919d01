//! Selection manager
//!
//! Selection flags live on the entities themselves; these methods are the
//! only writers. The scene keeps the index of the first selected entity in
//! enumeration order so pivot and "current object" lookups never rescan the
//! whole list.

use uuid::Uuid;

use crate::entity::Entity;
use crate::scene::Scene;

/// Returned by [`Scene::clear_selection`].
///
/// Clearing the selection invalidates the gizmo pivot; whoever clears must
/// recompute it.
#[must_use = "the gizmo must be recomputed after clearing the selection"]
#[derive(Debug)]
pub struct SelectionCleared;

/// Kind of polygon trigger, used for properties panel dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonKind {
    Water,
    Generic,
}

/// What the current selection looks like, in dispatch priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionShape {
    None,
    SingleWaypoint(Uuid),
    SinglePolygon(PolygonKind),
    SingleLight(Uuid),
    Roads,
    Generic { single: Option<Uuid> },
}

impl Scene {
    /// Set the selection flag of one entity
    pub fn set_selected(&mut self, id: Uuid, selected: bool) {
        if let Some(index) = self.index_of(id) {
            self.set_selected_at(index, selected);
        }
    }

    /// Flip the selection flag of one entity, returning the new state
    pub fn toggle_selected(&mut self, id: Uuid) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let selected = !self.entities[index].selected;
                self.set_selected_at(index, selected);
                selected
            }
            None => false,
        }
    }

    pub(crate) fn set_selected_at(&mut self, index: usize, selected: bool) {
        self.entities[index].selected = selected;
        if selected {
            if self.first_selected.is_none_or(|first| index < first) {
                self.first_selected = Some(index);
            }
        } else if self.first_selected == Some(index) {
            self.rescan_first_selected(index + 1);
        }
    }

    /// Deselect every entity and every build list entry on every side
    pub fn clear_selection(&mut self) -> SelectionCleared {
        for entity in &mut self.entities {
            entity.selected = false;
        }
        for side in &mut self.sides {
            for entry in &mut side.build_list {
                entry.selected = false;
            }
        }
        self.first_selected = None;
        SelectionCleared
    }

    /// Selected entities in enumeration order
    pub fn selected(&self) -> impl Iterator<Item = &Entity> {
        let start = self.first_selected.unwrap_or(self.entities.len());
        self.entities[start..].iter().filter(|e| e.selected)
    }

    pub fn selected_ids(&self) -> Vec<Uuid> {
        self.selected().map(|e| e.id).collect()
    }

    pub fn selection_count(&self) -> usize {
        self.selected().count()
    }

    pub fn has_selection(&self) -> bool {
        self.first_selected.is_some()
    }

    /// First selected entity in enumeration order
    pub fn first_selected(&self) -> Option<&Entity> {
        self.first_selected.map(|i| &self.entities[i])
    }

    /// The single selected entity, if exactly one is selected
    pub fn single_selected(&self) -> Option<&Entity> {
        let mut selected = self.selected();
        let first = selected.next()?;
        match selected.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// True when something is selected and every selected entity is a road point
    pub fn selection_is_roads_only(&self) -> bool {
        self.has_selection() && self.selected().all(|e| e.is_road())
    }

    /// Classify the selection for properties panel dispatch.
    ///
    /// `polygon` is the kind of the polygon trigger currently selected in the
    /// polygon sub-tool, if any.
    pub fn selection_shape(&self, polygon: Option<PolygonKind>) -> SelectionShape {
        let single = self.single_selected();
        if let Some(waypoint) = single.filter(|e| e.is_waypoint()) {
            return SelectionShape::SingleWaypoint(waypoint.id);
        }
        if let Some(kind) = polygon {
            return SelectionShape::SinglePolygon(kind);
        }
        if let Some(light) = single.filter(|e| e.is_light()) {
            return SelectionShape::SingleLight(light.id);
        }
        if self.selection_is_roads_only() {
            return SelectionShape::Roads;
        }
        if !self.has_selection() {
            return SelectionShape::None;
        }
        SelectionShape::Generic {
            single: single.map(|e| e.id),
        }
    }
}
