//! Document contract and in-memory reference document

use tracing::{debug, info};
use uuid::Uuid;

use wb_core::{Scene, SelectionShape};

use crate::edit::ModifyEdit;

/// The editor document the pointer tool works on
pub trait Document {
    fn scene(&self) -> &Scene;

    fn scene_mut(&mut self) -> &mut Scene;

    /// Apply a pending edit and append it to the undo history.
    ///
    /// An empty edit must leave the history untouched.
    fn commit_edit(&mut self, edit: ModifyEdit);

    /// Request a repaint of every view of this document
    fn refresh_all_views(&mut self);

    /// Request a repaint of the region covered by an entity
    fn invalidate_entity(&mut self, id: Uuid);

    /// Show the properties panel matching the selection
    fn show_properties(&mut self, shape: SelectionShape);

    /// Status bar feedback
    fn set_status_text(&mut self, text: String);
}

/// In-memory document: a scene plus a committed-edit history
#[derive(Debug, Default)]
pub struct EditorDocument {
    pub scene: Scene,
    history: Vec<ModifyEdit>,
    status_text: String,
    properties: Option<SelectionShape>,
    view_refreshes: usize,
    entity_invalidations: usize,
}

impl EditorDocument {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            ..Self::default()
        }
    }

    /// Committed edits, oldest first
    pub fn history(&self) -> &[ModifyEdit] {
        &self.history
    }

    /// Undo the most recent commit
    pub fn undo(&mut self) -> bool {
        match self.history.pop() {
            Some(edit) => {
                edit.revert(&mut self.scene);
                debug!("Undid edit on {} entities", edit.targets().count());
                true
            }
            None => false,
        }
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    /// Last properties panel shown
    pub fn properties(&self) -> Option<&SelectionShape> {
        self.properties.as_ref()
    }

    pub fn view_refreshes(&self) -> usize {
        self.view_refreshes
    }

    pub fn entity_invalidations(&self) -> usize {
        self.entity_invalidations
    }
}

impl Document for EditorDocument {
    fn scene(&self) -> &Scene {
        &self.scene
    }

    fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    fn commit_edit(&mut self, edit: ModifyEdit) {
        if edit.is_empty() {
            debug!("Ignoring commit of an empty edit");
            return;
        }
        edit.apply(&mut self.scene);
        info!(
            "Committed edit: offset={:?} z={} rotation={:?} on {} entities",
            edit.offset(),
            edit.z_offset(),
            edit.rotation(),
            edit.targets().count()
        );
        self.history.push(edit);
    }

    fn refresh_all_views(&mut self) {
        self.view_refreshes += 1;
    }

    fn invalidate_entity(&mut self, _id: Uuid) {
        self.entity_invalidations += 1;
    }

    fn show_properties(&mut self, shape: SelectionShape) {
        self.properties = Some(shape);
    }

    fn set_status_text(&mut self, text: String) {
        self.status_text = text;
    }
}
