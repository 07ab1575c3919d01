//! Pending modify edit
//!
//! A [`ModifyEdit`] accumulates a planar offset, a Z offset and a target
//! rotation for the entities that were selected when it was created. While
//! the pointer tool owns it, every setter re-applies the preview to the
//! scene; committing hands it to the document's undo history.

use glam::{Vec2, Vec3};
use uuid::Uuid;

use wb_core::Scene;

/// Start state of one edited entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySnapshot {
    pub id: Uuid,
    pub position: Vec3,
    pub angle: f32,
}

/// Offset and rotation applied to a set of entities
#[derive(Debug, Clone, Default)]
pub struct ModifyEdit {
    snapshots: Vec<EntitySnapshot>,
    /// Start angle of the first selected entity; `rotate_to` is relative to it
    reference_angle: f32,
    offset: Vec2,
    z_offset: f32,
    rotation: Option<f32>,
}

impl ModifyEdit {
    /// Start an edit on the current selection
    pub fn begin(scene: &Scene) -> Self {
        let snapshots: Vec<EntitySnapshot> = scene
            .selected()
            .map(|e| EntitySnapshot {
                id: e.id,
                position: e.position,
                angle: e.angle,
            })
            .collect();
        let reference_angle = snapshots.first().map_or(0.0, |s| s.angle);
        Self {
            snapshots,
            reference_angle,
            ..Self::default()
        }
    }

    /// True when nothing was selected: committing must be a no-op
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = Uuid> + '_ {
        self.snapshots.iter().map(|s| s.id)
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    pub fn z_offset(&self) -> f32 {
        self.z_offset
    }

    pub fn rotation(&self) -> Option<f32> {
        self.rotation
    }

    /// Set the planar offset (last value wins) and preview it
    pub fn set_planar_offset(&mut self, scene: &mut Scene, offset: Vec2) {
        self.offset = offset;
        self.apply(scene);
    }

    /// Set the Z offset (last value wins) and preview it
    pub fn set_z_offset(&mut self, scene: &mut Scene, z_offset: f32) {
        self.z_offset = z_offset;
        self.apply(scene);
    }

    /// Rotate to an absolute angle and preview it.
    ///
    /// The first entity ends up at exactly `angle`; the others keep their
    /// orientation relative to it.
    pub fn rotate_to(&mut self, scene: &mut Scene, angle: f32) {
        self.rotation = Some(angle);
        self.apply(scene);
    }

    /// Write the accumulated offsets and rotation into the scene. Idempotent.
    pub fn apply(&self, scene: &mut Scene) {
        let delta = self.offset.extend(self.z_offset);
        let turn = self.rotation.map(|angle| angle - self.reference_angle);
        for snapshot in &self.snapshots {
            if let Some(entity) = scene.entity_mut(snapshot.id) {
                entity.position = snapshot.position + delta;
                entity.angle = snapshot.angle + turn.unwrap_or(0.0);
            }
        }
    }

    /// Restore every edited entity to its start state
    pub fn revert(&self, scene: &mut Scene) {
        for snapshot in &self.snapshots {
            if let Some(entity) = scene.entity_mut(snapshot.id) {
                entity.position = snapshot.position;
                entity.angle = snapshot.angle;
            }
        }
    }
}
