//! Pick filtering by category and visibility

use serde::{Deserialize, Serialize};

use crate::entity::{EditorCategory, Entity};

/// Per-view picking settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickFilter {
    /// Only entities of this category may be picked
    #[serde(default)]
    pub constraint: Option<EditorCategory>,
    /// Whether template models are drawn in the view
    #[serde(default = "default_show_models")]
    pub show_models: bool,
}

fn default_show_models() -> bool {
    true
}

impl Default for PickFilter {
    fn default() -> Self {
        Self {
            constraint: None,
            show_models: true,
        }
    }
}

impl PickFilter {
    /// Unconstrained filter with models shown
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constrained(category: EditorCategory) -> Self {
        Self {
            constraint: Some(category),
            ..Self::default()
        }
    }

    /// True when the constraint is unset or equals `category`
    pub fn admits(&self, category: EditorCategory) -> bool {
        self.constraint.is_none_or(|c| c == category)
    }
}

/// Whether an entity can be picked in a view with the given filter.
///
/// Audio markers are pickable whenever the view is unconstrained or
/// constrained to audio, even with models hidden. Otherwise templated
/// entities need models shown, render-disabled entities are never pickable,
/// and a set constraint must match the entity's derived category.
pub fn allow_pick(entity: &Entity, filter: &PickFilter) -> bool {
    let template_category = entity.template_category();
    if template_category == Some(EditorCategory::Audio) && filter.admits(EditorCategory::Audio) {
        return true;
    }
    if (template_category.is_some() && !filter.show_models) || entity.flags.dont_render {
        return false;
    }
    match (filter.constraint, entity.derived_category()) {
        (Some(constraint), Some(category)) => category == constraint,
        _ => true,
    }
}
