//! Feature grid selection state

use serde::{Deserialize, Serialize};

/// Identifier of a feature tile
pub type FeatureId = u32;

/// Currently highlighted feature tile, if any
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub selected_id: Option<FeatureId>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Click on a tile: selecting the current tile clears it, any other tile
    /// replaces it. Returns the new selection.
    pub fn select(&mut self, id: FeatureId) -> Option<FeatureId> {
        self.selected_id = if self.selected_id == Some(id) {
            None
        } else {
            Some(id)
        };
        self.selected_id
    }
}
