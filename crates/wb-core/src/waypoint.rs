//! Waypoint path selection over the link graph

use std::collections::HashSet;

use crate::entity::WaypointId;
use crate::scene::{Scene, WaypointLink};

/// Every waypoint reachable from `source` through `links`, in depth-first
/// visit order. `source` itself comes first.
///
/// Uses an explicit stack and a visited set, so cycles, self-loops and
/// duplicate links terminate and each id is visited exactly once.
pub fn waypoint_path(links: &[WaypointLink], source: WaypointId) -> Vec<WaypointId> {
    let mut visited = HashSet::new();
    let mut order = Vec::new();
    let mut stack = vec![source];

    while let Some(id) = stack.pop() {
        if !visited.insert(id) {
            continue;
        }
        order.push(id);
        // Reverse so neighbors are visited in link order
        for link in links.iter().rev() {
            if let Some(next) = link.other(id) {
                if !visited.contains(&next) {
                    stack.push(next);
                }
            }
        }
    }

    order
}

impl Scene {
    /// Select or deselect every waypoint connected to `source`.
    ///
    /// Returns how many waypoint entities were touched.
    pub fn select_waypoint_path(&mut self, source: WaypointId, select: bool) -> usize {
        let path: HashSet<WaypointId> = waypoint_path(&self.waypoint_links, source)
            .into_iter()
            .collect();

        let indices: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.waypoint_id.is_some_and(|id| path.contains(&id)))
            .map(|(i, _)| i)
            .collect();

        for &index in &indices {
            self.set_selected_at(index, select);
        }
        tracing::debug!(source, select, count = indices.len(), "waypoint path selection");
        indices.len()
    }
}
