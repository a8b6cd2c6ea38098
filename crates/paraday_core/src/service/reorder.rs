//! Drag-style reordering by id.

use crate::model::project::Project;
use crate::model::task::Task;

/// Records addressable by a stable string id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Moves `source_id` to the index `target_id` occupied before the move.
///
/// Returns `items` untouched when the ids are equal or either is missing.
pub fn reorder_by_id<T: Identified>(mut items: Vec<T>, source_id: &str, target_id: &str) -> Vec<T> {
    if source_id == target_id {
        return items;
    }
    let from = items.iter().position(|item| item.id() == source_id);
    let to = items.iter().position(|item| item.id() == target_id);
    let (Some(from), Some(to)) = (from, to) else {
        return items;
    };

    let moved = items.remove(from);
    items.insert(to, moved);
    items
}
