//! Coordinate flattening: projecting grouped elements into absolute space.
//!
//! The persisted layout document carries no group structure, so at save (and
//! render) time every root group's transform is baked into its children and
//! the group itself is dropped. This is a one-way projection: once
//! flattened, the original grouping cannot be reconstructed.

#[cfg(test)]
#[path = "flatten_test.rs"]
mod flatten_test;

use crate::doc::{Element, ElementKind};

/// Flatten a nested (depth ≤ 1) element tree into an absolute-coordinate
/// flat list.
///
/// Root elements that are not groups are emitted unchanged. For each root
/// group, every resolvable child is emitted with the group transform
/// applied: the child's local offset is scaled by the group scale, rotated
/// by the group rotation, and translated to the group origin; rotations
/// sum; width/height scale per axis; font size and stroke width scale by
/// the mean of the two scale factors, approximating uniform visual scaling.
/// The group element itself is never emitted.
///
/// Empty groups contribute nothing, and child ids that no longer resolve
/// are skipped rather than failing the pass.
#[must_use]
pub fn flatten(elements: &[Element]) -> Vec<Element> {
    let mut flat = Vec::with_capacity(elements.len());

    for element in elements {
        if element.parent_id.is_some() {
            continue;
        }
        let ElementKind::Group(group) = &element.kind else {
            flat.push(element.clone());
            continue;
        };

        let (sin, cos) = element.rotation.to_radians().sin_cos();
        let content_scale = (group.scale_x + group.scale_y) / 2.0;

        for child_id in &group.children_ids {
            let Some(child) = elements.iter().find(|c| c.id == *child_id) else {
                tracing::debug!(%child_id, group_id = %element.id, "skipping dangling group child");
                continue;
            };

            let mut absolute = child.clone();
            let local_x = child.x * group.scale_x;
            let local_y = child.y * group.scale_y;
            absolute.x = element.x + local_x * cos - local_y * sin;
            absolute.y = element.y + local_x * sin + local_y * cos;
            absolute.rotation = child.rotation + element.rotation;

            let (width, height) = child.size();
            absolute.set_size(width * group.scale_x, height * group.scale_y);
            absolute.scale_content(content_scale);
            absolute.parent_id = None;

            flat.push(absolute);
        }
    }

    flat
}
