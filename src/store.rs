//! The editor document store: single source of truth for an open design.
//!
//! `EditorStore` owns the canonical element list, background, canvas
//! config, selection, clipboard, and undo history. Every mutation the
//! interaction layer can trigger routes through a method here; all of them
//! are synchronous and run to completion on the caller's thread.
//!
//! ## Transient vs. committed mutations
//!
//! High-frequency gesture updates (`update_element`, `update_selected`,
//! `update_selected_with`) are cheap and do NOT snapshot history — the
//! caller commits once when the gesture ends via [`EditorStore::commit`].
//! Every discrete operation (add, delete, paste, align, group, …)
//! snapshots on its own. Style toggles commit implicitly.
//!
//! ## Error posture
//!
//! Operations whose preconditions are unmet (align with fewer than two
//! selected elements, ungroup of a non-group, …) are silent no-ops: the
//! interaction layer disables the triggering control, and a stray call
//! must never corrupt the document. Dangling id references are skipped
//! defensively rather than failing an operation.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use uuid::Uuid;

use crate::consts::PASTE_OFFSET;
use crate::doc::{
    Background, CanvasConfig, Element, ElementId, ElementKind, ElementPatch, GroupAttrs,
    Orientation, PageSize, TextAttrs, TextDecoration,
};
use crate::flatten::flatten;
use crate::history::{History, Snapshot};
use crate::wire::LayoutDocument;

/// Alignment target edge for [`EditorStore::align_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignEdge {
    /// Align left edges to the selection's minimum x.
    Left,
    /// Align right edges to the selection's maximum x extent.
    Right,
    /// Center horizontally within the selection's x extent.
    HCenter,
    /// Align top edges to the selection's minimum y.
    Top,
    /// Align bottom edges to the selection's maximum y extent.
    Bottom,
    /// Center vertically within the selection's y extent.
    VCenter,
}

/// Distribution axis for [`EditorStore::distribute_selection`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Equalize horizontal gaps.
    Horizontal,
    /// Equalize vertical gaps.
    Vertical,
}

/// Draw-order move for [`EditorStore::move_selection`].
///
/// Draw order is list order: later elements render on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    /// One step toward the top.
    Up,
    /// One step toward the bottom.
    Down,
    /// All the way to the top.
    Top,
    /// All the way to the bottom.
    Bottom,
}

/// In-memory state of one open template editing session.
pub struct EditorStore {
    title: String,
    elements: Vec<Element>,
    selected_ids: Vec<ElementId>,
    background: Background,
    canvas: CanvasConfig,
    clipboard: Vec<Element>,
    history: History,
}

impl EditorStore {
    /// Create an empty document with default canvas and background.
    #[must_use]
    pub fn new() -> Self {
        let background = Background::default();
        let canvas = CanvasConfig::default();
        let history = History::new(Snapshot {
            elements: Vec::new(),
            background: background.clone(),
            canvas,
        });
        Self {
            title: "Untitled Template".to_owned(),
            elements: Vec::new(),
            selected_ids: Vec::new(),
            background,
            canvas,
            clipboard: Vec::new(),
            history,
        }
    }

    // --- Queries ---

    /// Template title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// All elements in draw order, including grouped children.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Currently selected element ids.
    #[must_use]
    pub fn selected_ids(&self) -> &[ElementId] {
        &self.selected_ids
    }

    /// Document background.
    #[must_use]
    pub fn background(&self) -> &Background {
        &self.background
    }

    /// Canvas configuration.
    #[must_use]
    pub fn canvas(&self) -> CanvasConfig {
        self.canvas
    }

    /// Whether an undo step is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // --- Title ---

    /// Set the template title. Not part of undo history.
    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    // --- Element CRUD ---

    /// Add a new element of the given kind at the default spawn position,
    /// select it exclusively, and snapshot. Returns the new element's id.
    pub fn add_element(&mut self, kind: ElementKind) -> ElementId {
        self.insert_element(Element::new(kind))
    }

    /// Add a new element at an explicit position, select it exclusively,
    /// and snapshot. Returns the new element's id.
    pub fn add_element_at(&mut self, kind: ElementKind, x: f64, y: f64) -> ElementId {
        self.insert_element(Element::new_at(kind, x, y))
    }

    fn insert_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        self.selected_ids = vec![id];
        self.record();
        id
    }

    /// Apply a sparse geometry patch to one element. Transient: no history
    /// snapshot — call [`EditorStore::commit`] when the gesture ends.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) {
        if let Some(element) = self.element_mut(id) {
            patch.apply(element);
        }
    }

    /// Apply a sparse geometry patch to every selected element. Transient.
    pub fn update_selected(&mut self, patch: &ElementPatch) {
        self.update_selected_with(|element| patch.apply(element));
    }

    /// Mutate every selected element through a closure. Transient.
    pub fn update_selected_with(&mut self, mut f: impl FnMut(&mut Element)) {
        let ids = self.selected_ids.clone();
        for id in ids {
            if let Some(element) = self.element_mut(id) {
                f(element);
            }
        }
    }

    /// Snapshot the current state into history without changing it.
    /// Terminates a sequence of transient updates.
    pub fn commit(&mut self) {
        self.record();
    }

    /// Delete every selected element. Selected groups take their children
    /// with them — nothing is left orphaned. Snapshots and clears the
    /// selection. No-op when nothing is selected.
    pub fn delete_selected(&mut self) {
        if self.selected_ids.is_empty() {
            return;
        }
        let mut doomed: Vec<ElementId> = self.selected_ids.clone();
        for id in &self.selected_ids {
            if let Some(group) = self.element(*id).and_then(Element::as_group) {
                doomed.extend(group.children_ids.iter().copied());
            }
        }
        self.elements.retain(|el| !doomed.contains(&el.id));
        self.repair_group_links();
        self.selected_ids.clear();
        self.record();
    }

    // --- Selection ---

    /// Replace the selection. Selection changes are not undoable.
    pub fn set_selected_ids(&mut self, ids: Vec<ElementId>) {
        self.selected_ids = ids;
    }

    // --- Clipboard ---

    /// Copy the selected elements into the clipboard as value copies,
    /// detached from any group. No history effect.
    pub fn copy_selection(&mut self) {
        self.clipboard = self
            .elements
            .iter()
            .filter(|el| self.selected_ids.contains(&el.id))
            .cloned()
            .map(|mut el| {
                el.parent_id = None;
                el
            })
            .collect();
    }

    /// Paste the clipboard contents with fresh ids, offset so copies never
    /// land on their source; successive pastes step further. Selects the
    /// pasted elements and snapshots. No-op on an empty clipboard.
    pub fn paste_from_clipboard(&mut self) {
        if self.clipboard.is_empty() {
            return;
        }
        let mut new_ids = Vec::with_capacity(self.clipboard.len());
        for source in &self.clipboard {
            let mut pasted = source.clone();
            pasted.id = Uuid::new_v4();
            pasted.x += PASTE_OFFSET;
            pasted.y += PASTE_OFFSET;
            new_ids.push(pasted.id);
            self.elements.push(pasted);
        }
        // Advance the stored positions so the next paste lands one step
        // further out.
        for source in &mut self.clipboard {
            source.x += PASTE_OFFSET;
            source.y += PASTE_OFFSET;
        }
        self.selected_ids = new_ids;
        self.record();
    }

    /// Copy then immediately paste the selection.
    pub fn duplicate_selection(&mut self) {
        self.copy_selection();
        self.paste_from_clipboard();
    }

    // --- Alignment & distribution ---

    /// Align every selected element so its edge (or center) lands on the
    /// target computed from the selection's bounding extremes. Rotation is
    /// ignored; boxes are treated as axis-aligned. No-op with fewer than
    /// two selected elements.
    pub fn align_selection(&mut self, edge: AlignEdge) {
        let boxes = self.selected_boxes();
        if boxes.len() < 2 {
            return;
        }
        let min_x = boxes.iter().map(|b| b.x).fold(f64::INFINITY, f64::min);
        let max_x = boxes.iter().map(|b| b.x + b.width).fold(f64::NEG_INFINITY, f64::max);
        let min_y = boxes.iter().map(|b| b.y).fold(f64::INFINITY, f64::min);
        let max_y = boxes.iter().map(|b| b.y + b.height).fold(f64::NEG_INFINITY, f64::max);

        for b in &boxes {
            let Some(element) = self.element_mut(b.id) else {
                continue;
            };
            match edge {
                AlignEdge::Left => element.x = min_x,
                AlignEdge::Right => element.x = max_x - b.width,
                AlignEdge::HCenter => element.x = (min_x + max_x) / 2.0 - b.width / 2.0,
                AlignEdge::Top => element.y = min_y,
                AlignEdge::Bottom => element.y = max_y - b.height,
                AlignEdge::VCenter => element.y = (min_y + max_y) / 2.0 - b.height / 2.0,
            }
        }
        self.record();
    }

    /// Space the selected elements so the gaps between them are equal along
    /// the given axis. The outermost two elements stay put. No-op with
    /// fewer than three selected elements.
    pub fn distribute_selection(&mut self, axis: Axis) {
        let mut boxes = self.selected_boxes();
        if boxes.len() < 3 {
            return;
        }
        match axis {
            Axis::Horizontal => {
                boxes.sort_by(|a, b| a.x.total_cmp(&b.x));
                let first = &boxes[0];
                let last = &boxes[boxes.len() - 1];
                let span = (last.x + last.width) - first.x;
                let occupied: f64 = boxes.iter().map(|b| b.width).sum();
                #[allow(clippy::cast_precision_loss)]
                let spacing = (span - occupied) / (boxes.len() - 1) as f64;
                let mut cursor = first.x;
                for b in &boxes {
                    let width = b.width;
                    if let Some(element) = self.element_mut(b.id) {
                        element.x = cursor;
                    }
                    cursor += width + spacing;
                }
            }
            Axis::Vertical => {
                boxes.sort_by(|a, b| a.y.total_cmp(&b.y));
                let first = &boxes[0];
                let last = &boxes[boxes.len() - 1];
                let span = (last.y + last.height) - first.y;
                let occupied: f64 = boxes.iter().map(|b| b.height).sum();
                #[allow(clippy::cast_precision_loss)]
                let spacing = (span - occupied) / (boxes.len() - 1) as f64;
                let mut cursor = first.y;
                for b in &boxes {
                    let height = b.height;
                    if let Some(element) = self.element_mut(b.id) {
                        element.y = cursor;
                    }
                    cursor += height + spacing;
                }
            }
        }
        self.record();
    }

    // --- Grouping ---

    /// Group the selected root elements under a new group positioned at
    /// their bounding top-left corner, rewriting child positions relative
    /// to it. Elements already in a group, and group elements themselves,
    /// are excluded — groups never nest. Selects the new group. No-op
    /// unless at least two eligible elements remain.
    pub fn group_selected(&mut self) {
        if self.selected_ids.len() < 2 {
            return;
        }
        let roots: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|el| {
                self.selected_ids.contains(&el.id)
                    && el.parent_id.is_none()
                    && el.as_group().is_none()
            })
            .map(|el| el.id)
            .collect();
        if roots.len() < 2 {
            tracing::debug!(eligible = roots.len(), "group: too few root elements");
            return;
        }

        let members = self.elements.iter().filter(|el| roots.contains(&el.id));
        let min_x = members.clone().map(|el| el.x).fold(f64::INFINITY, f64::min);
        let min_y = members.map(|el| el.y).fold(f64::INFINITY, f64::min);

        let group = Element::new_at(
            ElementKind::Group(GroupAttrs { children_ids: roots.clone(), ..GroupAttrs::default() }),
            min_x,
            min_y,
        );
        let group_id = group.id;
        for id in &roots {
            if let Some(element) = self.element_mut(*id) {
                element.parent_id = Some(group_id);
                element.x -= min_x;
                element.y -= min_y;
            }
        }
        self.elements.push(group);
        self.selected_ids = vec![group_id];
        self.record();
    }

    /// Dissolve the single selected group: bake its rotation and scale into
    /// each child's absolute position, rotation, and size, then remove the
    /// group and select the former children. No-op unless exactly one
    /// group element is selected.
    pub fn ungroup_selected(&mut self) {
        let [group_id] = self.selected_ids[..] else {
            return;
        };
        let Some(group_element) = self.element(group_id) else {
            return;
        };
        let Some(group) = group_element.as_group().cloned() else {
            tracing::debug!(%group_id, "ungroup: selection is not a group");
            return;
        };
        let (group_x, group_y, group_rotation) =
            (group_element.x, group_element.y, group_element.rotation);
        let (sin, cos) = group_rotation.to_radians().sin_cos();
        let content_scale = (group.scale_x + group.scale_y) / 2.0;

        self.elements.retain(|el| el.id != group_id);

        let mut freed = Vec::with_capacity(group.children_ids.len());
        for child_id in &group.children_ids {
            let Some(child) = self.element_mut(*child_id) else {
                continue;
            };
            let local_x = child.x * group.scale_x;
            let local_y = child.y * group.scale_y;
            child.x = group_x + local_x * cos - local_y * sin;
            child.y = group_y + local_x * sin + local_y * cos;
            child.rotation += group_rotation;
            let (width, height) = child.size();
            child.set_size(width * group.scale_x, height * group.scale_y);
            child.scale_content(content_scale);
            child.parent_id = None;
            freed.push(*child_id);
        }
        self.selected_ids = freed;
        self.record();
    }

    // --- Text styling ---

    /// Toggle bold on every selected text-like element. Commits.
    pub fn toggle_bold(&mut self) {
        self.update_selected_with(|element| {
            if let Some(attrs) = element.text_attrs_mut() {
                attrs.font_style.bold = !attrs.font_style.bold;
            }
        });
        self.commit();
    }

    /// Toggle italic on every selected text-like element. Commits.
    pub fn toggle_italic(&mut self) {
        self.update_selected_with(|element| {
            if let Some(attrs) = element.text_attrs_mut() {
                attrs.font_style.italic = !attrs.font_style.italic;
            }
        });
        self.commit();
    }

    /// Toggle underline on every selected text-like element. Commits.
    pub fn toggle_underline(&mut self) {
        self.update_selected_with(|element| {
            if let Some(attrs) = element.text_attrs_mut() {
                attrs.text_decoration = match attrs.text_decoration {
                    TextDecoration::Underline => TextDecoration::None,
                    TextDecoration::None => TextDecoration::Underline,
                };
            }
        });
        self.commit();
    }

    // --- Canvas & background ---

    /// Merge new size/orientation into the canvas config, re-deriving
    /// width and height from the page-size table. Snapshots.
    pub fn set_canvas_config(&mut self, size: Option<PageSize>, orientation: Option<Orientation>) {
        let size = size.unwrap_or(self.canvas.size);
        let orientation = orientation.unwrap_or(self.canvas.orientation);
        self.canvas = CanvasConfig::derive(size, orientation);
        self.record();
    }

    /// Set the background fill color. Snapshots.
    pub fn set_background_fill(&mut self, fill: String) {
        self.background.fill = fill;
        self.record();
    }

    /// Set or clear the background image. Snapshots.
    pub fn set_background_image(&mut self, image: Option<String>) {
        self.background.image = image;
        self.record();
    }

    // --- Draw order ---

    /// Move the single selected element within the draw-order list. Later
    /// elements draw on top. No-op unless exactly one element is selected.
    pub fn move_selection(&mut self, direction: ZOrder) {
        let [id] = self.selected_ids[..] else {
            return;
        };
        let Some(index) = self.elements.iter().position(|el| el.id == id) else {
            return;
        };
        let element = self.elements.remove(index);
        let new_index = match direction {
            ZOrder::Up => (index + 1).min(self.elements.len()),
            ZOrder::Down => index.saturating_sub(1),
            ZOrder::Top => self.elements.len(),
            ZOrder::Bottom => 0,
        };
        self.elements.insert(new_index, element);
        self.record();
    }

    // --- Presets ---

    /// Insert the signature combination: a `{{signature}}` placeholder in a
    /// script face with a name/title caption below it. Selects both and
    /// snapshots once.
    pub fn add_signature_block(&mut self) {
        let signature = Element::new_at(
            ElementKind::Placeholder(TextAttrs {
                text: "{{signature}}".to_owned(),
                font_family: "Dancing Script".to_owned(),
                font_size: 32.0,
                width: 200.0,
                height: 40.0,
                ..TextAttrs::default()
            }),
            50.0,
            50.0,
        );
        let caption = Element::new_at(
            ElementKind::Text(TextAttrs {
                text: "Name, Title".to_owned(),
                font_size: 16.0,
                width: 200.0,
                height: 20.0,
                ..TextAttrs::default()
            }),
            50.0,
            90.0,
        );
        self.selected_ids = vec![signature.id, caption.id];
        self.elements.push(signature);
        self.elements.push(caption);
        self.record();
    }

    // --- History ---

    /// Step back one committed state. Restores elements, background, and
    /// canvas; clears the selection so it cannot reference an element that
    /// no longer exists. No-op at the oldest retained state.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.history.undo() else {
            return;
        };
        self.elements = snapshot.elements.clone();
        self.background = snapshot.background.clone();
        self.canvas = snapshot.canvas;
        self.selected_ids.clear();
        tracing::trace!("undo");
    }

    /// Step forward one committed state. Mirror of [`EditorStore::undo`].
    pub fn redo(&mut self) {
        let Some(snapshot) = self.history.redo() else {
            return;
        };
        self.elements = snapshot.elements.clone();
        self.background = snapshot.background.clone();
        self.canvas = snapshot.canvas;
        self.selected_ids.clear();
        tracing::trace!("redo");
    }

    // --- Persistence boundary ---

    /// Replace the whole state from a persisted document. Group structure
    /// is not persisted, so every element is forced to root level. History
    /// restarts with the loaded state as its only entry.
    pub fn load_template(&mut self, title: String, document: LayoutDocument) {
        let LayoutDocument { canvas, background, mut elements } = document;
        for element in &mut elements {
            element.parent_id = None;
        }
        tracing::debug!(count = elements.len(), title = %title, "loaded template");
        self.title = title;
        self.elements = elements;
        self.background = background;
        self.canvas = canvas;
        self.selected_ids.clear();
        self.clipboard.clear();
        self.history = History::new(self.snapshot());
    }

    /// Build the persisted layout document: canvas, background, and the
    /// flattened element list. The save payload.
    #[must_use]
    pub fn to_document(&self) -> LayoutDocument {
        LayoutDocument {
            canvas: self.canvas,
            background: self.background.clone(),
            elements: flatten(&self.elements),
        }
    }

    /// Flattened, render-ready view of the current elements.
    #[must_use]
    pub fn flattened_elements(&self) -> Vec<Element> {
        flatten(&self.elements)
    }

    // --- Internals ---

    fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|el| el.id == id)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            elements: self.elements.clone(),
            background: self.background.clone(),
            canvas: self.canvas,
        }
    }

    fn record(&mut self) {
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    /// Selected elements' axis-aligned boxes in draw order. Ids that do
    /// not resolve are skipped.
    fn selected_boxes(&self) -> Vec<SelectedBox> {
        self.elements
            .iter()
            .filter(|el| self.selected_ids.contains(&el.id))
            .map(|el| {
                let (width, height) = el.size();
                SelectedBox { id: el.id, x: el.x, y: el.y, width, height }
            })
            .collect()
    }

    /// Drop ids of removed elements from every group's child list, and
    /// clear back-references to groups that no longer exist. The one place
    /// the bidirectional parent/child invariant is repaired.
    fn repair_group_links(&mut self) {
        let live: Vec<ElementId> = self.elements.iter().map(|el| el.id).collect();
        let group_ids: Vec<ElementId> =
            self.elements.iter().filter(|el| el.as_group().is_some()).map(|el| el.id).collect();
        for element in &mut self.elements {
            if let Some(group) = element.as_group_mut() {
                group.children_ids.retain(|id| live.contains(id));
            }
            if let Some(parent) = element.parent_id {
                if !group_ids.contains(&parent) {
                    element.parent_id = None;
                }
            }
        }
    }
}

impl Default for EditorStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Axis-aligned box of a selected element, captured before a geometry pass.
struct SelectedBox {
    id: ElementId,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}
