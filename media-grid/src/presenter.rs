//! Binds the item list, layout engine and selection to reusable display slots.
//!
//! Only entries near the viewport own a slot. Slots that scroll away go back
//! to a free pool and are handed to the next entry that becomes visible, so a
//! slot can change entries while a preview for its previous entry is still
//! being resolved. [`GridPresenter::apply_thumbnail`] guards against that.

use crate::config::PickerConfig;
use crate::layout::{CellFrame, LayoutEngine, LayoutMode};
use crate::models::{
    AssetId, CameraHandle, Entry, ItemList, PhotoAsset, Point, Rect, Size, Thumbnail,
};
use crate::selection::{Effect, SelectionChange, SelectionController};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub usize);

/// What a slot currently displays
#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent {
    Photo {
        asset: PhotoAsset,
        image: Option<Thumbnail>,
        /// Cell-local part of the cell inside the viewport
        visible: Option<Rect>,
        anchor: Point,
    },
    Camera {
        handle: Option<CameraHandle>,
    },
}

#[derive(Debug, Clone)]
pub struct CellSlot {
    pub id: SlotId,
    /// Entry index this slot displays, `None` while in the free pool
    pub index: Option<usize>,
    pub frame: CellFrame,
    pub content: SlotContent,
}

impl CellSlot {
    fn represents(&self, entry: &Entry) -> bool {
        match (&self.content, entry) {
            (SlotContent::Photo { asset, .. }, Entry::Photo(other)) => asset == other,
            (SlotContent::Camera { .. }, Entry::CameraPlaceholder) => true,
            _ => false,
        }
    }
}

/// Preview the presenter wants resolved for a freshly bound slot
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailRequest {
    pub slot: SlotId,
    pub asset: PhotoAsset,
    pub size: Size,
}

/// Resolved preview, delivered back on the UI thread
#[derive(Debug, Clone)]
pub struct ThumbnailResult {
    pub slot: SlotId,
    pub asset: AssetId,
    pub image: Option<Thumbnail>,
}

/// Outcome of a tap on a grid entry
#[derive(Debug, Clone, PartialEq)]
pub enum Tap {
    Selection {
        change: SelectionChange,
        requests: Vec<ThumbnailRequest>,
    },
    Camera(CameraHandle),
    Ignored,
}

#[derive(Debug)]
pub struct GridPresenter {
    engine: LayoutEngine,
    selection: SelectionController,
    items: ItemList,
    generation: u64,
    frames: Vec<CellFrame>,
    camera_enabled: bool,
    camera_handle: Option<CameraHandle>,
    hidden: bool,
    viewport_width: f32,
    scroll_offset: f32,
    slots: Vec<CellSlot>,
    bound: BTreeMap<usize, SlotId>,
    free: Vec<SlotId>,
    layout_passes: usize,
}

impl GridPresenter {
    pub fn new(config: &PickerConfig) -> Self {
        Self {
            engine: LayoutEngine::new(config.layout.clone()),
            selection: SelectionController::new(config.variant),
            items: ItemList::build(Vec::new(), config.camera_enabled),
            generation: 0,
            frames: Vec::new(),
            camera_enabled: config.camera_enabled,
            camera_handle: None,
            hidden: false,
            viewport_width: config.viewport_width,
            scroll_offset: 0.0,
            slots: Vec::new(),
            bound: BTreeMap::new(),
            free: Vec::new(),
            layout_passes: 0,
        }
    }

    pub fn items(&self) -> &ItemList {
        &self.items
    }

    pub fn frames(&self) -> &[CellFrame] {
        &self.frames
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn mode(&self) -> LayoutMode {
        self.selection.mode()
    }

    pub fn engine(&self) -> &LayoutEngine {
        &self.engine
    }

    pub fn camera_handle(&self) -> Option<CameraHandle> {
        self.camera_handle
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    /// Number of full re-layouts so far
    pub fn layout_passes(&self) -> usize {
        self.layout_passes
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Slots currently bound to an entry, in entry order
    pub fn visible_slots(&self) -> impl Iterator<Item = &CellSlot> {
        self.bound.values().map(move |id| &self.slots[id.0])
    }

    pub fn slot(&self, id: SlotId) -> Option<&CellSlot> {
        self.slots.get(id.0)
    }

    /// Slot displaying the entry at `index`
    pub fn slot_for_index(&self, index: usize) -> Option<&CellSlot> {
        self.bound.get(&index).and_then(|id| self.slot(*id))
    }

    pub fn content_size(&self) -> Size {
        self.engine.content_size(&self.frames)
    }

    pub fn surface_height(&self) -> f32 {
        if self.hidden {
            0.0
        } else {
            let mode = LayoutEngine::effective_mode(&self.items, self.mode());
            self.engine.surface_height(mode, self.viewport_width)
        }
    }

    /// Rebuilds the list from a completed fetch
    pub fn replace_items(&mut self, assets: Vec<PhotoAsset>) -> Vec<ThumbnailRequest> {
        log::info!("Showing {} assets", assets.len());
        self.items = ItemList::build(assets, self.camera_enabled);
        self.generation += 1;
        self.relayout()
    }

    pub fn set_camera_enabled(&mut self, enabled: bool) -> Vec<ThumbnailRequest> {
        if enabled == self.camera_enabled {
            return Vec::new();
        }
        self.camera_enabled = enabled;
        self.items = std::mem::take(&mut self.items).with_camera(enabled);
        self.generation += 1;
        self.relayout()
    }

    /// Records a new preview handle; returns whether its identity changed
    pub fn set_camera_handle(&mut self, handle: Option<CameraHandle>) -> bool {
        if handle == self.camera_handle {
            return false;
        }
        self.camera_handle = handle;
        self.rebind_camera();
        true
    }

    pub fn set_viewport_width(&mut self, width: f32) -> Vec<ThumbnailRequest> {
        if width <= 0.0 || width == self.viewport_width {
            return Vec::new();
        }
        self.viewport_width = width;
        self.relayout()
    }

    /// Hides the grid while the document menu is shown
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Recomputes every frame and rebinds the slots
    pub fn relayout(&mut self) -> Vec<ThumbnailRequest> {
        self.layout_passes += 1;
        self.frames = self
            .engine
            .frames(
                &self.items,
                self.generation,
                self.selection.mode(),
                self.viewport_width,
            )
            .to_vec();

        let bound: Vec<(usize, SlotId)> = self.bound.iter().map(|(i, s)| (*i, *s)).collect();
        for (index, slot_id) in bound {
            let keep = match (self.items.get(index), self.frames.get(index)) {
                (Some(entry), Some(frame)) if self.slots[slot_id.0].represents(entry) => {
                    Some(*frame)
                }
                _ => None,
            };
            match keep {
                Some(frame) => self.slots[slot_id.0].frame = frame,
                None => self.release(index),
            }
        }

        self.scroll_offset = self.clamp_offset(self.scroll_offset);
        self.rebind_camera();
        self.reconcile()
    }

    /// Moves the viewport. Recomputes visible areas but never re-lays out.
    pub fn scroll_to(&mut self, offset: f32) -> Vec<ThumbnailRequest> {
        self.scroll_offset = self.clamp_offset(offset);
        self.reconcile()
    }

    /// Centers the entry at `index` in the viewport
    pub fn scroll_into_view(&mut self, index: usize) -> Vec<ThumbnailRequest> {
        match self.frames.get(index) {
            Some(frame) => {
                let center = frame.rect.min_x() + frame.rect.size.width / 2.0;
                self.scroll_to(center - self.viewport_width / 2.0)
            }
            None => Vec::new(),
        }
    }

    /// Applies a resolved preview if its slot still shows the same asset
    pub fn apply_thumbnail(&mut self, result: ThumbnailResult) -> bool {
        let Some(slot) = self.slots.get_mut(result.slot.0) else {
            return false;
        };
        if slot.index.is_none() {
            log::debug!("Dropping preview for {}: slot is free", result.asset);
            return false;
        }
        match &mut slot.content {
            SlotContent::Photo { asset, image, .. } if asset.id == result.asset => {
                *image = result.image;
                true
            }
            _ => {
                log::debug!("Dropping stale preview for {}", result.asset);
                false
            }
        }
    }

    pub fn tap(&mut self, index: usize) -> Tap {
        if self.hidden {
            return Tap::Ignored;
        }
        match self.items.get(index).cloned() {
            Some(Entry::Photo(asset)) => {
                let change = self.selection.toggle(&asset, index);
                let requests = self.apply_effects(&change.effects);
                Tap::Selection { change, requests }
            }
            Some(Entry::CameraPlaceholder) => match self.camera_handle {
                Some(handle) => Tap::Camera(handle),
                None => Tap::Ignored,
            },
            None => Tap::Ignored,
        }
    }

    pub fn clear_selection(&mut self) -> Vec<ThumbnailRequest> {
        let change = self.selection.clear();
        self.apply_effects(&change.effects)
    }

    /// Carries out the effects requested by a selection transition
    pub fn apply_effects(&mut self, effects: &[Effect]) -> Vec<ThumbnailRequest> {
        let mut requests = Vec::new();
        for effect in effects {
            match effect {
                Effect::Relayout => {
                    self.engine.invalidate();
                    requests.extend(self.relayout());
                }
                Effect::RebindCamera => self.rebind_camera(),
                Effect::ScrollIntoView { index, .. } => {
                    requests.extend(self.scroll_into_view(*index));
                }
                // Command labels are derived from the selection on render
                Effect::RefreshSendTitle => {}
            }
        }
        requests
    }

    fn clamp_offset(&self, offset: f32) -> f32 {
        let max = (self.content_size().width - self.viewport_width).max(0.0);
        offset.clamp(0.0, max)
    }

    fn viewport(&self) -> Rect {
        Rect::new(
            self.scroll_offset,
            0.0,
            self.viewport_width,
            self.content_size().height,
        )
    }

    fn rebind_camera(&mut self) {
        let handle = self.camera_handle;
        for id in self.bound.values() {
            if let SlotContent::Camera { handle: bound } = &mut self.slots[id.0].content {
                *bound = handle;
            }
        }
    }

    fn release(&mut self, index: usize) {
        if let Some(id) = self.bound.remove(&index) {
            self.slots[id.0].index = None;
            self.free.push(id);
        }
    }

    /// Frees slots that left the viewport and binds newly visible entries
    fn reconcile(&mut self) -> Vec<ThumbnailRequest> {
        let margin = self.engine.config().preload_margin;
        let viewport = self.viewport();
        let window = Rect::new(
            viewport.min_x() - margin,
            viewport.min_y(),
            viewport.size.width + 2.0 * margin,
            viewport.size.height,
        );
        let wanted: Vec<usize> = self
            .frames
            .iter()
            .filter(|f| f.rect.intersection(&window).is_some())
            .map(|f| f.index)
            .collect();

        let gone: Vec<usize> = self
            .bound
            .keys()
            .copied()
            .filter(|i| !wanted.contains(i))
            .collect();
        for index in gone {
            self.release(index);
        }

        let mut requests = Vec::new();
        for index in wanted {
            if self.bound.contains_key(&index) {
                continue;
            }
            let (Some(entry), Some(frame)) =
                (self.items.get(index).cloned(), self.frames.get(index).copied())
            else {
                continue;
            };
            match entry {
                Entry::Photo(asset) => {
                    let size = self.engine.preview_size(&asset, self.viewport_width);
                    let content = SlotContent::Photo {
                        asset: asset.clone(),
                        image: None,
                        visible: None,
                        anchor: Point::default(),
                    };
                    let slot = self.acquire(index, frame, content);
                    requests.push(ThumbnailRequest { slot, asset, size });
                }
                Entry::CameraPlaceholder => {
                    let content = SlotContent::Camera {
                        handle: self.camera_handle,
                    };
                    self.acquire(index, frame, content);
                }
            }
        }

        self.update_visible_areas();
        requests
    }

    fn acquire(&mut self, index: usize, frame: CellFrame, content: SlotContent) -> SlotId {
        let id = match self.free.pop() {
            Some(id) => {
                let slot = &mut self.slots[id.0];
                slot.index = Some(index);
                slot.frame = frame;
                slot.content = content;
                id
            }
            None => {
                let id = SlotId(self.slots.len());
                self.slots.push(CellSlot {
                    id,
                    index: Some(index),
                    frame,
                    content,
                });
                id
            }
        };
        self.bound.insert(index, id);
        id
    }

    fn update_visible_areas(&mut self) {
        let viewport = self.viewport();
        for id in self.bound.values() {
            let slot = &mut self.slots[id.0];
            if let SlotContent::Photo {
                visible, anchor, ..
            } = &mut slot.content
            {
                *visible = LayoutEngine::visible_slice(&slot.frame, &viewport);
                *anchor = self.engine.selection_anchor(&slot.frame, *visible);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PickerVariant;
    use uuid::Uuid;

    fn config(camera: bool) -> PickerConfig {
        PickerConfig {
            camera_enabled: camera,
            viewport_width: 375.0,
            ..PickerConfig::default()
        }
    }

    fn assets(n: usize) -> Vec<PhotoAsset> {
        (0..n)
            .map(|i| PhotoAsset::image(format!("a{}", i), 400, 300))
            .collect()
    }

    fn thumb() -> Thumbnail {
        Thumbnail {
            width: 1,
            height: 1,
            mime: "image/webp",
            bytes: vec![1, 2, 3],
        }
    }

    fn photo_of(slot: &CellSlot) -> &PhotoAsset {
        match &slot.content {
            SlotContent::Photo { asset, .. } => asset,
            other => panic!("expected photo slot, got {:?}", other),
        }
    }

    /// Entries a host showing the row at `scroll_offset()` has on screen
    fn on_screen(presenter: &GridPresenter) -> Vec<usize> {
        let left = presenter.scroll_offset();
        let right = left + presenter.viewport_width();
        presenter
            .frames()
            .iter()
            .filter(|f| f.rect.max_x() > left && f.rect.min_x() < right)
            .map(|f| f.index)
            .collect()
    }

    fn bound(presenter: &GridPresenter) -> Vec<usize> {
        presenter.visible_slots().filter_map(|s| s.index).collect()
    }

    #[test]
    fn test_replace_items_requests_visible_previews() {
        let mut presenter = GridPresenter::new(&config(false));
        let requests = presenter.replace_items(assets(10));
        // 375 / (93.75 + 6) covers four compact cells
        assert_eq!(requests.len(), 4);
        assert_eq!(presenter.layout_passes(), 1);
        for request in &requests {
            let slot = presenter.slot(request.slot).unwrap();
            assert_eq!(photo_of(slot), &request.asset);
            assert_eq!(request.size.height, 187.5);
        }
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut presenter = GridPresenter::new(&config(false));
        let requests = presenter.replace_items(assets(10));
        let first = requests
            .iter()
            .find(|r| r.asset.id.as_str() == "a0")
            .unwrap()
            .clone();

        let new_requests = presenter.scroll_to(400.0);
        let reused = new_requests
            .iter()
            .find(|r| r.slot == first.slot)
            .expect("slot of a0 is reused")
            .clone();
        assert_ne!(reused.asset, first.asset);

        let applied = presenter.apply_thumbnail(ThumbnailResult {
            slot: first.slot,
            asset: first.asset.id.clone(),
            image: Some(thumb()),
        });
        assert!(!applied);
        match &presenter.slot(first.slot).unwrap().content {
            SlotContent::Photo { image, .. } => assert!(image.is_none()),
            other => panic!("unexpected {:?}", other),
        }

        assert!(presenter.apply_thumbnail(ThumbnailResult {
            slot: reused.slot,
            asset: reused.asset.id.clone(),
            image: Some(thumb()),
        }));
    }

    #[test]
    fn test_result_for_freed_slot_is_discarded() {
        let mut presenter = GridPresenter::new(&config(false));
        let requests = presenter.replace_items(assets(3));
        presenter.replace_items(Vec::new());
        assert!(!presenter.apply_thumbnail(ThumbnailResult {
            slot: requests[0].slot,
            asset: requests[0].asset.id.clone(),
            image: Some(thumb()),
        }));
    }

    #[test]
    fn test_scroll_does_not_relayout() {
        let mut presenter = GridPresenter::new(&config(true));
        presenter.replace_items(assets(10));
        let passes = presenter.layout_passes();
        presenter.scroll_to(120.0);
        presenter.scroll_to(250.0);
        assert_eq!(presenter.layout_passes(), passes);
        assert_eq!(presenter.scroll_offset(), 250.0);
    }

    #[test]
    fn test_scroll_is_clamped() {
        let mut presenter = GridPresenter::new(&config(false));
        presenter.replace_items(assets(2));
        presenter.scroll_to(500.0);
        assert_eq!(presenter.scroll_offset(), 0.0);
    }

    #[test]
    fn test_first_selection_relayouts_once() {
        let mut presenter = GridPresenter::new(&config(true));
        presenter.replace_items(assets(5));
        let passes = presenter.layout_passes();

        match presenter.tap(1) {
            Tap::Selection { change, .. } => {
                assert!(change.mode_changed);
                assert!(!change.now_empty);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(presenter.mode(), LayoutMode::Expanded);
        assert_eq!(presenter.layout_passes(), passes + 1);

        presenter.tap(2);
        assert_eq!(presenter.layout_passes(), passes + 1);
    }

    #[test]
    fn test_expanded_anchor_stays_in_visible_slice() {
        let mut presenter = GridPresenter::new(&config(false));
        presenter.replace_items(assets(4));
        presenter.tap(0);
        presenter.scroll_to(100.0);
        for slot in presenter.visible_slots() {
            if let SlotContent::Photo {
                visible: Some(visible),
                anchor,
                ..
            } = &slot.content
            {
                assert!(anchor.x <= visible.max_x().max(20.0));
                assert!(anchor.x >= 20.0);
            }
        }
    }

    #[test]
    fn test_camera_handle_rebinds_on_relayout() {
        let mut presenter = GridPresenter::new(&config(true));
        presenter.replace_items(assets(3));
        let handle = CameraHandle::new(Uuid::new_v4());
        assert!(presenter.set_camera_handle(Some(handle)));
        assert!(!presenter.set_camera_handle(Some(handle)));

        let camera_slot = presenter.slot_for_index(0).unwrap();
        assert_eq!(
            camera_slot.content,
            SlotContent::Camera {
                handle: Some(handle)
            }
        );

        let recreated = CameraHandle::new(Uuid::new_v4());
        presenter.set_camera_handle(Some(recreated));
        presenter.relayout();
        assert_eq!(
            presenter.slot_for_index(0).unwrap().content,
            SlotContent::Camera {
                handle: Some(recreated)
            }
        );
    }

    #[test]
    fn test_camera_tap_needs_handle() {
        let mut presenter = GridPresenter::new(&config(true));
        presenter.replace_items(assets(1));
        assert_eq!(presenter.tap(0), Tap::Ignored);

        let handle = CameraHandle::new(Uuid::new_v4());
        presenter.set_camera_handle(Some(handle));
        assert_eq!(presenter.tap(0), Tap::Camera(handle));
    }

    #[test]
    fn test_toggle_camera_keeps_placeholder_first() {
        let mut presenter = GridPresenter::new(&config(false));
        presenter.replace_items(assets(3));
        presenter.set_camera_enabled(true);
        assert!(presenter.items().get(0).unwrap().is_camera());
        presenter.set_camera_enabled(false);
        assert!(!presenter.items().has_camera());
        assert_eq!(presenter.items().len(), 3);
    }

    #[test]
    fn test_hidden_grid_ignores_taps() {
        let mut presenter = GridPresenter::new(&config(false));
        presenter.replace_items(assets(2));
        presenter.set_hidden(true);
        assert_eq!(presenter.tap(0), Tap::Ignored);
        assert_eq!(presenter.surface_height(), 0.0);
    }

    #[test]
    fn test_always_expanded_variant() {
        let config = PickerConfig {
            variant: PickerVariant::AlwaysExpanded,
            ..config(false)
        };
        let mut presenter = GridPresenter::new(&config);
        presenter.replace_items(assets(2));
        assert_eq!(presenter.frames()[0].size().height, 187.5);
        assert_eq!(presenter.surface_height(), 187.5 + 16.0);
    }

    #[test]
    fn test_tap_moves_offset_and_bound_slots_together() {
        let mut presenter = GridPresenter::new(&config(false));
        presenter.replace_items(assets(10));
        presenter.scroll_to(300.0);
        assert_eq!(bound(&presenter), on_screen(&presenter));

        let change = match presenter.tap(5) {
            Tap::Selection { change, .. } => change,
            other => panic!("unexpected {:?}", other),
        };
        assert!(change.mode_changed);

        // The host scrolls its container to the presenter's offset
        let offset = presenter.scroll_offset();
        assert!(offset > 300.0);
        assert_eq!(bound(&presenter), on_screen(&presenter));
        assert!(bound(&presenter).contains(&5));

        // and the resulting scroll event reports the same offset back
        let passes = presenter.layout_passes();
        assert!(presenter.scroll_to(offset).is_empty());
        assert_eq!(bound(&presenter), on_screen(&presenter));
        assert_eq!(presenter.layout_passes(), passes);
    }
}
