//! Frame computation for the horizontally scrolling media row.
//!
//! Two density modes exist. In [`LayoutMode::Compact`] every entry is an equal
//! square. In [`LayoutMode::Expanded`] photos grow to the full row height and
//! keep their native proportions, while the camera cell keeps its compact
//! footprint. All frames are in content coordinates, where `x` grows along
//! the scroll direction.

use crate::config::LayoutConfig;
use crate::models::{Entry, ItemList, PhotoAsset, Point, Rect, Size};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutMode {
    #[default]
    Compact,
    Expanded,
}

/// Position and size of one entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellFrame {
    pub index: usize,
    pub rect: Rect,
}

impl CellFrame {
    pub fn origin(&self) -> Point {
        self.rect.origin
    }

    pub fn size(&self) -> Size {
        self.rect.size
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheKey {
    generation: u64,
    mode: LayoutMode,
    viewport_width: f32,
}

#[derive(Debug)]
struct FrameCache {
    key: CacheKey,
    frames: Vec<CellFrame>,
}

#[derive(Debug)]
pub struct LayoutEngine {
    config: LayoutConfig,
    cache: Option<FrameCache>,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Height of the enlarged row for a viewport
    pub fn max_height(&self, viewport_width: f32) -> f32 {
        viewport_width * self.config.max_height_ratio
    }

    /// Side of the compact square cell
    pub fn compact_side(&self, viewport_width: f32) -> f32 {
        self.max_height(viewport_width) / self.config.multiplier
    }

    /// Mode actually used for a list: without photos there is nothing to enlarge
    pub fn effective_mode(items: &ItemList, mode: LayoutMode) -> LayoutMode {
        if items.has_photos() {
            mode
        } else {
            LayoutMode::Compact
        }
    }

    pub fn size_for(&self, entry: &Entry, mode: LayoutMode, viewport_width: f32) -> Size {
        match (entry, mode) {
            (Entry::CameraPlaceholder, _) | (Entry::Photo(_), LayoutMode::Compact) => {
                Size::square(self.compact_side(viewport_width))
            }
            (Entry::Photo(asset), LayoutMode::Expanded) => {
                let height = self.max_height(viewport_width);
                Size::new(height * asset.aspect_ratio(), height)
            }
        }
    }

    /// Frames for every entry. Pure: the same inputs give the same frames.
    pub fn compute_frames(
        &self,
        items: &ItemList,
        mode: LayoutMode,
        viewport_width: f32,
    ) -> Vec<CellFrame> {
        let mode = Self::effective_mode(items, mode);
        let insets = self.config.insets;
        let mut x = insets.left;

        items
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let size = self.size_for(entry, mode, viewport_width);
                let frame = CellFrame {
                    index,
                    rect: Rect {
                        origin: Point::new(x, insets.top),
                        size,
                    },
                };
                x += size.width + self.config.spacing;
                frame
            })
            .collect()
    }

    /// Cached variant of [`compute_frames`](Self::compute_frames)
    ///
    /// `generation` identifies the item list version; callers bump it whenever
    /// the list is rebuilt.
    pub fn frames(
        &mut self,
        items: &ItemList,
        generation: u64,
        mode: LayoutMode,
        viewport_width: f32,
    ) -> &[CellFrame] {
        let key = CacheKey {
            generation,
            mode: Self::effective_mode(items, mode),
            viewport_width,
        };
        let stale = self.cache.as_ref().map_or(true, |c| c.key != key);
        if stale {
            log::trace!(
                "Recomputing {} frames for {:?} at width {}",
                items.len(),
                key.mode,
                viewport_width
            );
            let frames = self.compute_frames(items, mode, viewport_width);
            self.cache = Some(FrameCache { key, frames });
        }
        match &self.cache {
            Some(cache) => &cache.frames,
            None => &[],
        }
    }

    /// Drops every cached frame; called on each mode switch
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Scrollable content size including insets
    pub fn content_size(&self, frames: &[CellFrame]) -> Size {
        let insets = self.config.insets;
        match frames.last() {
            None => Size::default(),
            Some(last) => {
                let row_height = frames
                    .iter()
                    .map(|f| f.rect.size.height)
                    .fold(0.0_f32, f32::max);
                Size::new(
                    last.rect.max_x() + insets.right,
                    row_height + insets.top + insets.bottom,
                )
            }
        }
    }

    /// Height of the grid surface for a mode
    pub fn surface_height(&self, mode: LayoutMode, viewport_width: f32) -> f32 {
        let insets = self.config.insets;
        let row = match mode {
            LayoutMode::Compact => self.compact_side(viewport_width),
            LayoutMode::Expanded => self.max_height(viewport_width),
        };
        row + insets.top + insets.bottom
    }

    /// Size to request thumbnails at, independent of the current mode
    pub fn preview_size(&self, asset: &PhotoAsset, viewport_width: f32) -> Size {
        let height = self.max_height(viewport_width);
        Size::new(height * asset.aspect_ratio(), height)
    }

    /// Part of `frame` inside `viewport`, in cell-local coordinates
    pub fn visible_slice(frame: &CellFrame, viewport: &Rect) -> Option<Rect> {
        frame
            .rect
            .intersection(viewport)
            .map(|r| r.relative_to(frame.rect.origin))
    }

    /// Center of the selection indicator in cell-local coordinates
    ///
    /// The indicator hugs the trailing edge of the visible slice so that it
    /// stays on screen for wide cells, but never moves past the leading edge.
    pub fn selection_anchor(&self, frame: &CellFrame, visible: Option<Rect>) -> Point {
        let half_w = self.config.selection_size.width / 2.0;
        let half_h = self.config.selection_size.height / 2.0;
        let inset = self.config.selection_inset;
        let y = half_h + inset;

        let x = match visible.filter(|r| !r.is_empty()) {
            Some(slice) => {
                let min_x = half_w + inset;
                let desired = slice.max_x() - half_w - inset;
                min_x.max(desired)
            }
            None => frame.rect.size.width - half_w - inset,
        };
        Point::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 375.0;

    fn engine() -> LayoutEngine {
        LayoutEngine::new(LayoutConfig::default())
    }

    fn mixed_list() -> ItemList {
        ItemList::build(
            vec![
                PhotoAsset::image("a", 4000, 3000),
                PhotoAsset::image("b", 1920, 1080),
            ],
            true,
        )
    }

    #[test]
    fn test_empty_list_has_no_frames() {
        let frames = engine().compute_frames(&ItemList::default(), LayoutMode::Expanded, WIDTH);
        assert!(frames.is_empty());
        assert_eq!(engine().content_size(&frames), Size::default());
    }

    #[test]
    fn test_compact_frames_are_uniform() {
        let engine = engine();
        let frames = engine.compute_frames(&mixed_list(), LayoutMode::Compact, WIDTH);
        assert_eq!(frames.len(), 3);
        let side = engine.compact_side(WIDTH);
        for frame in &frames {
            assert_eq!(frame.size(), Size::square(side));
        }
    }

    #[test]
    fn test_expanded_scenario() {
        let engine = engine();
        let frames = engine.compute_frames(&mixed_list(), LayoutMode::Expanded, WIDTH);
        let h = engine.max_height(WIDTH);
        let small = engine.compact_side(WIDTH);
        let spacing = engine.config().spacing;

        let x0 = frames[0].origin().x;
        assert_eq!(frames[0].size(), Size::square(small));

        let x1 = x0 + small + spacing;
        assert!((frames[1].origin().x - x1).abs() < 1e-3);
        assert!((frames[1].size().width - h * 4.0 / 3.0).abs() < 1e-3);
        assert_eq!(frames[1].size().height, h);

        let x2 = x1 + h * 4.0 / 3.0 + spacing;
        assert!((frames[2].origin().x - x2).abs() < 1e-3);
        assert!((frames[2].size().width - h * 16.0 / 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_expanded_preserves_aspect_ratio() {
        let engine = engine();
        let list = ItemList::build(vec![PhotoAsset::image("p", 3024, 4032)], false);
        let frames = engine.compute_frames(&list, LayoutMode::Expanded, WIDTH);
        let size = frames[0].size();
        assert!((size.width / size.height - 3024.0 / 4032.0).abs() < 1e-4);
    }

    #[test]
    fn test_only_camera_stays_compact_in_expanded_mode() {
        let engine = engine();
        let list = ItemList::build(Vec::new(), true);
        let frames = engine.compute_frames(&list, LayoutMode::Expanded, WIDTH);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].size(), Size::square(engine.compact_side(WIDTH)));
    }

    #[test]
    fn test_cached_frames_are_stable_and_invalidate() {
        let mut engine = engine();
        let list = mixed_list();
        let first = engine.frames(&list, 1, LayoutMode::Compact, WIDTH).to_vec();
        let second = engine.frames(&list, 1, LayoutMode::Compact, WIDTH).to_vec();
        assert_eq!(first, second);
        assert!(engine.cache.is_some());

        engine.invalidate();
        assert!(engine.cache.is_none());
        let expanded = engine.frames(&list, 1, LayoutMode::Expanded, WIDTH).to_vec();
        assert_ne!(first, expanded);
    }

    #[test]
    fn test_content_size_includes_insets() {
        let engine = engine();
        let frames = engine.compute_frames(&mixed_list(), LayoutMode::Compact, WIDTH);
        let size = engine.content_size(&frames);
        let insets = engine.config().insets;
        assert_eq!(size.width, frames[2].rect.max_x() + insets.right);
        assert_eq!(
            size.height,
            engine.compact_side(WIDTH) + insets.top + insets.bottom
        );
    }

    #[test]
    fn test_surface_height_per_mode() {
        let engine = engine();
        assert_eq!(engine.surface_height(LayoutMode::Compact, WIDTH), 93.75 + 16.0);
        assert_eq!(engine.surface_height(LayoutMode::Expanded, WIDTH), 187.5 + 16.0);
    }

    #[test]
    fn test_anchor_without_visible_slice_uses_trailing_edge() {
        let engine = engine();
        let frame = CellFrame {
            index: 0,
            rect: Rect::new(8.0, 8.0, 200.0, 150.0),
        };
        let anchor = engine.selection_anchor(&frame, None);
        assert_eq!(anchor, Point::new(200.0 - 14.0 - 6.0, 20.0));
    }

    #[test]
    fn test_anchor_clamped_to_visible_slice() {
        let engine = engine();
        let frame = CellFrame {
            index: 1,
            rect: Rect::new(300.0, 8.0, 250.0, 187.5),
        };
        let viewport = Rect::new(0.0, 0.0, 375.0, 400.0);
        let slice = LayoutEngine::visible_slice(&frame, &viewport).unwrap();
        assert_eq!(slice, Rect::new(0.0, 0.0, 75.0, 187.5));

        let anchor = engine.selection_anchor(&frame, Some(slice));
        assert_eq!(anchor.x, 75.0 - 14.0 - 6.0);
        assert!(anchor.x <= slice.max_x());
    }

    #[test]
    fn test_anchor_never_left_of_minimum() {
        let engine = engine();
        let frame = CellFrame {
            index: 1,
            rect: Rect::new(360.0, 8.0, 250.0, 187.5),
        };
        let viewport = Rect::new(0.0, 0.0, 375.0, 400.0);
        let slice = LayoutEngine::visible_slice(&frame, &viewport);
        let anchor = engine.selection_anchor(&frame, slice);
        assert_eq!(anchor.x, 14.0 + 6.0);
    }

    #[test]
    fn test_offscreen_frame_has_no_slice() {
        let frame = CellFrame {
            index: 4,
            rect: Rect::new(900.0, 8.0, 90.0, 90.0),
        };
        let viewport = Rect::new(0.0, 0.0, 375.0, 400.0);
        assert_eq!(LayoutEngine::visible_slice(&frame, &viewport), None);
    }
}
