use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// Opaque reference to an asset owned by the asset source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetId(pub String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of media behind an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Video,
}

/// A pickable photo or video with its native pixel dimensions
///
/// Two assets are the same asset if their ids match; the dimensions are
/// metadata and do not take part in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhotoAsset {
    pub id: AssetId,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub kind: MediaKind,
}

impl PhotoAsset {
    pub fn image(id: impl Into<String>, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            id: AssetId::new(id),
            pixel_width,
            pixel_height,
            kind: MediaKind::Image,
        }
    }

    pub fn video(id: impl Into<String>, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            kind: MediaKind::Video,
            ..Self::image(id, pixel_width, pixel_height)
        }
    }

    /// Width over height; degenerate dimensions are treated as square
    pub fn aspect_ratio(&self) -> f32 {
        if self.pixel_width == 0 || self.pixel_height == 0 {
            1.0
        } else {
            self.pixel_width as f32 / self.pixel_height as f32
        }
    }
}

impl PartialEq for PhotoAsset {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PhotoAsset {}

impl Hash for PhotoAsset {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// One item of the pickable grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Photo(PhotoAsset),
    CameraPlaceholder,
}

impl Entry {
    pub fn is_camera(&self) -> bool {
        matches!(self, Entry::CameraPlaceholder)
    }

    pub fn as_photo(&self) -> Option<&PhotoAsset> {
        match self {
            Entry::Photo(asset) => Some(asset),
            Entry::CameraPlaceholder => None,
        }
    }
}

/// Ordered grid entries. Holds at most one camera placeholder, always first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemList {
    entries: Vec<Entry>,
}

impl ItemList {
    /// Builds the list from fetched assets, prepending the camera slot if wanted
    pub fn build(assets: Vec<PhotoAsset>, camera: bool) -> Self {
        let mut entries = Vec::with_capacity(assets.len() + usize::from(camera));
        if camera {
            entries.push(Entry::CameraPlaceholder);
        }
        entries.extend(assets.into_iter().map(Entry::Photo));
        Self { entries }
    }

    /// Returns the list with the camera slot added or removed
    pub fn with_camera(mut self, camera: bool) -> Self {
        match (camera, self.has_camera()) {
            (true, false) => self.entries.insert(0, Entry::CameraPlaceholder),
            (false, true) => {
                self.entries.remove(0);
            }
            _ => {}
        }
        self
    }

    pub fn has_camera(&self) -> bool {
        self.entries.first().is_some_and(Entry::is_camera)
    }

    pub fn has_photos(&self) -> bool {
        self.entries.iter().any(|e| !e.is_camera())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn photos(&self) -> impl Iterator<Item = &PhotoAsset> {
        self.entries.iter().filter_map(Entry::as_photo)
    }

    /// Index of the entry showing `id`, if any
    pub fn position_of(&self, id: &AssetId) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.as_photo().is_some_and(|a| &a.id == id))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn square(side: f32) -> Self {
        Self::new(side, side)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Overlapping area of two rectangles, `None` if they do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.min_x().max(other.min_x());
        let y0 = self.min_y().max(other.min_y());
        let x1 = self.max_x().min(other.max_x());
        let y1 = self.max_y().min(other.max_y());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, x1 - x0, y1 - y0))
    }

    /// Same rectangle expressed relative to `origin`
    pub fn relative_to(&self, origin: Point) -> Rect {
        Rect::new(
            self.origin.x - origin.x,
            self.origin.y - origin.y,
            self.size.width,
            self.size.height,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::uniform(8.0)
    }
}

/// Live capture-preview handle handed out by the camera source
///
/// `session` identifies the capture session behind the handle; a recreated
/// session yields a handle with a different identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CameraHandle {
    pub id: Uuid,
    pub session: Uuid,
}

impl CameraHandle {
    pub fn new(session: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            session,
        }
    }
}

/// Location returned by the location sub-picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    pub name: Option<String>,
}

/// Contact returned by the contact sub-picker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub phone_numbers: Vec<String>,
}

/// Decoded preview image ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}
