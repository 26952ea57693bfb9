//! # Media Grid
//!
//! Core of a sheet-style media picker: a horizontally scrolling row of photo
//! cells with an optional live camera cell in front, multi-select that
//! enlarges the row, and a command menu that ends the session with exactly
//! one outbound event.
//!
//! This crate provides:
//! - The item model and geometry primitives
//! - A layout engine with compact and expanded density modes
//! - A selection controller returning effect lists instead of mutating views
//! - A grid presenter with slot reuse and a stale-result guard for previews
//! - The command router and its outbound events
//! - Background dispatch of asset, camera and preview work
//!
//! ## Platform Separation
//!
//! Photo library and camera access are collaborator traits
//! ([`AssetSource`], [`CameraSource`]). Hosts implement them; rendering stays
//! in the application crate.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use media_grid::{PickerConfig, PickerSession, StaticAssetSource, NoCamera};
//! use std::sync::Arc;
//!
//! let config = PickerConfig::default();
//! let (mut session, mut inbox) = PickerSession::new(
//!     &config,
//!     Arc::new(StaticAssetSource::default()),
//!     Arc::new(NoCamera),
//!     tokio::runtime::Handle::current(),
//! );
//! session.start();
//! while let Some(message) = inbox.recv().await {
//!     session.handle(message);
//! }
//! ```

pub mod actions;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod layout;
pub mod localization;
pub mod models;
pub mod presenter;
pub mod selection;
pub mod session;
pub mod source;
pub mod thumbnail;

pub use actions::{
    ActionRouter, Command, Outbound, Route, RouterState, SubPicker, SubPickerResult,
};
pub use config::{LayoutConfig, PickerConfig, PickerVariant};
pub use dispatch::{Dispatcher, UiInbox, UiMessage};
pub use error::{ConfigError, Permission, PickerError, ThumbnailError};
pub use layout::{CellFrame, LayoutEngine, LayoutMode};
pub use localization::{ButtonLabel, EnglishLocalizer, FailureKind, Localizer};
pub use models::{
    AssetId, CameraHandle, Contact, Entry, Insets, ItemList, Location, MediaKind, PhotoAsset,
    Point, Rect, Size, Thumbnail,
};
pub use presenter::{
    CellSlot, GridPresenter, SlotContent, SlotId, Tap, ThumbnailRequest, ThumbnailResult,
};
pub use selection::{Effect, SelectionChange, SelectionController, SelectionSet};
pub use session::{PickerSession, Update};
pub use source::{AssetSource, CameraSource, NoCamera, StaticAssetSource};
pub use thumbnail::{probe_dimensions, render_thumbnail};
