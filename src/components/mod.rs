pub mod action_menu;
pub mod grid_view;
pub mod picker_sheet;

pub use action_menu::{ActionMenu, SubPickerPanel};
pub use grid_view::GridView;
pub use picker_sheet::PickerSheet;
