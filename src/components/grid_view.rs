use crate::image_processing::thumbnail_to_data_url;
use dioxus::html::geometry::PixelsVector2D;
use dioxus::html::ScrollBehavior;
use dioxus::prelude::*;
use dioxus_i18n::t;
use media_grid::{CellSlot, Rect, SlotContent};

/// Plain view data for one rendered cell
#[derive(Clone, PartialEq)]
pub enum CellView {
    Photo {
        index: usize,
        rect: Rect,
        image_url: Option<String>,
        selected: bool,
        /// Top-left of the selection indicator, cell-local
        indicator: (f32, f32),
    },
    Camera {
        index: usize,
        rect: Rect,
        live: bool,
    },
}

impl CellView {
    pub fn from_slot(slot: &CellSlot, selected: bool, indicator_side: f32) -> Option<Self> {
        let index = slot.index?;
        let rect = slot.frame.rect;
        Some(match &slot.content {
            SlotContent::Photo { image, anchor, .. } => CellView::Photo {
                index,
                rect,
                image_url: image.as_ref().map(thumbnail_to_data_url),
                selected,
                indicator: (
                    anchor.x - indicator_side / 2.0,
                    anchor.y - indicator_side / 2.0,
                ),
            },
            SlotContent::Camera { handle } => CellView::Camera {
                index,
                rect,
                live: handle.is_some(),
            },
        })
    }
}

fn frame_style(rect: &Rect) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; overflow: hidden; border-radius: 6px;",
        rect.origin.x, rect.origin.y, rect.size.width, rect.size.height
    )
}

/// Horizontally scrolling row; cells are absolutely positioned in content space
#[component]
pub fn GridView(
    cells: Vec<CellView>,
    content_width: f32,
    /// Offset the presenter laid the row out for; the container follows it
    scroll_offset: f32,
    height: f32,
    indicator_side: f32,
    on_tap: EventHandler<usize>,
    on_scroll: EventHandler<f32>,
    on_resize: EventHandler<f32>,
) -> Element {
    let mut container = use_signal(|| None::<std::rc::Rc<MountedData>>);

    // Selection scrolls the row from the presenter side, e.g. scroll-into-view
    use_effect(use_reactive!(|scroll_offset| {
        let Some(element) = container() else { return };
        spawn(async move {
            let Ok(current) = element.get_scroll_offset().await else {
                return;
            };
            if (current.x as f32 - scroll_offset).abs() < 0.5 {
                return;
            }
            let target = PixelsVector2D::new(scroll_offset as f64, current.y);
            if let Err(e) = element.scroll(target, ScrollBehavior::Instant).await {
                log::warn!("Could not scroll picker row: {:?}", e);
            }
        });
    }));

    rsx! {
        div {
            style: "position: relative; width: 100%; height: {height}px; overflow-x: auto; overflow-y: hidden; transition: height 0.2s;",
            onmounted: move |evt: MountedEvent| async move {
                let element = evt.data();
                match element.get_client_rect().await {
                    Ok(rect) => on_resize.call(rect.width() as f32),
                    Err(e) => log::warn!("Could not measure picker row: {:?}", e),
                }
                container.set(Some(element));
            },
            onscroll: move |_| async move {
                let Some(element) = container() else { return };
                if let Ok(offset) = element.get_scroll_offset().await {
                    on_scroll.call(offset.x as f32);
                }
            },
            div { style: "position: relative; width: {content_width}px; height: {height}px;",
                for cell in cells {
                    match cell.clone() {
                        CellView::Photo { index, .. } => rsx! {
                            PhotoCell { key: "{index}", cell, indicator_side, on_tap }
                        },
                        CellView::Camera { index, rect, live } => rsx! {
                            div {
                                key: "{index}",
                                style: format!(
                                    "{} background: #222; color: white; display: flex; align-items: center; justify-content: center; flex-direction: column; cursor: pointer;",
                                    frame_style(&rect)
                                ),
                                onclick: move |_| on_tap.call(index),
                                span { style: "font-size: 24px;", "📷" }
                                span { style: "font-size: 12px;", { t!("picker-camera") } }
                                if live {
                                    span { style: "font-size: 10px; color: #ff5252; margin-top: 4px;",
                                        "● "
                                        { t!("picker-camera-live") }
                                    }
                                }
                            }
                        },
                    }
                }
            }
        }
    }
}

#[component]
fn PhotoCell(cell: CellView, indicator_side: f32, on_tap: EventHandler<usize>) -> Element {
    let CellView::Photo { index, rect, image_url, selected, indicator } = cell else {
        return rsx! {};
    };
    let (ix, iy) = indicator;
    let indicator_bg = if selected { "#0066cc" } else { "rgba(0, 0, 0, 0.25)" };

    rsx! {
        div {
            style: format!("{} background: #ddd; cursor: pointer;", frame_style(&rect)),
            onclick: move |_| on_tap.call(index),
            if let Some(url) = image_url {
                img {
                    src: url,
                    style: "width: 100%; height: 100%; object-fit: cover;",
                }
            }
            div {
                style: "position: absolute; left: {ix}px; top: {iy}px; width: {indicator_side}px; height: {indicator_side}px; border-radius: 50%; border: 2px solid white; box-sizing: border-box; background: {indicator_bg}; color: white; font-size: 14px; display: flex; align-items: center; justify-content: center;",
                if selected { "✓" }
            }
        }
    }
}
