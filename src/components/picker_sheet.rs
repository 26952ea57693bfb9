use crate::camera::SimulatedCamera;
use crate::components::grid_view::CellView;
use crate::components::{ActionMenu, GridView, SubPickerPanel};
use crate::filesystem::FilesystemAssetSource;
use crate::i18n::FluentLocalizer;
use crate::settings::AppSettings;
use dioxus::prelude::*;
use dioxus_i18n::t;
use media_grid::{
    AssetSource, CameraSource, Command, Outbound, PhotoAsset, PickerError, PickerSession,
    SlotContent, SubPicker, SubPickerResult, UiInbox, Update,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn open_session(settings: &AppSettings, inbox: &RefCell<Option<UiInbox>>) -> Option<PickerSession> {
    let runtime = crate::worker_runtime()?;
    let source = FilesystemAssetSource::new(&settings.photo_dir);
    log::info!("Picker reads photos from {:?}", source.root());
    let assets: Arc<dyn AssetSource> = Arc::new(source);
    let camera: Arc<dyn CameraSource> = Arc::new(SimulatedCamera::new(
        settings.camera_available,
        settings.camera_granted,
    ));
    let (mut session, rx) = PickerSession::new(&settings.picker, assets, camera, runtime);
    session.start();
    *inbox.borrow_mut() = Some(rx);
    Some(session)
}

/// Result a stand-in sub-picker reports when confirmed
fn stand_in_result(picker: SubPicker, session: &PickerSession) -> SubPickerResult {
    let first: Vec<PhotoAsset> = session.presenter().items().photos().take(1).cloned().collect();
    match picker {
        SubPicker::PhotoLibrary => SubPickerResult::Photos(first),
        SubPicker::PhotoLibraryAsFiles => SubPickerResult::PhotosAsFiles(first),
        SubPicker::Location => SubPickerResult::Location(None),
        SubPicker::Contact => SubPickerResult::Contact(None),
    }
}

/// The attachment sheet: preview row, command menu and sub-picker stand-ins
#[component]
pub fn PickerSheet(settings: AppSettings, on_outbound: EventHandler<Outbound>) -> Element {
    let inbox = use_hook(|| Rc::new(RefCell::new(None::<UiInbox>)));
    let mut session = use_signal({
        let inbox = Rc::clone(&inbox);
        let settings = settings.clone();
        move || open_session(&settings, &inbox)
    });
    let mut sub_picker = use_signal(|| None::<SubPicker>);

    // Applies background results on the UI thread
    use_future(move || {
        let inbox = Rc::clone(&inbox);
        async move {
            let Some(mut rx) = inbox.borrow_mut().take() else {
                return;
            };
            while let Some(message) = rx.recv().await {
                if let Some(s) = session.write().as_mut() {
                    s.handle(message);
                }
            }
        }
    });

    let mut react = move |result: Result<Update, PickerError>| match result {
        Ok(Update::Outbound(outbound)) => on_outbound.call(outbound),
        Ok(Update::Open(picker)) => sub_picker.set(Some(picker)),
        Ok(_) => {}
        Err(e) => log::warn!("Picker operation rejected: {}", e),
    };

    let guard = session.read();
    let Some(s) = guard.as_ref() else {
        return rsx! {
            p { style: "padding: 16px; color: #c00;",
                { t!("error-generic", error: "no background runtime") }
            }
        };
    };

    let presenter = s.presenter();
    let indicator_side = settings.picker.layout.selection_size.width;
    let cells: Vec<CellView> = presenter
        .visible_slots()
        .filter_map(|slot| {
            let selected = match &slot.content {
                SlotContent::Photo { asset, .. } => presenter.selection().is_selected(&asset.id),
                SlotContent::Camera { .. } => false,
            };
            CellView::from_slot(slot, selected, indicator_side)
        })
        .collect();
    let hidden = presenter.is_hidden();
    let content_width = presenter.content_size().width;
    let height = presenter.surface_height();
    let loading = s.is_loading();
    let empty = !loading && !presenter.items().has_photos();
    let scroll_offset = presenter.scroll_offset();
    let finished = s.router().is_finished();
    let commands = if finished { Vec::new() } else { s.commands(&FluentLocalizer) };
    let failures: Vec<String> = s
        .failures()
        .iter()
        .map(|e| crate::error::AppError::from(e.clone()).user_message(&FluentLocalizer))
        .collect();
    drop(guard);

    rsx! {
        div { style: "background: white; border-radius: 12px 12px 0 0; box-shadow: 0 -2px 8px rgba(0,0,0,0.1); padding-top: 8px;",
            for text in failures.iter() {
                div {
                    key: "{text}",
                    style: "margin: 0 8px 8px 8px; padding: 8px; border-radius: 6px; background: #fff3f3; color: #c00; font-size: 13px;",
                    "{text}"
                }
            }
            if !failures.is_empty() {
                button {
                    style: "margin: 0 8px 8px 8px; padding: 4px 12px; border: 1px solid #ccc; border-radius: 6px; background: white; font-size: 12px;",
                    onclick: move |_| {
                        if let Some(s) = session.write().as_mut() {
                            s.take_failures();
                        }
                    },
                    { t!("picker-dismiss") }
                }
            }
            if !hidden {
                if loading {
                    p { style: "margin: 8px 16px; color: #888; font-size: 13px;", { t!("picker-loading") } }
                } else if empty {
                    p { style: "margin: 8px 16px; color: #888; font-size: 13px;", { t!("picker-empty") } }
                }
                GridView {
                    cells,
                    content_width,
                    scroll_offset,
                    height,
                    indicator_side,
                    on_tap: move |index: usize| {
                        let result = match session.write().as_mut() {
                            Some(s) => s.tap(index),
                            None => return,
                        };
                        react(result);
                    },
                    on_scroll: move |offset: f32| {
                        if let Some(s) = session.write().as_mut() {
                            s.scroll(offset);
                        }
                    },
                    on_resize: move |width: f32| {
                        if let Some(s) = session.write().as_mut() {
                            s.resize(width);
                        }
                    },
                }
            }
            if let Some(picker) = sub_picker() {
                SubPickerPanel {
                    picker,
                    on_done: move |picker: SubPicker| {
                        sub_picker.set(None);
                        let result = match session.write().as_mut() {
                            Some(s) => {
                                let result = stand_in_result(picker, s);
                                s.complete(result)
                            }
                            None => return,
                        };
                        react(result);
                    },
                    on_cancel: move |_| {
                        sub_picker.set(None);
                        if let Some(s) = session.write().as_mut() {
                            s.cancel_sub_picker();
                        }
                    },
                }
            } else {
                ActionMenu {
                    commands,
                    on_invoke: move |command: Command| {
                        let result = match session.write().as_mut() {
                            Some(s) => s.invoke(command),
                            None => return,
                        };
                        react(result);
                    },
                }
            }
        }
    }
}
