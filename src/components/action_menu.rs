use dioxus::prelude::*;
use dioxus_i18n::t;
use media_grid::{Command, SubPicker};

/// Vertical list of the offered commands
#[component]
pub fn ActionMenu(commands: Vec<(Command, String)>, on_invoke: EventHandler<Command>) -> Element {
    rsx! {
        div { style: "display: flex; flex-direction: column; background: white;",
            for (command, label) in commands {
                button {
                    key: "{label}",
                    style: if command.is_emphasized() {
                        "padding: 14px; border: none; border-top: 1px solid #eee; background: white; color: #0066cc; font-size: 16px; font-weight: 700;"
                    } else {
                        "padding: 14px; border: none; border-top: 1px solid #eee; background: white; color: #0066cc; font-size: 16px;"
                    },
                    onclick: move |_| on_invoke.call(command),
                    "{label}"
                }
            }
        }
    }
}

fn sub_picker_title(picker: SubPicker) -> String {
    match picker {
        SubPicker::PhotoLibrary => t!("sub-picker-title-photo-library"),
        SubPicker::PhotoLibraryAsFiles => t!("sub-picker-title-photo-library-as-files"),
        SubPicker::Location => t!("sub-picker-title-location"),
        SubPicker::Contact => t!("sub-picker-title-contact"),
    }
}

/// Stand-in for an external picker presented by the host
#[component]
pub fn SubPickerPanel(
    picker: SubPicker,
    on_done: EventHandler<SubPicker>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { style: "padding: 16px; background: white; border-top: 1px solid #eee;",
            p { style: "margin: 0 0 12px 0; font-size: 16px; color: #333;", { sub_picker_title(picker) } }
            div { style: "display: flex; gap: 8px; justify-content: flex-end;",
                button {
                    style: "padding: 8px 16px; border: 1px solid #ccc; border-radius: 6px; background: white;",
                    onclick: move |_| on_cancel.call(()),
                    { t!("sub-picker-cancel") }
                }
                button {
                    style: "padding: 8px 16px; border: none; border-radius: 6px; background: #0066cc; color: white;",
                    onclick: move |_| on_done.call(picker),
                    { t!("sub-picker-done") }
                }
            }
        }
    }
}
