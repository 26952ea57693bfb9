use dioxus::prelude::*;
use dioxus_i18n::prelude::*;
use dioxus_i18n::t;
use std::sync::OnceLock;
use tokio::runtime::Handle;

mod camera;
mod components;
mod error;
mod filesystem;
mod i18n;
mod image_processing;
mod settings;

use components::PickerSheet;
use error::AppError;
use settings::AppSettings;

static WORKER_RUNTIME: OnceLock<Handle> = OnceLock::new();

/// Runtime that executes the picker's background jobs
pub fn worker_runtime() -> Option<Handle> {
    WORKER_RUNTIME.get().cloned()
}

/// Runs a current-thread runtime on its own thread; blocking jobs use its pool
fn start_worker_runtime() -> Result<Handle, AppError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .thread_name("picker-worker")
        .build()?;
    let handle = runtime.handle().clone();
    std::thread::Builder::new()
        .name("picker-worker".to_string())
        .spawn(move || runtime.block_on(std::future::pending::<()>()))?;
    Ok(handle)
}

fn init_logging() {
    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default().with_max_level(log::LevelFilter::Info),
    );

    #[cfg(not(target_os = "android"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn main() {
    init_logging();
    match start_worker_runtime() {
        Ok(handle) => {
            let _ = WORKER_RUNTIME.set(handle);
        }
        Err(e) => log::error!("Background runtime failed to start: {}", e),
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let settings = use_hook(AppSettings::load);
    let mut i18n = use_init_i18n(i18n::init_i18n);
    let language = settings.language.clone();
    use_hook(move || match language.parse::<unic_langid::LanguageIdentifier>() {
        Ok(lang) => i18n.set_language(lang),
        Err(e) => log::warn!("Unknown language {:?}: {}", language, e),
    });

    // Bumping the generation remounts the sheet with a fresh session
    let mut generation = use_signal(|| 0u32);
    let mut sent = use_signal(|| None::<String>);

    rsx! {
        div { style: "display: flex; flex-direction: column; height: 100vh; font-family: sans-serif; background: #f5f5f5;",
            div { style: "flex: 1; padding: 16px; overflow-y: auto;",
                h1 { style: "font-size: 20px; color: #333; margin: 0 0 12px 0;", { t!("app-title") } }
                if let Some(json) = sent() {
                    div { style: "background: white; border-radius: 8px; padding: 12px;",
                        p { style: "margin: 0 0 8px 0; font-weight: 600; color: #0066cc;",
                            { t!("picker-sent") }
                        }
                        pre { style: "white-space: pre-wrap; word-break: break-all; font-size: 12px; margin: 0;",
                            "{json}"
                        }
                        button {
                            style: "margin-top: 12px; padding: 8px 16px; border: none; border-radius: 6px; background: #0066cc; color: white;",
                            onclick: move |_| {
                                sent.set(None);
                                generation += 1;
                            },
                            { t!("picker-restart") }
                        }
                    }
                }
            }
            if sent().is_none() {
                PickerSheet {
                    key: "{generation}",
                    settings: settings.clone(),
                    on_outbound: move |outbound: media_grid::Outbound| {
                        match serde_json::to_string_pretty(&outbound) {
                            Ok(json) => {
                                log::info!("Outbound event: {}", json);
                                sent.set(Some(json));
                            }
                            Err(e) => log::error!("Failed to serialize outbound event: {}", e),
                        }
                    },
                }
            }
        }
    }
}
