// TSC Ireland Shell Library Entry Point
// This file exposes the shell modules so they can be unit tested
// without a running webview, and carries the Tauri setup itself.

use tauri::webview::PageLoadEvent;
use tauri::{Emitter, Manager, WebviewUrl, WebviewWindowBuilder, WindowEvent};

// Connectivity probe + classification
pub mod connectivity;

// Shared state
pub mod state;

// Shell logic modules (pure, unit tested)
pub mod modules;

use modules::backstack;
use modules::surface::{CacheMode, SurfacePlan};
use state::AppState;

// Keyboard / mouse back-forwarding injected into the surface before any
// page script runs.
const BACK_HANDLER_JS: &str = include_str!("assets/back_handler.js");

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default();

    #[cfg(desktop)]
    let builder = builder.plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
        // A second launch only focuses the shell that is already up.
        if let Some(window) = app.get_webview_window("main") {
            let _ = window.set_focus();
        }
    }));

    builder
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }

            let network = connectivity::probe();
            let plan = SurfacePlan::for_launch(&network);
            match plan.cache_mode {
                CacheMode::NetworkFirst => {
                    log::info!("[Connectivity] online via {:?}", network.transports);
                }
                CacheMode::CacheElseNetwork => {
                    log::warn!(
                        "[Connectivity] no usable transport, surface will prefer cached content"
                    );
                }
            }

            app.manage(AppState::new(network.clone()));

            // Scripts are always on in Tauri's webview; the plan must
            // agree before the surface is built.
            debug_assert!(plan.javascript);

            let window =
                WebviewWindowBuilder::new(app, "main", WebviewUrl::External(plan.url.clone()))
                    .title("TSC Ireland")
                    .inner_size(1280.0, 800.0)
                    .min_inner_size(640.0, 480.0)
                    .maximized(true)
                    .initialization_script(BACK_HANDLER_JS)
                    .on_navigation(|url| {
                        // Default delegate: every target stays inside the
                        // surface instead of opening an external browser.
                        log::debug!("[Shell] navigating: {}", url);
                        true
                    })
                    .on_page_load(|webview, payload| {
                        if let PageLoadEvent::Finished = payload.event() {
                            let state = webview.state::<AppState>();
                            let mut stack = state.back_stack.lock().unwrap();
                            stack.record_load(payload.url().as_str());
                            log::debug!(
                                "[Shell] page loaded: {} (history depth {})",
                                payload.url(),
                                stack.depth()
                            );
                        }
                    })
                    .build()?;

            // Hardware-back analog: a close request steps the surface's
            // history first and only falls through to teardown once the
            // history floor is reached.
            let handle = app.handle().clone();
            window.on_window_event(move |event| {
                if let WindowEvent::CloseRequested { api, .. } = event {
                    if backstack::consume_back_signal(&handle) {
                        api.prevent_close();
                    }
                }
            });

            let _ = app.emit(
                "network-status",
                serde_json::json!({
                    "reachable": network.is_reachable(),
                    "transports": network.transports,
                }),
            );

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![modules::backstack::navigate_back])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
