//! Oradoku application using egui/eframe.
//!
//! This is the entry point for both the desktop and browser builds.

use oradoku_app::app::OradokuApp;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    const APP_ID: &str = "io.github.oradoku.oradoku";

    better_panic::install();
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_app_id(APP_ID)
            .with_resizable(true)
            .with_inner_size((800.0, 600.0))
            .with_min_inner_size((400.0, 300.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Oradoku",
        options,
        Box::new(|cc| Ok(Box::new(OradokuApp::new(cc)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn install_panic_alert_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        previous(panic_info);

        let message = panic_info.to_string();
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(&format!(
                "Oradoku has crashed.\n\n{message}\n\nReloading may fix the issue.\n\nSee the developer console for details."
            ));
        }
    }));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use eframe::wasm_bindgen::JsCast as _;

    install_panic_alert_hook();

    // Redirect `log` message to `console.log` and friends:
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();

    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async {
        let document = web_sys::window()
            .expect("No window")
            .document()
            .expect("No document");

        let canvas = document
            .get_element_by_id("the_canvas_id")
            .expect("Failed to find the_canvas_id")
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .expect("the_canvas_id was not a HtmlCanvasElement");

        let start_result = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(OradokuApp::new(cc)))),
            )
            .await;

        // Remove the loading text and spinner:
        if let Some(loading_text) = document.get_element_by_id("loading_text") {
            match start_result {
                Ok(()) => {
                    loading_text.remove();
                }
                Err(e) => {
                    loading_text.set_inner_html(
                        "<p> The app has crashed. See the developer console for details. </p>",
                    );
                    panic!("Failed to start eframe: {e:?}");
                }
            }
        }
    });
}
