//! Oradoku application UI.
//!
//! # Design Notes
//! - A 9x9 grid with clear 3x3 boundaries, keyboard and mouse input.
//! - Conflicts are recomputed synchronously on every grid change and
//!   shown in real time; all puzzle intelligence goes through the oracle.
//! - One oracle call at a time. Outcomes come back through the action
//!   queue tagged with a sequence number; stale ones are dropped.

use eframe::{
    App, CreationContext, Frame,
    egui::{CentralPanel, Context, DroppedFile},
};
use oradoku_oracle::OracleConfig;

use crate::{
    action::{Action, ActionRequestQueue, OracleTask},
    action_handler,
    state::{AppState, UiState},
    ui, view_model_builder,
};

#[derive(Debug)]
pub struct OradokuApp {
    app_state: AppState,
    ui_state: UiState,
}

impl OradokuApp {
    #[must_use]
    pub fn new(_cc: &CreationContext<'_>) -> Self {
        let oracle_config = match OracleConfig::from_env() {
            Ok(config) => {
                let _ = oradoku_oracle::warm_up();
                Some(config)
            }
            Err(err) => {
                log::warn!("oracle calls disabled: {err}");
                None
            }
        };
        Self {
            app_state: AppState::new(),
            ui_state: UiState::new(oracle_config),
        }
    }

    fn handle_dropped_files(&mut self, ctx: &Context, action_queue: &mut ActionRequestQueue) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some((bytes, mime_type)) = read_image(&file) {
                action_queue.request(Action::StartOracle(OracleTask::ExtractImage {
                    bytes,
                    mime_type,
                }));
            } else {
                log::debug!("ignoring dropped file {:?}: not a readable image", file.name);
            }
        }
    }
}

impl App for OradokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        let now = ctx.input(|i| i.time);
        let mut action_queue = ActionRequestQueue::default();

        action_handler::poll_oracle(&mut self.ui_state, &mut action_queue);
        action_handler::poll_pending_hint(&self.ui_state, now, &mut action_queue);
        self.handle_dropped_files(ctx, &mut action_queue);
        ctx.input(|i| ui::input::handle_input(i, &mut action_queue));
        action_handler::handle_all(
            &mut self.app_state,
            &mut self.ui_state,
            now,
            &mut action_queue,
        );

        let game_screen_vm =
            view_model_builder::build_game_screen_view_model(&self.app_state, &self.ui_state);
        CentralPanel::default().show(ctx, |ui| {
            ui::game_screen::show(ui, &game_screen_vm, &mut action_queue);
        });
        drop(game_screen_vm);

        action_handler::handle_all(
            &mut self.app_state,
            &mut self.ui_state,
            now,
            &mut action_queue,
        );

        // Keep the loop ticking while a call is in flight or a hint is
        // waiting out its display delay.
        if self.ui_state.is_busy() || self.ui_state.pending_hint.is_some() {
            ctx.request_repaint();
        }
    }
}

fn read_image(file: &DroppedFile) -> Option<(Vec<u8>, String)> {
    let mime_type = image_mime(file)?;
    // The web backend delivers bytes; the native backend delivers a path.
    if let Some(bytes) = &file.bytes {
        return Some((bytes.to_vec(), mime_type));
    }
    let path = file.path.as_ref()?;
    std::fs::read(path).ok().map(|bytes| (bytes, mime_type))
}

fn image_mime(file: &DroppedFile) -> Option<String> {
    if file.mime.starts_with("image/") {
        return Some(file.mime.clone());
    }
    let name = if file.name.is_empty() {
        file.path.as_ref()?.file_name()?.to_str()?.to_string()
    } else {
        file.name.clone()
    };
    let extension = name.rsplit('.').next()?.to_ascii_lowercase();
    match extension.as_str() {
        "png" => Some("image/png".to_string()),
        "jpg" | "jpeg" => Some("image/jpeg".to_string()),
        "webp" => Some("image/webp".to_string()),
        "gif" => Some("image/gif".to_string()),
        _ => None,
    }
}
