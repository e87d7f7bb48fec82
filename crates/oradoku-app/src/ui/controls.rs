use eframe::egui::{Button, RichText, Ui};
use oradoku_oracle::Difficulty;

use crate::{
    action::{Action, ActionRequestQueue, OracleTask},
    state::OracleCallKind,
};

#[derive(Debug, Clone, Copy)]
pub(crate) struct ControlsViewModel {
    busy: Option<OracleCallKind>,
}

impl ControlsViewModel {
    #[must_use]
    pub(crate) fn new(busy: Option<OracleCallKind>) -> Self {
        Self { busy }
    }

    #[must_use]
    pub(crate) fn interactive(&self) -> bool {
        self.busy.is_none()
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &ControlsViewModel, action_queue: &mut ActionRequestQueue) {
    ui.vertical(|ui| {
        ui.heading("New Game");
        for difficulty in Difficulty::ALL {
            let label = match vm.busy {
                Some(OracleCallKind::Generate(busy_difficulty)) if busy_difficulty == difficulty => {
                    "Generating..."
                }
                _ => difficulty_label(difficulty),
            };
            if button(ui, label, vm.interactive()).clicked() {
                action_queue.request(Action::StartOracle(OracleTask::Generate(difficulty)));
            }
        }

        ui.separator();

        let hint_label = if matches!(vm.busy, Some(OracleCallKind::Hint)) {
            "Thinking..."
        } else {
            "Get Hint"
        };
        if button(ui, hint_label, vm.interactive()).clicked() {
            action_queue.request(Action::StartOracle(OracleTask::Hint));
        }

        let solve_label = if matches!(vm.busy, Some(OracleCallKind::Solve)) {
            "Solving..."
        } else {
            "Solve with AI"
        };
        if button(ui, solve_label, vm.interactive()).clicked() {
            action_queue.request(Action::StartOracle(OracleTask::Solve));
        }

        ui.separator();

        let photo_text = if matches!(vm.busy, Some(OracleCallKind::Extract)) {
            "Reading image..."
        } else {
            "Drop a photo of a puzzle onto the window to transcribe it."
        };
        ui.label(RichText::new(photo_text).weak());
    });
}

fn button(ui: &mut Ui, label: &str, enabled: bool) -> eframe::egui::Response {
    ui.add_enabled(enabled, Button::new(RichText::new(label).size(16.0)))
}

fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Easy",
        Difficulty::Medium => "Medium",
        Difficulty::Hard => "Hard",
    }
}
