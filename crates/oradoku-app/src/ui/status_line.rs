use eframe::egui::{RichText, Spinner, Ui};

#[derive(Debug, Clone, Copy)]
pub(crate) enum GameStatus<'a> {
    Solved,
    Message(&'a str),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct StatusLineViewModel<'a> {
    status: GameStatus<'a>,
    busy: bool,
}

impl<'a> StatusLineViewModel<'a> {
    #[must_use]
    pub(crate) fn new(status: GameStatus<'a>, busy: bool) -> Self {
        Self { status, busy }
    }

    #[must_use]
    pub(crate) fn status(&self) -> &GameStatus<'a> {
        &self.status
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &StatusLineViewModel<'_>) {
    ui.horizontal(|ui| {
        if vm.busy {
            ui.add(Spinner::new());
        }
        let (text, color) = match vm.status {
            GameStatus::Solved => (
                "Congratulations! You solved the puzzle!",
                ui.visuals().warn_fg_color,
            ),
            GameStatus::Message(message) => {
                let color = if vm.busy {
                    ui.visuals().weak_text_color()
                } else {
                    ui.visuals().text_color()
                };
                (message, color)
            }
        };
        ui.label(RichText::new(text).size(16.0).color(color));
    });
}
