use eframe::egui::Ui;
use egui_extras::{Size, StripBuilder};

use crate::{
    action::ActionRequestQueue,
    ui::{
        controls::{self, ControlsViewModel},
        grid::{self, GridViewModel},
        status_line::{self, StatusLineViewModel},
    },
};

#[derive(Debug, Clone)]
pub(crate) struct GameScreenViewModel<'a> {
    pub(crate) grid_vm: GridViewModel,
    pub(crate) status_line_vm: StatusLineViewModel<'a>,
    pub(crate) controls_vm: ControlsViewModel,
}

impl<'a> GameScreenViewModel<'a> {
    #[must_use]
    pub(crate) fn new(
        grid_vm: GridViewModel,
        status_line_vm: StatusLineViewModel<'a>,
        controls_vm: ControlsViewModel,
    ) -> Self {
        Self {
            grid_vm,
            status_line_vm,
            controls_vm,
        }
    }
}

pub(crate) fn show(ui: &mut Ui, vm: &GameScreenViewModel<'_>, action_queue: &mut ActionRequestQueue) {
    let spacing = ui.spacing().item_spacing;

    StripBuilder::new(ui)
        .size(Size::relative(0.72))
        .size(Size::remainder())
        .horizontal(|mut strip| {
            strip.cell(|ui| {
                StripBuilder::new(ui)
                    .size(Size::remainder())
                    .size(Size::exact(spacing.y))
                    .size(Size::exact(28.0))
                    .vertical(|mut strip| {
                        strip.cell(|ui| {
                            grid::show(ui, &vm.grid_vm, action_queue);
                        });
                        strip.cell(|_ui| {}); // Spacer
                        strip.cell(|ui| {
                            status_line::show(ui, &vm.status_line_vm);
                        });
                    });
            });
            strip.cell(|ui| {
                controls::show(ui, &vm.controls_vm, action_queue);
            });
        });
}
