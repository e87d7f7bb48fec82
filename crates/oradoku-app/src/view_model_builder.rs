use oradoku_core::{Position, compute_conflicts};

use crate::{
    state::{AppState, UiState},
    ui::{
        controls::ControlsViewModel,
        game_screen::GameScreenViewModel,
        grid::{GridCell, GridViewModel, GridVisualState},
        status_line::{GameStatus, StatusLineViewModel},
    },
};

fn build_grid(app_state: &AppState, ui_state: &UiState) -> [GridCell; 81] {
    let game = &app_state.game;
    let conflicts = compute_conflicts(&game.digit_grid());

    let mut cells: [GridCell; 81] = std::array::from_fn(|i| GridCell {
        content: game.cell(Position::ALL[i]),
        visual_state: GridVisualState::empty(),
    });

    for pos in Position::ALL {
        if conflicts[pos] {
            cells[pos.index()].visual_state |= GridVisualState::CONFLICT;
        }
    }

    if let Some(selected) = app_state.selected_cell {
        cells[selected.index()].visual_state |= GridVisualState::SELECTED;
        for pos in Position::ALL {
            if pos != selected && pos.shares_house(selected) {
                cells[pos.index()].visual_state |= GridVisualState::HOUSE_SELECTED;
            }
        }
        if let Some(selected_digit) = game.cell(selected).as_digit() {
            for pos in Position::ALL {
                if pos != selected && game.cell(pos).as_digit() == Some(selected_digit) {
                    cells[pos.index()].visual_state |= GridVisualState::SAME_DIGIT;
                }
            }
        }
    }

    if let Some(pending) = &ui_state.pending_hint {
        cells[pending.hint.position.index()].visual_state |= GridVisualState::HINT_FLASH;
    }

    cells
}

#[must_use]
pub(crate) fn build_game_screen_view_model<'a>(
    app_state: &'a AppState,
    ui_state: &UiState,
) -> GameScreenViewModel<'a> {
    let grid_vm = GridViewModel::new(build_grid(app_state, ui_state));

    let status = if app_state.game.is_solved() {
        GameStatus::Solved
    } else {
        GameStatus::Message(&app_state.status)
    };
    let status_line_vm = StatusLineViewModel::new(status, ui_state.is_busy());

    let controls_vm = ControlsViewModel::new(ui_state.busy_kind());

    GameScreenViewModel::new(grid_vm, status_line_vm, controls_vm)
}
