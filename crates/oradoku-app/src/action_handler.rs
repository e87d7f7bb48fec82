use oradoku_core::{Digit, Position};
use oradoku_game::Game;
use oradoku_oracle::{OracleRequest, OracleResponse, OracleResult};

use crate::{
    action::{Action, ActionRequestQueue, MoveDirection, OracleTask},
    state::{AppState, OracleCallKind, PendingCall, PendingHint, UiState},
};

/// Seconds between showing a hint's explanation and applying its digit.
pub(crate) const HINT_APPLY_DELAY: f64 = 2.0;

/// Polls the in-flight oracle call, queueing its outcome when it lands.
///
/// The outcome action carries the call's sequence number so the handler
/// can discard it if a newer request has been issued since.
pub(crate) fn poll_oracle(ui_state: &mut UiState, action_queue: &mut ActionRequestQueue) {
    let Some(call) = ui_state.pending_call.as_mut() else {
        return;
    };
    if let Some(outcome) = call.handle.poll() {
        let seq = call.seq;
        let kind = call.kind;
        ui_state.pending_call = None;
        action_queue.request(Action::ApplyOracleOutcome { seq, kind, outcome });
    }
}

/// Queues the pending hint's application once its display delay elapses.
pub(crate) fn poll_pending_hint(
    ui_state: &UiState,
    now: f64,
    action_queue: &mut ActionRequestQueue,
) {
    if ui_state
        .pending_hint
        .as_ref()
        .is_some_and(|pending| now >= pending.apply_at)
    {
        action_queue.request(Action::ApplyPendingHint);
    }
}

pub(crate) fn handle_all(
    app_state: &mut AppState,
    ui_state: &mut UiState,
    now: f64,
    action_queue: &mut ActionRequestQueue,
) {
    for action in action_queue.take_all() {
        handle(app_state, ui_state, now, action);
    }
}

pub(crate) fn handle(app_state: &mut AppState, ui_state: &mut UiState, now: f64, action: Action) {
    const DEFAULT_POSITION: Position = Position::new(0, 0);

    let mut ctx = ActionContext {
        app_state,
        ui_state,
        now,
    };

    match action {
        Action::SelectCell(pos) => ctx.app_state.selected_cell = Some(pos),
        Action::ClearSelection => ctx.app_state.selected_cell = None,
        Action::MoveSelection(move_direction) => {
            let pos = ctx.app_state.selected_cell.get_or_insert(DEFAULT_POSITION);
            let new_pos = match move_direction {
                MoveDirection::Up => pos.up(),
                MoveDirection::Down => pos.down(),
                MoveDirection::Left => pos.left(),
                MoveDirection::Right => pos.right(),
            };
            if let Some(new_pos) = new_pos {
                *pos = new_pos;
            }
        }
        Action::RequestDigit(digit) => ctx.request_digit(digit),
        Action::ClearCell => ctx.clear_cell(),
        Action::StartOracle(task) => ctx.start_oracle(task),
        Action::ApplyOracleOutcome { seq, kind, outcome } => {
            ctx.apply_oracle_outcome(seq, kind, outcome);
        }
        Action::ApplyPendingHint => ctx.apply_pending_hint(),
    }
}

#[derive(Debug)]
struct ActionContext<'a> {
    app_state: &'a mut AppState,
    ui_state: &'a mut UiState,
    now: f64,
}

impl ActionContext<'_> {
    fn request_digit(&mut self, digit: Digit) {
        if let Some(pos) = self.app_state.selected_cell
            && self.app_state.game.set_digit(pos, digit).is_ok()
        {
            self.cancel_hint_for(pos);
        }
    }

    fn clear_cell(&mut self) {
        if let Some(pos) = self.app_state.selected_cell
            && self.app_state.game.clear_cell(pos).is_ok()
        {
            self.cancel_hint_for(pos);
        }
    }

    // An edit to the hinted cell wins over the hint: the pending value is
    // dropped instead of overwriting the player's input after the delay.
    fn cancel_hint_for(&mut self, pos: Position) {
        if self
            .ui_state
            .pending_hint
            .as_ref()
            .is_some_and(|pending| pending.hint.position == pos)
        {
            log::debug!("pending hint cancelled by an edit to {pos}");
            self.ui_state.pending_hint = None;
        }
    }

    fn start_oracle(&mut self, task: OracleTask) {
        if self.ui_state.is_busy() {
            log::debug!("oracle call ignored while another is outstanding");
            return;
        }
        self.ui_state.pending_hint = None;

        let (request, kind) = match task {
            OracleTask::Generate(difficulty) => (
                OracleRequest::Generate { difficulty },
                OracleCallKind::Generate(difficulty),
            ),
            OracleTask::Solve => (
                OracleRequest::Solve {
                    grid: self.app_state.game.initial_grid(),
                },
                OracleCallKind::Solve,
            ),
            OracleTask::Hint => (
                OracleRequest::Hint {
                    grid: self.app_state.game.digit_grid(),
                },
                OracleCallKind::Hint,
            ),
            OracleTask::ExtractImage { bytes, mime_type } => (
                OracleRequest::ExtractImage { bytes, mime_type },
                OracleCallKind::Extract,
            ),
        };

        let Some(config) = self.ui_state.oracle_config.as_ref() else {
            log::warn!("oracle call skipped: no API key configured");
            self.app_state.status = failure_message(kind).to_string();
            return;
        };

        match oradoku_oracle::enqueue(request, config) {
            Ok(handle) => {
                let seq = self.ui_state.issue_seq();
                self.ui_state.pending_call = Some(PendingCall { handle, seq, kind });
                self.app_state.status = busy_message(kind);
            }
            Err(err) => {
                log::warn!("failed to enqueue oracle call: {err}");
                self.app_state.status = failure_message(kind).to_string();
            }
        }
    }

    fn apply_oracle_outcome(&mut self, seq: u64, kind: OracleCallKind, outcome: OracleResult) {
        // An outcome that is not the latest issued request is stale;
        // applying it would overwrite fresher state.
        if seq != self.ui_state.latest_seq() {
            log::debug!(
                "discarding stale oracle outcome (seq {seq}, latest {})",
                self.ui_state.latest_seq()
            );
            return;
        }

        match outcome {
            Ok(OracleResponse::NewPuzzle(grid)) => {
                self.replace_game(Game::new(&grid));
                self.app_state.status = match kind {
                    OracleCallKind::Generate(difficulty) => {
                        format!("New {difficulty} puzzle ready!")
                    }
                    _ => "New puzzle ready!".to_string(),
                };
            }
            Ok(OracleResponse::ExtractedPuzzle(grid)) => {
                self.replace_game(Game::new(&grid));
                self.app_state.status = "Puzzle extracted from the image!".to_string();
            }
            Ok(OracleResponse::Solution(grid)) => {
                // A solution that contradicts the givens is as unusable as
                // a malformed one.
                match Game::from_grids(&self.app_state.game.initial_grid(), &grid) {
                    Ok(game) => {
                        self.replace_game(game);
                        self.app_state.status = "Puzzle solved by the oracle!".to_string();
                    }
                    Err(err) => {
                        log::warn!("oracle solution contradicts the puzzle: {err}");
                        self.app_state.status = failure_message(kind).to_string();
                    }
                }
            }
            Ok(OracleResponse::Hint(hint)) => {
                self.app_state.status = hint.explanation.clone();
                self.ui_state.pending_hint = Some(PendingHint {
                    observed: self.app_state.game.cell(hint.position),
                    apply_at: self.now + HINT_APPLY_DELAY,
                    hint,
                });
            }
            Err(err) => {
                log::warn!("oracle call failed: {err}");
                self.app_state.status = failure_message(kind).to_string();
            }
        }
    }

    fn apply_pending_hint(&mut self) {
        let Some(pending) = self.ui_state.pending_hint.take() else {
            return;
        };
        if self.app_state.game.cell(pending.hint.position) != pending.observed {
            log::debug!("pending hint cancelled: cell changed during the delay");
            return;
        }
        let _ = self
            .app_state
            .game
            .set_digit(pending.hint.position, pending.hint.digit);
    }

    fn replace_game(&mut self, game: Game) {
        self.app_state.game = game;
        self.app_state.selected_cell = None;
        self.ui_state.pending_hint = None;
    }
}

fn busy_message(kind: OracleCallKind) -> String {
    match kind {
        OracleCallKind::Generate(difficulty) => format!("Generating {difficulty} puzzle..."),
        OracleCallKind::Solve => "The oracle is solving the puzzle...".to_string(),
        OracleCallKind::Hint => "The oracle is thinking of a hint...".to_string(),
        OracleCallKind::Extract => "Reading the puzzle from the image...".to_string(),
    }
}

fn failure_message(kind: OracleCallKind) -> &'static str {
    match kind {
        OracleCallKind::Generate(_) => "Error: Could not generate a new puzzle.",
        OracleCallKind::Solve => "Error: The oracle could not solve the puzzle.",
        OracleCallKind::Hint => "Error: Could not get a hint.",
        OracleCallKind::Extract => "Error: Could not extract a puzzle from the image.",
    }
}

#[cfg(test)]
mod tests {
    use oradoku_core::DigitGrid;
    use oradoku_game::CellState;
    use oradoku_oracle::{Difficulty, Hint, OracleConfig, OracleError};

    use super::*;

    const SOLVED: &str =
        "534678912672195348198342567859761423426853791713924856961537284287419635345286179";

    fn puzzle() -> DigitGrid {
        let mut grid: DigitGrid = SOLVED.parse().unwrap();
        grid[Position::new(8, 8)] = None;
        grid
    }

    fn states() -> (AppState, UiState) {
        let mut app_state = AppState::new();
        app_state.game = Game::new(&puzzle());
        (app_state, UiState::new(None))
    }

    // Points at a closed local port so enqueued calls fail fast in the
    // background without touching the network.
    fn offline_config() -> OracleConfig {
        let mut config = OracleConfig::new("test-key".to_string());
        config.base_url = "http://127.0.0.1:9".to_string();
        config
    }

    fn sample_hint(position: Position, digit: Digit) -> Hint {
        Hint {
            position,
            digit,
            explanation: "Row 9 is missing only this digit.".to_string(),
        }
    }

    #[test]
    fn digits_go_to_the_selected_cell_and_respect_givens() {
        let (mut app_state, mut ui_state) = states();
        let open = Position::new(8, 8);
        let given = Position::new(0, 0);

        handle(&mut app_state, &mut ui_state, 0.0, Action::SelectCell(open));
        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::RequestDigit(Digit::D9),
        );
        assert_eq!(app_state.game.cell(open), CellState::Filled(Digit::D9));

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::SelectCell(given),
        );
        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::RequestDigit(Digit::D1),
        );
        assert_eq!(app_state.game.cell(given), CellState::Given(Digit::D5));
    }

    #[test]
    fn selection_moves_clamp_at_the_edges() {
        let (mut app_state, mut ui_state) = states();

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::MoveSelection(MoveDirection::Up),
        );
        assert_eq!(app_state.selected_cell, Some(Position::new(0, 0)));

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::MoveSelection(MoveDirection::Right),
        );
        assert_eq!(app_state.selected_cell, Some(Position::new(1, 0)));

        handle(&mut app_state, &mut ui_state, 0.0, Action::ClearSelection);
        assert_eq!(app_state.selected_cell, None);
    }

    #[test]
    fn start_oracle_without_config_reports_failure() {
        let (mut app_state, mut ui_state) = states();
        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::StartOracle(OracleTask::Hint),
        );
        assert!(!ui_state.is_busy());
        assert_eq!(app_state.status, "Error: Could not get a hint.");
    }

    #[test]
    fn start_oracle_marks_busy_and_ignores_concurrent_starts() {
        let (mut app_state, mut ui_state) = states();
        ui_state.oracle_config = Some(offline_config());

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::StartOracle(OracleTask::Generate(Difficulty::Medium)),
        );
        assert!(ui_state.is_busy());
        assert_eq!(ui_state.latest_seq(), 1);
        assert_eq!(app_state.status, "Generating medium puzzle...");

        // A second trigger while busy changes nothing.
        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::StartOracle(OracleTask::Solve),
        );
        assert_eq!(ui_state.latest_seq(), 1);
        assert!(matches!(
            ui_state.busy_kind(),
            Some(OracleCallKind::Generate(Difficulty::Medium))
        ));
    }

    #[test]
    fn stale_outcomes_are_discarded() {
        let (mut app_state, mut ui_state) = states();
        let before = app_state.game.clone();
        let _ = ui_state.issue_seq();
        let _ = ui_state.issue_seq(); // latest is now 2

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::ApplyOracleOutcome {
                seq: 1,
                kind: OracleCallKind::Generate(Difficulty::Easy),
                outcome: Ok(OracleResponse::NewPuzzle(DigitGrid::new())),
            },
        );

        assert_eq!(app_state.game, before);
    }

    #[test]
    fn failed_outcomes_leave_the_grid_and_show_a_message() {
        let (mut app_state, mut ui_state) = states();
        let before = app_state.game.clone();
        let seq = ui_state.issue_seq();

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::ApplyOracleOutcome {
                seq,
                kind: OracleCallKind::Solve,
                outcome: Err(OracleError::MalformedResponse),
            },
        );

        assert_eq!(app_state.game, before);
        assert_eq!(app_state.status, "Error: The oracle could not solve the puzzle.");
        assert!(!ui_state.is_busy());
    }

    #[test]
    fn new_puzzles_replace_the_session() {
        let (mut app_state, mut ui_state) = states();
        app_state.selected_cell = Some(Position::new(3, 3));
        let seq = ui_state.issue_seq();

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::ApplyOracleOutcome {
                seq,
                kind: OracleCallKind::Generate(Difficulty::Hard),
                outcome: Ok(OracleResponse::NewPuzzle(puzzle())),
            },
        );

        assert_eq!(app_state.selected_cell, None);
        assert_eq!(app_state.status, "New hard puzzle ready!");
        assert!(app_state.game.cell(Position::new(0, 0)).is_given());
    }

    #[test]
    fn solutions_fill_the_grid_unless_they_contradict_givens() {
        let (mut app_state, mut ui_state) = states();
        let solution: DigitGrid = SOLVED.parse().unwrap();
        let seq = ui_state.issue_seq();

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::ApplyOracleOutcome {
                seq,
                kind: OracleCallKind::Solve,
                outcome: Ok(OracleResponse::Solution(solution)),
            },
        );
        assert!(app_state.game.is_solved());
        assert_eq!(app_state.status, "Puzzle solved by the oracle!");

        // A "solution" that rewrites a given is treated as a failed call.
        let (mut app_state, mut ui_state) = states();
        let before = app_state.game.clone();
        let mut contradicting: DigitGrid = SOLVED.parse().unwrap();
        contradicting[Position::new(0, 0)] = Some(Digit::D1);
        let seq = ui_state.issue_seq();

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::ApplyOracleOutcome {
                seq,
                kind: OracleCallKind::Solve,
                outcome: Ok(OracleResponse::Solution(contradicting)),
            },
        );
        assert_eq!(app_state.game, before);
        assert_eq!(app_state.status, "Error: The oracle could not solve the puzzle.");
    }

    #[test]
    fn hints_show_their_explanation_then_apply_after_the_delay() {
        let (mut app_state, mut ui_state) = states();
        let open = Position::new(8, 8);
        let seq = ui_state.issue_seq();

        handle(
            &mut app_state,
            &mut ui_state,
            10.0,
            Action::ApplyOracleOutcome {
                seq,
                kind: OracleCallKind::Hint,
                outcome: Ok(OracleResponse::Hint(sample_hint(open, Digit::D9))),
            },
        );
        assert_eq!(app_state.status, "Row 9 is missing only this digit.");
        assert!(app_state.game.cell(open).is_empty());

        // Not yet due.
        let mut queue = ActionRequestQueue::default();
        poll_pending_hint(&ui_state, 10.0 + HINT_APPLY_DELAY - 0.1, &mut queue);
        assert!(queue.take_all().is_empty());

        // Due now.
        poll_pending_hint(&ui_state, 10.0 + HINT_APPLY_DELAY, &mut queue);
        let actions = queue.take_all();
        assert_eq!(actions.len(), 1);
        for action in actions {
            handle(&mut app_state, &mut ui_state, 12.0, action);
        }

        assert_eq!(app_state.game.cell(open), CellState::Filled(Digit::D9));
        assert_eq!(ui_state.pending_hint, None);
    }

    #[test]
    fn editing_the_hinted_cell_cancels_the_pending_hint() {
        let (mut app_state, mut ui_state) = states();
        let open = Position::new(8, 8);
        let seq = ui_state.issue_seq();

        handle(
            &mut app_state,
            &mut ui_state,
            0.0,
            Action::ApplyOracleOutcome {
                seq,
                kind: OracleCallKind::Hint,
                outcome: Ok(OracleResponse::Hint(sample_hint(open, Digit::D9))),
            },
        );
        assert!(ui_state.pending_hint.is_some());

        // The player fills the hinted cell during the delay window.
        handle(&mut app_state, &mut ui_state, 1.0, Action::SelectCell(open));
        handle(
            &mut app_state,
            &mut ui_state,
            1.0,
            Action::RequestDigit(Digit::D2),
        );
        assert_eq!(ui_state.pending_hint, None);

        // Even a straggling apply action no longer changes the cell.
        handle(&mut app_state, &mut ui_state, 3.0, Action::ApplyPendingHint);
        assert_eq!(app_state.game.cell(open), CellState::Filled(Digit::D2));
    }

    #[test]
    fn hint_is_not_applied_over_a_changed_cell() {
        let (mut app_state, mut ui_state) = states();
        let open = Position::new(8, 8);

        // Pending hint recorded against an empty cell, but the cell gets
        // filled through some other path before the delay elapses.
        ui_state.pending_hint = Some(PendingHint {
            hint: sample_hint(open, Digit::D9),
            apply_at: 1.0,
            observed: CellState::Empty,
        });
        app_state.game.set_digit(open, Digit::D4).unwrap();

        handle(&mut app_state, &mut ui_state, 2.0, Action::ApplyPendingHint);
        assert_eq!(app_state.game.cell(open), CellState::Filled(Digit::D4));
    }
}
