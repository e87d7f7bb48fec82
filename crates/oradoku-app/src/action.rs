use std::mem;

use oradoku_core::{Digit, Position};
use oradoku_oracle::{Difficulty, OracleResult};

use crate::state::OracleCallKind;

#[derive(Debug)]
pub(crate) enum Action {
    SelectCell(Position),
    ClearSelection,
    MoveSelection(MoveDirection),
    RequestDigit(Digit),
    ClearCell,
    StartOracle(OracleTask),
    ApplyOracleOutcome {
        seq: u64,
        kind: OracleCallKind,
        outcome: OracleResult,
    },
    ApplyPendingHint,
}

/// The oracle operations the UI can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum OracleTask {
    Generate(Difficulty),
    Solve,
    Hint,
    ExtractImage { bytes: Vec<u8>, mime_type: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug, Default)]
pub(crate) struct ActionRequestQueue {
    actions: Vec<Action>,
}

impl ActionRequestQueue {
    pub(crate) fn request(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub(crate) fn take_all(&mut self) -> Vec<Action> {
        mem::take(&mut self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::{Action, ActionRequestQueue};

    #[test]
    fn take_all_returns_actions_and_clears_queue() {
        let mut queue = ActionRequestQueue::default();
        queue.request(Action::ClearSelection);
        queue.request(Action::ClearCell);

        let drained = queue.take_all();
        assert_eq!(drained.len(), 2);
        assert!(matches!(drained[0], Action::ClearSelection));
        assert!(matches!(drained[1], Action::ClearCell));

        let drained_again = queue.take_all();
        assert!(drained_again.is_empty());
    }
}
