use oradoku_game::CellState;
use oradoku_oracle::{Difficulty, Hint, OracleConfig, OracleHandle};

// UiState holds ephemeral run state: the in-flight oracle call, the
// request sequence counter, and a hint waiting out its display delay.
// It is not part of the rendered truth; view models read it each frame.
#[derive(Debug)]
pub(crate) struct UiState {
    pub(crate) oracle_config: Option<OracleConfig>,
    pub(crate) pending_call: Option<PendingCall>,
    pub(crate) pending_hint: Option<PendingHint>,
    issued_seq: u64,
}

impl UiState {
    #[must_use]
    pub(crate) fn new(oracle_config: Option<OracleConfig>) -> Self {
        Self {
            oracle_config,
            pending_call: None,
            pending_hint: None,
            issued_seq: 0,
        }
    }

    /// Issues the next request sequence number.
    pub(crate) fn issue_seq(&mut self) -> u64 {
        self.issued_seq += 1;
        self.issued_seq
    }

    /// Returns the sequence number of the latest issued request.
    ///
    /// An outcome tagged with anything older is stale and must not be
    /// applied.
    #[must_use]
    pub(crate) fn latest_seq(&self) -> u64 {
        self.issued_seq
    }

    #[must_use]
    pub(crate) fn is_busy(&self) -> bool {
        self.pending_call.is_some()
    }

    #[must_use]
    pub(crate) fn busy_kind(&self) -> Option<OracleCallKind> {
        self.pending_call.as_ref().map(|call| call.kind)
    }
}

/// An oracle exchange in flight.
#[derive(Debug)]
pub(crate) struct PendingCall {
    pub(crate) handle: OracleHandle,
    pub(crate) seq: u64,
    pub(crate) kind: OracleCallKind,
}

/// Which oracle operation a call (or its outcome) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OracleCallKind {
    Generate(Difficulty),
    Solve,
    Hint,
    Extract,
}

// The hint digit waits out a display delay before it is applied, so the
// player reads the explanation before the cell changes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingHint {
    pub(crate) hint: Hint,
    /// UI-clock time at which the digit is applied.
    pub(crate) apply_at: f64,
    /// Cell content when the hint arrived; if it differs at apply time,
    /// the hint is cancelled instead of applied.
    pub(crate) observed: CellState,
}
