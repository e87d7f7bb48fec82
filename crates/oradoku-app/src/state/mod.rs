mod app_state;
mod ui_state;

pub(crate) use self::{
    app_state::AppState,
    ui_state::{OracleCallKind, PendingCall, PendingHint, UiState},
};
