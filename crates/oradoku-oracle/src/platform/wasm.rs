//! Browser oracle transport.
//!
//! Each exchange runs as a fetch-backed request spawned on the page's
//! event loop; the outcome is parked in a shared cell that the UI polls
//! every frame. No web worker is involved — the work is network-bound,
//! not CPU-bound.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{OracleConfig, OracleError, OracleRequest, OracleResult, protocol};

/// A handle for polling an in-flight oracle exchange.
pub struct OracleHandle {
    outcome: Rc<RefCell<Option<OracleResult>>>,
}

impl std::fmt::Debug for OracleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleHandle").finish()
    }
}

impl OracleHandle {
    /// Attempts to poll for a completed outcome.
    ///
    /// Returns `None` while the exchange is still in flight.
    pub fn poll(&mut self) -> Option<OracleResult> {
        self.outcome.borrow_mut().take()
    }
}

/// Nothing to start on wasm; requests spawn on the event loop directly.
#[expect(clippy::unnecessary_wraps)]
pub fn warm_up() -> Result<(), OracleError> {
    Ok(())
}

/// Spawns an oracle exchange and returns a handle for polling its
/// completion.
///
/// # Errors
///
/// Infallible on this backend; the signature matches the native one.
#[expect(clippy::unnecessary_wraps)]
pub fn enqueue(
    request: OracleRequest,
    config: &OracleConfig,
) -> Result<OracleHandle, OracleError> {
    let outcome = Rc::new(RefCell::new(None));
    let cell = Rc::clone(&outcome);
    let config = config.clone();

    wasm_bindgen_futures::spawn_local(async move {
        let result = execute(&request, &config).await;
        *cell.borrow_mut() = Some(result);
    });

    Ok(OracleHandle { outcome })
}

async fn execute(request: &OracleRequest, config: &OracleConfig) -> OracleResult {
    let url = protocol::request_url(request, config);
    let body = protocol::build_body(request);
    let http_response = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|err| {
            log::warn!("oracle request failed in transit: {err}");
            OracleError::Transport
        })?;
    let text = http_response.text().await.map_err(|err| {
        log::warn!("oracle reply could not be read: {err}");
        OracleError::Transport
    })?;
    protocol::parse_reply(request, &text)
}
