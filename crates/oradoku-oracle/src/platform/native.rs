//! Native oracle transport using a background thread and channel.

use std::sync::{OnceLock, mpsc};

use crate::{OracleConfig, OracleError, OracleRequest, OracleResult, protocol};

struct OracleRequestEnvelope {
    request: OracleRequest,
    config: OracleConfig,
    response_tx: mpsc::Sender<OracleResult>,
}

// Shared worker thread sender reused across requests.
static WORKER_SENDER: OnceLock<mpsc::Sender<OracleRequestEnvelope>> = OnceLock::new();

/// A handle for polling an in-flight oracle exchange.
pub struct OracleHandle {
    receiver: mpsc::Receiver<OracleResult>,
}

impl std::fmt::Debug for OracleHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleHandle").finish()
    }
}

impl OracleHandle {
    /// Attempts to poll for a completed outcome.
    ///
    /// Returns `None` while the exchange is still in flight. A vanished
    /// worker surfaces as an in-band [`OracleError::Disconnected`], which
    /// callers treat like any other failed call.
    pub fn poll(&mut self) -> Option<OracleResult> {
        use mpsc::TryRecvError;

        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(OracleError::Disconnected)),
        }
    }
}

fn worker_sender() -> &'static mpsc::Sender<OracleRequestEnvelope> {
    WORKER_SENDER.get_or_init(|| {
        let (tx, rx) = mpsc::channel::<OracleRequestEnvelope>();
        std::thread::spawn(move || {
            let client = reqwest::blocking::Client::new();
            while let Ok(envelope) = rx.recv() {
                let outcome = execute(&client, &envelope.request, &envelope.config);
                let _ = envelope.response_tx.send(outcome);
            }
        });
        tx
    })
}

/// Starts the shared worker thread without sending a request.
#[expect(clippy::unnecessary_wraps)]
pub fn warm_up() -> Result<(), OracleError> {
    let _ = worker_sender();
    Ok(())
}

/// Enqueues an oracle exchange on the shared worker thread and returns a
/// handle for polling its completion.
///
/// # Errors
///
/// Returns [`OracleError::Disconnected`] if the worker thread has died.
pub fn enqueue(
    request: OracleRequest,
    config: &OracleConfig,
) -> Result<OracleHandle, OracleError> {
    let worker_tx = worker_sender();

    let (response_tx, response_rx) = mpsc::channel();
    worker_tx
        .send(OracleRequestEnvelope {
            request,
            config: config.clone(),
            response_tx,
        })
        .map_err(|_| OracleError::Disconnected)?;

    Ok(OracleHandle {
        receiver: response_rx,
    })
}

fn execute(
    client: &reqwest::blocking::Client,
    request: &OracleRequest,
    config: &OracleConfig,
) -> OracleResult {
    let url = protocol::request_url(request, config);
    let body = protocol::build_body(request);
    let http_response = client
        .post(url)
        .json(&body)
        .send()
        .and_then(reqwest::blocking::Response::error_for_status)
        .map_err(|err| {
            log::warn!("oracle request failed in transit: {err}");
            OracleError::Transport
        })?;
    let text = http_response.text().map_err(|err| {
        log::warn!("oracle reply could not be read: {err}");
        OracleError::Transport
    })?;
    protocol::parse_reply(request, &text)
}
