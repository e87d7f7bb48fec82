//! Request construction and reply parsing for the hosted model API.
//!
//! Each oracle operation posts a `generateContent` body: prompt parts
//! plus a `generationConfig` that pins the response to JSON conforming to
//! a fixed schema. The reply's first candidate text part is parsed as the
//! operation's payload, tolerating ```json code fences the model
//! sometimes emits despite the declared MIME type.

use base64::Engine as _;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
    OracleConfig, OracleError, OracleRequest, OracleResponse, OracleResult, wire,
};

impl OracleRequest {
    /// Returns the model this request should be served by.
    ///
    /// Solving needs the deeper reasoning model; generation, hints, and
    /// transcription run on the fast one.
    #[must_use]
    pub fn model<'a>(&self, config: &'a OracleConfig) -> &'a str {
        match self {
            OracleRequest::Solve { .. } => &config.deep_model,
            OracleRequest::Generate { .. }
            | OracleRequest::Hint { .. }
            | OracleRequest::ExtractImage { .. } => &config.fast_model,
        }
    }
}

/// Returns the POST URL for a request.
#[must_use]
pub fn request_url(request: &OracleRequest, config: &OracleConfig) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent?key={}",
        config.base_url,
        request.model(config),
        config.api_key,
    )
}

/// Builds the JSON body for a request.
#[must_use]
pub fn build_body(request: &OracleRequest) -> Value {
    match request {
        OracleRequest::Generate { difficulty } => {
            let prompt = format!(
                "Generate a new Sudoku puzzle with {difficulty} difficulty. \
                 Return it as a JSON object with a single key \"puzzle\" which is \
                 a 9x9 array. Use 0 for empty cells."
            );
            body_for(
                vec![text_part(&prompt)],
                json!({
                    "type": "OBJECT",
                    "properties": { "puzzle": grid_schema() },
                    "required": ["puzzle"],
                }),
            )
        }
        OracleRequest::Solve { grid } => {
            let prompt = format!(
                "Solve this Sudoku puzzle: {}. Replace every 0 with the correct \
                 number. Return only the solved 9x9 grid as a JSON array.",
                wire_json(grid),
            );
            body_for(vec![text_part(&prompt)], grid_schema())
        }
        OracleRequest::Hint { grid } => {
            let prompt = format!(
                "Here is a Sudoku puzzle in progress: {}. The player is stuck. \
                 Identify a single cell that can be solved with simple logic \
                 (without complex chains or guessing) and explain the reasoning. \
                 Return a JSON object with keys \"row\" (0-8), \"col\" (0-8), \
                 \"value\" (1-9), and \"explanation\".",
                wire_json(grid),
            );
            body_for(
                vec![text_part(&prompt)],
                json!({
                    "type": "OBJECT",
                    "properties": {
                        "row": { "type": "INTEGER" },
                        "col": { "type": "INTEGER" },
                        "value": { "type": "INTEGER" },
                        "explanation": { "type": "STRING" },
                    },
                    "required": ["row", "col", "value", "explanation"],
                }),
            )
        }
        OracleRequest::ExtractImage { bytes, mime_type } => {
            let data = base64::engine::general_purpose::STANDARD.encode(bytes);
            let prompt = "Analyze this image of a Sudoku puzzle. Extract the numbers \
                          and their positions. Return a 9x9 array representing the \
                          grid, using 0 for empty cells.";
            body_for(
                vec![
                    json!({ "inlineData": { "mimeType": mime_type, "data": data } }),
                    text_part(prompt),
                ],
                grid_schema(),
            )
        }
    }
}

/// Parses the HTTP reply body for `request` into an outcome.
///
/// # Errors
///
/// Returns [`OracleError::MalformedResponse`] when the reply is not valid
/// JSON or carries no text part, and [`OracleError::SchemaViolation`]
/// when the text does not decode as the operation's payload.
pub fn parse_reply(request: &OracleRequest, body: &str) -> OracleResult {
    let reply: GenerateContentReply = serde_json::from_str(body).map_err(|err| {
        log::warn!("oracle reply is not valid JSON: {err}");
        OracleError::MalformedResponse
    })?;
    let text = reply
        .candidates
        .into_iter()
        .find_map(|candidate| {
            candidate
                .content
                .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        })
        .ok_or_else(|| {
            log::warn!("oracle reply carries no text part");
            OracleError::MalformedResponse
        })?;
    let payload = strip_code_fences(&text);

    match request {
        OracleRequest::Generate { .. } => {
            let parsed: PuzzlePayload = parse_payload(&payload)?;
            wire::grid_from_wire(&parsed.puzzle).map(OracleResponse::NewPuzzle)
        }
        OracleRequest::Solve { .. } => {
            let rows: Vec<Vec<i64>> = parse_payload(&payload)?;
            wire::solution_from_wire(&rows).map(OracleResponse::Solution)
        }
        OracleRequest::Hint { .. } => {
            let hint: wire::HintWire = parse_payload(&payload)?;
            wire::hint_from_wire(hint).map(OracleResponse::Hint)
        }
        OracleRequest::ExtractImage { .. } => {
            let rows: Vec<Vec<i64>> = parse_payload(&payload)?;
            wire::grid_from_wire(&rows).map(OracleResponse::ExtractedPuzzle)
        }
    }
}

fn parse_payload<T: serde::de::DeserializeOwned>(payload: &str) -> Result<T, OracleError> {
    serde_json::from_str(payload).map_err(|err| {
        log::warn!("oracle payload does not match the expected schema: {err}");
        OracleError::SchemaViolation
    })
}

fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn wire_json(grid: &oradoku_core::DigitGrid) -> String {
    serde_json::to_string(&wire::grid_to_wire(grid)).expect("wire grids always serialize")
}

fn text_part(text: &str) -> Value {
    json!({ "text": text })
}

fn body_for(parts: Vec<Value>, response_schema: Value) -> Value {
    json!({
        "contents": [{ "parts": parts }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": response_schema,
        },
    })
}

fn grid_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": { "type": "ARRAY", "items": { "type": "INTEGER" } },
    })
}

#[derive(Debug, Deserialize)]
struct GenerateContentReply {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PuzzlePayload {
    puzzle: Vec<Vec<i64>>,
}
