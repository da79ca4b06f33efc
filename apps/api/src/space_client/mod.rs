/// Space client — the single point of entry for all calls to the remote
/// inference Space.
///
/// ARCHITECTURAL RULE: no other module may talk to the Space directly.
/// Handlers depend on the `Predictor` trait so tests can substitute a mock.
///
/// The Space exposes named endpoints through the Gradio call protocol:
/// a POST enqueues the call and returns an event id, a follow-up GET
/// streams server-sent events until a `complete` frame carries the
/// output list. One attempt per request; a failed call fails the request.
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Named endpoints exposed by the Space.
pub const RECOMMENDATIONS_ENDPOINT: &str = "/get_course_recommendations";
pub const RATINGS_ENDPOINT: &str = "/submit_all_ratings";
pub const TRAIN_ENDPOINT: &str = "/train_model";
pub const COURSES_ENDPOINT: &str = "/get_available_courses_info";

const CALL_PATH: &str = "/gradio_api/call";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum SpaceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Space returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Space reported an error event: {0}")]
    Remote(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Space returned no result")]
    EmptyResult,
}

#[derive(Debug, Deserialize)]
struct CallHandle {
    event_id: String,
}

/// Interface the handlers call. Object-safe so `AppState` can hold a
/// mock in tests.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Calls the named endpoint with positional arguments and returns the
    /// ordered list of outputs.
    async fn predict(&self, args: Vec<Value>, api_name: &str) -> Result<Vec<Value>, SpaceError>;
}

/// The single Space client shared by all handlers for the process lifetime.
#[derive(Clone)]
pub struct SpaceClient {
    client: Client,
    base_url: String,
}

impl SpaceClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
        }
    }
}

#[async_trait]
impl Predictor for SpaceClient {
    async fn predict(&self, args: Vec<Value>, api_name: &str) -> Result<Vec<Value>, SpaceError> {
        // Step 1: enqueue the call. `api_name` carries its leading slash.
        let call_url = format!("{}{}{}", self.base_url, CALL_PATH, api_name);
        let response = self
            .client
            .post(&call_url)
            .json(&serde_json::json!({ "data": args }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpaceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let handle: CallHandle = response.json().await?;
        debug!("Space call enqueued: {} ({})", api_name, handle.event_id);

        // Step 2: read the event stream until the terminal frame.
        let result_url = format!("{call_url}/{}", handle.event_id);
        let response = self.client.get(&result_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SpaceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        parse_event_stream(&body)
    }
}

/// Extracts the output list from a Gradio event stream.
///
/// The stream is a sequence of `event:`/`data:` line pairs. The output
/// list rides on the `data:` line of the `complete` event; an `error`
/// event carries a failure payload instead. Heartbeat and progress
/// frames are skipped.
fn parse_event_stream(body: &str) -> Result<Vec<Value>, SpaceError> {
    let mut current_event = "";

    for line in body.lines() {
        if let Some(name) = line.strip_prefix("event:") {
            current_event = name.trim();
        } else if let Some(payload) = line.strip_prefix("data:") {
            let payload = payload.trim();
            match current_event {
                "complete" => {
                    let values: Vec<Value> = serde_json::from_str(payload)?;
                    return Ok(values);
                }
                "error" => {
                    let message = match serde_json::from_str::<Value>(payload) {
                        Ok(Value::String(s)) => s,
                        Ok(Value::Null) | Err(_) => payload.to_string(),
                        Ok(other) => other.to_string(),
                    };
                    return Err(SpaceError::Remote(message));
                }
                _ => {}
            }
        }
    }

    Err(SpaceError::EmptyResult)
}
