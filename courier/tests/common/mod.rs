#![allow(dead_code)]

use courier::{Call, HttpClient, Next, Pipe, Request, Response, StatusCode, testing::ScriptedEngine};
use std::sync::{Arc, Mutex};

// ============================================================================
// Calls and Engines
// ============================================================================

pub fn get(target: &str) -> Call {
    Call::new(Request::get(target).unwrap())
}

/// An engine answering every call with `status`.
pub fn answering(status: StatusCode) -> ScriptedEngine<Call> {
    ScriptedEngine::new(move |call: Call| Ok(call.with_response(Response::new(status))))
}

pub fn http_client() -> HttpClient {
    let client = HttpClient::new();
    client.set_engine(answering(StatusCode::OK));
    client
}

// ============================================================================
// Order Recording
// ============================================================================

/// Shared log of labels, used to observe the order stages run in.
#[derive(Clone, Default)]
pub struct OrderLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl OrderLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, label: impl Into<String>) {
        self.entries.lock().unwrap().push(label.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    /// A pipe that logs `label` and passes the call on.
    pub fn stage(&self, label: &'static str) -> LoggingStage {
        LoggingStage {
            log: self.clone(),
            label,
        }
    }
}

pub struct LoggingStage {
    log: OrderLog,
    label: &'static str,
}

impl Pipe<Call> for LoggingStage {
    fn pipe(&self, call: Call, next: Next<Call>) {
        self.log.push(self.label);
        next.proceed(call)
    }
}
