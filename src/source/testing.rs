//! Scripted transport for tests.
//!
//! Responses are queued up front and handed out in order.  Every request is
//! recorded so tests can assert on call counts and bodies.  With
//! [`MockTransport::gated`] each call waits for [`MockTransport::release`]
//! before answering, which keeps a fetch in flight for as long as a test
//! needs.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use super::Transport;
use crate::error::TransportError;
use crate::query::RequestDescriptor;

pub(crate) enum Scripted {
    Body(Bytes),
    Fail(TransportError),
    Panic(&'static str),
}

pub(crate) struct MockTransport {
    responses: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<RequestDescriptor>>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Calls block until [`release`](Self::release) is called once per call.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn respond_json(self, body: Value) -> Self {
        self.push(Scripted::Body(Bytes::from(body.to_string())));
        self
    }

    pub fn respond_raw(self, body: &'static [u8]) -> Self {
        self.push(Scripted::Body(Bytes::from_static(body)));
        self
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.push(Scripted::Fail(error));
        self
    }

    /// The call panics instead of answering.
    pub fn panic_with(self, message: &'static str) -> Self {
        self.push(Scripted::Panic(message));
        self
    }

    pub fn push(&self, response: Scripted) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn execute(&self, request: &RequestDescriptor) -> Result<Bytes, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());

        if let Some(gate) = &self.gate {
            gate.acquire()
                .await
                .map_err(|e| TransportError::Other(e.to_string()))?
                .forget();
        }

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Body(bytes)) => Ok(bytes),
            Some(Scripted::Fail(e)) => Err(e),
            Some(Scripted::Panic(message)) => panic!("{message}"),
            None => Err(TransportError::Other("no scripted response".into())),
        }
    }
}

/// A well-formed launch record.
pub(crate) fn launch_json(id: &str, flight_number: u32) -> Value {
    json!({
        "id": id,
        "flight_number": flight_number,
        "name": format!("Mission {flight_number}"),
        "date_utc": "2020-06-13T09:21:00.000Z",
        "success": true,
        "links": {
            "patch": { "large": "https://images2.imgbox.com/patch.png" },
            "flickr": { "original": [] }
        }
    })
}

/// A page envelope around `ids`, numbered from `first_flight`.
pub(crate) fn page_json(ids: &[&str], first_flight: u32, next_page: Option<u32>) -> Value {
    let docs: Vec<Value> = ids
        .iter()
        .zip(first_flight..)
        .map(|(id, n)| launch_json(id, n))
        .collect();
    json!({
        "docs": docs,
        "hasNextPage": next_page.is_some(),
        "nextPage": next_page,
    })
}
