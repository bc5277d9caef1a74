//! Test doubles shared by the grid integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use evolugrid_lib::error::TransportError;
use evolugrid_lib::filter::FilterEntry;
use evolugrid_lib::host::Controls;
use evolugrid_lib::host::Host;
use evolugrid_lib::response::ResponsePayload;
use evolugrid_lib::response::Row;
use evolugrid_lib::transport::Transport;
use evolugrid_lib::view::Element;
use serde_json::Value;
use serde_json::json;
use tokio::sync::oneshot;

pub type Reply = Result<ResponsePayload, TransportError>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

/// A request as seen by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub endpoint_url: String,
    pub params: Vec<FilterEntry>,
}

impl Request {
    /// Returns the value of a parameter, rendered as text.
    pub fn param(&self, name: &str) -> Option<String> {
        self.params
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| entry.value.to_string())
    }

    pub fn names(&self) -> Vec<&str> {
        self.params.iter().map(|entry| entry.name.as_str()).collect()
    }
}

/// Transport answering from a script, in request order.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an immediate reply.
    pub fn reply(&self, reply: Reply) {
        self.script.lock().unwrap().push_back(Scripted::Ready(reply));
    }

    /// Queues a reply that is held back until the returned sender fires.
    pub fn gate(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.script.lock().unwrap().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Request {
        self.requests().pop().expect("no request was made")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, endpoint_url: &str, params: &[FilterEntry]) -> Result<ResponsePayload, TransportError> {
        self.requests.lock().unwrap().push(Request {
            endpoint_url: endpoint_url.to_string(),
            params: params.to_vec(),
        });

        let scripted = self.script.lock().unwrap().pop_front();
        match scripted {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or_else(|_| Err(TransportError::http(499, "gate dropped"))),
            None => Err(TransportError::http(500, "no scripted reply")),
        }
    }
}

/// A call the grid made into its host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Controls { selector: String, enabled: bool },
    Loader { visible: bool },
    Count(Option<u64>),
    Opened(String),
}

/// Host recording every collaborator call.
#[derive(Default)]
pub struct RecordingHost {
    form: Mutex<Vec<FilterEntry>>,
    form_reads: Mutex<usize>,
    events: Mutex<Vec<HostEvent>>,
    updates: Mutex<Vec<Element>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the values the filter form serializes to.
    pub fn set_form(&self, entries: Vec<FilterEntry>) {
        *self.form.lock().unwrap() = entries;
    }

    pub fn form_reads(&self) -> usize {
        *self.form_reads.lock().unwrap()
    }

    pub fn events(&self) -> Vec<HostEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn last_container(&self) -> Option<Element> {
        self.updates.lock().unwrap().last().cloned()
    }
}

impl Host for RecordingHost {
    fn serialize_form(&self, _selector: &str) -> Vec<FilterEntry> {
        *self.form_reads.lock().unwrap() += 1;
        self.form.lock().unwrap().clone()
    }

    fn set_controls_enabled(&self, controls: Controls<'_>, enabled: bool) {
        let selector = match controls {
            Controls::SubmitButton(selector) | Controls::FormButtons(selector) => selector.to_string(),
        };
        self.events.lock().unwrap().push(HostEvent::Controls { selector, enabled });
    }

    fn set_loader_visible(&self, _selector: &str, visible: bool) {
        self.events.lock().unwrap().push(HostEvent::Loader { visible });
    }

    fn set_count(&self, _selector: &str, count: Option<u64>) {
        self.events.lock().unwrap().push(HostEvent::Count(count));
    }

    fn open_url(&self, url: &str) {
        self.events.lock().unwrap().push(HostEvent::Opened(url.to_string()));
    }

    fn container_updated(&self, container: &Element) {
        self.updates.lock().unwrap().push(container.clone());
    }
}

/// Builds a row from a JSON object literal.
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

/// `n` rows `{"id": first..first+n}`.
pub fn rows(first: u64, n: u64) -> Vec<Row> {
    (first..first + n).map(|id| row(json!({ "id": id }))).collect()
}

pub fn payload(count: Option<u64>, data: Vec<Row>) -> Reply {
    Ok(ResponsePayload::new(count, data))
}
