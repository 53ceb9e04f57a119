//! In-memory transport shared by unit tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::EntityTransport;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Start(String),
    End(String),
}

/// Scripted transport. Unscripted paths succeed with `null`.
#[derive(Default)]
pub struct MockTransport {
    responses: RefCell<HashMap<String, Result<Value, ApiError>>>,
    pub events: RefCell<Vec<Event>>,
    pub latency: Duration,
}

impl MockTransport {
    pub fn new() -> Self {
        Self { latency: Duration::from_millis(5), ..Self::default() }
    }

    pub fn respond(self, path: &str, response: Result<Value, ApiError>) -> Self {
        self.responses.borrow_mut().insert(path.to_owned(), response);
        self
    }

    pub fn started(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Start(path) => Some(path.clone()),
                Event::End(_) => None,
            })
            .collect()
    }

    async fn call(&self, method: &str, path: &str) -> Result<Value, ApiError> {
        let key = format!("{method} {path}");
        self.events.borrow_mut().push(Event::Start(key.clone()));
        tokio::time::sleep(self.latency).await;
        self.events.borrow_mut().push(Event::End(key));
        self.responses.borrow().get(path).cloned().unwrap_or(Ok(Value::Null))
    }
}

#[async_trait::async_trait(?Send)]
impl EntityTransport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.call("GET", path).await
    }

    async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.call("DELETE", path).await
    }
}
