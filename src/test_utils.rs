//! Fixtures shared by unit tests

use crate::error::{Error, Result};
use crate::source::{AsyncPageSource, PageSource};
use crate::types::{JsonObject, JsonValue, Page};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub fn page(value: JsonValue) -> Page {
    Page::from_value(value).expect("fixture page must be an object")
}

fn script(bodies: Vec<JsonValue>) -> VecDeque<Result<Page>> {
    bodies.into_iter().map(|body| Ok(page(body))).collect()
}

/// Replays a fixed list of responses and records every request
#[derive(Debug, Default)]
pub struct ScriptedSource {
    responses: VecDeque<Result<Page>>,
    pub calls: Vec<JsonObject>,
}

impl ScriptedSource {
    pub fn new(bodies: Vec<JsonValue>) -> Self {
        Self {
            responses: script(bodies),
            calls: Vec::new(),
        }
    }

    /// Make the call at `index` fail instead of returning its page
    pub fn failing_at(mut self, index: usize, message: &str) -> Self {
        self.responses[index] = Err(Error::source_failure(message));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }
}

impl PageSource for ScriptedSource {
    fn fetch(&mut self, params: &JsonObject) -> Result<Page> {
        self.calls.push(params.clone());
        self.responses
            .pop_front()
            .unwrap_or_else(|| Err(Error::source_failure("script exhausted")))
    }
}

/// Async variant of [`ScriptedSource`] that also appends `fetch{n}` to a
/// shared event log, so tests can check interleaving with callbacks.
#[derive(Debug, Default)]
pub struct SharedScript {
    responses: Mutex<VecDeque<Result<Page>>>,
    calls: Mutex<Vec<JsonObject>>,
    log: Arc<Mutex<Vec<String>>>,
}

impl SharedScript {
    pub fn new(bodies: Vec<JsonValue>) -> Self {
        Self {
            responses: Mutex::new(script(bodies)),
            ..Default::default()
        }
    }

    pub fn failing_at(self, index: usize, message: &str) -> Self {
        self.responses.lock().unwrap()[index] = Err(Error::source_failure(message));
        self
    }

    pub fn log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.log)
    }

    pub fn calls(&self) -> Vec<JsonObject> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl AsyncPageSource for SharedScript {
    async fn fetch(&self, params: &JsonObject) -> Result<Page> {
        let response = {
            let mut calls = self.calls.lock().unwrap();
            let index = calls.len();
            calls.push(params.clone());
            self.log.lock().unwrap().push(format!("fetch{index}"));
            self.responses.lock().unwrap().pop_front()
        };
        tokio::task::yield_now().await;
        response.unwrap_or_else(|| Err(Error::source_failure("script exhausted")))
    }
}
