use async_trait::async_trait;
use photo_stylist::{
    Error, Result,
    llm::{GenerateContentRequest, GenerateContentResponse, LlmClient},
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// Scripted stand-in for the remote service. Answers per model name and
/// records every request it sees.
#[derive(Default)]
pub struct StubLlmClient {
    pub responses: Mutex<HashMap<String, Result<GenerateContentResponse>>>,
    pub requests: Mutex<Vec<(String, GenerateContentRequest)>>,
    pub gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub panics: Mutex<Vec<String>>,
}

impl StubLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, model: &str, response: GenerateContentResponse) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(model.to_string(), Ok(response));
        self
    }

    pub fn with_error(self, model: &str, error: Error) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(model.to_string(), Err(error));
        self
    }

    pub fn with_panic(self, model: &str) -> Self {
        self.panics.lock().unwrap().push(model.to_string());
        self
    }

    /// Holds calls for `model` until the returned handle is notified.
    pub fn gate(&self, model: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(model.to_string(), notify.clone());
        notify
    }

    pub fn get_requests(&self) -> Vec<(String, GenerateContentRequest)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, model: &str) -> Vec<GenerateContentRequest> {
        self.get_requests()
            .into_iter()
            .filter(|(m, _)| m == model)
            .map(|(_, request)| request)
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Polls until at least `count` requests have arrived.
    pub async fn wait_for_requests(&self, count: usize) {
        for _ in 0..400 {
            if self.request_count() >= count {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!(
            "expected {} requests, saw {}",
            count,
            self.request_count()
        );
    }
}

#[async_trait]
impl LlmClient for StubLlmClient {
    async fn generate_content(
        &self,
        model: &str,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((model.to_string(), request));

        let gate = self.gates.lock().unwrap().get(model).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.panics.lock().unwrap().iter().any(|m| m == model) {
            panic!("stub client told to panic for {}", model);
        }

        self.responses
            .lock()
            .unwrap()
            .get(model)
            .cloned()
            .unwrap_or_else(|| Err(Error::internal(format!("No stub response for {}", model))))
    }
}
