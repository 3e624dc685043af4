use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use super::provider::{FetchError, FetchRequest, Provider, RawFetcher, RawPayload};

/// Canned-response fetcher that records every request it sees
#[derive(Debug, Default, Clone)]
pub struct MockFetcher {
    calls: Arc<Mutex<Vec<FetchRequest>>>,
    responses: Arc<Mutex<HashMap<Provider, Result<Value, FetchError>>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the JSON body returned for a provider
    pub fn with_body(self, provider: Provider, body: Value) -> Self {
        self.responses.lock().unwrap().insert(provider, Ok(body));
        self
    }

    /// Builder method to make a provider fail
    pub fn with_error(self, provider: Provider, error: FetchError) -> Self {
        self.responses.lock().unwrap().insert(provider, Err(error));
        self
    }

    /// Get all recorded requests
    pub fn get_calls(&self) -> Vec<FetchRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RawFetcher for MockFetcher {
    async fn fetch_raw(&self, request: FetchRequest) -> Result<RawPayload, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        let response = self
            .responses
            .lock()
            .unwrap()
            .get(&request.provider)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NetworkError("No response configured".to_string())));

        response.map(|body| RawPayload::new(request.provider, request.subject, body))
    }
}
