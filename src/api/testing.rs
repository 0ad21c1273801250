//! In-memory transport for client tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use super::{ApiClient, ApiRequest, RawResponse, Transport};
use crate::error::ApiError;
use crate::session::{MemoryStore, Session};

pub const BASE: &str = "https://api.test";

/// Replays queued responses in order and records every request sent
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<ApiRequest>>>,
    replies: Arc<Mutex<VecDeque<Result<RawResponse, ApiError>>>>,
}

impl RecordingTransport {
    pub fn reply(&self, status: u16, body: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(ApiError::Network(message.to_string())));
        self
    }

    pub fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        self.sent.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no reply queued for request")
    }
}

/// Client over a fresh memory session; returns the pieces tests inspect
pub fn client() -> (ApiClient<RecordingTransport>, RecordingTransport, MemoryStore) {
    let store = MemoryStore::default();
    let transport = RecordingTransport::default();
    let client = ApiClient::new(BASE, Session::restore(store.clone()), transport.clone());
    (client, transport, store)
}
