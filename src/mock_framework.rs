//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and the receiver its gateway
//! would own, then helpers like [`expect_get`] or [`expect_action`] to assert
//! what was sent and to answer it. [`StubTransport`] stands in for the HTTP
//! layer when the real gateway should run.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest, Response};
use crate::api::{ApiBody, ApiCall, Transport};
use crate::controls::{Notice, Notifier};
use crate::error::ApiError;

/// Creates a mock client and a receiver for asserting requests.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreateParams, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request
pub async fn expect_list<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Query, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Patch, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { id, patch, respond_to }) => Some((id, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<()>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request
pub async fn expect_action<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<ApiBody>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Command request
pub async fn expect_command<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Command, Response<ApiBody>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Command { command, respond_to }) => Some((command, respond_to)),
        _ => None,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Records every call and answers from a queue of canned responses.
///
/// An exhausted queue answers with a network error.
#[derive(Default)]
pub struct StubTransport {
    calls: Mutex<Vec<ApiCall>>,
    responses: Mutex<VecDeque<Result<ApiBody, ApiError>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: Result<ApiBody, ApiError>) {
        lock(&self.responses).push_back(response);
    }

    pub fn push_json(&self, value: Value) {
        self.push(Ok(ApiBody::Json(value)));
    }

    pub fn push_text(&self, text: &str) {
        self.push(Ok(ApiBody::Text(text.to_string())));
    }

    pub fn push_empty(&self) {
        self.push(Ok(ApiBody::Empty));
    }

    pub fn push_error(&self, error: ApiError) {
        self.push(Err(error));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn execute(&self, call: ApiCall) -> Result<ApiBody, ApiError> {
        lock(&self.calls).push(call);
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no stubbed response".to_string())))
    }
}

/// Keeps every notice for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        lock(&self.notices).push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{User, UserCreate};

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<User>(10);

        let create_task = tokio::spawn(async move {
            let user = UserCreate {
                username: "test".to_string(),
                email: "test@example.com".to_string(),
                password: "pw".to_string(),
                first_name: None,
                last_name: None,
                phone_number: None,
                roles: vec![],
            };
            client.create(user).await
        });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.username, "test");
        responder.send(Ok(User::new("user_1", "test"))).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result.unwrap().id, "user_1");
    }

    #[tokio::test]
    async fn test_stub_transport_replays_in_order() {
        let stub = StubTransport::new();
        stub.push_text("first");
        stub.push_error(ApiError::NotFound("gone".into()));

        assert_eq!(stub.execute(ApiCall::get(["a"])).await, Ok(ApiBody::Text("first".into())));
        assert_eq!(stub.execute(ApiCall::get(["b"])).await, Err(ApiError::NotFound("gone".into())));
        assert!(matches!(stub.execute(ApiCall::get(["c"])).await, Err(ApiError::Network(_))));
        assert_eq!(stub.calls().len(), 3);
    }
}
