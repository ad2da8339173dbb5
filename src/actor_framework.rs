use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{Debug, Display};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument};

use crate::api::{ApiBody, ApiCall, Transport};
use crate::error::ApiError;

// =============================================================================
// 1. THE ABSTRACTION (a backend resource and the calls that reach it)
// =============================================================================

/// A record the backend exposes as a REST resource.
///
/// Each hook maps one operation onto an [`ApiCall`]. Operations a resource does
/// not offer keep the default, which fails with [`ApiError::Unsupported`]
/// before anything is sent.
pub trait Entity: DeserializeOwned + Clone + Debug + Send + Sync + 'static {
    type Id: Clone + Send + Sync + Display + Debug + 'static;
    type CreateParams: Serialize + Send + Sync + Debug + 'static;
    type Patch: Serialize + Send + Sync + Debug + 'static;
    /// Which slice of the collection a listing returns.
    type Query: Send + Sync + Debug + 'static;
    /// Operations on one existing record.
    type Action: Send + Sync + Debug + 'static;
    /// Operations on the collection as a whole.
    type Command: Send + Sync + Debug + 'static;

    const KIND: &'static str;

    fn id(&self) -> &Self::Id;

    fn list_call(query: &Self::Query) -> Result<ApiCall, ApiError>;

    fn get_call(_id: &Self::Id) -> Result<ApiCall, ApiError> {
        Err(ApiError::unsupported(Self::KIND, "get"))
    }

    fn create_call(_params: &Self::CreateParams) -> Result<ApiCall, ApiError> {
        Err(ApiError::unsupported(Self::KIND, "create"))
    }

    fn update_call(_id: &Self::Id, _patch: &Self::Patch) -> Result<ApiCall, ApiError> {
        Err(ApiError::unsupported(Self::KIND, "update"))
    }

    fn delete_call(_id: &Self::Id) -> Result<ApiCall, ApiError> {
        Err(ApiError::unsupported(Self::KIND, "delete"))
    }

    fn action_call(_id: &Self::Id, _action: &Self::Action) -> Result<ApiCall, ApiError> {
        Err(ApiError::unsupported(Self::KIND, "actions"))
    }

    fn command_call(_command: &Self::Command) -> Result<ApiCall, ApiError> {
        Err(ApiError::unsupported(Self::KIND, "commands"))
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, ApiError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        params: T::CreateParams,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<ApiBody>,
    },
    Command {
        command: T::Command,
        respond_to: Response<ApiBody>,
    },
}

// =============================================================================
// 3. THE GENERIC GATEWAY
// =============================================================================

/// Owns the request channel for one resource kind and turns requests into
/// backend calls.
///
/// Each request runs on its own task so a slow call does not hold up the
/// others. When every client is dropped the gateway drains in-flight calls
/// and exits.
pub struct ResourceGateway<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    transport: Arc<dyn Transport>,
}

impl<T: Entity> ResourceGateway<T> {
    pub fn new(buffer_size: usize, transport: Arc<dyn Transport>) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let gateway = Self { receiver, transport };
        (gateway, ResourceClient::new(sender))
    }

    #[instrument(skip(self), fields(resource = T::KIND))]
    pub async fn run(mut self) {
        info!("Gateway started");
        let mut in_flight = JoinSet::new();
        loop {
            tokio::select! {
                request = self.receiver.recv() => match request {
                    Some(request) => {
                        in_flight.spawn(handle_request(self.transport.clone(), request));
                    }
                    None => break,
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        error!(error = %e, "Request task failed");
                    }
                }
            }
        }
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "Request task failed");
            }
        }
        info!("Gateway stopped");
    }
}

async fn send(transport: &dyn Transport, call: Result<ApiCall, ApiError>) -> Result<ApiBody, ApiError> {
    transport.execute(call?).await
}

#[instrument(skip_all, fields(resource = T::KIND))]
async fn handle_request<T: Entity>(transport: Arc<dyn Transport>, request: ResourceRequest<T>) {
    let transport = transport.as_ref();
    match request {
        ResourceRequest::Create { params, respond_to } => {
            let result = send(transport, T::create_call(&params))
                .await
                .and_then(ApiBody::json);
            let _ = respond_to.send(result);
        }
        ResourceRequest::Get { id, respond_to } => {
            debug!(id = %id, "Fetching");
            let result = match send(transport, T::get_call(&id)).await {
                Ok(body) => body.json::<Option<T>>(),
                Err(ApiError::NotFound(_)) => Ok(None),
                Err(e) => Err(e),
            };
            let _ = respond_to.send(result);
        }
        ResourceRequest::List { query, respond_to } => {
            debug!(query = ?query, "Listing");
            let result = send(transport, T::list_call(&query))
                .await
                .and_then(|body| match body {
                    ApiBody::Empty => Ok(Vec::new()),
                    body => body.json(),
                });
            let _ = respond_to.send(result);
        }
        ResourceRequest::Update { id, patch, respond_to } => {
            debug!(id = %id, "Updating");
            let result = send(transport, T::update_call(&id, &patch))
                .await
                .and_then(ApiBody::json);
            let _ = respond_to.send(result);
        }
        ResourceRequest::Delete { id, respond_to } => {
            debug!(id = %id, "Deleting");
            let result = send(transport, T::delete_call(&id)).await.map(|_| ());
            let _ = respond_to.send(result);
        }
        ResourceRequest::Action { id, action, respond_to } => {
            debug!(id = %id, action = ?action, "Performing action");
            let result = send(transport, T::action_call(&id, &action)).await;
            let _ = respond_to.send(result);
        }
        ResourceRequest::Command { command, respond_to } => {
            debug!(command = ?command, "Running command");
            let result = send(transport, T::command_call(&command)).await;
            let _ = respond_to.send(result);
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, ApiError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| ApiError::Gateway("Gateway closed".to_string()))?;
        response
            .await
            .map_err(|_| ApiError::Gateway("Gateway dropped".to_string()))?
    }

    pub async fn create(&self, params: T::CreateParams) -> Result<T, ApiError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, ApiError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn list(&self, query: T::Query) -> Result<Vec<T>, ApiError> {
        self.request(|respond_to| ResourceRequest::List { query, respond_to }).await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, ApiError> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to }).await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), ApiError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to }).await
    }

    pub async fn perform_action(&self, id: T::Id, action: T::Action) -> Result<ApiBody, ApiError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to }).await
    }

    pub async fn run_command(&self, command: T::Command) -> Result<ApiBody, ApiError> {
        self.request(|respond_to| ResourceRequest::Command { command, respond_to }).await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Method;
    use crate::mock_framework::StubTransport;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Deserialize)]
    struct Note {
        id: String,
        text: String,
    }

    #[derive(Debug, Serialize)]
    struct NoteCreate {
        text: String,
    }

    #[derive(Debug)]
    enum NoteAction {
        Pin,
    }

    impl Entity for Note {
        type Id = String;
        type CreateParams = NoteCreate;
        type Patch = ();
        type Query = ();
        type Action = NoteAction;
        type Command = ();

        const KIND: &'static str = "note";

        fn id(&self) -> &String {
            &self.id
        }

        fn list_call(_query: &()) -> Result<ApiCall, ApiError> {
            Ok(ApiCall::get(["api", "notes"]))
        }

        fn get_call(id: &String) -> Result<ApiCall, ApiError> {
            Ok(ApiCall::get(["api", "notes", id.as_str()]))
        }

        fn create_call(params: &NoteCreate) -> Result<ApiCall, ApiError> {
            ApiCall::post(["api", "notes"]).json(params)
        }

        fn action_call(id: &String, action: &NoteAction) -> Result<ApiCall, ApiError> {
            match action {
                NoteAction::Pin => Ok(ApiCall::put(["api", "notes", id.as_str(), "pin"])),
            }
        }
    }

    fn start(transport: Arc<StubTransport>) -> ResourceClient<Note> {
        let (gateway, client) = ResourceGateway::<Note>::new(8, transport);
        tokio::spawn(gateway.run());
        client
    }

    #[tokio::test]
    async fn test_gateway_round_trips() {
        let transport = Arc::new(StubTransport::new());
        transport.push_json(json!({"id": "n1", "text": "hello"}));
        transport.push_json(json!([{"id": "n1", "text": "hello"}]));
        transport.push_empty();
        let client = start(transport.clone());

        let note = client.create(NoteCreate { text: "hello".into() }).await.unwrap();
        assert_eq!(note.id, "n1");

        let notes = client.list(()).await.unwrap();
        assert_eq!(notes, vec![note]);

        client.perform_action("n1".into(), NoteAction::Pin).await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0].method, Method::Post);
        assert_eq!(calls[0].body, Some(json!({"text": "hello"})));
        assert_eq!(calls[2].path(), "/api/notes/n1/pin");
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let transport = Arc::new(StubTransport::new());
        transport.push_error(ApiError::NotFound("gone".into()));
        let client = start(transport);

        assert_eq!(client.get("missing".into()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unsupported_operations_send_nothing() {
        let transport = Arc::new(StubTransport::new());
        let client = start(transport.clone());

        let err = client.delete("n1".into()).await.unwrap_err();
        assert!(matches!(err, ApiError::Unsupported(_)));
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_closed_gateway_reports_error() {
        let (gateway, client) = ResourceGateway::<Note>::new(1, Arc::new(StubTransport::new()));
        drop(gateway);

        let err = client.list(()).await.unwrap_err();
        assert_eq!(err, ApiError::Gateway("Gateway closed".into()));
    }
}
