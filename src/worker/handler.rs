//! Directory worker: runs gateway calls and folds their results into the store.
//!
//! Every operation holds a [`LoadingGuard`](crate::app::store::LoadingGuard) for its
//! whole duration, so the loading flag is cleared on success, on failure and when the
//! task is cancelled. Failures are logged and surfaced as the store's error message.
//! Loads take a [`LoadTicket`](crate::app::store::LoadTicket); a load whose ticket went
//! stale while the request was in flight is dropped instead of overwriting newer data.

use crate::app::{Store, Transition};
use crate::domain::{DirectoryError, Result, UserId, UserInput};
use crate::gateway::DirectoryGateway;
use crate::pipeline::PaginationPatch;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Executes [`WorkerMessage`]s against a gateway on behalf of the UI.
///
/// Cheap to clone: clones share the store and the gateway.
#[derive(Clone)]
pub struct DirectoryWorker {
    store: Store,
    gateway: Arc<dyn DirectoryGateway>,
}

impl DirectoryWorker {
    /// # Parameters
    ///
    /// * `store` - Store the results are dispatched into, shared with the UI
    /// * `gateway` - Backend the operations run against
    #[must_use]
    pub fn new(store: Store, gateway: Arc<dyn DirectoryGateway>) -> Self {
        Self { store, gateway }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Runs `message` on a tokio task and sends the response to `responses`.
    ///
    /// A closed response channel is not an error: the UI may already be shutting down.
    ///
    /// # Parameters
    ///
    /// * `message` - Operation to run, carrying the sender's trace context
    /// * `responses` - Channel the outcome is sent on once the task finishes
    ///
    /// # Returns
    ///
    /// The task handle. Dropping it does not cancel the task.
    pub fn spawn(
        &self,
        message: WorkerMessage,
        responses: UnboundedSender<WorkerResponse>,
    ) -> JoinHandle<()> {
        let worker = self.clone();
        tokio::spawn(async move {
            let response = worker.handle_message(message).await;
            if responses.send(response).is_err() {
                tracing::debug!("response channel closed, dropping worker response");
            }
        })
    }

    /// Processes one message and returns its outcome.
    ///
    /// The operation runs inside a `worker_handle_message` span whose parent is the
    /// span that built the message, when one was captured.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        let span = tracing::debug_span!("worker_handle_message", message_type = message.name());
        if let Some(parent) = message.trace_context().and_then(|tc| tc.to_parent_context()) {
            span.set_parent(parent);
        }

        self.dispatch_message(message).instrument(span).await
    }

    async fn dispatch_message(&self, message: WorkerMessage) -> WorkerResponse {
        match message {
            WorkerMessage::LoadUsers { .. } => self.handle_load_users().await,
            WorkerMessage::RefreshUser { id, .. } => self.handle_refresh_user(id).await,
            WorkerMessage::CreateUser { input, .. } => self.handle_create_user(input).await,
            WorkerMessage::UpdateUser { id, input, .. } => {
                self.handle_update_user(id, input).await
            }
            WorkerMessage::DeleteUser { id, .. } => self.handle_delete_user(id).await,
        }
    }

    /// Replaces the collection and publishes the new total.
    async fn handle_load_users(&self) -> WorkerResponse {
        let _loading = self.store.loading();
        let ticket = self.store.begin_load();

        let result = self.gateway.list().await;
        self.handle_gateway_result("load users", result, |users| {
            let count = users.len();
            let applied = self.store.dispatch_if_current(
                ticket,
                [
                    Transition::RecordsLoaded(users),
                    Transition::PaginationChanged(PaginationPatch::total_items(count)),
                ],
            );
            if applied {
                tracing::debug!(user_count = count, "users loaded");
                WorkerResponse::UsersLoaded { count }
            } else {
                WorkerResponse::StaleDiscarded
            }
        })
    }

    async fn handle_refresh_user(&self, id: UserId) -> WorkerResponse {
        let _loading = self.store.loading();

        let result = self.gateway.get(&id).await;
        self.handle_gateway_result("refresh user", result, |user| {
            self.store.dispatch(Transition::RecordUpdated(user));
            WorkerResponse::UserRefreshed { id }
        })
    }

    async fn handle_create_user(&self, input: UserInput) -> WorkerResponse {
        let _loading = self.store.loading();

        let result = self.gateway.create(&input).await;
        self.handle_gateway_result("create user", result, |user| {
            let id = user.id.clone();
            tracing::debug!(user_id = %id, "user created");
            self.store.dispatch(Transition::RecordCreated(user));
            WorkerResponse::UserCreated { id }
        })
    }

    async fn handle_update_user(&self, id: UserId, input: UserInput) -> WorkerResponse {
        let _loading = self.store.loading();

        let result = self.gateway.update(&id, &input).await;
        self.handle_gateway_result("update user", result, |user| {
            tracing::debug!(user_id = %id, "user updated");
            self.store.dispatch(Transition::RecordUpdated(user));
            WorkerResponse::UserUpdated { id }
        })
    }

    async fn handle_delete_user(&self, id: UserId) -> WorkerResponse {
        let _loading = self.store.loading();

        let result = self.gateway.delete(&id).await;
        self.handle_gateway_result("delete user", result, |deleted| {
            tracing::debug!(user_id = %deleted, "user deleted");
            self.store.dispatch(Transition::RecordDeleted(deleted.clone()));
            WorkerResponse::UserDeleted { id: deleted }
        })
    }

    /// Applies a successful result, or records the failure in the store.
    fn handle_gateway_result<T, F>(
        &self,
        operation: &str,
        result: Result<T>,
        on_success: F,
    ) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => on_success(value),
            Err(e) => self.fail(operation, &e),
        }
    }

    fn fail(&self, operation: &str, error: &DirectoryError) -> WorkerResponse {
        tracing::warn!(operation, kind = error.kind(), error = %error, "gateway operation failed");
        let message = error.to_string();
        self.store.dispatch(Transition::OperationFailed(message.clone()));
        WorkerResponse::Failed {
            operation: operation.to_string(),
            message,
        }
    }
}
